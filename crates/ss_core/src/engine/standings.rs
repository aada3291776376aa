//! League table.
//!
//! Ordering: points (desc), wins (desc), name (asc), registry index (asc).
//! The last key makes the order total even for duplicate names in
//! hand-built registries.

use crate::models::{Competitor, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Points awarded per result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointsConfig {
    pub win: i32,
    pub tie: i32,
    pub loss: i32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self { win: 3, tie: 1, loss: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based table position
    pub position: usize,
    /// Index into the league registry
    pub index: usize,
    pub name: String,
    pub record: Record,
    pub points: i64,
}

fn compare(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.record.wins.cmp(&a.record.wins))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.index.cmp(&b.index))
}

pub fn compute_standings(competitors: &[Competitor], config: &PointsConfig) -> Vec<Standing> {
    let mut table: Vec<Standing> = competitors
        .iter()
        .enumerate()
        .map(|(index, competitor)| Standing {
            position: 0,
            index,
            name: competitor.name.clone(),
            record: competitor.record,
            points: competitor.record.points(config),
        })
        .collect();

    table.sort_by(compare);
    for (i, row) in table.iter_mut().enumerate() {
        row.position = i + 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str, wins: u32, losses: u32, ties: u32) -> Competitor {
        Competitor::new(name, 0.0, 0.0).with_record(Record::new(wins, losses, ties))
    }

    #[test]
    fn test_default_points_values() {
        let table = compute_standings(&[team("A", 2, 1, 1)], &PointsConfig::default());
        assert_eq!(table[0].points, 7);
    }

    #[test]
    fn test_sorted_by_points_descending() {
        let teams = vec![team("Low", 0, 3, 0), team("High", 3, 0, 0), team("Mid", 1, 1, 1)];
        let table = compute_standings(&teams, &PointsConfig::default());

        let names: Vec<&str> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
        assert_eq!(table.iter().map(|s| s.position).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(table[0].index, 1);
    }

    #[test]
    fn test_tie_break_wins_then_name() {
        // Both on 3 points: one win beats three ties
        let teams = vec![team("Drawers", 0, 0, 3), team("Winner", 1, 2, 0)];
        let table = compute_standings(&teams, &PointsConfig::default());
        assert_eq!(table[0].name, "Winner");

        let teams = vec![team("Zulu", 1, 0, 0), team("Alpha", 1, 0, 0)];
        let table = compute_standings(&teams, &PointsConfig::default());
        assert_eq!(table[0].name, "Alpha");
        assert_eq!(table[1].name, "Zulu");
    }

    #[test]
    fn test_custom_points() {
        let config = PointsConfig { win: 2, tie: 1, loss: -1 };
        let teams = vec![team("A", 1, 2, 0), team("B", 0, 0, 1)];
        let table = compute_standings(&teams, &config);

        assert_eq!(table[0].name, "B");
        assert_eq!(table[0].points, 1);
        assert_eq!(table[1].points, 0);
    }

    #[test]
    fn test_empty_registry() {
        assert!(compute_standings(&[], &PointsConfig::default()).is_empty());
    }
}
