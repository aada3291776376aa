use crate::engine::standings::PointsConfig;
use crate::error::{LeagueError, Result};

/// Cumulative results for one competitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn points(&self, config: &PointsConfig) -> i64 {
        self.wins as i64 * config.win as i64
            + self.ties as i64 * config.tie as i64
            + self.losses as i64 * config.loss as i64
    }
}

/// A league participant
///
/// `offense` and `defense` only matter to resolvers that read them
/// (see [`crate::engine::outcome::Proportional`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Competitor {
    pub name: String,
    pub offense: f64,
    pub defense: f64,
    pub record: Record,
}

impl Competitor {
    pub fn new(name: impl Into<String>, offense: f64, defense: f64) -> Self {
        Self { name: name.into(), offense, defense, record: Record::default() }
    }

    pub fn with_record(mut self, record: Record) -> Self {
        self.record = record;
        self
    }

    /// Checks the fields a league needs: a single-token name and
    /// finite, non-negative attributes.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(LeagueError::invalid("competitor name must not be empty"));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(LeagueError::invalid(format!(
                "competitor name '{}' must not contain whitespace",
                self.name
            )));
        }
        for (label, value) in [("offense", self.offense), ("defense", self.defense)] {
            if !value.is_finite() || value < 0.0 {
                return Err(LeagueError::invalid(format!(
                    "{} for '{}' must be a non-negative number, got {}",
                    label, self.name, value
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn record_win(&mut self) {
        self.record.wins += 1;
    }

    pub(crate) fn record_loss(&mut self) {
        self.record.losses += 1;
    }

    pub(crate) fn record_tie(&mut self) {
        self.record.ties += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_games_played() {
        let record = Record::new(2, 1, 1);
        assert_eq!(record.games_played(), 4);
    }

    #[test]
    fn test_default_points() {
        let record = Record::new(2, 1, 1);
        assert_eq!(record.points(&PointsConfig::default()), 7);
    }

    #[test]
    fn test_negative_loss_points() {
        let config = PointsConfig { win: 2, tie: 1, loss: -1 };
        let record = Record::new(1, 3, 0);
        assert_eq!(record.points(&config), -1);
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        assert!(Competitor::new("", 1.0, 1.0).validate().is_err());
        assert!(Competitor::new("Two Words", 1.0, 1.0).validate().is_err());
        assert!(Competitor::new("Hawks", 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_attributes() {
        assert!(Competitor::new("Hawks", -1.0, 1.0).validate().is_err());
        assert!(Competitor::new("Hawks", 1.0, f64::NAN).validate().is_err());
        assert!(Competitor::new("Hawks", 0.0, 0.0).validate().is_ok());
    }
}
