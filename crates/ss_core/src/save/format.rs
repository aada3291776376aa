use super::error::SaveError;
use super::SAVE_VERSION;
use crate::schedule::{Pairing, Schedule};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use time::OffsetDateTime;

/// On-disk league document.
///
/// Version 0 is the unversioned layout; every field it could omit is
/// defaulted here and fixed up by [`super::migrate_save`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LeagueSave {
    /// Save format version for migration
    #[serde(default)]
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    #[serde(default)]
    pub timestamp: u64,

    /// Week number -> [home, away] pairs, "BYE" for the empty seat
    #[serde(default)]
    pub schedule: BTreeMap<u32, Vec<Pairing>>,

    #[serde(default = "first_week")]
    pub current_week: u32,

    /// Files written before this flag existed always load as active
    #[serde(default = "active_by_default")]
    pub active: bool,

    /// Registry in index order; schedule entries point into this list
    pub teams: Vec<SavedTeam>,
}

fn first_week() -> u32 {
    1
}

fn active_by_default() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedTeam {
    pub name: String,
    #[serde(default)]
    pub offense: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub results: SavedResults,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SavedResults {
    pub win: u32,
    pub loss: u32,
    pub tie: u32,
}

impl LeagueSave {
    pub fn update_timestamp(&mut self) {
        self.timestamp = current_timestamp();
    }

    /// Rebuilds the schedule, `None` when the league was saved before scheduling.
    pub fn parsed_schedule(&self) -> Result<Option<Schedule>, SaveError> {
        if self.schedule.is_empty() {
            return Ok(None);
        }
        let schedule = Schedule::from_weeks(self.schedule.clone())
            .map_err(|err| SaveError::Corrupted(err.to_string()))?;
        schedule.validate(self.teams.len()).map_err(|err| SaveError::Corrupted(err.to_string()))?;
        Ok(Some(schedule))
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        let mut names = HashSet::new();
        for team in &self.teams {
            if team.name.is_empty() {
                return Err(SaveError::Corrupted("team with an empty name".to_string()));
            }
            if !names.insert(team.name.as_str()) {
                return Err(SaveError::Corrupted(format!("duplicate team name '{}'", team.name)));
            }
        }

        let total_weeks = self.parsed_schedule()?.map_or(0, |s| s.total_weeks());
        if self.current_week == 0 || self.current_week > total_weeks + 1 {
            return Err(SaveError::Corrupted(format!(
                "current week {} is outside a {}-week season",
                self.current_week, total_weeks
            )));
        }

        Ok(())
    }
}

/// Validates and renders a save as pretty-printed JSON
pub fn to_json(save: &LeagueSave) -> Result<String, SaveError> {
    save.validate()?;
    Ok(serde_json::to_string_pretty(save)?)
}

/// Parses a save document. Validation runs after migration.
pub fn from_json(raw: &str) -> Result<LeagueSave, SaveError> {
    let save: LeagueSave = serde_json::from_str(raw)?;

    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}
