//! Season schedules
//!
//! A [`Schedule`] maps 1-based week numbers to that week's pairings.
//! Competitors are referenced by their index in the league registry;
//! [`Slot::Bye`] fills the spare seat when the competitor count is odd.

pub mod round_robin;

pub use round_robin::{generate_round_robin, rotate};

use crate::error::{LeagueError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Literal used for the bye seat in save files
pub const BYE_TOKEN: &str = "BYE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Team(usize),
    Bye,
}

impl Slot {
    pub fn team(&self) -> Option<usize> {
        match self {
            Slot::Team(idx) => Some(*idx),
            Slot::Bye => None,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Slot::Team(idx) => write!(f, "{}", idx),
            Slot::Bye => write!(f, "{}", BYE_TOKEN),
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Slot::Team(idx) => serializer.serialize_u64(*idx as u64),
            Slot::Bye => serializer.serialize_str(BYE_TOKEN),
        }
    }
}

struct SlotVisitor;

impl Visitor<'_> for SlotVisitor {
    type Value = Slot;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a competitor index or the string \"{}\"", BYE_TOKEN)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Slot, E> {
        usize::try_from(v).map(Slot::Team).map_err(|_| E::custom("competitor index out of range"))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Slot, E> {
        if v < 0 {
            return Err(E::invalid_value(de::Unexpected::Signed(v), &self));
        }
        self.visit_u64(v as u64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Slot, E> {
        if v == BYE_TOKEN {
            Ok(Slot::Bye)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Slot, D::Error> {
        deserializer.deserialize_any(SlotVisitor)
    }
}

/// One matchup. The home slot is listed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pairing {
    pub home: Slot,
    pub away: Slot,
}

impl Pairing {
    pub fn new(home: Slot, away: Slot) -> Self {
        Self { home, away }
    }

    pub fn is_bye(&self) -> bool {
        self.home.is_bye() || self.away.is_bye()
    }

    /// Both registry indices, or `None` for a bye pairing
    pub fn teams(&self) -> Option<(usize, usize)> {
        match (self.home, self.away) {
            (Slot::Team(home), Slot::Team(away)) => Some((home, away)),
            _ => None,
        }
    }

    pub fn involves(&self, competitor: usize) -> bool {
        self.home == Slot::Team(competitor) || self.away == Slot::Team(competitor)
    }

    pub fn opponent_of(&self, competitor: usize) -> Option<Slot> {
        if self.home == Slot::Team(competitor) {
            Some(self.away)
        } else if self.away == Slot::Team(competitor) {
            Some(self.home)
        } else {
            None
        }
    }
}

// Pairings are stored as fixed two-element arrays: [home, away]
impl Serialize for Pairing {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (self.home, self.away).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pairing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let (home, away) = <(Slot, Slot)>::deserialize(deserializer)?;
        Ok(Pairing { home, away })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    #[default]
    RoundRobin,
    DoubleRoundRobin,
    SingleElimination,
}

impl ScheduleType {
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleType::RoundRobin => "round robin",
            ScheduleType::DoubleRoundRobin => "double round robin",
            ScheduleType::SingleElimination => "single elimination",
        }
    }
}

impl FromStr for ScheduleType {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RR" => Ok(ScheduleType::RoundRobin),
            "DRR" => Ok(ScheduleType::DoubleRoundRobin),
            "SE" => Ok(ScheduleType::SingleElimination),
            other => Err(LeagueError::invalid(format!(
                "unknown league type '{}' (use RR, DRR or SE)",
                other
            ))),
        }
    }
}

/// Builds a schedule of the requested type for `competitor_count` entrants.
pub fn generate(kind: ScheduleType, competitor_count: usize) -> Result<Schedule> {
    match kind {
        ScheduleType::RoundRobin => generate_round_robin(competitor_count),
        ScheduleType::DoubleRoundRobin | ScheduleType::SingleElimination => {
            Err(LeagueError::invalid(format!("{} schedules are not supported", kind.label())))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    // weeks[0] is week 1
    weeks: Vec<Vec<Pairing>>,
}

impl Schedule {
    pub(crate) fn from_vec(weeks: Vec<Vec<Pairing>>) -> Self {
        Self { weeks }
    }

    /// Builds a schedule from week-keyed pairings. Keys must run 1..=n with no gaps.
    pub fn from_weeks(weeks: BTreeMap<u32, Vec<Pairing>>) -> Result<Self> {
        if weeks.is_empty() {
            return Err(LeagueError::invalid("schedule has no weeks"));
        }
        let mut ordered = Vec::with_capacity(weeks.len());
        for (expected, (week, pairings)) in (1u32..).zip(weeks) {
            if week != expected {
                return Err(LeagueError::invalid(format!(
                    "schedule weeks must be contiguous from 1: expected week {}, found {}",
                    expected, week
                )));
            }
            ordered.push(pairings);
        }
        Ok(Self { weeks: ordered })
    }

    pub fn to_weeks(&self) -> BTreeMap<u32, Vec<Pairing>> {
        self.iter().map(|(week, pairings)| (week, pairings.to_vec())).collect()
    }

    pub fn total_weeks(&self) -> u32 {
        self.weeks.len() as u32
    }

    pub fn week(&self, week: u32) -> Option<&[Pairing]> {
        if week == 0 {
            return None;
        }
        self.weeks.get(week as usize - 1).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Pairing])> {
        (1u32..).zip(self.weeks.iter().map(Vec::as_slice))
    }

    /// Checks that every index refers to one of `competitor_count` entrants
    /// and nobody is booked twice in the same week.
    pub fn validate(&self, competitor_count: usize) -> Result<()> {
        for (week, pairings) in self.iter() {
            let mut seen = vec![false; competitor_count];
            for pairing in pairings {
                if pairing.home.is_bye() && pairing.away.is_bye() {
                    return Err(LeagueError::invalid(format!("week {} pairs two byes", week)));
                }
                for idx in [pairing.home, pairing.away].iter().filter_map(Slot::team) {
                    if idx >= competitor_count {
                        return Err(LeagueError::invalid(format!(
                            "week {} references competitor {} but only {} exist",
                            week, idx, competitor_count
                        )));
                    }
                    if seen[idx] {
                        return Err(LeagueError::invalid(format!(
                            "competitor {} is scheduled twice in week {}",
                            idx, week
                        )));
                    }
                    seen[idx] = true;
                }
            }
        }
        Ok(())
    }
}

/// Who `competitor` faces in `week`.
pub fn lookup_opponent(schedule: &Schedule, competitor: usize, week: u32) -> Result<Slot> {
    let pairings = schedule.week(week).ok_or_else(|| {
        LeagueError::NotFound(format!(
            "week {} is not in the schedule ({} weeks)",
            week,
            schedule.total_weeks()
        ))
    })?;
    pairings.iter().find_map(|pairing| pairing.opponent_of(competitor)).ok_or_else(|| {
        LeagueError::NotFound(format!(
            "competitor {} is not scheduled in week {}",
            competitor, week
        ))
    })
}
