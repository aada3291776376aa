//! League state
//!
//! `LeagueState` holds the registry, the schedule and the week cursor.
//! Callers own it and pass it to every operation; conversion to and from
//! the save format lives in [`crate::save`].

use crate::engine::outcome::OutcomeResolver;
use crate::engine::season::{play_week, GameResult, SeasonPhase, WeekResults};
use crate::engine::standings::{compute_standings, PointsConfig, Standing};
use crate::error::{LeagueError, Result};
use crate::models::{Competitor, Record};
use crate::save::{LeagueSave, SaveError, SavedResults, SavedTeam, SAVE_VERSION};
use crate::schedule::{self, lookup_opponent, Pairing, Schedule, ScheduleType, Slot};

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueState {
    pub(crate) competitors: Vec<Competitor>,
    pub(crate) schedule: Option<Schedule>,
    pub(crate) current_week: u32,
    pub(crate) active: bool,
}

impl Default for LeagueState {
    fn default() -> Self {
        Self::new()
    }
}

impl LeagueState {
    /// Empty, inactive league with the cursor at week 1
    pub fn new() -> Self {
        Self { competitors: Vec::new(), schedule: None, current_week: 1, active: false }
    }

    pub fn competitors(&self) -> &[Competitor] {
        &self.competitors
    }

    pub fn competitor(&self, index: usize) -> Option<&Competitor> {
        self.competitors.get(index)
    }

    pub fn find_competitor(&self, name: &str) -> Option<usize> {
        self.competitors.iter().position(|c| c.name == name)
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn current_week(&self) -> u32 {
        self.current_week
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn total_weeks(&self) -> u32 {
        self.schedule.as_ref().map_or(0, Schedule::total_weeks)
    }

    pub fn phase(&self) -> SeasonPhase {
        SeasonPhase::of(self.schedule.as_ref(), self.current_week)
    }

    /// Convert runtime state to save format
    pub fn to_save(&self) -> LeagueSave {
        LeagueSave {
            version: SAVE_VERSION,
            timestamp: 0,
            schedule: self.schedule.as_ref().map(Schedule::to_weeks).unwrap_or_default(),
            current_week: self.current_week,
            active: self.active,
            teams: self
                .competitors
                .iter()
                .map(|c| SavedTeam {
                    name: c.name.clone(),
                    offense: c.offense,
                    defense: c.defense,
                    results: SavedResults {
                        win: c.record.wins,
                        loss: c.record.losses,
                        tie: c.record.ties,
                    },
                })
                .collect(),
        }
    }

    /// Restore runtime state from save data
    pub fn from_save(save: LeagueSave) -> std::result::Result<Self, SaveError> {
        save.validate()?;
        let schedule = save.parsed_schedule()?;

        let competitors = save
            .teams
            .into_iter()
            .map(|team| {
                let results = team.results;
                let competitor = Competitor::new(team.name, team.offense, team.defense)
                    .with_record(Record::new(results.win, results.loss, results.tie));
                competitor.validate().map_err(|err| SaveError::Corrupted(err.to_string()))?;
                Ok(competitor)
            })
            .collect::<std::result::Result<Vec<_>, SaveError>>()?;

        Ok(Self { competitors, schedule, current_week: save.current_week, active: save.active })
    }

    // ========================
    // Setup
    // ========================

    /// Adds a competitor and returns its registry index.
    pub fn add_competitor(&mut self, competitor: Competitor) -> Result<usize> {
        if self.schedule.is_some() {
            return Err(LeagueError::invalid(
                "cannot add competitors after the season is scheduled",
            ));
        }
        competitor.validate()?;
        if self.find_competitor(&competitor.name).is_some() {
            return Err(LeagueError::invalid(format!(
                "a competitor named '{}' already exists",
                competitor.name
            )));
        }

        tracing::debug!(name = %competitor.name, "competitor added");
        self.competitors.push(competitor);
        Ok(self.competitors.len() - 1)
    }

    /// Generates the schedule, resets the cursor to week 1 and activates the league.
    pub fn schedule_season(&mut self, kind: ScheduleType) -> Result<()> {
        if self.schedule.is_some() {
            return Err(LeagueError::invalid("season is already scheduled"));
        }
        let generated = schedule::generate(kind, self.competitors.len())?;

        tracing::info!(
            competitors = self.competitors.len(),
            weeks = generated.total_weeks(),
            kind = kind.label(),
            "season scheduled"
        );
        self.schedule = Some(generated);
        self.current_week = 1;
        self.active = true;
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    pub fn week_pairings(&self, week: u32) -> Option<&[Pairing]> {
        self.schedule.as_ref().and_then(|s| s.week(week))
    }

    /// Real games of `week` as (home, away), byes left out
    pub fn week_matchups(&self, week: u32) -> Vec<(&Competitor, &Competitor)> {
        self.week_pairings(week)
            .unwrap_or_default()
            .iter()
            .filter_map(Pairing::teams)
            .filter_map(|(home, away)| {
                Some((self.competitors.get(home)?, self.competitors.get(away)?))
            })
            .collect()
    }

    pub fn opponent(&self, competitor: usize, week: u32) -> Result<Slot> {
        let schedule = self.require_schedule()?;
        lookup_opponent(schedule, competitor, week)
    }

    pub fn standings(&self, config: &PointsConfig) -> Vec<Standing> {
        compute_standings(&self.competitors, config)
    }

    // ========================
    // Simulation
    // ========================

    /// Plays `week` of the league's schedule.
    ///
    /// With `advance` set, a successful week moves the cursor forward by one,
    /// stopping at `total_weeks + 1`. Errors never touch the cursor or any record.
    pub fn simulate_week(
        &mut self,
        week: u32,
        resolver: &mut dyn OutcomeResolver,
        advance: bool,
    ) -> Result<Vec<GameResult>> {
        let schedule = self
            .schedule
            .as_ref()
            .ok_or_else(|| LeagueError::invalid("no season has been scheduled"))?;
        let total_weeks = schedule.total_weeks();
        let results = play_week(&mut self.competitors, schedule, week, resolver)?;

        if advance {
            self.current_week = (self.current_week + 1).min(total_weeks + 1);
        }
        Ok(results)
    }

    /// Plays the week under the cursor and advances.
    pub fn simulate_current_week(
        &mut self,
        resolver: &mut dyn OutcomeResolver,
    ) -> Result<Vec<GameResult>> {
        let week = self.current_week;
        self.simulate_week(week, resolver, true)
    }

    /// Plays from the cursor through the final week, leaving the cursor one
    /// past the end.
    pub fn simulate_season(
        &mut self,
        resolver: &mut dyn OutcomeResolver,
    ) -> Result<Vec<WeekResults>> {
        let total_weeks = self.require_schedule()?.total_weeks();

        let mut season = Vec::new();
        while self.current_week <= total_weeks {
            let week = self.current_week;
            let games = self.simulate_week(week, resolver, true)?;
            season.push(WeekResults { week, games });
        }

        tracing::info!(weeks_played = season.len(), total_weeks, "season complete");
        Ok(season)
    }

    fn require_schedule(&self) -> Result<&Schedule> {
        self.schedule.as_ref().ok_or_else(|| LeagueError::invalid("no season has been scheduled"))
    }
}
