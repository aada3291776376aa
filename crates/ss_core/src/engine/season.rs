//! Week simulation

use super::outcome::{OutcomeResolver, Score};
use crate::error::{LeagueError, Result};
use crate::models::Competitor;
use crate::schedule::{Pairing, Schedule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonPhase {
    Unscheduled,
    Scheduled,
    InProgress,
    Complete,
}

impl SeasonPhase {
    pub fn of(schedule: Option<&Schedule>, current_week: u32) -> Self {
        match schedule {
            None => SeasonPhase::Unscheduled,
            Some(schedule) if current_week > schedule.total_weeks() => SeasonPhase::Complete,
            Some(_) if current_week <= 1 => SeasonPhase::Scheduled,
            Some(_) => SeasonPhase::InProgress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    HomeWin,
    AwayWin,
    Tie,
}

/// One played game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub week: u32,
    pub home: String,
    pub home_score: u32,
    pub away: String,
    pub away_score: u32,
}

impl GameResult {
    pub fn outcome(&self) -> GameOutcome {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => GameOutcome::HomeWin,
            std::cmp::Ordering::Less => GameOutcome::AwayWin,
            std::cmp::Ordering::Equal => GameOutcome::Tie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekResults {
    pub week: u32,
    pub games: Vec<GameResult>,
}

/// Plays every non-bye pairing of `week` and updates both records per game.
///
/// Every pairing is checked before the first game is resolved, so an
/// error leaves `competitors` untouched.
pub fn play_week(
    competitors: &mut [Competitor],
    schedule: &Schedule,
    week: u32,
    resolver: &mut dyn OutcomeResolver,
) -> Result<Vec<GameResult>> {
    if week == 0 {
        return Err(LeagueError::invalid("weeks are numbered from 1"));
    }
    let total_weeks = schedule.total_weeks();
    let pairings =
        schedule.week(week).ok_or(LeagueError::EndOfSeason { requested: week, total_weeks })?;

    let games: Vec<(usize, usize)> = pairings.iter().filter_map(Pairing::teams).collect();
    for &(home, away) in &games {
        if home >= competitors.len() || away >= competitors.len() {
            return Err(LeagueError::invalid(format!(
                "week {} pairs competitors {} and {} but the league has {}",
                week,
                home,
                away,
                competitors.len()
            )));
        }
        if home == away {
            return Err(LeagueError::invalid(format!(
                "week {} pairs competitor {} with itself",
                week, home
            )));
        }
    }

    let mut results = Vec::with_capacity(games.len());
    for (home, away) in games {
        let score = resolver.resolve(&competitors[home], &competitors[away]);
        apply_score(competitors, home, away, score);
        results.push(GameResult {
            week,
            home: competitors[home].name.clone(),
            home_score: score.home,
            away: competitors[away].name.clone(),
            away_score: score.away,
        });
    }

    tracing::debug!(week, games = results.len(), "week played");
    Ok(results)
}

fn apply_score(competitors: &mut [Competitor], home: usize, away: usize, score: Score) {
    match score.home.cmp(&score.away) {
        std::cmp::Ordering::Greater => {
            competitors[home].record_win();
            competitors[away].record_loss();
        }
        std::cmp::Ordering::Less => {
            competitors[home].record_loss();
            competitors[away].record_win();
        }
        std::cmp::Ordering::Equal => {
            competitors[home].record_tie();
            competitors[away].record_tie();
        }
    }
}
