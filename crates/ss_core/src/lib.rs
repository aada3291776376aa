//! # ss_core - Round-Robin League Season Simulation
//!
//! Generates round-robin schedules, plays a season week by week through a
//! pluggable outcome model, keeps win/loss/tie records and standings, and
//! saves/loads whole leagues as JSON.
//!
//! ## Features
//! - Deterministic schedules (same competitor count = same schedule)
//! - Seeded resolvers for reproducible seasons
//! - All-or-nothing loads with versioned save files

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;
pub mod schedule;
pub mod state;

pub use config::LeagueConfig;
pub use engine::{
    compute_standings, play_week, CoinFlip, GameOutcome, GameResult, HomeWin, OutcomeResolver,
    PointsConfig, Proportional, ResolverKind, Score, SeasonPhase, Standing, WeekResults,
};
pub use error::{LeagueError, Result};
pub use models::{Competitor, Record};
pub use save::{LeagueSave, SaveError, SaveManager};
pub use schedule::{
    generate_round_robin, lookup_opponent, rotate, Pairing, Schedule, ScheduleType, Slot,
};
pub use state::LeagueState;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_team_league_end_to_end() {
        let mut state = LeagueState::new();
        for name in ["Ants", "Bees", "Crows", "Deer", "Eels"] {
            state.add_competitor(Competitor::new(name, 1.0, 1.0)).unwrap();
        }
        state.schedule_season(ScheduleType::RoundRobin).unwrap();

        let schedule = state.schedule().unwrap();
        assert_eq!(schedule.total_weeks(), 5);
        for (_, pairings) in schedule.iter() {
            assert_eq!(pairings.iter().filter(|p| !p.is_bye()).count(), 2);
            assert_eq!(pairings.iter().filter(|p| p.is_bye()).count(), 1);
        }

        let season = state.simulate_season(&mut HomeWin).unwrap();
        assert_eq!(season.iter().map(|w| w.games.len()).sum::<usize>(), 10);

        let wins: u32 = state.competitors().iter().map(|c| c.record.wins).sum();
        let losses: u32 = state.competitors().iter().map(|c| c.record.losses).sum();
        assert_eq!(wins, losses);
        assert!(state.competitors().iter().all(|c| c.record.games_played() == 4));

        assert!(matches!(
            state.simulate_current_week(&mut HomeWin),
            Err(LeagueError::EndOfSeason { requested: 6, total_weeks: 5 })
        ));
        assert_eq!(state.current_week(), 6);
    }

    #[test]
    fn test_configured_resolver_is_reproducible() {
        let config =
            LeagueConfig { resolver: ResolverKind::Proportional, seed: 9, ..Default::default() };

        let play = || {
            let mut state = LeagueState::new();
            let teams = [("A", 6.0, 2.0), ("B", 3.0, 5.0), ("C", 4.0, 4.0), ("D", 1.0, 7.0)];
            for (name, offense, defense) in teams {
                state.add_competitor(Competitor::new(name, offense, defense)).unwrap();
            }
            state.schedule_season(ScheduleType::RoundRobin).unwrap();
            let mut resolver = config.build_resolver();
            state.simulate_season(resolver.as_mut()).unwrap();
            state
        };

        assert_eq!(play(), play());
    }
}
