//! Season engine: outcome resolvers, week simulation and standings.

pub mod outcome;
pub mod season;
pub mod standings;

pub use outcome::{CoinFlip, HomeWin, OutcomeResolver, Proportional, ResolverKind, Score};
pub use season::{play_week, GameOutcome, GameResult, SeasonPhase, WeekResults};
pub use standings::{compute_standings, PointsConfig, Standing};
