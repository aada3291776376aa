//! Outcome resolvers
//!
//! A resolver turns a (home, away) matchup into a final score. The season
//! engine only depends on [`OutcomeResolver`]; which one runs is the
//! caller's choice. [`ResolverKind::default`] is [`CoinFlip`].

use crate::models::Competitor;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LeagueError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn new(home: u32, away: u32) -> Self {
        Self { home, away }
    }
}

pub trait OutcomeResolver {
    fn resolve(&mut self, home: &Competitor, away: &Competitor) -> Score;
}

impl<F> OutcomeResolver for F
where
    F: FnMut(&Competitor, &Competitor) -> Score,
{
    fn resolve(&mut self, home: &Competitor, away: &Competitor) -> Score {
        self(home, away)
    }
}

// ============================================================================
// Built-in resolvers
// ============================================================================

/// Home side always wins 1-0
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeWin;

impl OutcomeResolver for HomeWin {
    fn resolve(&mut self, _home: &Competitor, _away: &Competitor) -> Score {
        Score::new(1, 0)
    }
}

/// Fair coin: 1-0 or 0-1
#[derive(Debug, Clone)]
pub struct CoinFlip {
    rng: ChaCha8Rng,
}

impl CoinFlip {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }
}

impl OutcomeResolver for CoinFlip {
    fn resolve(&mut self, _home: &Competitor, _away: &Competitor) -> Score {
        if self.rng.gen_bool(0.5) {
            Score::new(1, 0)
        } else {
            Score::new(0, 1)
        }
    }
}

/// Attribute-driven scoring.
///
/// Each side gets `chances` scoring chances. A chance converts when a
/// uniform roll lands under `attack / (attack + opposing defense)`.
#[derive(Debug, Clone)]
pub struct Proportional {
    chances: u32,
    rng: ChaCha8Rng,
}

impl Proportional {
    pub const DEFAULT_CHANCES: u32 = 10;

    pub fn new(seed: u64, chances: u32) -> Self {
        Self { chances, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Conversion probability for one chance
    pub fn threshold(attack: f64, defense: f64) -> f64 {
        let total = attack + defense;
        if total <= 0.0 {
            0.5
        } else {
            (attack / total).clamp(0.0, 1.0)
        }
    }

    fn goals(&mut self, threshold: f64) -> u32 {
        (0..self.chances).filter(|_| self.rng.gen::<f64>() < threshold).count() as u32
    }
}

impl OutcomeResolver for Proportional {
    fn resolve(&mut self, home: &Competitor, away: &Competitor) -> Score {
        let home_threshold = Self::threshold(home.offense, away.defense);
        let away_threshold = Self::threshold(away.offense, home.defense);
        Score::new(self.goals(home_threshold), self.goals(away_threshold))
    }
}

// ============================================================================
// Selection
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverKind {
    HomeWin,
    #[default]
    CoinFlip,
    Proportional,
}

impl ResolverKind {
    pub fn build(&self, seed: u64, chances: u32) -> Box<dyn OutcomeResolver> {
        match self {
            ResolverKind::HomeWin => Box::new(HomeWin),
            ResolverKind::CoinFlip => Box::new(CoinFlip::new(seed)),
            ResolverKind::Proportional => Box::new(Proportional::new(seed, chances)),
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ResolverKind::HomeWin => "home_win",
            ResolverKind::CoinFlip => "coin_flip",
            ResolverKind::Proportional => "proportional",
        };
        f.write_str(name)
    }
}

impl FromStr for ResolverKind {
    type Err = LeagueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "home_win" => Ok(ResolverKind::HomeWin),
            "coin_flip" | "coin" => Ok(ResolverKind::CoinFlip),
            "proportional" => Ok(ResolverKind::Proportional),
            other => Err(LeagueError::Config(format!(
                "unknown resolver '{}' (use home_win, coin_flip or proportional)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> (Competitor, Competitor) {
        (Competitor::new("Home", 5.0, 5.0), Competitor::new("Away", 5.0, 5.0))
    }

    #[test]
    fn test_home_win() {
        let (home, away) = pair();
        assert_eq!(HomeWin.resolve(&home, &away), Score::new(1, 0));
    }

    #[test]
    fn test_coin_flip_is_seeded() {
        let (home, away) = pair();
        let mut a = CoinFlip::new(7);
        let mut b = CoinFlip::new(7);

        let first: Vec<Score> = (0..32).map(|_| a.resolve(&home, &away)).collect();
        let second: Vec<Score> = (0..32).map(|_| b.resolve(&home, &away)).collect();
        assert_eq!(first, second);
        assert!(first.iter().all(|s| s.home + s.away == 1));
        assert!(first.iter().any(|s| s.home == 1));
        assert!(first.iter().any(|s| s.away == 1));
    }

    #[test]
    fn test_proportional_threshold() {
        assert_eq!(Proportional::threshold(0.0, 0.0), 0.5);
        assert_eq!(Proportional::threshold(3.0, 1.0), 0.75);
        assert_eq!(Proportional::threshold(0.0, 4.0), 0.0);
    }

    #[test]
    fn test_proportional_bounds() {
        let strong = Competitor::new("Strong", 10.0, 10.0);
        let weak = Competitor::new("Weak", 0.0, 0.0);
        let mut resolver = Proportional::new(1, 8);

        for _ in 0..20 {
            let score = resolver.resolve(&strong, &weak);
            assert_eq!(score.home, 8);
            assert_eq!(score.away, 0);
        }
    }

    #[test]
    fn test_closure_resolver() {
        let (home, away) = pair();
        let mut calls = 0;
        let mut resolver = |_: &Competitor, _: &Competitor| {
            calls += 1;
            Score::new(2, 2)
        };

        assert_eq!(resolver.resolve(&home, &away), Score::new(2, 2));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_resolver_kind_parsing() {
        assert_eq!("home-win".parse::<ResolverKind>().unwrap(), ResolverKind::HomeWin);
        assert_eq!("COIN_FLIP".parse::<ResolverKind>().unwrap(), ResolverKind::CoinFlip);
        assert_eq!("proportional".parse::<ResolverKind>().unwrap(), ResolverKind::Proportional);
        assert!("dice".parse::<ResolverKind>().is_err());
        assert_eq!(ResolverKind::default(), ResolverKind::CoinFlip);
    }
}
