//! League configuration
//!
//! Every field has a default, so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! points:
//!   win: 2
//! resolver: proportional
//! seed: 42
//! ```

use crate::engine::outcome::{OutcomeResolver, Proportional, ResolverKind};
use crate::engine::standings::PointsConfig;
use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// Standings points per result
    pub points: PointsConfig,
    /// Outcome model used by the shell
    pub resolver: ResolverKind,
    /// RNG seed for the random resolvers
    pub seed: u64,
    /// Scoring chances per side for the proportional resolver
    pub chances_per_game: u32,
    /// Directory for named saves
    pub save_dir: PathBuf,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            points: PointsConfig::default(),
            resolver: ResolverKind::default(),
            seed: 0,
            chances_per_game: Proportional::DEFAULT_CHANCES,
            save_dir: PathBuf::from("saves"),
        }
    }
}

impl LeagueConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: LeagueConfig =
            serde_yaml::from_str(yaml).map_err(|err| LeagueError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            LeagueError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chances_per_game == 0 {
            return Err(LeagueError::Config("chances_per_game must be > 0".to_string()));
        }
        if self.points.loss > self.points.tie || self.points.tie > self.points.win {
            tracing::warn!(
                win = self.points.win,
                tie = self.points.tie,
                loss = self.points.loss,
                "points do not rank win >= tie >= loss"
            );
        }
        Ok(())
    }

    pub fn build_resolver(&self) -> Box<dyn OutcomeResolver> {
        self.resolver.build(self.seed, self.chances_per_game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LeagueConfig::default();
        assert_eq!(config.points, PointsConfig { win: 3, tie: 1, loss: 0 });
        assert_eq!(config.resolver, ResolverKind::CoinFlip);
        assert_eq!(config.save_dir, PathBuf::from("saves"));
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "points:\n  win: 2\nresolver: proportional\nseed: 42\n";
        let config = LeagueConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.points, PointsConfig { win: 2, tie: 1, loss: 0 });
        assert_eq!(config.resolver, ResolverKind::Proportional);
        assert_eq!(config.seed, 42);
        assert_eq!(config.chances_per_game, Proportional::DEFAULT_CHANCES);
    }

    #[test]
    fn test_rejects_zero_chances() {
        assert!(matches!(
            LeagueConfig::from_yaml_str("chances_per_game: 0"),
            Err(LeagueError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_resolver() {
        assert!(LeagueConfig::from_yaml_str("resolver: dice").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("league.yaml");
        std::fs::write(&path, "save_dir: /tmp/leagues\nresolver: home_win\n").unwrap();

        let config = LeagueConfig::load(&path).unwrap();
        assert_eq!(config.save_dir, PathBuf::from("/tmp/leagues"));
        assert_eq!(config.resolver, ResolverKind::HomeWin);

        assert!(LeagueConfig::load(&dir.path().join("missing.yaml")).is_err());
    }
}
