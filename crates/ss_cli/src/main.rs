//! Season Sim - interactive round-robin league simulator
//!
//! Reads commands from stdin; logs go to stderr so they never mix with the
//! shell's own output.

mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use shell::Shell;
use ss_core::{LeagueConfig, ResolverKind};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "season-sim")]
#[command(about = "Schedule and simulate a round-robin league season", long_about = None)]
#[command(version = ss_core::VERSION)]
struct Cli {
    /// YAML league configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for named saves (overrides the config file)
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// RNG seed for the random resolvers
    #[arg(long)]
    seed: Option<u64>,

    /// Outcome model: home_win, coin_flip or proportional
    #[arg(long)]
    resolver: Option<ResolverKind>,
}

impl Cli {
    fn league_config(&self) -> Result<LeagueConfig> {
        let mut config = match &self.config {
            Some(path) => LeagueConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => LeagueConfig::default(),
        };

        if let Some(save_dir) = &self.save_dir {
            config.save_dir = save_dir.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(resolver) = self.resolver {
            config.resolver = resolver;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "season_sim=info,ss_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.league_config()?;

    info!(
        resolver = %config.resolver,
        seed = config.seed,
        save_dir = %config.save_dir.display(),
        "starting season sim"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), config);
    shell.run().context("shell I/O failed")?;

    info!(week = shell.state().current_week(), "session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "season-sim",
            "--seed",
            "7",
            "--resolver",
            "proportional",
            "--save-dir",
            "out",
        ]);
        let config = cli.league_config().unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.resolver, ResolverKind::Proportional);
        assert_eq!(config.save_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("league.yaml");
        std::fs::write(&path, "seed: 1\nresolver: home_win\npoints:\n  win: 2\n").unwrap();

        let config_arg = path.to_str().unwrap();
        let cli = Cli::parse_from(["season-sim", "--config", config_arg, "--seed", "5"]);
        let config = cli.league_config().unwrap();

        assert_eq!(config.seed, 5);
        assert_eq!(config.resolver, ResolverKind::HomeWin);
        assert_eq!(config.points.win, 2);
    }

    #[test]
    fn test_bad_resolver_flag() {
        assert!(Cli::try_parse_from(["season-sim", "--resolver", "dice"]).is_err());
    }
}
