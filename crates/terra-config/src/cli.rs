//! Command-line arguments for the `terra` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terra headless session.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terra", about = "Spherical-world survival sandbox")]
pub struct CliArgs {
    /// World seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of ticks to simulate before exiting.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Planet radius in world units.
    #[arg(long)]
    pub radius: Option<f32>,

    /// Gravity per 60 Hz tick.
    #[arg(long)]
    pub gravity: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(ticks) = args.ticks {
            self.debug.headless_ticks = ticks;
        }
        if let Some(radius) = args.radius {
            self.planet.size = radius * 2.0;
        }
        if let Some(gravity) = args.gravity {
            self.planet.gravity = gravity;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(99),
            radius: Some(60.0),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, 99);
        assert_eq!(config.planet.size, 120.0);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.planet.gravity, 0.02);
        assert_eq!(config.debug.headless_ticks, 3600);
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flags() {
        let args =
            CliArgs::parse_from(["terra", "--ticks", "120", "--gravity", "0.05", "--config", "/tmp/t"]);
        assert_eq!(args.ticks, Some(120));
        assert_eq!(args.gravity, Some(0.05));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/t")));
        assert_eq!(args.seed, None);
    }
}
