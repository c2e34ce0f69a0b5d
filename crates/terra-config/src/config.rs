//! Configuration sections, their defaults, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Where `config.ron` lives when no directory is given on the command line.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("terra")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub planet: PlanetConfig,
    pub player: PlayerConfig,
    pub camera: CameraConfig,
    pub world: WorldConfig,
    pub input: InputConfig,
    pub debug: DebugConfig,
}

/// The planet the session takes place on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    pub name: String,
    pub description: String,
    /// Diameter in world units.
    pub size: f32,
    /// Downward acceleration per 60 Hz tick.
    pub gravity: f32,
    /// Real seconds per local day.
    pub day_duration: f64,
    pub days_per_month: u32,
    pub months_per_year: u32,
    pub start_year: i64,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            name: "Terra Nova".to_string(),
            description: "A lush green planet suitable for life.".to_string(),
            size: 80.0,
            gravity: 0.02,
            day_duration: 600.0,
            days_per_month: 30,
            months_per_year: 12,
            start_year: 0,
        }
    }
}

/// Player body and movement tuning. Speeds are per 60 Hz tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Height of the body origin above the surface.
    pub standoff: f32,
    pub move_speed: f32,
    pub jump_impulse: f32,
    pub radius: f32,
    /// Spawn height above the surface at the north pole.
    pub spawn_offset: f32,
    pub max_hunger: f32,
    pub max_health: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            standoff: 1.5,
            move_speed: 0.25,
            jump_impulse: 0.5,
            radius: 1.0,
            spawn_offset: 0.0,
            max_hunger: 100.0,
            max_health: 100.0,
        }
    }
}

/// Third-person follow camera.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Offsets the orbit distance is derived from.
    pub horizontal_offset: f32,
    pub vertical_offset: f32,
    /// Fraction of the gap closed per 60 Hz tick.
    pub follow: f32,
    /// Starting elevation in radians.
    pub initial_pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            horizontal_offset: 35.0,
            vertical_offset: 25.0,
            follow: 0.1,
            initial_pitch: 0.95,
        }
    }
}

/// World population and gameplay rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// RNG seed for tree scattering, drop jitter and loot rolls.
    pub seed: u64,
    pub tree_count: u32,
    pub tree_health: f32,
    /// Chance that a felled tree also drops a seed.
    pub seed_drop_chance: f64,
    /// Seconds per crop growth stage.
    pub crop_stage_seconds: f32,
    /// Distance of the crashed ship from the spawn point.
    pub ship_distance: f32,
    /// Real seconds per day of the shared cosmic calendar.
    pub cosmic_day_duration: f64,
    /// Give the player an axe at spawn.
    pub start_with_axe: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tree_count: 40,
            tree_health: 100.0,
            seed_drop_chance: 0.2,
            crop_stage_seconds: 10.0,
            ship_distance: 8.0,
            cosmic_day_duration: 600.0,
            start_with_axe: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of camera turn per pixel of pointer motion.
    pub pointer_sensitivity: f32,
    pub invert_y: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pointer_sensitivity: 0.002,
            invert_y: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g., "debug", "info", "warn"). `RUST_LOG` wins.
    pub log_level: String,
    /// Write a JSON log file next to the config in debug builds.
    pub log_to_file: bool,
    /// Ticks simulated by the headless session.
    pub headless_ticks: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
            headless_ticks: 3600,
        }
    }
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file. Returns `Some` only when something changed.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be positive, got {value}"),
                })
            }
        }

        positive("planet.size", f64::from(self.planet.size))?;
        positive("planet.day_duration", self.planet.day_duration)?;
        positive("world.cosmic_day_duration", self.world.cosmic_day_duration)?;
        positive("player.radius", f64::from(self.player.radius))?;
        if self.planet.days_per_month == 0 || self.planet.months_per_year == 0 {
            return Err(ConfigError::InvalidValue {
                field: "planet.days_per_month",
                reason: "calendar units must be non-zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.world.seed_drop_chance) {
            return Err(ConfigError::InvalidValue {
                field: "world.seed_drop_chance",
                reason: format!("must be within 0..=1, got {}", self.world.seed_drop_chance),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let ron_str =
            ron::ser::to_string_pretty(&Config::default(), ron::ser::PrettyConfig::new())
                .unwrap();
        assert!(ron_str.contains("size: 80.0"));
        assert!(ron_str.contains("tree_count: 40"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(planet: (size: 120.0))").unwrap();
        assert_eq!(config.planet.size, 120.0);
        assert_eq!(config.planet.gravity, 0.02);
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn test_unknown_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(graphics_quality: 3)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.seed = 7;
        config.planet.name = "Kepler".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("terra");
        let config = Config::load_or_create(&nested).unwrap();
        assert_eq!(config, Config::default());
        assert!(nested.join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut modified = config.clone();
        modified.planet.gravity = 0.05;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.planet.gravity), Some(0.05));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.planet.size = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "planet.size",
                ..
            })
        ));

        let mut config = Config::default();
        config.world.seed_drop_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_unwritable_dir_reports_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let err = Config::default().save(&blocker.join("terra")).unwrap_err();
        assert!(matches!(err, ConfigError::WriteError(_)));
        assert!(err.to_string().starts_with("failed to write config"));
    }

    #[test]
    fn test_default_dir_ends_with_terra() {
        assert!(default_config_dir().ends_with("terra"));
    }
}
