//! Configuration for the Terra sandbox.
//!
//! Settings persist to disk as `config.ron`, can be reloaded while running,
//! and are overridden from the command line via clap. Unknown or missing
//! fields fall back to defaults so old files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, InputConfig, PlanetConfig, PlayerConfig, WorldConfig,
    default_config_dir,
};
pub use error::ConfigError;
