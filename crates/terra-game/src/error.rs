//! Errors that stop a session from starting.

use terra_config::ConfigError;
use terra_planet::PlanetError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot create planet: {0}")]
    Planet(#[from] PlanetError),
}
