//! The planet the game is played on: fixed radius, per-tick gravity, and the
//! local calendar and day/night cycle driven by elapsed wall-clock time.

mod clock;
pub mod day_night;
mod error;
mod planet;

pub use clock::CosmicClock;
pub use day_night::SunState;
pub use error::PlanetError;
pub use planet::{CalendarDate, Planet, PlanetParams};
