//! Planet construction errors.

/// Reasons a [`Planet`](crate::Planet) cannot be built from its parameters.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlanetError {
    /// Radius must be finite and strictly positive.
    #[error("planet radius must be positive, got {0}")]
    InvalidRadius(f32),

    /// A day must last a positive number of seconds.
    #[error("day duration must be positive, got {0}")]
    InvalidDayDuration(f64),

    /// Months and years need at least one day and one month respectively.
    #[error("calendar needs at least one day per month and one month per year")]
    InvalidCalendar,
}
