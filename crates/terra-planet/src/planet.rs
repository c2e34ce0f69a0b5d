//! Planet definition and its local calendar.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlanetError;

/// Construction parameters for a [`Planet`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetParams {
    /// Display name.
    pub name: String,
    /// Flavour text shown in the planet info panel.
    pub description: String,
    /// Diameter in world units. The radius is half of this.
    pub size: f32,
    /// Gravity as a per-tick acceleration (at the 60 Hz reference rate).
    pub gravity: f32,
    /// Length of one local day in real-time seconds.
    pub day_duration: f64,
    /// Days in one local month.
    pub days_per_month: u32,
    /// Months in one local year.
    pub months_per_year: u32,
    /// Year number of the first day.
    pub start_year: i64,
    /// Seconds already elapsed on this planet at creation.
    pub local_time: f64,
}

impl Default for PlanetParams {
    fn default() -> Self {
        Self {
            name: "Unknown Planet".to_string(),
            description: "No description available.".to_string(),
            size: 80.0,
            gravity: 0.02,
            day_duration: 600.0,
            days_per_month: 30,
            months_per_year: 12,
            start_year: 0,
            local_time: 0.0,
        }
    }
}

/// Calendar date split into year, month (1-based) and day of month (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
}

/// A perfect sphere centred at the origin.
///
/// The radius is fixed at creation; gravity and the clock are mutable.
#[derive(Clone, Debug)]
pub struct Planet {
    name: String,
    description: String,
    radius: f32,
    gravity: f32,
    day_duration: f64,
    days_per_month: u32,
    months_per_year: u32,
    start_year: i64,
    local_time: f64,
    local_day: u64,
}

impl Planet {
    /// Validate `params` and build the planet.
    pub fn new(params: PlanetParams) -> Result<Self, PlanetError> {
        let radius = params.size / 2.0;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PlanetError::InvalidRadius(radius));
        }
        if !params.day_duration.is_finite() || params.day_duration <= 0.0 {
            return Err(PlanetError::InvalidDayDuration(params.day_duration));
        }
        if params.days_per_month == 0 || params.months_per_year == 0 {
            return Err(PlanetError::InvalidCalendar);
        }

        let local_time = params.local_time.max(0.0);
        let mut planet = Self {
            name: params.name,
            description: params.description,
            radius,
            gravity: params.gravity,
            day_duration: params.day_duration,
            days_per_month: params.days_per_month,
            months_per_year: params.months_per_year,
            start_year: params.start_year,
            local_time,
            local_day: 1,
        };
        planet.local_day = planet.day_at(local_time);
        Ok(planet)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    pub fn day_duration(&self) -> f64 {
        self.day_duration
    }

    /// Seconds elapsed on this planet.
    pub fn local_time(&self) -> f64 {
        self.local_time
    }

    /// Current day counted from 1.
    pub fn local_day(&self) -> u64 {
        self.local_day
    }

    fn day_at(&self, time: f64) -> u64 {
        (time / self.day_duration).floor() as u64 + 1
    }

    /// Advance the clock by `dt` seconds. Returns `true` when the day rolled over.
    pub fn update_time(&mut self, dt: f64) -> bool {
        if dt <= 0.0 || !dt.is_finite() {
            return false;
        }
        self.local_time += dt;
        let new_day = self.day_at(self.local_time);
        let changed = new_day != self.local_day;
        if changed {
            debug!(planet = %self.name, day = new_day, "local day advanced");
        }
        self.local_day = new_day;
        changed
    }

    /// Fraction of the current day elapsed, in `[0, 1)`.
    pub fn day_progress(&self) -> f64 {
        (self.local_time % self.day_duration) / self.day_duration
    }

    /// Break the current day number into year, month and day.
    pub fn date_components(&self) -> CalendarDate {
        let total_days = self.local_day - 1;
        let days_per_month = u64::from(self.days_per_month);
        let days_per_year = days_per_month * u64::from(self.months_per_year);

        let year = self.start_year + (total_days / days_per_year) as i64;
        let remaining = total_days % days_per_year;
        let month = (remaining / days_per_month) as u32 + 1;
        let day = (remaining % days_per_month) as u32 + 1;
        CalendarDate { year, month, day }
    }

    /// Date formatted for the HUD, e.g. `"Y0 M1 D1"`.
    pub fn formatted_date(&self) -> String {
        let CalendarDate { year, month, day } = self.date_components();
        format!("Y{year} M{month} D{day}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet() -> Planet {
        Planet::new(PlanetParams::default()).unwrap()
    }

    #[test]
    fn test_radius_is_half_the_size() {
        assert_eq!(planet().radius(), 40.0);
    }

    #[test]
    fn test_params_from_partial_ron() {
        let params: PlanetParams =
            ron::from_str(r#"(name: "Kepler", size: 120.0)"#).unwrap();
        assert_eq!(params.name, "Kepler");
        assert_eq!(params.size, 120.0);
        assert_eq!(params.day_duration, 600.0);
        assert_eq!(Planet::new(params).unwrap().radius(), 60.0);
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let params = PlanetParams {
            size: 0.0,
            ..Default::default()
        };
        assert_eq!(
            Planet::new(params).unwrap_err(),
            PlanetError::InvalidRadius(0.0)
        );
        let params = PlanetParams {
            size: f32::NAN,
            ..Default::default()
        };
        assert!(Planet::new(params).is_err());
    }

    #[test]
    fn test_invalid_day_and_calendar_rejected() {
        let params = PlanetParams {
            day_duration: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Planet::new(params),
            Err(PlanetError::InvalidDayDuration(_))
        ));
        let params = PlanetParams {
            days_per_month: 0,
            ..Default::default()
        };
        assert_eq!(Planet::new(params).unwrap_err(), PlanetError::InvalidCalendar);
    }

    #[test]
    fn test_day_rolls_over_after_duration() {
        let mut p = planet();
        assert_eq!(p.local_day(), 1);
        assert!(!p.update_time(599.0));
        assert_eq!(p.local_day(), 1);
        assert!(p.update_time(2.0));
        assert_eq!(p.local_day(), 2);
    }

    #[test]
    fn test_day_progress_wraps() {
        let mut p = planet();
        p.update_time(150.0);
        assert!((p.day_progress() - 0.25).abs() < 1e-9);
        p.update_time(600.0);
        assert!((p.day_progress() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_date_components_cross_month_and_year() {
        let mut p = planet();
        assert_eq!(
            p.date_components(),
            CalendarDate {
                year: 0,
                month: 1,
                day: 1
            }
        );

        // Day 31 is the first of the second month.
        p.update_time(600.0 * 30.0);
        assert_eq!(p.date_components().month, 2);
        assert_eq!(p.date_components().day, 1);

        // Day 361 starts year 1.
        p.update_time(600.0 * 330.0);
        assert_eq!(
            p.date_components(),
            CalendarDate {
                year: 1,
                month: 1,
                day: 1
            }
        );
        assert_eq!(p.formatted_date(), "Y1 M1 D1");
    }

    #[test]
    fn test_start_year_and_initial_time() {
        let p = Planet::new(PlanetParams {
            start_year: 2100,
            local_time: 600.0 * 45.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(p.local_day(), 46);
        assert_eq!(p.date_components().year, 2100);
        assert_eq!(p.date_components().month, 2);
        assert_eq!(p.date_components().day, 16);
    }

    #[test]
    fn test_gravity_is_mutable() {
        let mut p = planet();
        p.set_gravity(0.05);
        assert_eq!(p.gravity(), 0.05);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut p = planet();
        assert!(!p.update_time(-5.0));
        assert_eq!(p.local_time(), 0.0);
    }
}
