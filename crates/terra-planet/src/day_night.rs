//! Day/night cycle derived from a planet's local time.
//!
//! The sun pivot turns a full revolution per local day. At a day progress of
//! 0.0 the sun sits directly above the spawn pole (+Y); at 0.5 it is on the
//! far side of the planet.

use glam::Vec3;

use crate::planet::Planet;

/// Sun placement and lighting for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunState {
    /// Rotation of the sun pivot about world +Z, in radians (unbounded).
    pub pivot_angle: f32,
    /// Unit direction from the planet centre towards the sun.
    pub direction: Vec3,
    /// Direct light multiplier in `[0, 1]` as seen from the spawn pole.
    pub intensity: f32,
    /// Ambient light level.
    pub ambient: f32,
}

impl SunState {
    /// Compute the sun for the planet's current local time.
    pub fn from_planet(planet: &Planet) -> Self {
        let pivot_angle = sun_pivot_angle(planet.local_time(), planet.day_duration());
        let direction = sun_direction(pivot_angle);
        Self {
            pivot_angle,
            direction,
            intensity: sun_intensity_curve(direction),
            ambient: ambient_intensity(direction),
        }
    }
}

/// Pivot rotation for the given local time: one full turn per day.
pub fn sun_pivot_angle(local_time: f64, day_duration: f64) -> f32 {
    ((local_time / day_duration) * std::f64::consts::TAU) as f32
}

/// Direction of the sun after rotating +Y about +Z by `pivot_angle`.
pub fn sun_direction(pivot_angle: f32) -> Vec3 {
    Vec3::new(-pivot_angle.sin(), pivot_angle.cos(), 0.0)
}

/// Sun intensity from its elevation above the spawn pole's horizon.
///
/// 1.0 above 15°, 0.0 below −10°, smooth in between.
pub fn sun_intensity_curve(sun_direction: Vec3) -> f32 {
    let sin_elevation = sun_direction.y;
    let low = (-10.0_f32).to_radians().sin();
    let high = (15.0_f32).to_radians().sin();
    smoothstep(low, high, sin_elevation)
}

/// Ambient light, brighter during the day.
pub fn ambient_intensity(sun_direction: Vec3) -> f32 {
    let sun_factor = sun_intensity_curve(sun_direction);
    lerp(0.05, 0.15, sun_factor)
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
