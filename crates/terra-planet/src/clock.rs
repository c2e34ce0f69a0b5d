//! Universe-wide clock shared by every planet.

/// Cosmic time: one calendar shared across planets, independent of any
/// planet's own day length.
#[derive(Clone, Debug)]
pub struct CosmicClock {
    /// Seconds elapsed since the session started.
    pub time: f64,
    /// Length of one cosmic day in real-time seconds.
    pub day_duration: f64,
    /// Current cosmic day counted from 1.
    pub day: u64,
}

impl CosmicClock {
    pub fn new(day_duration: f64) -> Self {
        Self {
            time: 0.0,
            day_duration: day_duration.max(f64::EPSILON),
            day: 1,
        }
    }

    /// Advance by `dt` seconds. Returns `true` when the cosmic day changed.
    pub fn tick(&mut self, dt: f64) -> bool {
        if dt <= 0.0 || !dt.is_finite() {
            return false;
        }
        self.time += dt;
        let day = (self.time / self.day_duration).floor() as u64 + 1;
        let changed = day != self.day;
        self.day = day;
        changed
    }
}

impl Default for CosmicClock {
    fn default() -> Self {
        Self::new(600.0)
    }
}
