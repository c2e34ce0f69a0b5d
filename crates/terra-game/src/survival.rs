//! Hunger and health.

/// Move speed multiplier while starving.
pub const STARVING_SPEED_FACTOR: f32 = 0.5;
/// Hunger spent felling one tree.
pub const CHOP_HUNGER_COST: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EatRejection {
    /// Hunger is already full.
    Full,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Survival {
    pub hunger: f32,
    pub max_hunger: f32,
    pub health: f32,
    pub max_health: f32,
    /// Hunger lost per real second.
    pub decay_per_second: f32,
}

impl Survival {
    /// Full stats; a full hunger bar empties over three local days.
    pub fn new(max_hunger: f32, max_health: f32, day_duration: f64) -> Self {
        let decay_per_second = (f64::from(max_hunger) / (day_duration * 3.0)) as f32;
        Self {
            hunger: max_hunger,
            max_hunger,
            health: max_health,
            max_health,
            decay_per_second,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if dt > 0.0 {
            self.hunger = (self.hunger - self.decay_per_second * dt).max(0.0);
        }
    }

    pub fn exhaust(&mut self, amount: f32) {
        self.hunger = (self.hunger - amount).max(0.0);
    }

    pub fn is_starving(&self) -> bool {
        self.hunger <= 0.0
    }

    /// Base speed, halved at zero hunger.
    pub fn effective_speed(&self, base_speed: f32) -> f32 {
        if self.is_starving() {
            base_speed * STARVING_SPEED_FACTOR
        } else {
            base_speed
        }
    }

    /// Restore hunger and health, both capped at their maximum.
    pub fn eat(&mut self, hunger_restore: f32, health_restore: f32) -> Result<(), EatRejection> {
        if self.hunger >= self.max_hunger {
            return Err(EatRejection::Full);
        }
        self.hunger = (self.hunger + hunger_restore).min(self.max_hunger);
        self.health = (self.health + health_restore).min(self.max_health);
        Ok(())
    }

    /// Hunger as a fraction of the maximum, for HUD bars.
    pub fn hunger_fraction(&self) -> f32 {
        if self.max_hunger <= 0.0 {
            return 0.0;
        }
        self.hunger / self.max_hunger
    }
}

impl Default for Survival {
    fn default() -> Self {
        Self::new(100.0, 100.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hunger_empties_over_three_days() {
        let mut s = Survival::default();
        assert!((s.decay_per_second - 100.0 / 1800.0).abs() < 1e-6);
        s.tick(900.0);
        assert!((s.hunger - 50.0).abs() < 1e-3);
        s.tick(10_000.0);
        assert_eq!(s.hunger, 0.0);
        assert!(s.is_starving());
    }

    #[test]
    fn test_speed_halved_when_starving() {
        let mut s = Survival::default();
        assert_eq!(s.effective_speed(0.25), 0.25);
        s.exhaust(200.0);
        assert_eq!(s.effective_speed(0.25), 0.125);
    }

    #[test]
    fn test_eating_caps_and_rejects_when_full() {
        let mut s = Survival::default();
        assert_eq!(s.eat(20.0, 5.0), Err(EatRejection::Full));

        s.exhaust(10.0);
        s.health = 90.0;
        assert!(s.eat(20.0, 5.0).is_ok());
        assert_eq!(s.hunger, 100.0);
        assert_eq!(s.health, 95.0);
    }

    #[test]
    fn test_negative_dt_ignored() {
        let mut s = Survival::default();
        s.tick(-5.0);
        assert_eq!(s.hunger, 100.0);
        assert_eq!(s.hunger_fraction(), 1.0);
    }
}
