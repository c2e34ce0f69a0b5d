//! Melee swing timing: Idle → Swinging → Idle.
//!
//! The swing drives a hand-pitch pose for the renderer and reports a single
//! hit moment per swing. It never gates movement.

use terra_math::EasingFunction;
use terra_physics::DEFAULT_ATTACK_RANGE;

/// Timer units gained per tick per point of attack speed.
const SWING_RATE: f32 = 0.15;
/// Fraction of the swing spent on the fast strike.
const STRIKE_FRACTION: f32 = 0.35;
/// Timer value past which the hit test runs.
const HIT_THRESHOLD: f32 = 0.5;
/// Hand pitch at the start of the strike (raised back).
const WIND_UP_PITCH: f32 = -1.5;
/// Pitch travelled during the strike.
const STRIKE_SWEEP: f32 = 2.3;
/// Hand pitch at the end of the strike, eased back to rest.
const FOLLOW_THROUGH_PITCH: f32 = 0.8;

/// Combat stats of an equipped weapon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponStats {
    pub damage: f32,
    /// Swing speed multiplier; 0.5 gives a swing of about 14 ticks.
    pub attack_speed: f32,
    /// Maximum hit distance.
    pub range: f32,
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            damage: 10.0,
            attack_speed: 1.0,
            range: DEFAULT_ATTACK_RANGE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AttackPhase {
    #[default]
    Idle,
    Swinging,
}

/// What happened during one [`AttackState::advance`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackTick {
    /// The hit moment was reached this tick. Fires once per swing.
    pub hit: bool,
    /// The swing completed this tick and the state is Idle again.
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttackState {
    pub phase: AttackPhase,
    /// Normalized swing progress in `[0, 1]`.
    pub timer: f32,
    pub hit_checked: bool,
    /// Hand rotation about the local X axis, read by the renderer.
    pub hand_pitch: f32,
}

impl AttackState {
    pub fn is_swinging(&self) -> bool {
        self.phase == AttackPhase::Swinging
    }

    /// Start a swing. Requires a weapon and no swing in progress.
    pub fn begin(&mut self, weapon: Option<&WeaponStats>) -> bool {
        if weapon.is_none() || self.is_swinging() {
            return false;
        }
        self.phase = AttackPhase::Swinging;
        self.timer = 0.0;
        self.hit_checked = false;
        true
    }

    /// Drop back to Idle immediately, e.g. when the weapon is unequipped.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Advance the swing by one (scaled) tick.
    pub fn advance(&mut self, attack_speed: f32, tick_scale: f32) -> AttackTick {
        if !self.is_swinging() {
            return AttackTick::default();
        }

        self.timer += attack_speed * SWING_RATE * tick_scale;
        self.hand_pitch = hand_pitch_at(self.timer);

        let mut tick = AttackTick::default();
        if self.timer > HIT_THRESHOLD && !self.hit_checked {
            self.hit_checked = true;
            tick.hit = true;
        }
        if self.timer >= 1.0 {
            self.phase = AttackPhase::Idle;
            self.timer = 0.0;
            self.hand_pitch = 0.0;
            tick.finished = true;
        }
        tick
    }
}

/// Hand pose for a swing progress value.
fn hand_pitch_at(timer: f32) -> f32 {
    if timer < STRIKE_FRACTION {
        let t = timer / STRIKE_FRACTION;
        WIND_UP_PITCH + STRIKE_SWEEP * EasingFunction::EaseOut.apply(t)
    } else {
        let t = ((timer - STRIKE_FRACTION) / (1.0 - STRIKE_FRACTION)).min(1.0);
        FOLLOW_THROUGH_PITCH * (1.0 - EasingFunction::EaseIn.apply(t))
    }
}
