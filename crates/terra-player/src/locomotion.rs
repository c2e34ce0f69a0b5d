//! Walking, falling and jumping on the outside of the planet sphere.
//!
//! The player is either grounded (held on the shell `radius + standoff`) or
//! airborne; the state is decided every tick by comparing the candidate
//! position's distance from the planet centre against that shell.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use terra_math::{build_basis, compute_up, facing_rotation, transport_vector};
use terra_physics::{CollisionQuery, PLAYER_RADIUS};
use tracing::trace;

use crate::input::MoveAxes;

/// Ticks per second at which the per-tick constants were tuned.
pub const REFERENCE_TICK_RATE: f32 = 60.0;
/// Largest tick scale applied in one step, so a stalled frame cannot
/// launch the player through the ground or past an obstacle.
pub const MAX_TICK_SCALE: f32 = 4.0;
/// Camera pitch limits above the player's horizon, in radians.
pub const PITCH_MIN: f32 = 0.1;
pub const PITCH_MAX: f32 = FRAC_PI_2 - 0.1;
/// Pointer sensitivity in radians per pixel.
pub const DEFAULT_POINTER_SENSITIVITY: f32 = 0.002;

/// Positions this close to the standing shell count as standing on it.
const GROUND_EPSILON: f32 = 1e-4;

/// Convert a frame delta in seconds into a multiple of the reference tick.
///
/// Returns 1.0 at 60 Hz. Non-finite or negative deltas give 0.
pub fn tick_scale(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    (dt * REFERENCE_TICK_RATE).min(MAX_TICK_SCALE)
}

/// Tunables for player movement, expressed per reference tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionParams {
    /// Height of the player's origin above the literal surface.
    pub standoff: f32,
    pub base_move_speed: f32,
    /// Vertical velocity set by a jump.
    pub jump_impulse: f32,
    pub player_radius: f32,
}

impl Default for LocomotionParams {
    fn default() -> Self {
        Self {
            standoff: 1.5,
            base_move_speed: 0.25,
            jump_impulse: 0.5,
            player_radius: PLAYER_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    /// Outward surface normal at `position`.
    pub up: Vec3,
    /// Body orientation: local +Y is `up`, local +Z the facing direction.
    pub facing: Quat,
    /// Speed along `up`; negative while falling.
    pub vertical_velocity: f32,
    pub is_grounded: bool,
    pub radius: f32,
}

impl PlayerState {
    /// A player standing at the north pole, `spawn_offset` above the surface.
    pub fn spawn(planet_radius: f32, spawn_offset: f32) -> Self {
        Self {
            position: Vec3::new(0.0, planet_radius + spawn_offset, 0.0),
            up: Vec3::Y,
            facing: Quat::IDENTITY,
            vertical_velocity: 0.0,
            is_grounded: false,
            radius: PLAYER_RADIUS,
        }
    }

    /// The direction the body faces, used for attack targeting.
    pub fn look_direction(&self) -> Vec3 {
        self.facing * Vec3::Z
    }

    /// Start a jump. Only allowed while grounded.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if !self.is_grounded {
            return false;
        }
        self.vertical_velocity = impulse;
        self.is_grounded = false;
        true
    }
}

/// Free-function form of [`PlayerState::jump`].
pub fn jump(player: &mut PlayerState, params: &LocomotionParams) -> bool {
    player.jump(params.jump_impulse)
}

/// The orbit camera's heading and elevation, owned by the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Heading in the player's tangent plane.
    pub forward: Vec3,
    /// Elevation above the horizon, clamped to `[PITCH_MIN, PITCH_MAX]`.
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            forward: Vec3::Z,
            pitch: 0.95,
        }
    }
}

/// Rotate the camera heading about the player's up and tilt its pitch.
pub fn apply_pointer(camera: &mut CameraState, up: Vec3, dx: f32, dy: f32, sensitivity: f32) {
    if dx != 0.0 {
        let yaw = Quat::from_axis_angle(compute_up(up), dx * -sensitivity);
        camera.forward = yaw * camera.forward;
    }
    camera.pitch = (camera.pitch + dy * sensitivity).clamp(PITCH_MIN, PITCH_MAX);
}

/// Per-tick inputs that come from outside the player.
#[derive(Clone, Copy, Debug)]
pub struct StepContext {
    pub planet_radius: f32,
    /// Downward acceleration per reference tick.
    pub gravity: f32,
    /// Effective speed this tick (already reduced when starving).
    pub move_speed: f32,
    pub tick_scale: f32,
    pub params: LocomotionParams,
}

impl StepContext {
    /// Radius of the shell the player stands on.
    pub fn standing_radius(&self) -> f32 {
        self.planet_radius + self.params.standoff
    }
}

/// Result of comparing a candidate position against the standing shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GroundContact {
    Grounded(Vec3),
    Airborne(Vec3),
}

impl GroundContact {
    pub fn position(self) -> Vec3 {
        match self {
            GroundContact::Grounded(p) | GroundContact::Airborne(p) => p,
        }
    }

    pub fn is_grounded(self) -> bool {
        matches!(self, GroundContact::Grounded(_))
    }
}

/// Push a candidate below the standing shell back onto it.
///
/// Idempotent: a position already on the shell is returned unchanged.
pub fn ground_clamp(candidate: Vec3, standing_radius: f32) -> GroundContact {
    let distance = candidate.length();
    if distance < standing_radius - GROUND_EPSILON {
        GroundContact::Grounded(compute_up(candidate) * standing_radius)
    } else if distance <= standing_radius + GROUND_EPSILON {
        GroundContact::Grounded(candidate)
    } else {
        GroundContact::Airborne(candidate)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub grounded: bool,
    /// Horizontal movement was rejected by an obstacle.
    pub blocked: bool,
    /// There was horizontal intent this tick.
    pub moved: bool,
}

/// Advance the player by one tick.
pub fn locomotion_step(
    player: &mut PlayerState,
    camera: &mut CameraState,
    axes: MoveAxes,
    ctx: &StepContext,
    collisions: &impl CollisionQuery,
) -> StepOutcome {
    let old_up = compute_up(player.position);

    // Re-orthogonalize the camera heading against the current up.
    let basis = build_basis(old_up, camera.forward);
    camera.forward = basis.forward;

    let mut intent = Vec3::ZERO;
    if axes.forward {
        intent += basis.forward;
    }
    if axes.back {
        intent -= basis.forward;
    }
    if axes.right {
        intent += basis.right;
    }
    if axes.left {
        intent -= basis.right;
    }

    player.vertical_velocity -= ctx.gravity * ctx.tick_scale;
    let vertical_move = old_up * player.vertical_velocity * ctx.tick_scale;
    let settle = player.position + vertical_move;

    let mut outcome = StepOutcome::default();
    let mut contact = if intent.length_squared() > 1e-12 {
        outcome.moved = true;
        let dir = intent.normalize();
        player.facing = facing_rotation(old_up, dir);
        let candidate = player.position + dir * ctx.move_speed * ctx.tick_scale + vertical_move;
        ground_clamp(candidate, ctx.standing_radius())
    } else {
        ground_clamp(settle, ctx.standing_radius())
    };

    if outcome.moved && collisions.blocks_move(player.position, contact.position()) {
        trace!(candidate = ?contact.position(), "horizontal move rejected");
        outcome.blocked = true;
        contact = ground_clamp(settle, ctx.standing_radius());
    }

    if contact.is_grounded() {
        player.vertical_velocity = 0.0;
    }
    player.is_grounded = contact.is_grounded();
    outcome.grounded = player.is_grounded;

    let new_position = contact.position();
    if new_position != player.position {
        let new_up = compute_up(new_position);
        camera.forward = transport_vector(camera.forward, old_up, new_up);
        player.position = new_position;
        player.up = new_up;
    } else {
        player.up = old_up;
    }
    outcome
}
