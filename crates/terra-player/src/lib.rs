//! Player locomotion on the sphere, melee swing timing, and the third-person
//! camera rig that follows the player's surface frame.

pub mod attack;
pub mod camera_rig;
pub mod input;
pub mod locomotion;

pub use attack::{AttackPhase, AttackState, AttackTick, WeaponStats};
pub use camera_rig::CameraRig;
pub use input::{Action, InputState, MoveAxes};
pub use locomotion::{
    CameraState, DEFAULT_POINTER_SENSITIVITY, GroundContact, LocomotionParams, MAX_TICK_SCALE,
    PITCH_MAX, PITCH_MIN, PlayerState, StepContext, StepOutcome, apply_pointer, ground_clamp,
    jump, locomotion_step, tick_scale,
};
