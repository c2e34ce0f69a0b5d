//! Third-person camera that trails the player over the curved surface.

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::locomotion::{CameraState, PlayerState};

/// Horizontal and vertical offsets the rig distance is derived from.
const HORIZONTAL_OFFSET: f32 = 35.0;
const VERTICAL_OFFSET: f32 = 25.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    /// Smoothed eye position.
    pub position: Vec3,
    /// Always the player's surface up, so the view never rolls.
    pub up: Vec3,
    /// Look-at point: the player's exact position.
    pub target: Vec3,
    /// Distance from the player along the orbit.
    pub distance: f32,
    /// Fraction of the remaining gap closed per reference tick.
    pub follow: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            up: Vec3::Y,
            target: Vec3::ZERO,
            distance: HORIZONTAL_OFFSET.hypot(VERTICAL_OFFSET),
            follow: 0.1,
        }
    }
}

impl CameraRig {
    /// Jump straight to the desired position, skipping the smoothing.
    pub fn snap_to(&mut self, player: &PlayerState, camera: &CameraState) {
        self.position = self.desired_position(player, camera);
        self.up = player.up;
        self.target = player.position;
    }

    /// Where the eye would be with no smoothing.
    pub fn desired_position(&self, player: &PlayerState, camera: &CameraState) -> Vec3 {
        player.position + camera.forward * (-self.distance * camera.pitch.cos())
            + player.up * (self.distance * camera.pitch.sin())
    }

    /// Move the eye toward its desired position and re-aim at the player.
    pub fn update(&mut self, player: &PlayerState, camera: &CameraState, tick_scale: f32) {
        let desired = self.desired_position(player, camera);
        let alpha = 1.0 - (1.0 - self.follow).powf(tick_scale);
        self.position = self.position.lerp(desired, alpha);
        self.up = player.up;
        self.target = player.position;
    }

    /// Eye orientation: local +Z toward the target, local +Y near `up`.
    pub fn rotation(&self) -> Quat {
        let to_target = self.target - self.position;
        if to_target.length_squared() < 1e-6 {
            return Quat::IDENTITY;
        }
        let forward = to_target.normalize();
        let mut right = self.up.cross(forward);
        if right.length_squared() < 1e-6 {
            right = Vec3::X.cross(forward);
            if right.length_squared() < 1e-6 {
                right = Vec3::Z.cross(forward);
            }
        }
        let right = right.normalize();
        let up = forward.cross(right);
        Quat::from_mat3(&Mat3::from_cols(right, up, forward))
    }

    /// Right-handed view matrix for a renderer.
    pub fn view_matrix(&self) -> Mat4 {
        let up = if self.up.cross(self.target - self.position).length_squared() < 1e-6 {
            self.rotation() * Vec3::Y
        } else {
            self.up
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 1e-3;

    fn standing() -> (PlayerState, CameraState) {
        let mut player = PlayerState::spawn(40.0, 1.5);
        player.is_grounded = true;
        (player, CameraState::default())
    }

    #[test]
    fn test_distance_from_offsets() {
        let rig = CameraRig::default();
        assert!((rig.distance - 43.011_627).abs() < 1e-3);
    }

    #[test]
    fn test_desired_position_behind_and_above() {
        let (player, camera) = standing();
        let rig = CameraRig::default();
        let desired = rig.desired_position(&player, &camera);
        let d = rig.distance;
        let expected = player.position - Vec3::Z * d * 0.95_f32.cos() + Vec3::Y * d * 0.95_f32.sin();
        assert!((desired - expected).length() < TOL);
        assert!((desired.distance(player.position) - d).abs() < TOL);
    }

    #[test]
    fn test_update_closes_ten_percent_per_tick() {
        let (player, camera) = standing();
        let mut rig = CameraRig::default();
        let desired = rig.desired_position(&player, &camera);
        let start = rig.position;
        rig.update(&player, &camera, 1.0);
        let expected = start.lerp(desired, 0.1);
        assert!((rig.position - expected).length() < TOL);
        assert_eq!(rig.target, player.position);
        assert_eq!(rig.up, player.up);
    }

    #[test]
    fn test_smoothing_is_frame_rate_independent() {
        let (player, camera) = standing();
        let mut one_step = CameraRig::default();
        let mut two_steps = CameraRig::default();
        one_step.update(&player, &camera, 2.0);
        two_steps.update(&player, &camera, 1.0);
        two_steps.update(&player, &camera, 1.0);
        assert!((one_step.position - two_steps.position).length() < TOL);
    }

    #[test]
    fn test_converges_to_desired() {
        let (player, camera) = standing();
        let mut rig = CameraRig::default();
        for _ in 0..300 {
            rig.update(&player, &camera, 1.0);
        }
        assert!((rig.position - rig.desired_position(&player, &camera)).length() < TOL);
    }

    #[test]
    fn test_rotation_looks_at_target() {
        let (player, camera) = standing();
        let mut rig = CameraRig::default();
        rig.snap_to(&player, &camera);
        let q = rig.rotation();
        let look = (rig.target - rig.position).normalize();
        assert!(((q * Vec3::Z) - look).length() < TOL);
        // Camera up stays on the player's side of the horizon.
        assert!((q * Vec3::Y).dot(player.up) > 0.0);
    }

    #[test]
    fn test_rotation_degenerate_cases() {
        let rig = CameraRig {
            position: Vec3::new(0.0, 10.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            ..Default::default()
        };
        let q = rig.rotation();
        assert!(!q.is_nan());
        assert!(((q * Vec3::Z) - Vec3::NEG_Y).length() < TOL);

        let coincident = CameraRig::default();
        assert_eq!(coincident.rotation(), Quat::IDENTITY);
    }

    #[test]
    fn test_view_matrix_maps_target_in_front() {
        let (player, camera) = standing();
        let mut rig = CameraRig::default();
        rig.snap_to(&player, &camera);
        let view = rig.view_matrix();
        let target_in_view = view.transform_point3(rig.target);
        // Right-handed view space looks down -Z.
        assert!(target_in_view.z < 0.0);
        assert!(target_in_view.x.abs() < TOL && target_in_view.y.abs() < TOL);
    }
}
