//! Surface-locked transform for the build preview.

use glam::{Quat, Vec3};
use terra_math::{PARALLEL_EPSILON, SurfaceBasis, build_basis, compute_up};

/// How far ahead of the player the preview is projected.
pub const PREVIEW_DISTANCE: f32 = 4.0;

/// Where a structure would stand: on the surface, upright, turned by the
/// player's build rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub basis: SurfaceBasis,
}

/// Project a point `offset_distance` ahead of the player onto the planet
/// surface and orient it to the local up.
///
/// The result sits exactly at `planet_radius`; the player's standoff is not
/// applied. `build_rotation` turns the structure about its up axis and is
/// used as given, without wrapping.
pub fn project(
    player_position: Vec3,
    camera_forward: Vec3,
    planet_radius: f32,
    offset_distance: f32,
    build_rotation: f32,
) -> PlacementTransform {
    let raw_target = player_position + camera_forward * offset_distance;
    let position = compute_up(raw_target) * planet_radius;
    let up = compute_up(position);

    let mut tangent = camera_forward - up * camera_forward.dot(up);
    if tangent.length_squared() < PARALLEL_EPSILON {
        tangent = Vec3::X - up * up.x;
    }
    let base = build_basis(up, tangent);

    let turn = Quat::from_axis_angle(base.up, build_rotation);
    let basis = SurfaceBasis {
        right: (turn * base.right).normalize(),
        up: base.up,
        forward: (turn * base.forward).normalize(),
    };
    PlacementTransform {
        position,
        rotation: basis.rotation(),
        basis,
    }
}
