//! Local orthonormal frames on the sphere surface and transport between them.
//!
//! The planet centre is the origin, so the outward normal ("up") at any
//! position is simply the normalized position. Every function in this module
//! substitutes a fixed fallback axis instead of producing NaN when a cross
//! product or normalization degenerates.

use glam::{Mat3, Quat, Vec3};

/// Squared-length threshold below which a cross product is treated as
/// degenerate (the inputs are considered parallel).
pub const PARALLEL_EPSILON: f32 = 1e-3;

/// Dot-product threshold for treating two unit vectors as identical or opposite.
const ALIGNED_DOT: f32 = 0.999_999;

/// Squared length below which a position is considered to sit on the origin.
const ORIGIN_EPSILON: f32 = 1e-12;

/// Orthonormal tangent frame at a point on the sphere.
///
/// Convention: `right = forward × up` and `forward = up × right`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceBasis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl SurfaceBasis {
    /// Rotation that maps local +Y onto `up` and local +Z onto `forward`.
    ///
    /// This is the orientation given to objects standing on the surface.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        let x = self.up.cross(self.forward);
        Quat::from_mat3(&Mat3::from_cols(x, self.up, self.forward)).normalize()
    }
}

/// Outward surface normal at `position`.
///
/// Falls back to world +Y when the position is at the planet core.
#[must_use]
pub fn compute_up(position: Vec3) -> Vec3 {
    if position.length_squared() < ORIGIN_EPSILON {
        return Vec3::Y;
    }
    position.normalize()
}

/// Build the tangent frame at `up` using `reference_forward` as the heading hint.
///
/// When the hint is (anti)parallel to `up`, world X and then world Z are tried
/// as replacement hints, so the result is always a full orthonormal basis.
#[must_use]
pub fn build_basis(up: Vec3, reference_forward: Vec3) -> SurfaceBasis {
    let up = compute_up(up);
    let right = [reference_forward, Vec3::X, Vec3::Z]
        .into_iter()
        .map(|reference| reference.cross(up))
        .find(|right| right.length_squared() >= PARALLEL_EPSILON)
        // X and Z cannot both be parallel to a unit vector.
        .unwrap_or(Vec3::Z.cross(up))
        .normalize();
    let forward = up.cross(right).normalize();
    SurfaceBasis { right, up, forward }
}

/// Minimal rotation taking direction `from` onto direction `to`.
///
/// Identical directions give the identity. Opposite directions give a half
/// turn about an axis perpendicular to `from` (world X crossed with `from`,
/// or world Y crossed with `from` when that is degenerate).
#[must_use]
pub fn rotation_between(from: Vec3, to: Vec3) -> Quat {
    let from = compute_up(from);
    let to = compute_up(to);
    let dot = from.dot(to);

    if dot > ALIGNED_DOT {
        return Quat::IDENTITY;
    }
    if dot < -ALIGNED_DOT {
        let mut axis = Vec3::X.cross(from);
        if axis.length_squared() < PARALLEL_EPSILON {
            axis = Vec3::Y.cross(from);
        }
        return Quat::from_axis_angle(axis.normalize(), std::f32::consts::PI);
    }

    let axis = from.cross(to);
    let s = ((1.0 + dot) * 2.0).sqrt();
    let inv_s = 1.0 / s;
    Quat::from_xyzw(axis.x * inv_s, axis.y * inv_s, axis.z * inv_s, s * 0.5).normalize()
}

/// Carry `v` along as the surface normal moves from `old_up` to `new_up`.
///
/// Pure rotation: the length of `v` is preserved.
#[must_use]
pub fn transport_vector(v: Vec3, old_up: Vec3, new_up: Vec3) -> Vec3 {
    rotation_between(old_up, new_up) * v
}

/// Body orientation for an entity standing at `up` and facing `forward`.
///
/// Local +Y maps to `up` and local +Z to the tangential part of `forward`.
/// A `forward` parallel to `up` falls back to a heading derived from world X.
#[must_use]
pub fn facing_rotation(up: Vec3, forward: Vec3) -> Quat {
    let up = compute_up(up);
    let mut x_axis = up.cross(forward);
    if x_axis.length_squared() < PARALLEL_EPSILON {
        x_axis = up.cross(Vec3::X);
        if x_axis.length_squared() < PARALLEL_EPSILON {
            x_axis = up.cross(Vec3::Z);
        }
    }
    let x_axis = x_axis.normalize();
    let z_axis = x_axis.cross(up).normalize();
    Quat::from_mat3(&Mat3::from_cols(x_axis, up, z_axis)).normalize()
}

/// Orientation for a static object planted on the surface with normal `up`.
#[must_use]
pub fn align_to_surface(up: Vec3) -> Quat {
    facing_rotation(up, Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const TOL: f32 = 1e-4;

    fn assert_orthonormal(basis: &SurfaceBasis) {
        for v in [basis.right, basis.up, basis.forward] {
            assert!((v.length() - 1.0).abs() < TOL, "not unit: {v}");
        }
        assert!(basis.right.dot(basis.up).abs() < TOL);
        assert!(basis.right.dot(basis.forward).abs() < TOL);
        assert!(basis.up.dot(basis.forward).abs() < TOL);
    }

    fn sample_directions() -> Vec<Vec3> {
        let mut dirs = vec![
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ];
        for i in 0..24 {
            let theta = i as f32 * 0.37;
            let phi = i as f32 * 1.13;
            dirs.push(Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            ));
        }
        dirs.into_iter().map(Vec3::normalize).collect()
    }

    #[test]
    fn test_up_is_unit_and_parallel_to_position() {
        for p in [
            Vec3::new(0.0, 41.5, 0.0),
            Vec3::new(3.0, -4.0, 12.0),
            Vec3::new(-1e-3, 2e-3, 5e-4),
        ] {
            let up = compute_up(p);
            assert!((up.length() - 1.0).abs() < 1e-5);
            assert!(up.cross(p.normalize()).length() < 1e-5);
            assert!(up.dot(p) > 0.0);
        }
    }

    #[test]
    fn test_up_at_origin_falls_back_to_world_y() {
        assert_eq!(compute_up(Vec3::ZERO), Vec3::Y);
    }

    #[test]
    fn test_basis_is_orthonormal_for_any_hint() {
        for up in sample_directions() {
            for hint in sample_directions() {
                let basis = build_basis(up, hint);
                assert_orthonormal(&basis);
                assert!((basis.up - up).length() < TOL);
            }
        }
    }

    #[test]
    fn test_basis_with_parallel_and_antiparallel_hint() {
        let up = Vec3::new(0.3, 0.9, -0.2).normalize();
        assert_orthonormal(&build_basis(up, up));
        assert_orthonormal(&build_basis(up, -up));
        assert_orthonormal(&build_basis(up, Vec3::ZERO));
        // Hint parallel to up and to world X: second fallback kicks in.
        assert_orthonormal(&build_basis(Vec3::X, Vec3::X));
    }

    #[test]
    fn test_basis_keeps_tangent_hint() {
        let basis = build_basis(Vec3::Y, Vec3::Z);
        assert!((basis.forward - Vec3::Z).length() < TOL);
        assert!((basis.right - basis.forward.cross(basis.up)).length() < TOL);
    }

    #[test]
    fn test_transport_preserves_length() {
        let v = Vec3::new(1.5, -2.0, 0.25);
        for old_up in sample_directions() {
            for new_up in sample_directions() {
                let out = transport_vector(v, old_up, new_up);
                assert!(
                    (out.length() - v.length()).abs() < 1e-3,
                    "{old_up} -> {new_up}"
                );
            }
        }
    }

    #[test]
    fn test_transport_maps_old_up_to_new_up() {
        let old_up = Vec3::new(0.0, 1.0, 0.0);
        let new_up = Vec3::new(0.1, 1.0, 0.05).normalize();
        let moved = transport_vector(old_up, old_up, new_up);
        assert!((moved - new_up).length() < TOL);
    }

    #[test]
    fn test_transport_keeps_tangent_vectors_tangent() {
        let old_up = Vec3::Y;
        let new_up = Vec3::new(0.2, 0.9, 0.1).normalize();
        let moved = transport_vector(Vec3::Z, old_up, new_up);
        assert!(moved.dot(new_up).abs() < TOL);
    }

    #[test]
    fn test_transport_identity_when_up_unchanged() {
        let v = Vec3::new(0.4, 0.0, 0.9);
        assert!((transport_vector(v, Vec3::Y, Vec3::Y) - v).length() < 1e-6);
    }

    #[test]
    fn test_transport_antipodal_is_half_turn() {
        let q = rotation_between(Vec3::Y, Vec3::NEG_Y);
        assert!(!q.is_nan());
        assert!(((q * Vec3::Y) - Vec3::NEG_Y).length() < TOL);
        assert!((q.to_axis_angle().1 - PI).abs() < 1e-3);

        // from parallel to world X: the Y fallback axis is used.
        let q = rotation_between(Vec3::X, Vec3::NEG_X);
        assert!(((q * Vec3::X) - Vec3::NEG_X).length() < TOL);
    }

    #[test]
    fn test_facing_rotation_axes() {
        let up = Vec3::new(1.0, 1.0, 0.0).normalize();
        let forward = Vec3::Z;
        let q = facing_rotation(up, forward);
        assert!(((q * Vec3::Y) - up).length() < TOL);
        assert!(((q * Vec3::Z) - forward).length() < TOL);
    }

    #[test]
    fn test_facing_rotation_degenerate_forward() {
        let q = facing_rotation(Vec3::Y, Vec3::Y);
        assert!(!q.is_nan());
        assert!(((q * Vec3::Y) - Vec3::Y).length() < TOL);
    }

    #[test]
    fn test_align_to_surface_at_poles() {
        for up in [Vec3::Z, Vec3::NEG_Z, Vec3::Y] {
            let q = align_to_surface(up);
            assert!(((q * Vec3::Y) - up).length() < TOL);
        }
    }

    #[test]
    fn test_basis_rotation_matches_axes() {
        let basis = build_basis(Vec3::new(0.0, 0.6, 0.8), Vec3::X);
        let q = basis.rotation();
        assert!(((q * Vec3::Y) - basis.up).length() < TOL);
        assert!(((q * Vec3::Z) - basis.forward).length() < TOL);
    }
}
