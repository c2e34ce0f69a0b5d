//! Sampling and snapping points on a sphere of a given radius.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::frame::compute_up;

/// Random point on the sphere of radius `r` from uniform spherical angles.
///
/// Sampling the polar angle uniformly clusters points slightly towards the
/// poles, which is fine for scattering scenery.
pub fn random_point_on_sphere<R: Rng + ?Sized>(rng: &mut R, r: f32) -> Vec3 {
    let phi = rng.random::<f32>() * TAU;
    let theta = rng.random::<f32>() * PI;
    Vec3::new(
        r * theta.sin() * phi.cos(),
        r * theta.sin() * phi.sin(),
        r * theta.cos(),
    )
}

/// Project `point` radially onto the sphere of radius `r`.
#[must_use]
pub fn snap_to_surface(point: Vec3, r: f32) -> Vec3 {
    compute_up(point) * r
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_points_lie_on_sphere() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let p = random_point_on_sphere(&mut rng, 40.0);
            assert!((p.length() - 40.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_snap_preserves_direction() {
        let p = snap_to_surface(Vec3::new(0.0, 12.0, 5.0), 40.0);
        assert!((p.length() - 40.0).abs() < 1e-4);
        assert!(p.normalize().dot(Vec3::new(0.0, 12.0, 5.0).normalize()) > 0.9999);
    }

    #[test]
    fn test_snap_origin_uses_fallback_up() {
        assert_eq!(snap_to_surface(Vec3::ZERO, 40.0), Vec3::new(0.0, 40.0, 0.0));
    }
}
