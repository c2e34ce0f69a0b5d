//! Natural trees, the crashed ship, and item drops.

use glam::{Quat, Vec3};
use rand::Rng;
use terra_math::{PARALLEL_EPSILON, align_to_surface, compute_up, random_point_on_sphere};
use terra_physics::Collidable;
use tracing::warn;

use crate::items::ItemId;

/// Re-rolls allowed per tree before giving up on keeping it clear.
const MAX_SCATTER_ATTEMPTS: u32 = 32;

/// Height above the source at which a drop appears.
const DROP_SPAWN_HEIGHT: f32 = 1.0;
const DROP_LAUNCH_SPEED: f32 = 0.5;
/// Full width of the random velocity jitter per axis.
const DROP_JITTER: f32 = 0.2;
/// Life lost per reference tick; a drop lasts 50 ticks.
const DROP_DECAY: f32 = 0.02;
const DROP_ATTRACT_RADIUS: f32 = 5.0;
const DROP_ATTRACT_ACCEL: f32 = 0.05;
const DROP_PICKUP_RADIUS: f32 = 2.0;

/// Ship hull capsule in the ship's local frame.
const SHIP_CAPSULE_HALF_HEIGHT: f32 = 2.0;
const SHIP_CAPSULE_FORWARD: f32 = 2.0;
const SHIP_CAPSULE_RADIUS: f32 = 1.8;
/// Tilt applied after aligning to the surface, so the ship looks crashed.
const SHIP_TILT_X: f32 = 0.15;
const SHIP_TILT_Y: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tree {
    pub position: Vec3,
    pub rotation: Quat,
    pub health: f32,
    pub max_health: f32,
}

impl Tree {
    pub fn new(position: Vec3, health: f32) -> Self {
        Self {
            position,
            rotation: align_to_surface(compute_up(position)),
            health,
            max_health: health,
        }
    }

    pub fn collidable(&self) -> Collidable {
        Collidable::tree(self.position)
    }

    /// Apply damage. Returns `true` once health reaches zero.
    pub fn damage(&mut self, amount: f32) -> bool {
        self.health -= amount;
        self.health <= 0.0
    }
}

/// Scatter `count` trees uniformly over the surface.
///
/// Each `(centre, clearance)` zone is kept free of trunks so the player
/// cannot spawn wedged against one.
pub fn scatter_trees<R: Rng + ?Sized>(
    rng: &mut R,
    count: u32,
    planet_radius: f32,
    health: f32,
    keep_clear: &[(Vec3, f32)],
) -> Vec<Tree> {
    let mut trees = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut position = random_point_on_sphere(rng, planet_radius);
        let mut attempts = 1;
        while keep_clear
            .iter()
            .any(|(centre, clearance)| position.distance(*centre) < *clearance)
        {
            if attempts >= MAX_SCATTER_ATTEMPTS {
                warn!(?position, "no clear spot for tree, placing anyway");
                break;
            }
            position = random_point_on_sphere(rng, planet_radius);
            attempts += 1;
        }
        trees.push(Tree::new(position, health));
    }
    trees
}

/// The wreck the player starts next to. Static, blocks movement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrashedShip {
    pub position: Vec3,
    pub rotation: Quat,
    pub capsule_radius: f32,
}

impl CrashedShip {
    /// Place the wreck `distance` to the side of `spawn`, on the surface.
    pub fn near_spawn(spawn: Vec3, planet_radius: f32, distance: f32) -> Self {
        let up = compute_up(spawn);
        let mut side = up.cross(Vec3::Z);
        if side.length_squared() < PARALLEL_EPSILON {
            side = up.cross(Vec3::X);
        }
        let position = compute_up(spawn + side.normalize() * distance) * planet_radius;
        let rotation = align_to_surface(compute_up(position))
            * Quat::from_axis_angle(Vec3::X, SHIP_TILT_X)
            * Quat::from_axis_angle(Vec3::Y, SHIP_TILT_Y);
        Self {
            position,
            rotation,
            capsule_radius: SHIP_CAPSULE_RADIUS,
        }
    }

    /// World-space endpoints of the hull capsule.
    pub fn capsule(&self) -> (Vec3, Vec3) {
        let top = Vec3::new(0.0, SHIP_CAPSULE_HALF_HEIGHT, SHIP_CAPSULE_FORWARD);
        let bottom = Vec3::new(0.0, -SHIP_CAPSULE_HALF_HEIGHT, SHIP_CAPSULE_FORWARD);
        (
            self.position + self.rotation * bottom,
            self.position + self.rotation * top,
        )
    }

    pub fn collidable(&self) -> Collidable {
        let (start, end) = self.capsule();
        Collidable::Capsule {
            start,
            end,
            radius: self.capsule_radius,
        }
    }
}

/// A pickup flying out of a felled tree or harvested field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drop {
    pub item: ItemId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining life in `[0, 1]`; collected automatically at zero.
    pub life: f32,
}

impl Drop {
    /// Launch a drop upward from `source` with a little random spread.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, source: Vec3, item: ItemId) -> Self {
        let up = compute_up(source);
        let mut jitter = || (rng.random::<f32>() - 0.5) * DROP_JITTER;
        let velocity = up * DROP_LAUNCH_SPEED + Vec3::new(jitter(), jitter(), jitter());
        Self {
            item,
            position: source + up * DROP_SPAWN_HEIGHT,
            velocity,
            life: 1.0,
        }
    }
}

/// Move drops, pull nearby ones toward the player, and collect the ones
/// that reached the player or expired. Returns the collected items in order.
pub fn update_drops(drops: &mut Vec<Drop>, player_position: Vec3, tick_scale: f32) -> Vec<ItemId> {
    let mut collected = Vec::new();
    drops.retain_mut(|drop| {
        drop.life -= DROP_DECAY * tick_scale;
        drop.position += drop.velocity * tick_scale;

        let to_player = player_position - drop.position;
        if to_player.length() < DROP_ATTRACT_RADIUS {
            drop.velocity += to_player.normalize_or_zero() * DROP_ATTRACT_ACCEL * tick_scale;
        }

        if drop.position.distance(player_position) < DROP_PICKUP_RADIUS || drop.life <= 0.0 {
            collected.push(drop.item);
            return false;
        }
        true
    });
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_trees_lie_on_surface() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let trees = scatter_trees(&mut rng, 40, 40.0, 100.0, &[]);
        assert_eq!(trees.len(), 40);
        for tree in &trees {
            assert!((tree.position.length() - 40.0).abs() < 1e-3);
            assert_eq!(tree.health, 100.0);
            assert!(((tree.rotation * Vec3::Y) - tree.position.normalize()).length() < 1e-3);
        }
    }

    #[test]
    fn test_scatter_respects_clear_zone() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let spawn = Vec3::new(0.0, 40.0, 0.0);
        let trees = scatter_trees(&mut rng, 200, 40.0, 100.0, &[(spawn, 6.0)]);
        assert!(trees.iter().all(|t| t.position.distance(spawn) >= 6.0));
    }

    #[test]
    fn test_same_seed_same_forest() {
        let a = scatter_trees(&mut ChaCha8Rng::seed_from_u64(5), 10, 40.0, 100.0, &[]);
        let b = scatter_trees(&mut ChaCha8Rng::seed_from_u64(5), 10, 40.0, 100.0, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tree_felled_after_five_axe_hits() {
        let mut tree = Tree::new(Vec3::new(0.0, 40.0, 0.0), 100.0);
        for _ in 0..4 {
            assert!(!tree.damage(20.0));
        }
        assert!(tree.damage(20.0));
    }

    #[test]
    fn test_ship_beside_spawn() {
        let spawn = Vec3::new(0.0, 40.0, 0.0);
        let ship = CrashedShip::near_spawn(spawn, 40.0, 8.0);
        assert!((ship.position.length() - 40.0).abs() < 1e-3);
        // up × Z at the north pole is +X.
        assert!(ship.position.x > 7.0);
        let (start, end) = ship.capsule();
        assert!((start.distance(end) - 4.0).abs() < 1e-4);
        // The spawn point is not inside the hull.
        let player = Vec3::new(0.0, 41.5, 0.0);
        assert!(!ship.collidable().overlaps(player, terra_physics::PLAYER_RADIUS));
    }

    #[test]
    fn test_ship_fallback_axis_at_z_pole() {
        let ship = CrashedShip::near_spawn(Vec3::new(0.0, 0.0, 40.0), 40.0, 8.0);
        assert!(!ship.position.is_nan());
        assert!((ship.position.length() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_drop_launches_upward() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let source = Vec3::new(0.0, 40.0, 0.0);
        let drop = Drop::spawn(&mut rng, source, ItemId::Wood);
        assert_eq!(drop.position, Vec3::new(0.0, 41.0, 0.0));
        assert!(drop.velocity.y > 0.39 && drop.velocity.y < 0.61);
        assert!(drop.velocity.x.abs() <= 0.1 && drop.velocity.z.abs() <= 0.1);
        assert_eq!(drop.life, 1.0);
    }

    #[test]
    fn test_drop_collected_near_player() {
        let mut drops = vec![Drop {
            item: ItemId::Carrot,
            position: Vec3::new(0.0, 41.5, 1.0),
            velocity: Vec3::ZERO,
            life: 1.0,
        }];
        let collected = update_drops(&mut drops, Vec3::new(0.0, 41.5, 0.0), 1.0);
        assert_eq!(collected, vec![ItemId::Carrot]);
        assert!(drops.is_empty());
    }

    #[test]
    fn test_far_drop_expires_after_fifty_ticks() {
        let mut drops = vec![Drop {
            item: ItemId::Wood,
            position: Vec3::new(100.0, 0.0, 0.0),
            velocity: Vec3::ZERO,
            life: 1.0,
        }];
        let player = Vec3::new(0.0, 41.5, 0.0);
        let mut ticks = 0;
        while !drops.is_empty() {
            ticks += 1;
            let collected = update_drops(&mut drops, player, 1.0);
            if !collected.is_empty() {
                assert_eq!(collected, vec![ItemId::Wood]);
            }
            assert!(ticks <= 51);
        }
        assert!(ticks >= 49);
    }

    #[test]
    fn test_nearby_drop_is_pulled_in() {
        let mut drops = vec![Drop {
            item: ItemId::Wood,
            position: Vec3::new(0.0, 41.5, 4.0),
            velocity: Vec3::ZERO,
            life: 1.0,
        }];
        update_drops(&mut drops, Vec3::new(0.0, 41.5, 0.0), 1.0);
        assert!(drops[0].velocity.z < 0.0);
    }
}
