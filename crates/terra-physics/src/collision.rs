//! Obstacle shapes and the movement-blocking query.

use glam::Vec3;
use tracing::trace;

/// Collision radius of the player body.
pub const PLAYER_RADIUS: f32 = 1.0;
/// Collision radius of a natural tree trunk.
pub const TREE_RADIUS: f32 = 1.2;
/// Footprint used for a building whose definition carries no radius.
pub const DEFAULT_BUILDING_RADIUS: f32 = 3.5;

/// Segments shorter than this are treated as a single point.
const SEGMENT_EPSILON: f32 = 1e-6;

/// An obstacle the player cannot walk through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collidable {
    /// A sphere around a tree's base.
    Tree { center: Vec3, radius: f32 },
    /// A sphere around a placed building, sized by its definition.
    Building { center: Vec3, radius: f32 },
    /// A capsule around a segment, used for the crashed ship hull.
    Capsule { start: Vec3, end: Vec3, radius: f32 },
}

impl Collidable {
    pub fn tree(center: Vec3) -> Self {
        Collidable::Tree {
            center,
            radius: TREE_RADIUS,
        }
    }

    /// A building footprint; a missing or non-positive radius uses the default.
    pub fn building(center: Vec3, radius: Option<f32>) -> Self {
        let radius = radius
            .filter(|r| *r > 0.0)
            .unwrap_or(DEFAULT_BUILDING_RADIUS);
        Collidable::Building { center, radius }
    }

    /// Distance from `point` to the shape's core (centre or central segment).
    pub fn distance_to(&self, point: Vec3) -> f32 {
        match *self {
            Collidable::Tree { center, .. } | Collidable::Building { center, .. } => {
                point.distance(center)
            }
            Collidable::Capsule { start, end, .. } => capsule_distance(point, start, end),
        }
    }

    pub fn radius(&self) -> f32 {
        match *self {
            Collidable::Tree { radius, .. }
            | Collidable::Building { radius, .. }
            | Collidable::Capsule { radius, .. } => radius,
        }
    }

    /// Whether a sphere of `body_radius` at `point` overlaps this shape.
    pub fn overlaps(&self, point: Vec3, body_radius: f32) -> bool {
        self.distance_to(point) < body_radius + self.radius()
    }
}

/// Shortest distance from `point` to the segment `start..end`.
///
/// Projections before `start` or past `end` snap to the nearer endpoint.
pub fn capsule_distance(point: Vec3, start: Vec3, end: Vec3) -> f32 {
    let line = end - start;
    let len = line.length();
    if len < SEGMENT_EPSILON {
        return point.distance(start);
    }
    let dir = line / len;
    let projection = (point - start).dot(dir).clamp(0.0, len);
    point.distance(start + dir * projection)
}

/// Answers whether the player body may occupy a candidate position.
///
/// Implemented by the world context over its live trees, buildings and ship,
/// and by plain closures in tests.
pub trait CollisionQuery {
    fn blocks(&self, candidate: Vec3) -> bool;

    /// Whether a step from `from` to `to` is refused.
    ///
    /// Defaults to checking the destination only.
    fn blocks_move(&self, _from: Vec3, to: Vec3) -> bool {
        self.blocks(to)
    }
}

impl<F> CollisionQuery for F
where
    F: Fn(Vec3) -> bool,
{
    fn blocks(&self, candidate: Vec3) -> bool {
        self(candidate)
    }
}

/// `true` if a body of `body_radius` at `candidate` overlaps any obstacle.
pub fn blocks(
    candidate: Vec3,
    body_radius: f32,
    obstacles: impl IntoIterator<Item = Collidable>,
) -> bool {
    let hit = obstacles
        .into_iter()
        .find(|obstacle| obstacle.overlaps(candidate, body_radius));
    if let Some(obstacle) = hit {
        trace!(?candidate, ?obstacle, "movement blocked");
        return true;
    }
    false
}

/// `true` if stepping a body from `from` to `to` pushes it into an obstacle.
///
/// A body that already overlaps something, such as a structure raised right
/// next to it, may still step as long as it strictly gains separation from
/// every obstacle it overlaps at `to`.
pub fn blocks_move(
    from: Vec3,
    to: Vec3,
    body_radius: f32,
    obstacles: impl IntoIterator<Item = Collidable>,
) -> bool {
    let hit = obstacles.into_iter().find(|obstacle| {
        obstacle.overlaps(to, body_radius) && obstacle.distance_to(to) <= obstacle.distance_to(from)
    });
    if let Some(obstacle) = hit {
        trace!(?from, ?to, ?obstacle, "movement blocked");
        return true;
    }
    false
}
