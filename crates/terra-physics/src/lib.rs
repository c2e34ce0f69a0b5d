//! Point-versus-shape collision queries for walking on the planet surface.
//!
//! There is no rigid-body simulation here: the player is a sphere of fixed
//! radius and every obstacle exposes a centre (or central segment) and a
//! radius. Movement is rejected when the candidate position overlaps any of
//! them. Attack targeting uses a separate, narrower forward-cone query.

mod collision;

pub use collision::{
    Collidable, CollisionQuery, DEFAULT_BUILDING_RADIUS, PLAYER_RADIUS, TREE_RADIUS, blocks,
    blocks_move, capsule_distance,
};
pub use hit_test::{DEFAULT_ATTACK_RANGE, DEFAULT_CONE_COS, nearest_in_cone};
