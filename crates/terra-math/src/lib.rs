//! Surface-frame math for walking on the outside of a sphere centred at the origin.
//!
//! Everything here is renderer-agnostic: plain `glam` vectors and quaternions
//! that a rendering adapter can translate into whatever its library expects.

mod easing;
mod frame;
mod sphere;

pub use easing::EasingFunction;
pub use frame::{
    PARALLEL_EPSILON, SurfaceBasis, align_to_surface, build_basis, compute_up, facing_rotation,
    rotation_between, transport_vector,
};
pub use sphere::{random_point_on_sphere, snap_to_surface};
