//! Build mode: a catalog of placeable structures, the surface-locked preview
//! transform, and the acceptance rules for confirming a placement.

mod catalog;
mod placement;
mod projector;

pub use catalog::{BuildingCatalog, BuildingDef, BuildingId, Category};
pub use placement::{BuildMode, PlacedObject, PlacementRejection, ROTATION_STEP, check_placement};
pub use projector::{PREVIEW_DISTANCE, PlacementTransform, project};
