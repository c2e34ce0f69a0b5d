//! Build-mode state and placement acceptance.

use glam::{Quat, Vec3};
use thiserror::Error;
use tracing::debug;

use crate::catalog::{BuildingCatalog, BuildingDef, BuildingId, Category};
use crate::projector::{PREVIEW_DISTANCE, PlacementTransform, project};

/// Radians added or removed per rotate key press.
pub const ROTATION_STEP: f32 = 0.1;

/// A structure that has been built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedObject {
    pub id: BuildingId,
    pub position: Vec3,
    pub rotation: Quat,
    pub radius: f32,
}

/// Why a placement was refused. The action is a no-op in every case.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlacementRejection {
    #[error("not enough wood ({have}/{need})")]
    InsufficientResources { have: u32, need: u32 },
    #[error("not enough space")]
    Overlap,
    #[error("nothing selected to build")]
    NoPreview,
}

/// Accept or reject placing `def` at `candidate`.
///
/// Resources are checked first. The footprint may not overlap any existing
/// structure: every pair must be at least the sum of their radii apart.
pub fn check_placement(
    def: &BuildingDef,
    candidate: Vec3,
    placed: &[PlacedObject],
    wood_available: u32,
) -> Result<(), PlacementRejection> {
    if wood_available < def.wood_cost {
        return Err(PlacementRejection::InsufficientResources {
            have: wood_available,
            need: def.wood_cost,
        });
    }
    let overlapping = placed
        .iter()
        .any(|other| candidate.distance(other.position) < def.radius + other.radius);
    if overlapping {
        return Err(PlacementRejection::Overlap);
    }
    Ok(())
}

/// Selection, rotation and live preview while the build menu is open.
#[derive(Clone, Debug)]
pub struct BuildMode {
    pub category: Category,
    pub selected: BuildingId,
    /// Accumulated rotation about the surface normal; never wrapped.
    pub rotation: f32,
    pub preview: Option<PlacementTransform>,
    pub offset_distance: f32,
}

impl Default for BuildMode {
    fn default() -> Self {
        Self {
            category: Category::Housing,
            selected: BuildingId::House,
            rotation: 0.0,
            preview: None,
            offset_distance: PREVIEW_DISTANCE,
        }
    }
}

impl BuildMode {
    /// Switch to the next tab and select its first entry.
    pub fn cycle_category(&mut self, catalog: &BuildingCatalog) {
        self.category = self.category.next();
        if let Some(first) = catalog.ids_in(self.category).first() {
            self.selected = *first;
        }
        debug!(category = %self.category, selected = ?self.selected, "build category changed");
    }

    /// Select the `index`-th entry of the current tab. Out of range is ignored.
    pub fn select_index(&mut self, index: usize, catalog: &BuildingCatalog) -> bool {
        match catalog.ids_in(self.category).get(index) {
            Some(id) => {
                self.selected = *id;
                true
            }
            None => false,
        }
    }

    /// Step the selection forward (`steps > 0`) or back, wrapping within the tab.
    pub fn scroll(&mut self, steps: i32, catalog: &BuildingCatalog) {
        if steps == 0 {
            return;
        }
        let ids = catalog.ids_in(self.category);
        let Some(current) = ids.iter().position(|id| *id == self.selected) else {
            return;
        };
        let len = ids.len() as i32;
        let next = (current as i32 + steps.signum()).rem_euclid(len);
        self.selected = ids[next as usize];
    }

    /// Turn the preview one step; positive `direction` is clockwise.
    pub fn rotate(&mut self, direction: f32) {
        self.rotation += ROTATION_STEP * direction.signum();
    }

    /// Recompute the preview from the player's current position and heading.
    pub fn update_preview(
        &mut self,
        player_position: Vec3,
        camera_forward: Vec3,
        planet_radius: f32,
    ) -> PlacementTransform {
        let transform = project(
            player_position,
            camera_forward,
            planet_radius,
            self.offset_distance,
            self.rotation,
        );
        self.preview = Some(transform);
        transform
    }

    /// Leave build mode. The preview is discarded; selection and rotation stay.
    pub fn exit(&mut self) {
        self.preview = None;
    }

    /// Validate the current preview and produce the object to build.
    ///
    /// The preview transform is copied verbatim, never re-projected.
    pub fn confirm(
        &self,
        catalog: &BuildingCatalog,
        placed: &[PlacedObject],
        wood_available: u32,
    ) -> Result<PlacedObject, PlacementRejection> {
        let preview = self.preview.ok_or(PlacementRejection::NoPreview)?;
        let def = catalog
            .get(self.selected)
            .ok_or(PlacementRejection::NoPreview)?;
        check_placement(def, preview.position, placed, wood_available)?;
        Ok(PlacedObject {
            id: def.id,
            position: preview.position,
            rotation: preview.rotation,
            radius: def.radius,
        })
    }
}
