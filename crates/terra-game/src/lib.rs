//! Gameplay for a small spherical planet: the world context, its tick, and
//! everything the player can do on the surface.
//!
//! The library has no rendering or windowing. Hosts feed an
//! [`InputState`](terra_player::InputState) into [`WorldContext::tick`] and
//! read back a [`FrameSnapshot`] plus the queued [`GameEvent`]s.

pub mod environment;
mod error;
pub mod events;
pub mod farming;
mod interaction;
pub mod inventory;
pub mod items;
mod snapshot;
pub mod survival;
mod world;

pub use error::SessionError;
pub use events::{Color, EventQueue, GameEvent};
pub use interaction::InteractionOutcome;
pub use inventory::{Inventory, ItemStack};
pub use items::ItemId;
pub use snapshot::{
    BuildingView, CameraView, CropView, DropView, FrameSnapshot, ObjectTransform, Presenter,
    TreeView,
};
pub use survival::Survival;
pub use world::{GameMode, WorldContext, WorldObstacles, WorldRules};
