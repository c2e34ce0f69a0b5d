//! Read-only view of one frame, handed to whatever draws it.

use glam::{Quat, Vec3};
use terra_build::{BuildingId, PlacementTransform};
use terra_planet::{CalendarDate, SunState};

use crate::events::GameEvent;
use crate::items::ItemId;
use crate::world::{GameMode, WorldContext};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeView {
    pub transform: ObjectTransform,
    /// Remaining health in `[0, 1]`.
    pub health: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingView {
    pub id: BuildingId,
    pub transform: ObjectTransform,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropView {
    pub position: Vec3,
    /// `None` for an empty field.
    pub stage: Option<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropView {
    pub item: ItemId,
    pub position: Vec3,
    pub life: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// Everything a renderer or HUD needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    pub player: ObjectTransform,
    pub player_up: Vec3,
    /// Pitch of the held item, animated while swinging.
    pub hand_pitch: f32,
    pub grounded: bool,
    pub camera: CameraView,
    pub preview: Option<(BuildingId, PlacementTransform)>,
    pub sun: SunState,
    pub trees: Vec<TreeView>,
    pub buildings: Vec<BuildingView>,
    pub crops: Vec<CropView>,
    pub drops: Vec<DropView>,
    pub ship: ObjectTransform,
    pub day_progress: f64,
    pub date: CalendarDate,
    pub hunger: f32,
    pub mode: GameMode,
    pub selected_slot: usize,
}

/// Consumer of frames and events. Rendering backends implement this.
pub trait Presenter {
    fn present(&mut self, frame: &FrameSnapshot);

    fn notify(&mut self, _event: &GameEvent) {}
}

impl WorldContext {
    pub fn snapshot(&self) -> FrameSnapshot {
        let preview = match self.mode {
            GameMode::Build => self.build.preview.map(|p| (self.build.selected, p)),
            _ => None,
        };
        FrameSnapshot {
            player: ObjectTransform {
                position: self.player.position,
                rotation: self.player.facing,
            },
            player_up: self.player.up,
            hand_pitch: self.attack.hand_pitch,
            grounded: self.player.is_grounded,
            camera: CameraView {
                eye: self.rig.position,
                target: self.rig.target,
                up: self.rig.up,
            },
            preview,
            sun: SunState::from_planet(&self.planet),
            trees: self
                .trees
                .iter()
                .map(|t| TreeView {
                    transform: ObjectTransform {
                        position: t.position,
                        rotation: t.rotation,
                    },
                    health: if t.max_health > 0.0 {
                        (t.health / t.max_health).clamp(0.0, 1.0)
                    } else {
                        0.0
                    },
                })
                .collect(),
            buildings: self
                .buildings
                .iter()
                .map(|b| BuildingView {
                    id: b.id,
                    transform: ObjectTransform {
                        position: b.position,
                        rotation: b.rotation,
                    },
                })
                .collect(),
            crops: self
                .fields
                .iter()
                .map(|f| CropView {
                    position: f.position,
                    stage: f.crop.map(|c| c.stage),
                })
                .collect(),
            drops: self
                .drops
                .iter()
                .map(|d| DropView {
                    item: d.item,
                    position: d.position,
                    life: d.life,
                })
                .collect(),
            ship: ObjectTransform {
                position: self.ship.position,
                rotation: self.ship.rotation,
            },
            day_progress: self.planet.day_progress(),
            date: self.planet.date_components(),
            hunger: self.survival.hunger_fraction(),
            mode: self.mode,
            selected_slot: self.inventory.selected_slot(),
        }
    }

    /// Hand pending events and then the current frame to `presenter`.
    pub fn present_to(&mut self, presenter: &mut impl Presenter) {
        for event in self.events.drain() {
            presenter.notify(&event);
        }
        presenter.present(&self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use terra_config::Config;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        events: Vec<GameEvent>,
    }

    impl Presenter for Recorder {
        fn present(&mut self, _frame: &FrameSnapshot) {
            self.frames += 1;
        }

        fn notify(&mut self, event: &GameEvent) {
            self.events.push(event.clone());
        }
    }

    #[test]
    fn test_snapshot_mirrors_world() {
        let world = WorldContext::new(&Config::default()).unwrap();
        let frame = world.snapshot();
        assert_eq!(frame.player.position, world.player.position);
        assert_eq!(frame.trees.len(), world.trees.len());
        assert!(frame.trees.iter().all(|t| t.health == 1.0));
        assert!(frame.preview.is_none());
        assert_eq!(frame.mode, GameMode::Normal);
        assert_eq!(frame.date.day, 1);
    }

    #[test]
    fn test_present_drains_events() {
        let mut world = WorldContext::new(&Config::default()).unwrap();
        world.events.message("hello", crate::events::Color::NEUTRAL);
        let mut recorder = Recorder::default();
        world.present_to(&mut recorder);
        assert_eq!(recorder.frames, 1);
        assert_eq!(recorder.events.len(), 1);
        assert!(world.events.is_empty());
    }
}
