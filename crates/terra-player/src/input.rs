//! Aggregated input state for the current frame.
//!
//! The host's input layer (keyboard, pointer lock, buttons) translates raw
//! events into [`Action`]s and pointer deltas. The simulation only ever sees
//! this processed result.

use std::collections::HashSet;

/// Abstract game actions the simulation responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Interact,
    ToggleBuild,
    ToggleInventory,
    Cancel,
    CycleCategory,
    RotateClockwise,
    RotateCounterClockwise,
}

/// The four movement booleans, relative to the camera heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveAxes {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveAxes {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Input for one frame: held actions, edge-triggered actions, pointer motion.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    /// Actions that are currently held down.
    pub active_actions: HashSet<Action>,
    /// Actions that were first pressed this frame.
    pub just_pressed: HashSet<Action>,
    /// Pointer movement in pixels since last frame (only while locked).
    pub mouse_delta: (f32, f32),
    /// Vertical scroll steps since last frame; positive scrolls down.
    pub scroll_delta: f32,
    /// Hotbar / build-list index chosen with a number key this frame (0-based).
    pub number_key: Option<usize>,
}

impl InputState {
    /// Returns true if the action is currently held down.
    pub fn is_active(&self, action: Action) -> bool {
        self.active_actions.contains(&action)
    }

    /// Returns true if the action was first pressed this frame.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Record a key going down: held from now on and pressed this frame.
    pub fn press(&mut self, action: Action) {
        if self.active_actions.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: Action) {
        self.active_actions.remove(&action);
    }

    /// Movement booleans derived from the held movement actions.
    pub fn move_axes(&self) -> MoveAxes {
        MoveAxes {
            forward: self.is_active(Action::MoveForward),
            back: self.is_active(Action::MoveBack),
            left: self.is_active(Action::MoveLeft),
            right: self.is_active(Action::MoveRight),
        }
    }

    /// Forget everything, e.g. when pointer lock is lost.
    pub fn release_all(&mut self) {
        self.active_actions.clear();
        self.clear_transients();
    }

    /// Clear per-frame transient state. Called after each simulation tick.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = 0.0;
        self.number_key = None;
    }
}
