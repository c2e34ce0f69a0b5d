//! Canned input for headless sessions.
//!
//! The session loops over a short routine: walk, turn, chop, open the build
//! menu and try to place whatever is selected, then eat if hungry.

use terra_game::{ItemId, WorldContext};
use terra_player::{Action, InputState};

/// Length of one pass through the routine, in ticks.
const ROUTINE_TICKS: u64 = 600;

#[derive(Debug, Default)]
pub struct Autopilot {
    input: InputState,
}

impl Autopilot {
    /// Input for `tick`, given the world as it stood after the previous one.
    pub fn next(&mut self, tick: u64, world: &WorldContext) -> &InputState {
        self.input.release_all();

        let phase = tick % ROUTINE_TICKS;
        match phase {
            // Walk and slowly look around.
            0..=239 => {
                self.input.press(Action::MoveForward);
                self.input.mouse_delta = (4.0, 0.0);
            }
            // Turn on the spot and keep swinging at whatever is ahead.
            240..=419 => {
                self.input.mouse_delta = (10.0, 0.0);
                if phase % 20 == 0 {
                    self.input.press(Action::Attack);
                }
            }
            420 => self.input.press(Action::ToggleBuild),
            450 => {
                if world.inventory.count(ItemId::Wood) > 0 {
                    self.input.press(Action::Interact);
                }
            }
            460 => self.input.press(Action::Cancel),
            500 => {
                if world.survival.hunger_fraction() < 0.8
                    && world.inventory.count(ItemId::Carrot) > 0
                {
                    self.input.number_key = carrot_slot(world);
                }
            }
            501 => self.input.press(Action::Interact),
            502 => self.input.number_key = Some(0),
            _ => {}
        }
        &self.input
    }
}

fn carrot_slot(world: &WorldContext) -> Option<usize> {
    world
        .inventory
        .slots()
        .iter()
        .take(terra_game::inventory::HOTBAR_SLOTS)
        .position(|slot| slot.is_some_and(|s| s.item == ItemId::Carrot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_config::Config;

    #[test]
    fn test_routine_walks_then_swings() {
        let world = WorldContext::new(&Config::default()).unwrap();
        let mut pilot = Autopilot::default();
        assert!(pilot.next(0, &world).is_active(Action::MoveForward));
        let swing = pilot.next(260, &world);
        assert!(swing.just_pressed(Action::Attack));
        assert!(!swing.is_active(Action::MoveForward));
        assert!(pilot.next(420, &world).just_pressed(Action::ToggleBuild));
    }

    #[test]
    fn test_no_interact_without_wood() {
        let world = WorldContext::new(&Config::default()).unwrap();
        let mut pilot = Autopilot::default();
        assert!(!pilot.next(450, &world).just_pressed(Action::Interact));
    }
}
