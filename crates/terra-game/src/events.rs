//! Fire-and-forget notifications for the host (renderer, HUD, audio).

use glam::Vec3;

use crate::items::ItemId;

/// 0xRRGGBB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const SUCCESS: Color = Color(0x4a_de_80);
    pub const ERROR: Color = Color(0xff_6b_6b);
    pub const GOLD: Color = Color(0xff_d7_00);
    pub const NEUTRAL: Color = Color(0xcc_cc_cc);
    pub const WOOD: Color = Color(0x8b_45_13);
    pub const SPROUT: Color = Color(0x00_ff_00);
    pub const HARVEST: Color = Color(0xff_7f_00);

    pub fn rgb(self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.0.to_be_bytes();
        (r, g, b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A pickup appeared in the world.
    SpawnDrop { position: Vec3, item: ItemId },
    /// A burst of `count` particles.
    Effect {
        position: Vec3,
        color: Color,
        count: u32,
    },
    /// A transient on-screen message.
    Message { text: String, color: Color },
    /// The planet's local day rolled over.
    DayChanged { day: u64, date: String },
}

/// Events raised during a tick, drained by the host once per frame.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn message(&mut self, text: impl Into<String>, color: Color) {
        self.push(GameEvent::Message {
            text: text.into(),
            color,
        });
    }

    pub fn effect(&mut self, position: Vec3, color: Color, count: u32) {
        self.push(GameEvent::Effect {
            position,
            color,
            count,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
