//! Slot-based bag with a nine-slot hotbar.

use terra_player::WeaponStats;

use crate::items::ItemId;

pub const INVENTORY_SLOTS: usize = 27;
/// The first slots of the bag double as the hotbar.
pub const HOTBAR_SLOTS: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    slots: [Option<ItemStack>; INVENTORY_SLOTS],
    selected: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: [None; INVENTORY_SLOTS],
            selected: 0,
        }
    }
}

impl Inventory {
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// Add to an existing stack of `item`, or the first empty slot.
    ///
    /// Returns `false` and leaves the bag unchanged when it is full.
    pub fn add(&mut self, item: ItemId, count: u32) -> bool {
        if let Some(stack) = self.slots.iter_mut().flatten().find(|s| s.item == item) {
            stack.count += count;
            return true;
        }
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(ItemStack { item, count });
                true
            }
            None => false,
        }
    }

    pub fn count(&self, item: ItemId) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item == item)
            .map(|s| s.count)
            .sum()
    }

    /// Remove `count` of `item`. Nothing is removed when there are not enough.
    pub fn consume(&mut self, item: ItemId, count: u32) -> bool {
        if self.count(item) < count {
            return false;
        }
        let mut remaining = count;
        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            let Some(stack) = slot else { continue };
            if stack.item != item {
                continue;
            }
            if stack.count > remaining {
                stack.count -= remaining;
                remaining = 0;
            } else {
                remaining -= stack.count;
                *slot = None;
            }
        }
        true
    }

    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    /// Select a hotbar slot. Indices past the hotbar are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= HOTBAR_SLOTS {
            return false;
        }
        self.selected = index;
        true
    }

    /// Move the hotbar selection one slot, wrapping around.
    pub fn scroll(&mut self, steps: i32) {
        if steps == 0 {
            return;
        }
        let next = (self.selected as i32 + steps.signum()).rem_euclid(HOTBAR_SLOTS as i32);
        self.selected = next as usize;
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.slots[self.selected].map(|s| s.item)
    }

    /// Stats of the weapon in the selected slot, if it holds one.
    pub fn equipped_weapon(&self) -> Option<WeaponStats> {
        self.selected_item().and_then(ItemId::weapon_stats)
    }
}
