//! Interact-key handling, building placement and melee hit resolution.

use rand::Rng;
use terra_build::{BuildingId, Category, PlacementRejection};
use terra_physics::{DEFAULT_CONE_COS, nearest_in_cone};
use terra_player::WeaponStats;
use tracing::{debug, info};

use crate::events::Color;
use crate::farming::{Crop, Field, nearest_field};
use crate::items::{ItemId, ItemKind};
use crate::survival::{CHOP_HUNGER_COST, EatRejection};
use crate::world::{GameMode, WorldContext};

/// Height above a tree's base where chip particles appear.
const CHIP_HEIGHT: f32 = 2.0;

/// What a press of the interact key ended up doing.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionOutcome {
    Built(BuildingId),
    PlacementRejected(PlacementRejection),
    Planted,
    NeedSeed,
    Harvested,
    /// An unripe crop was pulled and its seed returned.
    CropRemoved,
    Ate,
    AlreadyFull,
    Nothing,
}

impl WorldContext {
    /// Use whatever is in front of the player.
    ///
    /// In build mode this places the previewed structure. Otherwise the
    /// nearest field within reach takes priority over eating held food.
    pub fn interact(&mut self) -> InteractionOutcome {
        if self.mode == GameMode::Build {
            return self.place_building();
        }
        if let Some(index) = nearest_field(&self.fields, self.player.position) {
            return self.work_field(index);
        }
        match self.inventory.selected_item() {
            Some(item) if matches!(item.def().kind, ItemKind::Food { .. }) => self.eat(item),
            _ => InteractionOutcome::Nothing,
        }
    }

    /// Build the previewed structure, paying its wood cost.
    pub fn place_building(&mut self) -> InteractionOutcome {
        let wood = self.inventory.count(ItemId::Wood);
        let placed = match self.build.confirm(&self.catalog, &self.buildings, wood) {
            Ok(placed) => placed,
            Err(rejection) => {
                debug!(%rejection, "placement rejected");
                self.events.message(rejection.to_string(), Color::ERROR);
                return InteractionOutcome::PlacementRejected(rejection);
            }
        };
        let Some(def) = self.catalog.get(placed.id).cloned() else {
            return InteractionOutcome::PlacementRejected(PlacementRejection::NoPreview);
        };

        self.inventory.consume(ItemId::Wood, def.wood_cost);
        self.buildings.push(placed);
        if def.category == Category::Farming {
            self.fields.push(Field::new(placed.position, placed.rotation));
        }
        self.events.effect(placed.position, Color::GOLD, 15);
        self.events
            .message(format!("{} built!", def.name), Color::SUCCESS);
        info!(building = %def.name, position = ?placed.position, "structure placed");
        InteractionOutcome::Built(placed.id)
    }

    fn work_field(&mut self, index: usize) -> InteractionOutcome {
        let field = self.fields[index];
        match field.crop {
            Some(crop) if crop.is_ripe() => {
                self.fields[index].crop = None;
                self.spawn_drop(field.position, crop.yields);
                self.events.effect(field.position, Color::HARVEST, 8);
                self.events.message("Harvested!", Color::GOLD);
                InteractionOutcome::Harvested
            }
            Some(crop) => {
                self.fields[index].crop = None;
                self.spawn_drop(field.position, crop.seed);
                self.events.message("Crop removed.", Color::NEUTRAL);
                InteractionOutcome::CropRemoved
            }
            None => {
                let held = self.inventory.selected_item();
                let Some((seed, yields)) = held.and_then(|item| match item.def().kind {
                    ItemKind::Seed { crop } => Some((item, crop)),
                    _ => None,
                }) else {
                    self.events.message("You need a seed.", Color::ERROR);
                    return InteractionOutcome::NeedSeed;
                };
                self.inventory.consume(seed, 1);
                self.fields[index].crop = Some(Crop::planted(seed, yields));
                self.events.effect(field.position, Color::SPROUT, 5);
                self.events.message("Seed planted.", Color::SUCCESS);
                InteractionOutcome::Planted
            }
        }
    }

    fn eat(&mut self, item: ItemId) -> InteractionOutcome {
        let ItemKind::Food {
            hunger_restore,
            health_restore,
        } = item.def().kind
        else {
            return InteractionOutcome::Nothing;
        };
        match self.survival.eat(hunger_restore, health_restore) {
            Ok(()) => {
                self.inventory.consume(item, 1);
                self.events.message("Yum!", Color::GOLD);
                self.events.effect(self.player.position, Color::HARVEST, 5);
                InteractionOutcome::Ate
            }
            Err(EatRejection::Full) => {
                self.events.message("You're full.", Color::NEUTRAL);
                InteractionOutcome::AlreadyFull
            }
        }
    }

    /// Apply one swing's hit to the nearest tree in the facing cone.
    ///
    /// Returns the index the struck tree had before any removal.
    pub(crate) fn resolve_attack_hit(&mut self, weapon: &WeaponStats) -> Option<usize> {
        let index = nearest_in_cone(
            self.player.position,
            self.player.look_direction(),
            self.trees.iter().map(|t| t.position),
            weapon.range,
            DEFAULT_CONE_COS,
        )?;
        let fells = self
            .inventory
            .selected_item()
            .is_some_and(ItemId::fells_trees);
        if !fells {
            return None;
        }

        let tree = &mut self.trees[index];
        let felled = tree.damage(weapon.damage);
        let chip_at = tree.position + self.player.up * CHIP_HEIGHT;
        self.events.effect(chip_at, Color::WOOD, 3);
        debug!(index, health = self.trees[index].health, "tree hit");

        if felled {
            self.fell_tree(index);
        }
        Some(index)
    }

    fn fell_tree(&mut self, index: usize) {
        let tree = self.trees.remove(index);
        self.spawn_drop(tree.position, ItemId::Wood);
        if self.rng.random_bool(self.rules.seed_drop_chance) {
            self.spawn_drop(tree.position, ItemId::UnknownSeed);
        }
        self.events.effect(tree.position, Color::WOOD, 8);
        self.survival.exhaust(CHOP_HUNGER_COST);
        info!(position = ?tree.position, remaining = self.trees.len(), "tree felled");
    }
}
