//! The per-session world context and its frame tick.
//!
//! Everything the simulation mutates lives in [`WorldContext`]. The host
//! constructs one per session and calls [`WorldContext::tick`] once per
//! display frame with the elapsed time and that frame's input.

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use terra_build::{BuildMode, BuildingCatalog, PlacedObject};
use terra_config::Config;
use terra_physics::{Collidable, CollisionQuery, blocks, blocks_move};
use terra_planet::{CosmicClock, Planet, PlanetParams};
use terra_player::{
    Action, AttackState, CameraRig, CameraState, InputState, LocomotionParams, PlayerState,
    StepContext, apply_pointer, locomotion_step, tick_scale,
};
use tracing::{debug, info};

use crate::environment::{CrashedShip, Drop, Tree, scatter_trees, update_drops};
use crate::error::SessionError;
use crate::events::{Color, EventQueue, GameEvent};
use crate::farming::{Field, update_crops};
use crate::inventory::Inventory;
use crate::items::ItemId;
use crate::survival::Survival;

/// Radius around the spawn point kept free of trees.
const SPAWN_CLEARANCE: f32 = 6.0;

/// Which panel, if any, is open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameMode {
    #[default]
    Normal,
    Build,
    Inventory,
}

/// Gameplay tunables copied out of the config at session start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldRules {
    pub seed_drop_chance: f64,
    pub crop_stage_seconds: f32,
    pub pointer_sensitivity: f32,
    pub invert_y: bool,
}

/// Obstacles the player collides with: trees, buildings and the ship.
pub struct WorldObstacles<'a> {
    pub trees: &'a [Tree],
    pub buildings: &'a [PlacedObject],
    pub ship: &'a CrashedShip,
    pub body_radius: f32,
}

impl<'a> WorldObstacles<'a> {
    pub fn new(
        trees: &'a [Tree],
        buildings: &'a [PlacedObject],
        ship: &'a CrashedShip,
        body_radius: f32,
    ) -> Self {
        Self {
            trees,
            buildings,
            ship,
            body_radius,
        }
    }

    fn collidables(&self) -> impl Iterator<Item = Collidable> + '_ {
        self.trees
            .iter()
            .map(Tree::collidable)
            .chain(
                self.buildings
                    .iter()
                    .map(|b| Collidable::building(b.position, Some(b.radius))),
            )
            .chain(std::iter::once(self.ship.collidable()))
    }
}

impl CollisionQuery for WorldObstacles<'_> {
    fn blocks(&self, candidate: Vec3) -> bool {
        blocks(candidate, self.body_radius, self.collidables())
    }

    fn blocks_move(&self, from: Vec3, to: Vec3) -> bool {
        blocks_move(from, to, self.body_radius, self.collidables())
    }
}

pub struct WorldContext {
    pub planet: Planet,
    pub cosmic_clock: CosmicClock,
    pub player: PlayerState,
    pub camera: CameraState,
    pub attack: AttackState,
    pub rig: CameraRig,
    pub build: BuildMode,
    pub catalog: BuildingCatalog,
    pub inventory: Inventory,
    pub survival: Survival,
    pub trees: Vec<Tree>,
    pub buildings: Vec<PlacedObject>,
    pub fields: Vec<Field>,
    pub ship: CrashedShip,
    pub drops: Vec<Drop>,
    pub mode: GameMode,
    /// While set, [`WorldContext::tick`] does nothing.
    pub paused: bool,
    pub events: EventQueue,
    pub locomotion: LocomotionParams,
    pub rules: WorldRules,
    pub(crate) rng: ChaCha8Rng,
    ticks: u64,
}

impl WorldContext {
    /// Build a fresh session from `config`.
    pub fn new(config: &Config) -> Result<Self, SessionError> {
        config.validate()?;

        let planet = Planet::new(PlanetParams {
            name: config.planet.name.clone(),
            description: config.planet.description.clone(),
            size: config.planet.size,
            gravity: config.planet.gravity,
            day_duration: config.planet.day_duration,
            days_per_month: config.planet.days_per_month,
            months_per_year: config.planet.months_per_year,
            start_year: config.planet.start_year,
            local_time: 0.0,
        })?;
        let radius = planet.radius();

        let locomotion = LocomotionParams {
            standoff: config.player.standoff,
            base_move_speed: config.player.move_speed,
            jump_impulse: config.player.jump_impulse,
            player_radius: config.player.radius,
        };
        let mut player = PlayerState::spawn(radius, config.player.spawn_offset);
        player.radius = config.player.radius;
        let camera = CameraState {
            pitch: config.camera.initial_pitch,
            ..CameraState::default()
        };
        let mut rig = CameraRig {
            distance: config
                .camera
                .horizontal_offset
                .hypot(config.camera.vertical_offset),
            follow: config.camera.follow,
            ..CameraRig::default()
        };
        rig.snap_to(&player, &camera);

        let mut rng = ChaCha8Rng::seed_from_u64(config.world.seed);
        let ship = CrashedShip::near_spawn(player.position, radius, config.world.ship_distance);
        let keep_clear = [
            (player.position, SPAWN_CLEARANCE),
            (ship.position, SPAWN_CLEARANCE),
        ];
        let trees = scatter_trees(
            &mut rng,
            config.world.tree_count,
            radius,
            config.world.tree_health,
            &keep_clear,
        );

        let mut inventory = Inventory::default();
        if config.world.start_with_axe {
            inventory.add(ItemId::Axe, 1);
        }

        info!(
            planet = %planet.name(),
            radius,
            trees = trees.len(),
            seed = config.world.seed,
            "world created"
        );

        Ok(Self {
            cosmic_clock: CosmicClock::new(config.world.cosmic_day_duration),
            survival: Survival::new(
                config.player.max_hunger,
                config.player.max_health,
                config.planet.day_duration,
            ),
            planet,
            player,
            camera,
            attack: AttackState::default(),
            rig,
            build: BuildMode::default(),
            catalog: BuildingCatalog::default(),
            inventory,
            trees,
            buildings: Vec::new(),
            fields: Vec::new(),
            ship,
            drops: Vec::new(),
            mode: GameMode::Normal,
            paused: false,
            events: EventQueue::default(),
            locomotion,
            rules: WorldRules {
                seed_drop_chance: config.world.seed_drop_chance,
                crop_stage_seconds: config.world.crop_stage_seconds,
                pointer_sensitivity: config.input.pointer_sensitivity,
                invert_y: config.input.invert_y,
            },
            rng,
            ticks: 0,
        })
    }

    /// Number of ticks simulated so far (paused frames excluded).
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn obstacles(&self) -> WorldObstacles<'_> {
        WorldObstacles::new(&self.trees, &self.buildings, &self.ship, self.player.radius)
    }

    /// Advance the world by `dt` seconds of wall-clock time.
    pub fn tick(&mut self, dt: f32, input: &InputState) {
        if self.paused {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let scale = tick_scale(dt);
        self.ticks += 1;

        self.advance_clocks(dt);
        self.survival.tick(dt);
        let move_speed = self.survival.effective_speed(self.locomotion.base_move_speed);

        self.handle_mode_input(input);
        self.handle_pointer(input);
        if input.just_pressed(Action::Jump) && self.player.jump(self.locomotion.jump_impulse) {
            debug!("jump");
        }
        if self.mode == GameMode::Normal && input.just_pressed(Action::Attack) {
            let weapon = self.inventory.equipped_weapon();
            if self.attack.begin(weapon.as_ref()) {
                debug!("swing started");
            }
        }

        let ctx = StepContext {
            planet_radius: self.planet.radius(),
            gravity: self.planet.gravity(),
            move_speed,
            tick_scale: scale,
            params: self.locomotion,
        };
        let Self {
            player,
            camera,
            trees,
            buildings,
            ship,
            ..
        } = self;
        let obstacles = WorldObstacles::new(trees, buildings, ship, player.radius);
        locomotion_step(player, camera, input.move_axes(), &ctx, &obstacles);

        self.advance_attack(scale);

        if self.mode == GameMode::Build {
            self.build
                .update_preview(self.player.position, self.camera.forward, self.planet.radius());
        }

        self.collect_drops(scale);
        for index in update_crops(&mut self.fields, dt, self.rules.crop_stage_seconds) {
            let position = self.fields[index].position;
            self.events.effect(position, Color::SPROUT, 3);
        }

        self.rig.update(&self.player, &self.camera, scale);
    }

    fn advance_clocks(&mut self, dt: f32) {
        if self.cosmic_clock.tick(f64::from(dt)) {
            debug!(day = self.cosmic_clock.day, "cosmic day advanced");
        }
        if self.planet.update_time(f64::from(dt)) {
            let date = self.planet.formatted_date();
            info!(planet = %self.planet.name(), %date, "new day");
            self.events
                .message(format!("{} {}", self.planet.name(), date), Color::GOLD);
            self.events.push(GameEvent::DayChanged {
                day: self.planet.local_day(),
                date,
            });
        }
    }

    /// Open `target`, or close it when it is already open.
    pub fn toggle_mode(&mut self, target: GameMode) {
        if self.mode == GameMode::Build {
            self.build.exit();
        }
        self.mode = if self.mode == target {
            GameMode::Normal
        } else {
            target
        };
        if self.mode == GameMode::Build {
            self.events
                .message("Build mode (scroll: select, Tab: category)", Color::SUCCESS);
        }
        debug!(mode = ?self.mode, "mode changed");
    }

    fn handle_mode_input(&mut self, input: &InputState) {
        if input.just_pressed(Action::ToggleBuild) {
            self.toggle_mode(GameMode::Build);
        }
        if input.just_pressed(Action::ToggleInventory) {
            self.toggle_mode(GameMode::Inventory);
        }
        if input.just_pressed(Action::Cancel) && self.mode != GameMode::Normal {
            let current = self.mode;
            self.toggle_mode(current);
        }

        let scroll_steps = input.scroll_delta.signum() as i32;
        if self.mode == GameMode::Build {
            if input.just_pressed(Action::CycleCategory) {
                self.build.cycle_category(&self.catalog);
            }
            if let Some(index) = input.number_key {
                self.build.select_index(index, &self.catalog);
            }
            if input.scroll_delta != 0.0 {
                self.build.scroll(scroll_steps, &self.catalog);
            }
            if input.just_pressed(Action::RotateClockwise) {
                self.build.rotate(1.0);
            }
            if input.just_pressed(Action::RotateCounterClockwise) {
                self.build.rotate(-1.0);
            }
        } else {
            if let Some(index) = input.number_key {
                self.inventory.select(index);
            }
            if input.scroll_delta != 0.0 {
                self.inventory.scroll(scroll_steps);
            }
        }

        if input.just_pressed(Action::Interact) {
            let outcome = self.interact();
            debug!(?outcome, "interaction");
        }
    }

    fn handle_pointer(&mut self, input: &InputState) {
        if self.mode == GameMode::Inventory {
            return;
        }
        let (dx, dy) = input.mouse_delta;
        let dy = if self.rules.invert_y { -dy } else { dy };
        apply_pointer(
            &mut self.camera,
            self.player.up,
            dx,
            dy,
            self.rules.pointer_sensitivity,
        );
    }

    fn advance_attack(&mut self, scale: f32) {
        if !self.attack.is_swinging() {
            return;
        }
        // Switching away from the weapon mid-swing aborts it.
        let Some(weapon) = self.inventory.equipped_weapon() else {
            self.attack.cancel();
            return;
        };
        let tick = self.attack.advance(weapon.attack_speed, scale);
        if tick.hit {
            self.resolve_attack_hit(&weapon);
        }
    }

    fn collect_drops(&mut self, scale: f32) {
        for item in update_drops(&mut self.drops, self.player.position, scale) {
            if self.inventory.add(item, 1) {
                self.events
                    .message(format!("+ {}", item.name()), Color::SUCCESS);
            } else {
                self.events.message("Bag is full!", Color::ERROR);
            }
        }
    }

    /// Spawn a pickup at `source` and announce it.
    pub(crate) fn spawn_drop(&mut self, source: Vec3, item: ItemId) {
        let drop = Drop::spawn(&mut self.rng, source, item);
        self.events.push(GameEvent::SpawnDrop {
            position: drop.position,
            item,
        });
        self.drops.push(drop);
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
