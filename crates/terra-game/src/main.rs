//! Headless Terra session.
//!
//! Loads `config.ron`, builds a world and drives it with a scripted
//! autopilot at a fixed 60 Hz step, logging what a renderer would show.
//!
//! Run with: `cargo run -p terra-game -- --ticks 1200 --seed 7`

mod script;

use clap::Parser;
use terra_config::{CliArgs, Config, default_config_dir};
use terra_game::{Color, FrameSnapshot, GameEvent, ItemId, Presenter, WorldContext};
use tracing::{debug, error, info, trace};

const FIXED_DT: f32 = 1.0 / 60.0;
/// Frames between periodic status lines.
const STATUS_INTERVAL: u64 = 600;

/// Writes frames and events to the log instead of a screen.
#[derive(Default)]
struct LogPresenter {
    frames: u64,
    messages: u64,
}

impl Presenter for LogPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        if self.frames % STATUS_INTERVAL == 0 {
            info!(
                frame = self.frames,
                position = ?frame.player.position,
                grounded = frame.grounded,
                trees = frame.trees.len(),
                buildings = frame.buildings.len(),
                hunger = %format!("{:.0}%", frame.hunger * 100.0),
                sun = frame.sun.intensity,
                "status"
            );
        }
        trace!(frame = self.frames, mode = ?frame.mode, "frame");
    }

    fn notify(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Message { text, color } => {
                self.messages += 1;
                if *color == Color::ERROR {
                    info!(message = %text, "hud (error)");
                } else {
                    info!(message = %text, "hud");
                }
            }
            GameEvent::DayChanged { day, date } => info!(day, %date, "day changed"),
            GameEvent::SpawnDrop { item, .. } => debug!(item = item.name(), "drop spawned"),
            GameEvent::Effect { color, count, .. } => {
                trace!(color = %format!("#{:06x}", color.0), count, "effect")
            }
        }
    }
}

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    terra_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!(
        "Planet: {} | radius={:.1} gravity={}",
        config.planet.name,
        config.planet.size / 2.0,
        config.planet.gravity
    );

    let mut world = match WorldContext::new(&config) {
        Ok(world) => world,
        Err(e) => {
            error!("Failed to start session: {e}");
            std::process::exit(1);
        }
    };

    let mut pilot = script::Autopilot::default();
    let mut presenter = LogPresenter::default();
    let ticks = config.debug.headless_ticks;
    for tick in 0..ticks {
        let input = pilot.next(tick, &world);
        world.tick(FIXED_DT, input);
        world.present_to(&mut presenter);
    }

    info!(
        ticks = world.ticks(),
        trees_left = world.trees.len(),
        buildings = world.buildings.len(),
        wood = world.inventory.count(ItemId::Wood),
        seeds = world.inventory.count(ItemId::UnknownSeed),
        messages = presenter.messages,
        date = %world.planet.formatted_date(),
        "session finished"
    );
}
