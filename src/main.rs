//! Ghost Courier entry point
//!
//! There is no window here: the binary runs the game headless with the
//! autopilot at the wheel, logging level transitions as it goes. Hosts that
//! draw the game drive [`Scene`] the same way with real key state.

use std::path::PathBuf;

use ghost_courier::consts::SIM_DT;
use ghost_courier::input::Intents;
use ghost_courier::sim::{GameEvent, LevelPhase, autopilot};
use ghost_courier::{Scene, SceneCommand, Settings, Tuning};

/// Stop the demo after this many deliveries
const DEMO_LEVELS: u32 = 5;
/// Hard cap on simulated frames (10 minutes at 60 Hz)
const MAX_FRAMES: u64 = 60 * 60 * 10;

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name).map(PathBuf::from)
}

fn env_seed() -> u64 {
    match std::env::var("GHOST_COURIER_SEED") {
        Ok(raw) => match raw.parse() {
            Ok(seed) => seed,
            Err(e) => {
                log::warn!("Ignoring GHOST_COURIER_SEED={:?}: {}", raw, e);
                rand::random()
            }
        },
        Err(_) => rand::random(),
    }
}

/// Intents the demo "presses" this frame
fn demo_intents(scene: &Scene) -> Intents {
    let Some(session) = scene.session() else {
        let mut intents = Intents::default();
        intents.tick.confirm = true;
        return intents;
    };

    Intents {
        tick: autopilot::drive(session),
        quit: session.phase == LevelPhase::Lost || session.score >= DEMO_LEVELS,
    }
}

fn main() {
    env_logger::init();
    log::info!("Ghost Courier (headless demo) starting...");

    let tuning = Tuning::load_or_default(env_path("GHOST_COURIER_TUNING").as_deref());
    let settings = Settings::load_or_default(env_path("GHOST_COURIER_SETTINGS").as_deref());
    let seed = env_seed();

    let mut scene = Scene::title(tuning, seed);
    let mut frames = 0u64;

    while frames < MAX_FRAMES {
        let intents = demo_intents(&scene);
        if scene.handle_input(&intents) == SceneCommand::Quit {
            break;
        }

        for event in scene.update(SIM_DT) {
            match event {
                GameEvent::Won { level, samples } => {
                    log::info!("Level {} delivered ({} route samples recorded)", level, samples)
                }
                GameEvent::Lost { level } => log::info!("Crashed on level {}", level),
                _ => {}
            }
        }

        let frame = scene.render(&settings);
        log::trace!(
            "frame {}: {} sprites, {} text lines",
            frames,
            frame.sprites.len(),
            frame.texts.len()
        );
        frames += 1;
    }

    match scene.session() {
        Some(session) => log::info!(
            "Demo finished after {} frames: level {}, score {}, seed {}",
            frames,
            session.level,
            session.score,
            session.seed
        ),
        None => log::info!("Demo finished on the title screen"),
    }
}
