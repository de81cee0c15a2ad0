//! Scenes: the title screen and the game itself
//!
//! The host calls `handle_input`, `update` and `render` once per frame, in
//! that order.

use crate::input::Intents;
use crate::renderer::{self, Frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, Session, TickInput, tick};
use crate::tuning::Tuning;

/// What the host should do after handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    Continue,
    Quit,
}

/// Active scene
#[derive(Debug, Clone)]
pub enum Scene {
    Title {
        tuning: Tuning,
        seed: u64,
    },
    Game {
        session: Box<Session>,
        /// Input collected since the last update
        pending: TickInput,
    },
}

impl Scene {
    pub fn title(tuning: Tuning, seed: u64) -> Self {
        Scene::Title { tuning, seed }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Scene::Title { .. } => None,
            Scene::Game { session, .. } => Some(session.as_ref()),
        }
    }

    pub fn handle_input(&mut self, intents: &Intents) -> SceneCommand {
        if intents.quit {
            log::info!("Quit requested");
            return SceneCommand::Quit;
        }

        match self {
            Scene::Title { tuning, seed } => {
                if intents.tick.confirm {
                    log::info!("Starting game with seed {}", seed);
                    let session = Session::new(*seed, tuning.clone());
                    *self = Scene::Game {
                        session: Box::new(session),
                        pending: TickInput::default(),
                    };
                }
            }
            Scene::Game { pending, .. } => {
                let input = intents.tick;
                // Held intents follow the latest frame, edge triggers accumulate
                pending.left = input.left;
                pending.right = input.right;
                pending.up = input.up;
                pending.down = input.down;
                pending.confirm |= input.confirm;
                pending.pause |= input.pause;
                pending.reset |= input.reset;
            }
        }
        SceneCommand::Continue
    }

    /// Advance by `dt` and return whatever the game reported
    pub fn update(&mut self, dt: f32) -> Vec<GameEvent> {
        match self {
            Scene::Title { .. } => Vec::new(),
            Scene::Game { session, pending } => {
                tick(session, pending, dt);
                pending.clear_one_shots();

                let events = session.drain_events();
                for event in &events {
                    match event {
                        GameEvent::LevelStarted { level, ghosts } => {
                            log::info!("Level {} started with {} ghosts", level, ghosts)
                        }
                        GameEvent::Go => log::debug!("Go!"),
                        GameEvent::GhostFinished => log::debug!("A ghost completed its route"),
                        GameEvent::NearMissForgiven => log::debug!("Near miss forgiven"),
                        GameEvent::Won { .. } | GameEvent::Lost { .. } | GameEvent::Reset => {}
                    }
                }
                events
            }
        }
    }

    pub fn render(&self, settings: &Settings) -> Frame<'_> {
        match self {
            Scene::Title { tuning, .. } => {
                renderer::title_frame(glam::Vec2::new(tuning.play_width, tuning.play_height))
            }
            Scene::Game { session, .. } => renderer::game_frame(session, settings),
        }
    }
}
