//! Keyboard bindings
//!
//! Each intent can be bound to several physical keys; an intent is active
//! when any of its keys is. Movement reads held keys, the remaining actions
//! read keys pressed this frame.

use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Physical keys the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    S,
    Enter,
    Space,
    P,
    R,
    Escape,
}

/// Intent -> keys mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<Key>,
    pub right: Vec<Key>,
    pub up: Vec<Key>,
    pub down: Vec<Key>,
    pub confirm: Vec<Key>,
    pub pause: Vec<Key>,
    pub reset: Vec<Key>,
    pub quit: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: vec![Key::Left, Key::A],
            right: vec![Key::Right, Key::D],
            up: vec![Key::Up, Key::W],
            down: vec![Key::Down, Key::S],
            confirm: vec![Key::Enter, Key::Space],
            pause: vec![Key::P],
            reset: vec![Key::R],
            quit: vec![Key::Escape],
        }
    }
}

/// Everything the scene needs from one frame of input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub tick: TickInput,
    pub quit: bool,
}

fn any_of(bound: &[Key], keys: &[Key]) -> bool {
    bound.iter().any(|k| keys.contains(k))
}

impl KeyBindings {
    /// Resolve `held` keys and keys `pressed` this frame into intents
    pub fn resolve(&self, held: &[Key], pressed: &[Key]) -> Intents {
        Intents {
            tick: TickInput {
                left: any_of(&self.left, held),
                right: any_of(&self.right, held),
                up: any_of(&self.up, held),
                down: any_of(&self.down, held),
                confirm: any_of(&self.confirm, pressed),
                pause: any_of(&self.pause, pressed),
                reset: any_of(&self.reset, pressed),
            },
            quit: any_of(&self.quit, pressed),
        }
    }
}
