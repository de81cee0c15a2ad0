//! Render description types
//!
//! A frame is rebuilt from state every tick and handed to whatever backend
//! draws it. Nothing here is retained between frames.

use glam::Vec2;

use crate::sim::Mask;

/// Linear RGBA
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const TITLE_BACKGROUND: Color = [1.0, 1.0, 1.0, 1.0];
    pub const FIELD: Color = [0.25, 0.6, 0.3, 1.0];
    pub const COURIER: Color = [0.9, 0.2, 0.2, 1.0];
    pub const GHOST: Color = [0.55, 0.6, 0.9, 0.6];
    pub const GOAL: Color = [0.2, 0.3, 0.9, 1.0];
    pub const DEAD_GOAL: Color = [0.2, 0.3, 0.9, 0.3];
    pub const WALL: Color = [0.35, 0.3, 0.25, 1.0];
    pub const TEXT: Color = [0.0, 0.0, 0.0, 1.0];
    pub const BANNER_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BANNER_BACKGROUND: Color = [0.0, 0.0, 0.0, 0.6];
}

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Courier,
    Ghost,
    Wall,
    Goal,
    DeadGoal,
}

/// One drawable entity
#[derive(Debug, Clone, Copy)]
pub struct SpriteDesc<'a> {
    pub kind: SpriteKind,
    pub center: Vec2,
    /// Counter-clockwise rotation in degrees
    pub rotation: f32,
    /// Unrotated footprint
    pub size: Vec2,
    /// Rotated bounding box
    pub bounds: Vec2,
    /// Collision mask, for entities that have one
    pub mask: Option<&'a Mask>,
    pub color: Color,
}

/// A line of text centred on `pos`
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
    pub background: Option<Color>,
}

impl TextItem {
    pub fn new(text: impl Into<String>, pos: Vec2) -> Self {
        Self {
            text: text.into(),
            pos,
            size: 30.0,
            color: colors::TEXT,
            background: None,
        }
    }

    pub fn sized(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn banner(mut self) -> Self {
        self.color = colors::BANNER_TEXT;
        self.background = Some(colors::BANNER_BACKGROUND);
        self
    }
}

/// Everything needed to draw one frame, back to front
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub clear: Color,
    /// Play field size in world units
    pub field: Vec2,
    pub sprites: Vec<SpriteDesc<'a>>,
    pub texts: Vec<TextItem>,
}

impl<'a> Frame<'a> {
    pub fn new(clear: Color, field: Vec2) -> Self {
        Self {
            clear,
            field,
            sprites: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn sprites_of(&self, kind: SpriteKind) -> impl Iterator<Item = &SpriteDesc<'a>> {
        self.sprites.iter().filter(move |s| s.kind == kind)
    }

    /// Whether any text item contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }
}
