//! Collision queries shared by every solid entity
//!
//! Positions are sprite centres. Two bodies are compared by lining up their
//! masks so that each mask is centred on its body's position, then testing
//! cell overlap. The same convention is used for goals, walls and ghosts.

use glam::{IVec2, Vec2};

use super::mask::Mask;

/// Anything with a position and a collision mask
pub trait Body {
    /// Centre of the body in play-field coordinates
    fn center(&self) -> Vec2;

    /// Current collision mask (already rotated, if the body rotates)
    fn mask(&self) -> &Mask;

    /// Top-left corner of the mask's bounding box
    fn top_left(&self) -> Vec2 {
        self.center() - self.mask().size() / 2.0
    }

    /// Bottom-right corner of the mask's bounding box
    fn bottom_right(&self) -> Vec2 {
        self.center() + self.mask().size() / 2.0
    }
}

/// Grid offset of `b`'s mask relative to `a`'s mask
///
/// Rounding is symmetric around zero, so `overlaps(a, b) == overlaps(b, a)`.
pub fn mask_offset(a: &impl Body, b: &impl Body) -> IVec2 {
    let delta = b.top_left() - a.top_left();
    IVec2::new(delta.x.round() as i32, delta.y.round() as i32)
}

/// Exact mask overlap between two bodies
pub fn overlaps(a: &impl Body, b: &impl Body) -> bool {
    a.mask().overlaps(b.mask(), mask_offset(a, b))
}

/// Whether `body` overlaps any of `others`; false for an empty set
pub fn overlaps_any<'a, B>(body: &impl Body, others: impl IntoIterator<Item = &'a B>) -> bool
where
    B: Body + 'a,
{
    others.into_iter().any(|other| overlaps(body, other))
}

/// Rectangular play field anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
}

impl PlayField {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether the body's bounding box lies entirely inside the field
    pub fn contains(&self, body: &impl Body) -> bool {
        let min = body.top_left();
        let max = body.bottom_right();
        min.x >= 0.0 && min.y >= 0.0 && max.x <= self.width && max.y <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Block {
        pos: Vec2,
        mask: Mask,
    }

    impl Body for Block {
        fn center(&self) -> Vec2 {
            self.pos
        }
        fn mask(&self) -> &Mask {
            &self.mask
        }
    }

    fn block(x: f32, y: f32, w: u32, h: u32) -> Block {
        Block {
            pos: Vec2::new(x, y),
            mask: Mask::filled(w, h),
        }
    }

    #[test]
    fn test_overlap_uses_centres() {
        // Different sized boxes: a corner-based offset would disagree here
        let small = block(100.0, 100.0, 10, 10);
        let big = block(100.0, 100.0, 30, 30);
        assert!(overlaps(&small, &big));
        assert_eq!(mask_offset(&small, &big), IVec2::new(-10, -10));

        // Edges exactly touching: 5 + 15 = 20 apart
        let touching = block(120.0, 100.0, 30, 30);
        assert!(!overlaps(&small, &touching));
        let one_in = block(119.0, 100.0, 30, 30);
        assert!(overlaps(&small, &one_in));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = block(50.0, 50.0, 10, 20);
        let b = block(58.5, 62.5, 20, 20);
        assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        let c = block(70.5, 50.0, 20, 20);
        assert_eq!(overlaps(&a, &c), overlaps(&c, &a));
    }

    #[test]
    fn test_overlaps_any_empty_set_is_false() {
        let a = block(0.0, 0.0, 10, 10);
        let none: Vec<Block> = Vec::new();
        assert!(!overlaps_any(&a, &none));
        let some = vec![block(500.0, 500.0, 10, 10), block(3.0, 3.0, 10, 10)];
        assert!(overlaps_any(&a, &some));
    }

    #[test]
    fn test_play_field_contains() {
        let field = PlayField::new(600.0, 600.0);
        assert!(field.contains(&block(5.0, 5.0, 10, 10)));
        assert!(!field.contains(&block(4.9, 5.0, 10, 10)));
        assert!(field.contains(&block(595.0, 590.0, 10, 20)));
        assert!(!field.contains(&block(595.0, 590.5, 10, 20)));
    }
}
