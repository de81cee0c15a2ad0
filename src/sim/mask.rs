//! Pixel collision masks
//!
//! A mask is a grid of solid/empty cells covering a sprite's bounding box.
//! Overlap is exact at cell resolution: two masks collide when at least one
//! solid cell of each occupies the same grid position.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Tolerance used when sizing a rotated bounding box, so that headings such
/// as 90 degrees (whose cosine is not exactly zero in f32) don't grow the
/// mask by a spurious extra column
const SIZE_EPSILON: f32 = 1e-3;

/// Largest number of cells a single mask may hold
pub const MAX_CELLS: usize = 1 << 26;

/// Cell count for a `width` x `height` grid, if it is within [`MAX_CELLS`]
fn cell_count(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&n| n <= MAX_CELLS)
}

/// Solid/empty cell grid, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Mask {
    /// Mask with no cells; collides with nothing
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    /// Mask with every cell solid
    ///
    /// Grids larger than [`MAX_CELLS`] come back empty.
    pub fn filled(width: u32, height: u32) -> Self {
        let Some(len) = cell_count(width, height) else {
            log::error!("Mask of {width}x{height} cells is too large, leaving it empty");
            return Self::empty();
        };
        Self {
            width,
            height,
            cells: vec![true; len],
        }
    }

    /// Mask of a solid `width` x `height` rectangle rotated counter-clockwise
    /// (as seen on screen) by `degrees`
    ///
    /// The result is sized to the rotated bounding box, the same way a sprite
    /// image grows when it is rotated.
    pub fn rotated_rect(width: f32, height: f32, degrees: f32) -> Self {
        let rad = degrees.to_radians();
        let (sin, cos) = (rad.sin(), rad.cos());

        let out_w = (width * cos.abs() + height * sin.abs() - SIZE_EPSILON)
            .ceil()
            .max(1.0) as u32;
        let out_h = (width * sin.abs() + height * cos.abs() - SIZE_EPSILON)
            .ceil()
            .max(1.0) as u32;

        let half = Vec2::new(width, height) / 2.0;
        let out_half = Vec2::new(out_w as f32, out_h as f32) / 2.0;

        let Some(len) = cell_count(out_w, out_h) else {
            log::error!("Rotated mask of {out_w}x{out_h} cells is too large, leaving it empty");
            return Self::empty();
        };

        let mut cells = Vec::with_capacity(len);
        for y in 0..out_h {
            for x in 0..out_w {
                // Cell centre relative to the mask centre, flipped to y-up
                let px = x as f32 + 0.5 - out_half.x;
                let py = -(y as f32 + 0.5 - out_half.y);
                // Undo the rotation to land in the rectangle's own frame
                let lx = px * cos + py * sin;
                let ly = -px * sin + py * cos;
                cells.push(lx.abs() <= half.x + SIZE_EPSILON && ly.abs() <= half.y + SIZE_EPSILON);
            }
        }

        Self {
            width: out_w,
            height: out_h,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bounding size in world units
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Whether the cell at (x, y) is solid; out-of-range cells are empty
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Number of solid cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// First overlapping cell, in this mask's coordinates
    ///
    /// `offset` is the position of `other`'s top-left cell relative to this
    /// mask's top-left cell. Cells are scanned row by row.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let x_start = offset.x.max(0);
        let y_start = offset.y.max(0);
        let x_end = (offset.x + other.width as i32).min(self.width as i32);
        let y_end = (offset.y + other.height as i32).min(self.height as i32);

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }

    /// Whether any solid cells coincide at the given offset
    #[inline]
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        self.overlap(other, offset).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_masks_come_back_empty() {
        let wall = Mask::filled(70_000, 70_000);
        assert_eq!(wall.count(), 0);
        assert_eq!(wall.size(), Vec2::ZERO);
        assert!(!wall.get(0, 0));
        assert!(!wall.overlaps(&Mask::filled(4, 4), IVec2::ZERO));

        let rotated = Mask::rotated_rect(1.0e6, 1.0e6, 45.0);
        assert_eq!(rotated.count(), 0);
    }

    #[test]
    fn test_filled_mask_counts_every_cell() {
        let mask = Mask::filled(4, 3);
        assert_eq!(mask.count(), 12);
        assert!(mask.get(3, 2));
        assert!(!mask.get(4, 0));
        assert!(!mask.get(-1, 0));
    }

    #[test]
    fn test_rotated_rect_quarter_turn_swaps_dimensions() {
        let upright = Mask::rotated_rect(10.0, 20.0, 0.0);
        assert_eq!((upright.width(), upright.height()), (10, 20));
        assert_eq!(upright.count(), 200);

        let sideways = Mask::rotated_rect(10.0, 20.0, 90.0);
        assert_eq!((sideways.width(), sideways.height()), (20, 10));
        assert_eq!(sideways.count(), 200);

        let flipped = Mask::rotated_rect(10.0, 20.0, 180.0);
        assert_eq!((flipped.width(), flipped.height()), (10, 20));
    }

    #[test]
    fn test_rotated_rect_diagonal_grows_bounds_and_leaves_corners_empty() {
        let mask = Mask::rotated_rect(10.0, 10.0, 45.0);
        // 10 * (cos45 + sin45) ~= 14.14
        assert_eq!((mask.width(), mask.height()), (15, 15));
        assert!(!mask.get(0, 0));
        assert!(!mask.get(14, 14));
        assert!(mask.get(7, 7));
    }

    #[test]
    fn test_overlap_adjacent_masks_do_not_touch() {
        let a = Mask::filled(10, 10);
        let b = Mask::filled(10, 10);
        assert!(!a.overlaps(&b, IVec2::new(10, 0)));
        assert!(!a.overlaps(&b, IVec2::new(0, -10)));
        assert_eq!(a.overlap(&b, IVec2::new(9, 0)), Some(IVec2::new(9, 0)));
    }

    #[test]
    fn test_overlap_respects_empty_cells() {
        // Diamond-ish mask has empty corners, so a small square tucked into
        // the corner doesn't collide even though the boxes intersect
        let diamond = Mask::rotated_rect(10.0, 10.0, 45.0);
        let pebble = Mask::filled(2, 2);
        assert!(!diamond.overlaps(&pebble, IVec2::new(-1, -1)));
        assert!(diamond.overlaps(&pebble, IVec2::new(6, 6)));
    }

    #[test]
    fn test_overlap_with_empty_mask_is_none() {
        let a = Mask::filled(5, 5);
        let empty = Mask::filled(0, 0);
        assert!(!a.overlaps(&empty, IVec2::ZERO));
    }
}
