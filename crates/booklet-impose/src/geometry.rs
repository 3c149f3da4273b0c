//! Geometry engine
//!
//! Pure functions over axis-aligned rectangles in PDF points (y axis up,
//! origin bottom-left). Sheet rectangles, row-major grid subdivisions and
//! midpoint splits — everything the sheet descriptor needs to hand a
//! renderer a box per panel.

use crate::constants::{A4_HEIGHT_MM, A4_WIDTH_MM, mm_to_pt};

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Shrink by a uniform margin on all sides.
    ///
    /// A margin larger than half the extent collapses the rectangle to a
    /// zero-size box at its center rather than inverting it.
    pub fn inset(&self, margin: f32) -> Rect {
        let width = (self.width - 2.0 * margin).max(0.0);
        let height = (self.height - 2.0 * margin).max(0.0);
        Rect::new(
            self.center_x() - width / 2.0,
            self.center_y() - height / 2.0,
            width,
            height,
        )
    }
}

// =============================================================================
// Sheet Rectangles
// =============================================================================

/// Canonical A4 portrait rectangle (height > width), origin at (0, 0)
pub fn a4_portrait() -> Rect {
    Rect::new(0.0, 0.0, mm_to_pt(A4_WIDTH_MM), mm_to_pt(A4_HEIGHT_MM))
}

/// Canonical A4 landscape rectangle (width > height), origin at (0, 0)
pub fn a4_landscape() -> Rect {
    Rect::new(0.0, 0.0, mm_to_pt(A4_HEIGHT_MM), mm_to_pt(A4_WIDTH_MM))
}

// =============================================================================
// Subdivision
// =============================================================================

/// Subdivide a rectangle into a `rows` × `cols` grid of equal boxes.
///
/// Boxes are returned row-major with row 0 at the top of the rectangle,
/// matching the visual order panels are read on a sheet side.
pub fn grid_boxes(rect: &Rect, rows: usize, cols: usize) -> Vec<Rect> {
    let w = rect.width / cols as f32;
    let h = rect.height / rows as f32;
    let mut boxes = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            boxes.push(Rect::new(
                rect.x + c as f32 * w,
                rect.y + rect.height - (r + 1) as f32 * h,
                w,
                h,
            ));
        }
    }
    boxes
}

/// Halve a rectangle at its x midpoint: (left, right)
pub fn split_2up(rect: &Rect) -> (Rect, Rect) {
    let half = rect.width / 2.0;
    (
        Rect::new(rect.x, rect.y, half, rect.height),
        Rect::new(rect.x + half, rect.y, half, rect.height),
    )
}

/// Halve a rectangle at its y midpoint: (top, bottom)
pub fn split_tb(rect: &Rect) -> (Rect, Rect) {
    let half = rect.height / 2.0;
    (
        Rect::new(rect.x, rect.y + half, rect.width, half),
        Rect::new(rect.x, rect.y, rect.width, half),
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_dimensions() {
        let portrait = a4_portrait();
        assert!(portrait.height > portrait.width);
        assert!((portrait.width - 595.276).abs() < 0.01);
        assert!((portrait.height - 841.89).abs() < 0.01);

        let landscape = a4_landscape();
        assert_eq!(landscape.width, portrait.height);
        assert_eq!(landscape.height, portrait.width);
    }

    #[test]
    fn test_grid_boxes_row_major_top_down() {
        let rect = Rect::new(0.0, 0.0, 100.0, 200.0);
        let boxes = grid_boxes(&rect, 2, 2);

        assert_eq!(boxes.len(), 4);
        // Row 0 (top): left then right
        assert_eq!(boxes[0], Rect::new(0.0, 100.0, 50.0, 100.0));
        assert_eq!(boxes[1], Rect::new(50.0, 100.0, 50.0, 100.0));
        // Row 1 (bottom)
        assert_eq!(boxes[2], Rect::new(0.0, 0.0, 50.0, 100.0));
        assert_eq!(boxes[3], Rect::new(50.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn test_grid_boxes_cover_rect() {
        let rect = a4_portrait();
        for (rows, cols) in [(2, 1), (2, 2), (4, 2), (4, 4)] {
            let boxes = grid_boxes(&rect, rows, cols);
            assert_eq!(boxes.len(), rows * cols);
            let area: f32 = boxes.iter().map(|b| b.width * b.height).sum();
            assert!((area - rect.width * rect.height).abs() < 0.5);
        }
    }

    #[test]
    fn test_split_2up() {
        let (left, right) = split_2up(&Rect::new(10.0, 0.0, 80.0, 50.0));
        assert_eq!(left, Rect::new(10.0, 0.0, 40.0, 50.0));
        assert_eq!(right, Rect::new(50.0, 0.0, 40.0, 50.0));
    }

    #[test]
    fn test_split_tb() {
        let (top, bottom) = split_tb(&Rect::new(0.0, 10.0, 50.0, 80.0));
        assert_eq!(top, Rect::new(0.0, 50.0, 50.0, 40.0));
        assert_eq!(bottom, Rect::new(0.0, 10.0, 50.0, 40.0));
    }

    #[test]
    fn test_inset() {
        let inner = Rect::new(0.0, 0.0, 100.0, 60.0).inset(10.0);
        assert_eq!(inner, Rect::new(10.0, 10.0, 80.0, 40.0));

        // Oversized margin collapses instead of inverting
        let collapsed = Rect::new(0.0, 0.0, 10.0, 10.0).inset(20.0);
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }
}
