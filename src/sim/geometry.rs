//! Axis-aligned rectangle geometry
//!
//! World space is screen-like: x grows to the right, y grows downward, and a
//! rectangle's `(x, y)` is its top-left corner.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Strict overlap on the x axis only
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Strict overlap on the y axis only
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }
}

/// True iff `a` and `b` share a region of positive area.
///
/// Rectangles that only touch along an edge or at a corner do not intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.overlaps_x(b) && a.overlaps_y(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            0.5f32..300.0,
            0.5f32..300.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        let b = Rect::new(20.0, 20.0, 40.0, 40.0);
        assert!(intersects(&a, &b));

        // Containment counts as overlap
        let inner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(intersects(&a, &inner));
        assert!(intersects(&inner, &a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 40.0, 40.0);
        assert!(!intersects(&a, &Rect::new(40.0, 0.0, 10.0, 40.0)));
        assert!(!intersects(&a, &Rect::new(-10.0, 0.0, 10.0, 40.0)));
        assert!(!intersects(&a, &Rect::new(0.0, 40.0, 40.0, 10.0)));
        assert!(!intersects(&a, &Rect::new(0.0, -10.0, 40.0, 10.0)));
        // Corner contact
        assert!(!intersects(&a, &Rect::new(40.0, 40.0, 10.0, 10.0)));
    }

    #[test]
    fn test_accessors() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 25.0);
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_separated_rects_never_intersect(
            a in rect_strategy(),
            gap in 0.0f32..100.0,
            w in 0.5f32..300.0,
            h in 0.5f32..300.0,
            offset in -500.0f32..500.0,
        ) {
            let right = Rect::new(a.right() + gap, a.y + offset, w, h);
            let left = Rect::new(a.x - gap - w, a.y + offset, w, h);
            let below = Rect::new(a.x + offset, a.bottom() + gap, w, h);
            let above = Rect::new(a.x + offset, a.y - gap - h, w, h);
            prop_assert!(!intersects(&a, &right));
            prop_assert!(!intersects(&a, &below));
            // Subtracting can round the far edge past `a`; only assert when
            // the computed edge really is clear.
            if left.right() <= a.x {
                prop_assert!(!intersects(&a, &left));
            }
            if above.bottom() <= a.y {
                prop_assert!(!intersects(&a, &above));
            }
        }

        #[test]
        fn prop_shared_edge_is_not_overlap(a in rect_strategy(), w in 0.5f32..300.0) {
            let neighbour = Rect::new(a.right(), a.y, w, a.h);
            prop_assert!(!intersects(&a, &neighbour));
        }
    }
}
