//! Property-based invariant tests for pixel geometry (Rect, Point).
//!
//! 1. Contains agrees with the edges.
//! 2. Moving a point and a rectangle together preserves containment.
//! 3. Empty rectangles contain nothing.
//! 4. No panics on extreme values.

use proptest::prelude::*;
use quire_core::geometry::{Point, Rect};

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (any::<i32>(), any::<i32>(), any::<i32>(), any::<i32>())
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (-500i32..=500, -500i32..=500, -20i32..=500, -20i32..=500)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-1200i32..=1200, -1200i32..=1200).prop_map(|(x, y)| Point::new(x, y))
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Contains agrees with the edges
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn contains_matches_edges(r in small_rect_strategy(), p in point_strategy()) {
        let inside = p.x >= r.x && p.x < r.right() && p.y >= r.y && p.y < r.bottom();
        prop_assert_eq!(r.contains(p), inside);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Moving a point and a rectangle together preserves containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_preserves_containment(
        r in small_rect_strategy(),
        p in point_strategy(),
        dx in -1000i32..=1000,
        dy in -1000i32..=1000,
    ) {
        let moved = Rect::new(r.x + dx, r.y + dy, r.width, r.height);
        prop_assert!(moved.same_size(&r));
        prop_assert_eq!(r.contains(p), moved.contains(p.offset(dx, dy)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Empty rectangles contain nothing
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn empty_contains_nothing(r in small_rect_strategy(), p in point_strategy()) {
        if r.is_empty() {
            prop_assert!(!r.contains(p));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. No panics on extreme values
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn extreme_values_do_not_panic(a in rect_strategy(), x in any::<i32>(), y in any::<i32>()) {
        let _ = a.right();
        let _ = a.bottom();
        let _ = a.is_empty();
        let _ = a.contains(Point::new(x, y));
        let _ = Point::new(x, y).offset(i32::MAX, i32::MIN);
    }
}
