//! Property-based invariant tests for pixel geometry.
//!
//! 1. Intersection is commutative.
//! 2. Intersection fits inside both inputs.
//! 3. `ceil_div` cells always cover the total and overshoot by less than one cell.
//! 4. `split_x` partitions the rectangle without losing area.

use gpath_core::geometry::{Rect, ceil_div};
use proptest::prelude::*;

fn small_rect_strategy() -> impl Strategy<Value = Rect> {
    (0u32..=2000, 0u32..=2000, 0u32..=2000, 0u32..=2000)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn intersection_commutative(a in small_rect_strategy(), b in small_rect_strategy()) {
        prop_assert_eq!(a.intersection(&b), b.intersection(&a));
    }

    #[test]
    fn intersection_fits_within_both(a in small_rect_strategy(), b in small_rect_strategy()) {
        let i = a.intersection(&b);
        if !i.is_empty() {
            prop_assert!(i.x >= a.x && i.right() <= a.right());
            prop_assert!(i.y >= a.y && i.bottom() <= a.bottom());
            prop_assert!(i.x >= b.x && i.right() <= b.right());
            prop_assert!(i.y >= b.y && i.bottom() <= b.bottom());
        }
    }

    #[test]
    fn ceil_div_covers_total(total in 0u32..=10_000, n in 1u32..=500) {
        let cell = ceil_div(total, n);
        prop_assert!(cell as u64 * n as u64 >= total as u64);
        // Overshoot is at most n - 1 pixels.
        prop_assert!(cell as u64 * n as u64 - total as u64 <= (n - 1) as u64);
    }

    #[test]
    fn split_x_preserves_area(r in small_rect_strategy(), at in 0u32..=3000) {
        let (left, right) = r.split_x(at);
        prop_assert_eq!(left.area() + right.area(), r.area());
        prop_assert_eq!(left.right(), right.x);
    }
}
