//! Drop validation between containers
//!
//! The proximity test is axis-aligned and deliberately approximate:
//!
//! ```text
//! conflict  <=>  |cx - ox| < this.width + safety
//!           and  |cy - oy| < this.height/2 + other.height/2 + safety
//! ```
//!
//! Only the width of the container being dropped enters the horizontal
//! threshold; the other container's width is ignored.

use log::trace;

use crate::layout::{Container, Point, Size};

/// Decides whether a container may be dropped at a given center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionValidator {
    safety_distance: f64,
}

impl CollisionValidator {
    pub fn new(safety_distance: f64) -> Self {
        Self { safety_distance }
    }

    pub fn safety_distance(&self) -> f64 {
        self.safety_distance
    }

    /// Pairwise test between a candidate placement and another container
    pub fn conflicts(
        &self,
        this_center: Point,
        this_size: Size,
        other_center: Point,
        other_size: Size,
    ) -> bool {
        let min_vertical_gap = this_size.height / 2.0 + other_size.height / 2.0 + self.safety_distance;
        (this_center.x - other_center.x).abs() < this_size.width + self.safety_distance
            && (this_center.y - other_center.y).abs() < min_vertical_gap
    }

    /// First container, other than `name`, that a container of `size`
    /// centered on `center` would conflict with
    pub fn find_conflict<'c>(
        &self,
        containers: &'c [Container],
        name: &str,
        center: Point,
        size: Size,
    ) -> Option<&'c Container> {
        containers
            .iter()
            .filter(|other| other.name() != name)
            .find(|other| {
                let hit = self.conflicts(center, size, other.center(), other.size());
                if hit {
                    trace!(sort = name, other = other.name(); "drop conflict");
                }
                hit
            })
    }

    /// Check `candidate` at its current position against every other container
    pub fn check<'c>(&self, containers: &'c [Container], candidate: &Container) -> Option<&'c Container> {
        self.find_conflict(containers, candidate.name(), candidate.center(), candidate.size())
    }
}

impl Default for CollisionValidator {
    fn default() -> Self {
        Self::new(15.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_threshold_is_strict() {
        let v = CollisionValidator::new(15.0);
        let size = Size::new(60.0, 150.0);
        let origin = Point::new(0.0, 0.0);

        assert!(v.conflicts(Point::new(74.0, 0.0), size, origin, size));
        assert!(!v.conflicts(Point::new(75.0, 0.0), size, origin, size));
    }

    #[test]
    fn test_vertical_threshold_uses_both_heights() {
        let v = CollisionValidator::new(15.0);
        let this = Size::new(60.0, 100.0);
        let other = Size::new(60.0, 40.0);
        let origin = Point::new(0.0, 0.0);

        // 50 + 20 + 15 = 85
        assert!(v.conflicts(Point::new(0.0, 84.0), this, origin, other));
        assert!(!v.conflicts(Point::new(0.0, 85.0), this, origin, other));
    }

    #[test]
    fn test_only_own_width_counts() {
        let v = CollisionValidator::new(15.0);
        let narrow = Size::new(20.0, 60.0);
        let wide = Size::new(200.0, 60.0);
        let origin = Point::new(0.0, 0.0);
        let candidate = Point::new(50.0, 0.0);

        // A narrow container right next to a wide one is accepted...
        assert!(!v.conflicts(candidate, narrow, origin, wide));
        // ...while the wide one dropped at the same offset is rejected.
        assert!(v.conflicts(candidate, wide, origin, narrow));
    }

    #[test]
    fn test_symmetric_for_equal_sizes() {
        let v = CollisionValidator::new(15.0);
        let size = Size::new(60.0, 90.0);
        let a = Point::new(12.0, 40.0);
        let b = Point::new(70.0, -30.0);
        assert_eq!(v.conflicts(a, size, b, size), v.conflicts(b, size, a, size));
        assert!(v.conflicts(a, size, b, size));
    }
}
