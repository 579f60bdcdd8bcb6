//! The sorted ring of hash points.

use std::sync::Arc;

/// A single `(point, member-name)` pair on the ring.
///
/// Many elements share the same member name, so the name is stored behind an
/// `Arc` rather than duplicated per point.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    /// Ordinate along the 32-bit ring.
    pub point: u32,
    /// Routing target that owns this point.
    pub name: Arc<str>,
}

/// Contiguous ordered sequence of elements, sorted by `(point, name)`.
///
/// The sort enables branch-lean binary search for lookups; the name tiebreak
/// keeps the order deterministic when distinct members collide on a point.
/// Immutable after construction.
#[derive(Debug, Default)]
pub(crate) struct Ring {
    elements: Vec<Element>,
}

impl Ring {
    /// Sort the given elements into a ring.
    pub fn from_elements(mut elements: Vec<Element>) -> Self {
        elements.sort_unstable_by(|a, b| {
            a.point.cmp(&b.point).then_with(|| a.name.cmp(&b.name))
        });
        Self { elements }
    }

    /// Smallest index whose point is strictly greater than `point`, or
    /// `len()` when no such element exists.
    pub fn upper_bound(&self, point: u32) -> usize {
        self.elements.partition_point(|element| element.point <= point)
    }

    /// The element owning `point`: the next-biggest point on the ring,
    /// wrapping to the smallest when `point` is at or past the largest.
    ///
    /// Returns `None` only for an empty ring.
    pub fn locate(&self, point: u32) -> Option<&Element> {
        let index = self.upper_bound(point);
        self.elements.get(index).or_else(|| self.elements.first())
    }

    /// Number of elements on the ring.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Return true if the ring holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over elements in ascending `(point, name)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Return true if all points are pairwise distinct.
    ///
    /// Collisions on the 32-bit space are tolerated (they skew lookups only
    /// slightly) but get reported in the construction diagnostics.
    pub fn all_distinct(&self) -> bool {
        self.elements
            .windows(2)
            .all(|pair| pair[0].point != pair[1].point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(point: u32, name: &str) -> Element {
        Element {
            point,
            name: Arc::from(name),
        }
    }

    fn ring(points: &[(u32, &str)]) -> Ring {
        Ring::from_elements(
            points
                .iter()
                .map(|&(point, name)| element(point, name))
                .collect(),
        )
    }

    #[test]
    fn test_from_elements_sorts_by_point() {
        let ring = ring(&[(300, "c"), (100, "a"), (200, "b")]);
        let points: Vec<u32> = ring.iter().map(|e| e.point).collect();
        assert_eq!(points, vec![100, 200, 300]);
    }

    #[test]
    fn test_equal_points_tiebreak_on_name() {
        let ring = ring(&[(100, "zeta"), (100, "alpha")]);
        let names: Vec<&str> = ring.iter().map(|e| e.name.as_ref()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(!ring.all_distinct());
    }

    #[test]
    fn test_upper_bound_is_strict() {
        let ring = ring(&[(100, "a"), (200, "b"), (300, "c")]);
        assert_eq!(ring.upper_bound(0), 0);
        assert_eq!(ring.upper_bound(99), 0);
        // An exact hit skips past the equal point.
        assert_eq!(ring.upper_bound(100), 1);
        assert_eq!(ring.upper_bound(150), 1);
        assert_eq!(ring.upper_bound(300), 3);
        assert_eq!(ring.upper_bound(u32::MAX), 3);
    }

    #[test]
    fn test_locate_picks_next_biggest_point() {
        let ring = ring(&[(100, "a"), (200, "b"), (300, "c")]);
        assert_eq!(ring.locate(0).unwrap().name.as_ref(), "a");
        assert_eq!(ring.locate(150).unwrap().name.as_ref(), "b");
        assert_eq!(ring.locate(299).unwrap().name.as_ref(), "c");
    }

    #[test]
    fn test_locate_on_exact_point_routes_to_next_owner() {
        let ring = ring(&[(100, "a"), (200, "b"), (300, "c")]);
        assert_eq!(ring.locate(100).unwrap().name.as_ref(), "b");
        assert_eq!(ring.locate(200).unwrap().name.as_ref(), "c");
    }

    #[test]
    fn test_locate_wraps_past_largest_point() {
        let ring = ring(&[(100, "a"), (200, "b"), (300, "c")]);
        // At or above the largest point: wrap to the smallest point's owner.
        assert_eq!(ring.locate(300).unwrap().name.as_ref(), "a");
        assert_eq!(ring.locate(301).unwrap().name.as_ref(), "a");
        assert_eq!(ring.locate(u32::MAX).unwrap().name.as_ref(), "a");
    }

    #[test]
    fn test_locate_on_empty_ring() {
        let ring = Ring::default();
        assert!(ring.is_empty());
        assert!(ring.locate(42).is_none());
    }

    #[test]
    fn test_all_distinct_on_distinct_points() {
        let ring = ring(&[(1, "a"), (2, "a"), (3, "b")]);
        assert!(ring.all_distinct());
    }
}
