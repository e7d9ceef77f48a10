//! Waypoint polylines produced by pathfinding.

use patron_core::Point3;

/// An ordered, non-empty list of waypoints ending at the path's destination.
///
/// `NavPath` is immutable once built; the movement coordinator tracks its
/// own progress (the index of the next waypoint) separately, so a path can
/// be recomputed or abandoned without touching actor state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavPath {
    waypoints: Vec<Point3>,
}

impl NavPath {
    /// Build from a waypoint list.
    ///
    /// # Panics
    /// Panics in debug mode if `waypoints` is empty — an empty path has no
    /// destination and no caller has a use for one.
    pub fn new(waypoints: Vec<Point3>) -> Self {
        debug_assert!(!waypoints.is_empty(), "a path must end somewhere");
        Self { waypoints }
    }

    #[inline]
    pub fn waypoints(&self) -> &[Point3] {
        &self.waypoints
    }

    /// The final waypoint — where this path delivers you.
    #[inline]
    pub fn end(&self) -> Point3 {
        self.waypoints[self.waypoints.len() - 1]
    }

    #[inline]
    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Planar distance left to walk: from `pos` to waypoint `next`, then
    /// along the remaining segments.  `next >= waypoint_count()` means the
    /// path is exhausted and the remaining distance is zero.
    pub fn remaining_from(&self, pos: Point3, next: usize) -> f32 {
        if next >= self.waypoints.len() {
            return 0.0;
        }
        let mut total = pos.planar_distance(self.waypoints[next]);
        for pair in self.waypoints[next..].windows(2) {
            total += pair[0].planar_distance(pair[1]);
        }
        total
    }

    /// Total planar length measured from the first waypoint.
    pub fn length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|pair| pair[0].planar_distance(pair[1]))
            .sum()
    }
}
