//! The navigation port: what movement code needs from a floor, and nothing
//! more.
//!
//! # Pluggability
//!
//! `patron-movement` and `patron-sim` are generic over [`NavSurface`], so an
//! embedder can swap the default [`GridSurface`](crate::GridSurface) for a
//! navmesh adapter or a test double without touching the movement logic.

use patron_core::Point3;

use crate::{NavPath, NavResult};

/// A walkable surface supporting the three queries movement needs.
pub trait NavSurface {
    /// Nearest walkable point to `p` within `max_radius` (planar metres).
    ///
    /// Returns `None` when no walkable point is that close — the caller's
    /// signal that a requested destination is simply not on the surface.
    fn sample(&self, p: Point3, max_radius: f32) -> Option<Point3>;

    /// Compute a walkable path between two on-surface points.
    ///
    /// Both endpoints must already be on the surface (use [`sample`] first);
    /// an off-surface endpoint is [`NavError::OffSurface`], a disconnected
    /// pair is [`NavError::NoPath`].
    ///
    /// [`sample`]: NavSurface::sample
    /// [`NavError::OffSurface`]: crate::NavError::OffSurface
    /// [`NavError::NoPath`]: crate::NavError::NoPath
    fn find_path(&self, from: Point3, to: Point3) -> NavResult<NavPath>;

    /// `true` if `p` lies on a walkable part of the surface.
    fn is_walkable(&self, p: Point3) -> bool;
}
