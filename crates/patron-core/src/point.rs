//! Positions on (and above) the shop floor.
//!
//! The walkable surface is a heightfield over the XZ plane, so most spatial
//! reasoning — pathfinding, arrival thresholds, stuck detection — uses
//! *planar* distance and ignores `y`.  Full 3D distance exists for the rare
//! case where height matters (a mezzanine shelf).  `f32` gives millimetre
//! precision at shop scale and halves memory vs. `f64`.

/// A point in shop space, metres.  `y` is up.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A point on the floor plane (`y = 0`).
    #[inline]
    pub const fn on_floor(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Full 3D Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point3) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance projected onto the walkable (XZ) plane.  This is the
    /// distance every arrival and stuck check uses.
    #[inline]
    pub fn planar_distance(self, other: Point3) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Translate in the floor plane, keeping height.
    #[inline]
    pub fn offset_xz(self, dx: f32, dz: f32) -> Point3 {
        Point3 { x: self.x + dx, y: self.y, z: self.z + dz }
    }

    /// Unit direction towards `other` in the floor plane, or `None` when
    /// the points are planar-coincident (no defined direction).
    pub fn planar_direction_to(self, other: Point3) -> Option<(f32, f32)> {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        let len = (dx * dx + dz * dz).sqrt();
        if len < 1e-6 {
            None
        } else {
            Some((dx / len, dz / len))
        }
    }

    /// Step `dist` metres towards `other` in the floor plane; lands exactly
    /// on `other` (adopting its height) if `dist` covers the gap.
    pub fn step_towards(self, other: Point3, dist: f32) -> Point3 {
        let gap = self.planar_distance(other);
        if dist >= gap {
            return other;
        }
        match self.planar_direction_to(other) {
            Some((dx, dz)) => self.offset_xz(dx * dist, dz * dist),
            None => other,
        }
    }
}

impl std::fmt::Display for Point3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
