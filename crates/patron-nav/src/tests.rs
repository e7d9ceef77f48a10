//! Unit tests for patron-nav.
//!
//! All tests use small hand-drawn floors so failures are easy to eyeball.

/// Shared 9×7 fixture.  `A` sits in a sealed alcove no path can reach;
/// `B` and `E` are open floor.
const SHOP_FLOOR: &str = "\
#########
#.......#
#.###...#
#.#A#...#
#.###.B.#
#E......#
#########";

#[cfg(test)]
mod helpers {
    use crate::{FloorMarkers, GridSurface};

    pub fn shop_floor() -> (GridSurface, FloorMarkers) {
        GridSurface::parse(super::SHOP_FLOOR, 1.0).unwrap()
    }
}

// ── ASCII parsing ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod parse {
    use patron_core::Point3;

    use crate::{GridSurface, NavError, NavSurface};

    #[test]
    fn dimensions_and_markers() {
        let (surface, markers) = super::helpers::shop_floor();
        assert_eq!(surface.width(), 9);
        assert_eq!(surface.depth(), 7);
        assert_eq!(markers.count('A'), 1);
        assert_eq!(markers.one('B'), Some(Point3::new(6.5, 0.0, 4.5)));
        assert_eq!(markers.one('E'), Some(Point3::new(1.5, 0.0, 5.5)));
        assert_eq!(markers.one('?'), None);
    }

    #[test]
    fn walls_are_not_walkable() {
        let (surface, markers) = super::helpers::shop_floor();
        assert!(!surface.is_walkable(Point3::on_floor(0.5, 0.5)));
        assert!(surface.is_walkable(markers.one('B').unwrap()));
        // Marker cells are floor.
        assert!(surface.is_walkable(markers.one('A').unwrap()));
    }

    #[test]
    fn off_grid_is_not_walkable() {
        let (surface, _) = super::helpers::shop_floor();
        assert!(!surface.is_walkable(Point3::on_floor(-3.0, 2.0)));
        assert!(!surface.is_walkable(Point3::on_floor(50.0, 2.0)));
    }

    #[test]
    fn short_rows_pad_with_wall() {
        let (surface, _) = GridSurface::parse("###\n#.\n###", 1.0).unwrap();
        assert_eq!(surface.width(), 3);
        // The missing third column of row 1 reads as wall.
        assert!(!surface.is_walkable(patron_core::Point3::on_floor(2.5, 1.5)));
        assert!(surface.is_walkable(patron_core::Point3::on_floor(1.5, 1.5)));
    }

    #[test]
    fn all_wall_floor_is_an_error() {
        let result = GridSurface::parse("###\n###", 1.0);
        assert!(matches!(result, Err(NavError::EmptySurface)));
    }
}

// ── Nearest-walkable sampling ─────────────────────────────────────────────────

#[cfg(test)]
mod sample {
    use patron_core::Point3;

    use crate::NavSurface;

    #[test]
    fn on_floor_point_snaps_to_its_cell_center() {
        let (surface, _) = super::helpers::shop_floor();
        let sampled = surface.sample(Point3::on_floor(1.2, 5.7), 1.0).unwrap();
        assert_eq!(sampled, Point3::new(1.5, 0.0, 5.5));
    }

    #[test]
    fn wall_point_snaps_to_nearest_floor() {
        let (surface, _) = super::helpers::shop_floor();
        let sampled = surface.sample(Point3::on_floor(0.2, 0.2), 2.0).unwrap();
        assert_eq!(sampled, Point3::new(1.5, 0.0, 1.5));
    }

    #[test]
    fn radius_bounds_the_search() {
        let (surface, _) = super::helpers::shop_floor();
        assert!(surface.sample(Point3::on_floor(0.2, 0.2), 1.0).is_none());
        // Far outside the building entirely.
        assert!(surface.sample(Point3::on_floor(-40.0, -40.0), 5.0).is_none());
    }
}

// ── Pathfinding ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfinding {
    use patron_core::Point3;

    use crate::{NavError, NavSurface};

    #[test]
    fn straight_corridor_collapses_to_one_waypoint() {
        let (surface, _) = super::helpers::shop_floor();
        let from = Point3::new(1.5, 0.0, 5.5);
        let to = Point3::new(7.5, 0.0, 5.5);
        let path = surface.find_path(from, to).unwrap();
        assert_eq!(path.waypoint_count(), 1);
        assert_eq!(path.end(), to);
    }

    #[test]
    fn routes_around_the_inner_block() {
        let (surface, markers) = super::helpers::shop_floor();
        let from = Point3::new(1.5, 0.0, 1.5);
        let to = markers.one('B').unwrap();
        let path = surface.find_path(from, to).unwrap();
        assert_eq!(path.end(), to);
        // Must detour: longer than the straight line through the block.
        assert!(path.remaining_from(from, 0) > from.planar_distance(to) + 0.5);
    }

    #[test]
    fn sealed_alcove_has_no_path() {
        let (surface, markers) = super::helpers::shop_floor();
        let from = markers.one('E').unwrap();
        let to = markers.one('A').unwrap();
        assert!(matches!(
            surface.find_path(from, to),
            Err(NavError::NoPath { .. })
        ));
    }

    #[test]
    fn off_surface_endpoint_is_rejected() {
        let (surface, markers) = super::helpers::shop_floor();
        let wall = Point3::on_floor(0.5, 0.5);
        let floor = markers.one('B').unwrap();
        assert!(matches!(
            surface.find_path(wall, floor),
            Err(NavError::OffSurface(_))
        ));
        assert!(matches!(
            surface.find_path(floor, wall),
            Err(NavError::OffSurface(_))
        ));
    }

    #[test]
    fn same_cell_is_a_single_waypoint() {
        let (surface, markers) = super::helpers::shop_floor();
        let b = markers.one('B').unwrap();
        let path = surface.find_path(Point3::new(6.2, 0.0, 4.4), b).unwrap();
        assert_eq!(path.waypoint_count(), 1);
        assert_eq!(path.end(), b);
    }

    #[test]
    fn diagonals_never_cut_corners() {
        // 3×3 with a pinch: the only diagonal "gap" is blocked by corners,
        // so the path must go the long way round.
        let art = "\
..#
.#.
#..";
        let (surface, _) = crate::GridSurface::parse(art, 1.0).unwrap();
        let from = Point3::new(0.5, 0.0, 0.5);
        let to = Point3::new(2.5, 0.0, 2.5);
        assert!(matches!(
            surface.find_path(from, to),
            Err(NavError::NoPath { .. })
        ));
    }
}

// ── Path geometry ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod path_geometry {
    use patron_core::Point3;

    use crate::NavPath;

    #[test]
    fn remaining_distance_walks_the_polyline() {
        let path = NavPath::new(vec![
            Point3::on_floor(1.0, 0.0),
            Point3::on_floor(1.0, 2.0),
        ]);
        let start = Point3::on_floor(0.0, 0.0);
        // 1.0 to the first waypoint, then 2.0 along the second leg.
        assert!((path.remaining_from(start, 0) - 3.0).abs() < 1e-5);
        // After passing the first waypoint only the last leg remains.
        assert!((path.remaining_from(Point3::on_floor(1.0, 0.5), 1) - 1.5).abs() < 1e-5);
        // Exhausted cursor: nothing left.
        assert_eq!(path.remaining_from(start, 2), 0.0);
    }

    #[test]
    fn length_sums_segments() {
        let path = NavPath::new(vec![
            Point3::on_floor(0.0, 0.0),
            Point3::on_floor(3.0, 0.0),
            Point3::on_floor(3.0, 4.0),
        ]);
        assert!((path.length() - 7.0).abs() < 1e-5);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use patron_core::Point3;

    use crate::{GridSurfaceBuilder, NavSurface};

    #[test]
    fn walls_and_origin() {
        let mut b = GridSurfaceBuilder::new(4, 4, 0.5);
        b.origin(Point3::on_floor(10.0, 20.0));
        b.wall(0, 0);
        let surface = b.build();
        assert!(!surface.is_walkable(Point3::on_floor(10.25, 20.25)));
        assert!(surface.is_walkable(Point3::on_floor(10.75, 20.25)));
        assert_eq!(
            surface.cell_center(1, 0),
            Some(Point3::new(10.75, 0.0, 20.25))
        );
        assert_eq!(surface.cell_center(9, 0), None);
    }

    #[test]
    fn heights_ride_along() {
        let mut b = GridSurfaceBuilder::new(2, 1, 1.0);
        b.set_height(1, 0, 0.4);
        let surface = b.build();
        let stepped = surface.sample(Point3::on_floor(1.5, 0.5), 0.5).unwrap();
        assert_eq!(stepped.y, 0.4);
    }

    #[test]
    fn walkable_count() {
        let mut b = GridSurfaceBuilder::new(3, 3, 1.0);
        b.wall(1, 1);
        assert_eq!(b.build().walkable_count(), 8);
    }
}
