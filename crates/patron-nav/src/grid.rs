//! Uniform-grid walkable surface.
//!
//! # Data layout
//!
//! The floor is a `width × depth` grid of square cells in the XZ plane,
//! row-major by `z` (`idx = cz * width + cx`).  Each cell is walkable or
//! not and carries a floor height (`y`).  Pathfinding is A* over the cell
//! graph: 8-connected, octile costs, no cutting corners past a wall.
//!
//! # Spatial index
//!
//! An R-tree over walkable cell centres answers "nearest walkable point"
//! queries — the grid's implementation of [`NavSurface::sample`], used to
//! turn an arbitrary requested destination into an effective one.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use patron_core::Point3;

use crate::{NavError, NavPath, NavResult, NavSurface};

/// Orthogonal-step cost ×10; diagonal ≈ ×14 (√2 scaled to integers).
const CARDINAL_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

// ── R-tree cell entry ─────────────────────────────────────────────────────────

/// Entry in the nearest-walkable index: a cell centre as an XZ point.
#[derive(Clone)]
struct CellEntry {
    point: [f32; 2], // [x, z]
    center: Point3,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CellEntry {
    /// Squared planar distance — the index lives entirely in the XZ plane.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── GridSurface ───────────────────────────────────────────────────────────────

/// A walkable-cell grid implementing [`NavSurface`].
///
/// Construct via [`GridSurfaceBuilder`] or [`GridSurface::parse`].
pub struct GridSurface {
    /// World position of the corner of cell (0, 0) (minimum x and z).
    origin: Point3,
    /// Edge length of one square cell, metres.
    cell_size: f32,
    width: usize,
    depth: usize,
    /// Row-major walkability; `idx = cz * width + cx`.
    walkable: Vec<bool>,
    /// Floor height per cell.
    height: Vec<f32>,
    snap_idx: RTree<CellEntry>,
}

impl GridSurface {
    /// Parse an ASCII floor plan into a surface plus its annotations.
    ///
    /// Legend: `#` is a wall, `.` and space are floor, any other
    /// non-whitespace character is floor *and* a named marker (collected
    /// into [`FloorMarkers`] — the conventional way fixtures and the demo
    /// place shelves, desks, and doorways).  The first text row is the
    /// `z = 0` edge; columns run along `x`.  Rows shorter than the widest
    /// row are padded with wall.
    pub fn parse(art: &str, cell_size: f32) -> NavResult<(GridSurface, FloorMarkers)> {
        let mut lines: Vec<&str> = art.lines().collect();
        while lines.first().is_some_and(|l| l.trim().is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }

        let depth = lines.len();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let mut builder = GridSurfaceBuilder::new(width, depth, cell_size);
        let mut markers: FxHashMap<char, Vec<Point3>> = FxHashMap::default();

        for (cz, line) in lines.iter().enumerate() {
            let mut row_len = 0;
            for (cx, ch) in line.chars().enumerate() {
                row_len = cx + 1;
                match ch {
                    '#' => {
                        builder.wall(cx, cz);
                    }
                    '.' | ' ' => {}
                    other => {
                        let center = builder.center_of(cx, cz);
                        markers.entry(other).or_default().push(center);
                    }
                }
            }
            for cx in row_len..width {
                builder.wall(cx, cz);
            }
        }

        let surface = builder.build();
        if surface.snap_idx.size() == 0 {
            return Err(NavError::EmptySurface);
        }
        Ok((surface, FloorMarkers { map: markers }))
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.walkable.iter().filter(|&&w| w).count()
    }

    // ── Cell addressing ───────────────────────────────────────────────────

    #[inline]
    fn idx(&self, cx: usize, cz: usize) -> usize {
        cz * self.width + cx
    }

    #[inline]
    fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    /// The cell containing `p`, or `None` when `p` is outside the grid.
    fn cell_at(&self, p: Point3) -> Option<usize> {
        let fx = (p.x - self.origin.x) / self.cell_size;
        let fz = (p.z - self.origin.z) / self.cell_size;
        if fx < 0.0 || fz < 0.0 {
            return None;
        }
        let (cx, cz) = (fx as usize, fz as usize);
        if cx >= self.width || cz >= self.depth {
            return None;
        }
        Some(self.idx(cx, cz))
    }

    /// World centre of cell `(cx, cz)`, or `None` if out of bounds.
    pub fn cell_center(&self, cx: usize, cz: usize) -> Option<Point3> {
        if cx >= self.width || cz >= self.depth {
            return None;
        }
        Some(self.center_of_idx(self.idx(cx, cz)))
    }

    fn center_of_idx(&self, idx: usize) -> Point3 {
        let (cx, cz) = self.coords(idx);
        Point3::new(
            self.origin.x + (cx as f32 + 0.5) * self.cell_size,
            self.height[idx],
            self.origin.z + (cz as f32 + 0.5) * self.cell_size,
        )
    }

    // ── A* internals ──────────────────────────────────────────────────────

    /// Octile-distance heuristic ×10, admissible for the step costs above.
    fn octile(&self, a: usize, b: usize) -> u32 {
        let (ax, az) = self.coords(a);
        let (bx, bz) = self.coords(b);
        let dx = ax.abs_diff(bx) as u32;
        let dz = az.abs_diff(bz) as u32;
        CARDINAL_COST * dx.max(dz) + (DIAGONAL_COST - CARDINAL_COST) * dx.min(dz)
    }

    /// A* from `start` to `goal` over walkable cells.  Returns the cell
    /// index sequence inclusive of both endpoints, or `None` if
    /// disconnected.
    fn astar(&self, start: usize, goal: usize) -> Option<Vec<usize>> {
        if start == goal {
            return Some(vec![start]);
        }

        let n = self.walkable.len();
        // g[v] = best known cost to reach v; prev[v] = predecessor cell.
        let mut g = vec![u32::MAX; n];
        let mut prev = vec![usize::MAX; n];
        g[start] = 0;

        // Min-heap: (f, cell). Reverse makes BinaryHeap behave as min-heap;
        // the cell index is a deterministic tie-break.
        let mut heap: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();
        heap.push(Reverse((self.octile(start, goal), start)));

        while let Some(Reverse((f, cell))) = heap.pop() {
            if cell == goal {
                return Some(self.reconstruct(&prev, start, goal));
            }
            // Skip stale heap entries.
            if f > g[cell].saturating_add(self.octile(cell, goal)) {
                continue;
            }

            let (cx, cz) = self.coords(cell);
            for (dx, dz, step) in NEIGHBOR_STEPS {
                let (nx, nz) = (cx as isize + dx, cz as isize + dz);
                if nx < 0 || nz < 0 || nx as usize >= self.width || nz as usize >= self.depth {
                    continue;
                }
                let neighbor = self.idx(nx as usize, nz as usize);
                if !self.walkable[neighbor] {
                    continue;
                }
                // A diagonal move must not squeeze between two wall corners.
                if dx != 0 && dz != 0 {
                    let side_a = self.idx(nx as usize, cz);
                    let side_b = self.idx(cx, nz as usize);
                    if !self.walkable[side_a] || !self.walkable[side_b] {
                        continue;
                    }
                }

                let new_g = g[cell].saturating_add(step);
                if new_g < g[neighbor] {
                    g[neighbor] = new_g;
                    prev[neighbor] = cell;
                    heap.push(Reverse((new_g + self.octile(neighbor, goal), neighbor)));
                }
            }
        }
        None
    }

    fn reconstruct(&self, prev: &[usize], start: usize, goal: usize) -> Vec<usize> {
        let mut cells = vec![goal];
        let mut cur = goal;
        while cur != start {
            cur = prev[cur];
            cells.push(cur);
        }
        cells.reverse();
        cells
    }

    /// Turn a cell sequence into a waypoint polyline ending exactly at `to`.
    ///
    /// The start cell is dropped (the walker is already standing in it) and
    /// straight runs collapse to their turning points.
    fn waypoints_from_cells(&self, cells: &[usize], to: Point3) -> Vec<Point3> {
        let mut pts = Vec::new();
        if cells.len() >= 2 {
            let delta = |a: usize, b: usize| {
                let (ax, az) = self.coords(a);
                let (bx, bz) = self.coords(b);
                (bx as isize - ax as isize, bz as isize - az as isize)
            };
            let mut heading = delta(cells[0], cells[1]);
            for pair in cells.windows(2).skip(1) {
                let d = delta(pair[0], pair[1]);
                if d != heading {
                    pts.push(self.center_of_idx(pair[0]));
                    heading = d;
                }
            }
        }
        pts.push(to);
        pts
    }
}

/// The 8 neighbor offsets with their step costs.
const NEIGHBOR_STEPS: [(isize, isize, u32); 8] = [
    (1, 0, CARDINAL_COST),
    (-1, 0, CARDINAL_COST),
    (0, 1, CARDINAL_COST),
    (0, -1, CARDINAL_COST),
    (1, 1, DIAGONAL_COST),
    (1, -1, DIAGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (-1, -1, DIAGONAL_COST),
];

impl NavSurface for GridSurface {
    fn sample(&self, p: Point3, max_radius: f32) -> Option<Point3> {
        let entry = self.snap_idx.nearest_neighbor(&[p.x, p.z])?;
        if p.planar_distance(entry.center) <= max_radius {
            Some(entry.center)
        } else {
            None
        }
    }

    fn find_path(&self, from: Point3, to: Point3) -> NavResult<NavPath> {
        let start = self
            .cell_at(from)
            .filter(|&c| self.walkable[c])
            .ok_or(NavError::OffSurface(from))?;
        let goal = self
            .cell_at(to)
            .filter(|&c| self.walkable[c])
            .ok_or(NavError::OffSurface(to))?;

        let cells = self.astar(start, goal).ok_or(NavError::NoPath { from, to })?;
        Ok(NavPath::new(self.waypoints_from_cells(&cells, to)))
    }

    fn is_walkable(&self, p: Point3) -> bool {
        self.cell_at(p).is_some_and(|c| self.walkable[c])
    }
}

// ── FloorMarkers ──────────────────────────────────────────────────────────────

/// Named points collected from an ASCII floor plan, keyed by their
/// character.  Marker order is the plan's reading order (row-major), so
/// fixtures are deterministic.
#[derive(Debug, Default, Clone)]
pub struct FloorMarkers {
    map: FxHashMap<char, Vec<Point3>>,
}

impl FloorMarkers {
    /// All positions marked with `c`, in reading order.
    pub fn all(&self, c: char) -> &[Point3] {
        self.map.get(&c).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first position marked with `c`, if any.
    pub fn one(&self, c: char) -> Option<Point3> {
        self.all(c).first().copied()
    }

    pub fn count(&self, c: char) -> usize {
        self.all(c).len()
    }
}

// ── GridSurfaceBuilder ────────────────────────────────────────────────────────

/// Construct a [`GridSurface`] incrementally, then call [`build`](Self::build).
///
/// Cells start walkable at height 0; knock out walls with [`wall`](Self::wall).
pub struct GridSurfaceBuilder {
    width: usize,
    depth: usize,
    cell_size: f32,
    origin: Point3,
    walkable: Vec<bool>,
    height: Vec<f32>,
}

impl GridSurfaceBuilder {
    pub fn new(width: usize, depth: usize, cell_size: f32) -> Self {
        Self {
            width,
            depth,
            cell_size,
            origin: Point3::ORIGIN,
            walkable: vec![true; width * depth],
            height: vec![0.0; width * depth],
        }
    }

    /// Place the grid's (0, 0) corner somewhere other than the world origin.
    pub fn origin(&mut self, origin: Point3) -> &mut Self {
        self.origin = origin;
        self
    }

    /// Mark cell `(cx, cz)` unwalkable.
    pub fn wall(&mut self, cx: usize, cz: usize) -> &mut Self {
        let i = cz * self.width + cx;
        self.walkable[i] = false;
        self
    }

    pub fn set_walkable(&mut self, cx: usize, cz: usize, walkable: bool) -> &mut Self {
        let i = cz * self.width + cx;
        self.walkable[i] = walkable;
        self
    }

    /// Set the floor height of one cell (a step or mezzanine edge).
    pub fn set_height(&mut self, cx: usize, cz: usize, y: f32) -> &mut Self {
        let i = cz * self.width + cx;
        self.height[i] = y;
        self
    }

    /// World centre of a cell under the current origin — handy for placing
    /// fixtures before `build()`.
    pub fn center_of(&self, cx: usize, cz: usize) -> Point3 {
        Point3::new(
            self.origin.x + (cx as f32 + 0.5) * self.cell_size,
            self.height[cz * self.width + cx],
            self.origin.z + (cz as f32 + 0.5) * self.cell_size,
        )
    }

    /// Consume the builder and produce a [`GridSurface`].
    ///
    /// Bulk-loads the R-tree over walkable centres: O(N log N), faster than
    /// N inserts.
    pub fn build(self) -> GridSurface {
        let mut entries = Vec::new();
        for idx in 0..self.walkable.len() {
            if !self.walkable[idx] {
                continue;
            }
            let (cx, cz) = (idx % self.width, idx / self.width);
            let center = Point3::new(
                self.origin.x + (cx as f32 + 0.5) * self.cell_size,
                self.height[idx],
                self.origin.z + (cz as f32 + 0.5) * self.cell_size,
            );
            entries.push(CellEntry { point: [center.x, center.z], center });
        }
        let snap_idx = RTree::bulk_load(entries);

        GridSurface {
            origin: self.origin,
            cell_size: self.cell_size,
            width: self.width,
            depth: self.depth,
            walkable: self.walkable,
            height: self.height,
            snap_idx,
        }
    }
}
