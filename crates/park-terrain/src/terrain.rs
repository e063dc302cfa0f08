//! The park grid.
//!
//! # Data layout
//!
//! Cells are stored row-major in a flat `Vec<bool>` (`true` = obstacle).
//! Cell `(x, y)` lives at index `y * width + x`.  Continuous positions map to
//! cells by rounding (see [`Point::cell`]).
//!
//! The count of free interior cells (everything but the outermost ring) is
//! maintained on every mutation, so [`Terrain::random_free_point`] can fail
//! fast instead of sampling forever on a fully blocked map.

use rand::Rng;

use park_core::{BBox, Point};

use crate::{TerrainError, TerrainResult};

/// Interpolation steps used by [`Terrain::is_free_line`].  Seven points are
/// sampled, both endpoints included.
pub const LINE_SAMPLES: usize = 6;

/// Static park map: obstacle grid plus spawn and exit points.
///
/// Immutable once the park is built, apart from
/// [`stamp_barrier`](Self::stamp_barrier) during ride placement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    width:         usize,
    height:        usize,
    obstacle:      Vec<bool>,
    free_interior: usize,
    spawns:        Vec<Point>,
    exits:         Vec<Point>,
}

impl Terrain {
    // ── Construction ──────────────────────────────────────────────────────

    /// An open park of `width × height` cells with a walled border.
    pub fn from_size(width: usize, height: usize) -> TerrainResult<Self> {
        if width < 3 || height < 3 {
            return Err(TerrainError::TooSmall { width, height });
        }
        let mut obstacle = vec![false; width * height];
        for x in 0..width {
            obstacle[x] = true;
            obstacle[(height - 1) * width + x] = true;
        }
        for y in 0..height {
            obstacle[y * width] = true;
            obstacle[y * width + width - 1] = true;
        }
        Ok(Self::assemble(width, height, obstacle))
    }

    /// Build from explicit rows: `0` free, `1` obstacle.  Every row must
    /// have the same length and the grid must be at least 3×3.
    pub fn from_grid(rows: Vec<Vec<u8>>) -> TerrainResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height < 3 || width < 3 {
            return Err(TerrainError::MalformedGrid(format!(
                "grid is {width}x{height}, need at least 3x3"
            )));
        }

        let mut obstacle = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TerrainError::MalformedGrid(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for (x, &cell) in row.iter().enumerate() {
                match cell {
                    0 => obstacle.push(false),
                    1 => obstacle.push(true),
                    other => {
                        return Err(TerrainError::MalformedGrid(format!(
                            "cell ({x}, {y}) has value {other}, expected 0 or 1"
                        )));
                    }
                }
            }
        }
        Ok(Self::assemble(width, height, obstacle))
    }

    fn assemble(width: usize, height: usize, obstacle: Vec<bool>) -> Self {
        let (w, h) = (width as i32, height as i32);
        let mut terrain = Terrain {
            width,
            height,
            obstacle,
            free_interior: 0,
            spawns: vec![Point::from((1, h / 2)), Point::from((w - 2, h / 3))],
            exits:  vec![Point::from((w - 2, h - 2)), Point::from((2, 2))],
        };
        terrain.free_interior = terrain.count_free_interior();
        terrain
    }

    /// Replace the spawn list.
    pub fn with_spawns(mut self, spawns: Vec<Point>) -> TerrainResult<Self> {
        if spawns.is_empty() {
            return Err(TerrainError::EmptyPointList("spawn"));
        }
        self.spawns = spawns;
        Ok(self)
    }

    /// Replace the exit list.
    pub fn with_exits(mut self, exits: Vec<Point>) -> TerrainResult<Self> {
        if exits.is_empty() {
            return Err(TerrainError::EmptyPointList("exit"));
        }
        self.exits = exits;
        Ok(self)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Mark every in-bounds cell under `bbox` as obstacle.
    pub fn stamp_barrier(&mut self, bbox: BBox) {
        let (w, h) = (self.width as i64, self.height as i64);
        let x0 = (bbox.x as i64).clamp(0, w) as usize;
        let y0 = (bbox.y as i64).clamp(0, h) as usize;
        let x1 = (bbox.x as i64 + bbox.w as i64).clamp(0, w) as usize;
        let y1 = (bbox.y as i64 + bbox.h as i64).clamp(0, h) as usize;
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_obstacle(x, y, true);
            }
        }
    }

    /// Free a single cell, e.g. a gate in the border wall.  Out-of-bounds
    /// coordinates are ignored.
    pub fn open_cell(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.set_obstacle(x, y, false);
        }
    }

    fn set_obstacle(&mut self, x: usize, y: usize, blocked: bool) {
        let idx = y * self.width + x;
        if self.obstacle[idx] == blocked {
            return;
        }
        self.obstacle[idx] = blocked;
        if self.is_interior(x, y) {
            if blocked {
                self.free_interior -= 1;
            } else {
                self.free_interior += 1;
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` iff `p` rounds to an in-bounds, non-obstacle cell.
    pub fn is_free(&self, p: Point) -> bool {
        let (cx, cy) = p.cell();
        if cx < 0 || cy < 0 || cx >= self.width as i64 || cy >= self.height as i64 {
            return false;
        }
        !self.obstacle[cy as usize * self.width + cx as usize]
    }

    /// Sampled line of sight: every one of the `LINE_SAMPLES + 1` points
    /// evenly spaced from `a` to `b` must be free.
    ///
    /// Not a continuous raycast.  A path that clips the corner of an
    /// obstacle between two samples is accepted.
    pub fn is_free_line(&self, a: Point, b: Point) -> bool {
        (0..=LINE_SAMPLES).all(|i| self.is_free(a.lerp(b, i as f64 / LINE_SAMPLES as f64)))
    }

    /// `true` if `p` lies within `tolerance` cells of `bbox` on both axes.
    #[inline]
    pub fn near(&self, p: Point, bbox: BBox, tolerance: f64) -> bool {
        bbox.inflated_contains(p, tolerance)
    }

    /// A uniformly random free interior cell, by rejection sampling.
    ///
    /// Returns [`TerrainError::NoFreeCell`] when the interior is fully
    /// blocked.
    pub fn random_free_point<R: Rng + ?Sized>(&self, rng: &mut R) -> TerrainResult<Point> {
        if self.free_interior == 0 {
            return Err(TerrainError::NoFreeCell);
        }
        loop {
            let x = rng.gen_range(1..self.width - 1);
            let y = rng.gen_range(1..self.height - 1);
            if !self.obstacle[y * self.width + x] {
                return Ok(Point::new(x as f64, y as f64));
            }
        }
    }

    /// `true` if cell `(x, y)` is out of bounds or blocked.
    pub fn is_obstacle_cell(&self, x: usize, y: usize) -> bool {
        x >= self.width || y >= self.height || self.obstacle[y * self.width + x]
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn spawn_points(&self) -> &[Point] {
        &self.spawns
    }

    #[inline]
    pub fn exit_points(&self) -> &[Point] {
        &self.exits
    }

    /// Number of free cells excluding the outermost ring.
    #[inline]
    pub fn free_interior_cells(&self) -> usize {
        self.free_interior
    }

    fn is_interior(&self, x: usize, y: usize) -> bool {
        x > 0 && y > 0 && x + 1 < self.width && y + 1 < self.height
    }

    fn count_free_interior(&self) -> usize {
        (1..self.height - 1)
            .flat_map(|y| (1..self.width - 1).map(move |x| (x, y)))
            .filter(|&(x, y)| !self.obstacle[y * self.width + x])
            .count()
    }
}
