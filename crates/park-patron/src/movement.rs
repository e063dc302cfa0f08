//! One movement step toward a target.
//!
//! A patron walks straight at `speed` cells per tick.  If the straight
//! segment is blocked it tries a single sideways step rotated by
//! `deflection_degrees` (side picked at random) and otherwise waits.

use park_core::{PatronRng, Point};
use park_terrain::Terrain;

/// Result of a single movement step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Step {
    /// Moved along the direct line (possibly landing on the target).
    Direct(Point),
    /// Direct line blocked; moved along the deflected heading.
    Deflected(Point),
    /// Both headings blocked; position unchanged.
    Blocked,
}

impl Step {
    /// The position after the step.
    #[inline]
    pub fn resolve(self, from: Point) -> Point {
        match self {
            Step::Direct(p) | Step::Deflected(p) => p,
            Step::Blocked => from,
        }
    }
}

/// Compute the next position from `from` toward `target`.
pub fn step_toward(
    from: Point,
    target: Point,
    speed: f64,
    deflection_degrees: f64,
    terrain: &Terrain,
    rng: &mut PatronRng,
) -> Step {
    let dist = from.distance(target);
    if dist <= f64::EPSILON {
        return Step::Direct(target);
    }

    let (ux, uy) = ((target.x - from.x) / dist, (target.y - from.y) / dist);
    let next = if dist <= speed {
        target
    } else {
        from.offset(ux * speed, uy * speed)
    };
    if terrain.is_free_line(from, next) {
        return Step::Direct(next);
    }

    let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let (sin, cos) = (side * deflection_degrees.to_radians()).sin_cos();
    let len = speed.min(dist);
    let candidate = from.offset((ux * cos - uy * sin) * len, (ux * sin + uy * cos) * len);
    if terrain.is_free(candidate) {
        Step::Deflected(candidate)
    } else {
        Step::Blocked
    }
}
