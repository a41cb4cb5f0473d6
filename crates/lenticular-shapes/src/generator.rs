//! # Point Generators
//!
//! Generators for closed and open 2D outlines. Every function returns plain
//! [`Point`] sequences so the results can be fed straight into the
//! [`projector`](crate::projector) or [`prism`](crate::prism) builders.

use crate::point::Point;
use lenticular_core::{GeometryError, GeometryResult};
use std::f64::consts::TAU;
use tracing::debug;

/// Relative tolerance for colinearity and parallel-line checks
const EPSILON: f64 = 1e-9;

/// Generate a regular polygon, or an arc of one
///
/// Points are placed at equal angular steps starting at `rotation`. When
/// `sweep` is a full turn the outline is closed and the step is
/// `sweep / sides`; otherwise the step is `sweep / (sides - 1)` so that both
/// ends of the arc are emitted and do not coincide.
///
/// The radius cycles through `radii` when fewer than `sides` values are given,
/// and the x-coordinate of every point is multiplied by `stretch`.
pub fn regular_polygon(
    sides: usize,
    radii: &[f64],
    stretch: f64,
    rotation: f64,
    sweep: f64,
) -> GeometryResult<Vec<Point>> {
    if radii.is_empty() {
        return Err(GeometryError::EmptyRadii);
    }

    let closed = sweep.abs() >= TAU - EPSILON;
    let min_sides = if closed { 3 } else { 2 };
    if sides < min_sides {
        return Err(GeometryError::TooFewSides {
            min: min_sides,
            actual: sides,
        });
    }

    let divisor = if closed { sides } else { sides - 1 };
    let step = sweep / divisor as f64;

    let points = (0..sides)
        .map(|i| {
            let angle = rotation + i as f64 * step;
            let radius = radii[i % radii.len()];
            Point::new(stretch * radius * angle.cos(), radius * angle.sin())
        })
        .collect();

    Ok(points)
}

/// Generate a star polygon `{sides / star_factor}`
///
/// Outer vertices lie on a circle of `radius`. The inner vertices sit where
/// the chord from outer vertex 0 to outer vertex `k` crosses the chord from
/// outer vertex 1 to outer vertex `1 - k`, with `k` the effective star factor.
/// A non-negative `dilation` pushes that inner radius towards `radius` by the
/// given fraction; a negative one shrinks it towards the centre.
///
/// `included_sides` limits output to the first `m` outer vertices and the
/// inner vertices between them, closing the arc with outer vertex `m`. `None`
/// emits the whole star as `2 * sides` alternating outer/inner points.
///
/// When the effective star factor is 0 or 1 the result is a regular polygon.
pub fn star_polygon(
    sides: usize,
    star_factor: usize,
    radius: f64,
    dilation: f64,
    rotation: f64,
    included_sides: Option<usize>,
) -> GeometryResult<Vec<Point>> {
    if sides < 3 {
        return Err(GeometryError::TooFewSides {
            min: 3,
            actual: sides,
        });
    }
    if !(-1.0..=1.0).contains(&dilation) {
        return Err(GeometryError::DilationOutOfRange(dilation));
    }

    let included = included_sides.unwrap_or(sides).min(sides);
    if included == 0 {
        return Err(GeometryError::TooFewSides {
            min: 1,
            actual: included,
        });
    }

    // {n/k} and {n/(n-k)} trace the same star.
    let k = star_factor % sides;
    let k = k.min(sides - k);

    let angle_step = TAU / sides as f64;
    let outer = |j: usize| Point::polar(radius, rotation + j as f64 * angle_step);

    if k <= 1 {
        let polygon = regular_polygon(sides, &[radius], 1.0, rotation, TAU)?;
        if included == sides {
            return Ok(polygon);
        }
        return Ok((0..=included).map(|j| polygon[j % sides]).collect());
    }

    let crossing = line_intersection(outer(0), outer(k), outer(1), outer(sides + 1 - k))?;
    let natural_inner = crossing.distance_to(&Point::ORIGIN);
    let inner_radius = if dilation >= 0.0 {
        natural_inner + dilation * (radius - natural_inner)
    } else {
        natural_inner * (1.0 + dilation)
    };
    debug!(sides, k, natural_inner, inner_radius, "star polygon radii");

    let mut points = Vec::with_capacity(2 * included + 1);
    for j in 0..included {
        points.push(outer(j));
        points.push(Point::polar(
            inner_radius,
            rotation + (j as f64 + 0.5) * angle_step,
        ));
    }
    if included < sides {
        points.push(outer(included));
    }

    Ok(points)
}

/// Intersection of the infinite lines through `a1, a2` and `b1, b2`
pub fn line_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> GeometryResult<Point> {
    let da = a2 - a1;
    let db = b2 - b1;
    let denom = cross(da, db);
    let scale = (da.x.hypot(da.y) * db.x.hypot(db.y)).max(f64::MIN_POSITIVE);
    if denom.abs() <= EPSILON * scale {
        return Err(GeometryError::ParallelLines);
    }
    let t = cross(b1 - a1, db) / denom;
    Ok(Point::new(a1.x + t * da.x, a1.y + t * da.y))
}

/// Points from `(radius, angle)` pairs
pub fn polar_points(coordinates: &[(f64, f64)]) -> Vec<Point> {
    coordinates
        .iter()
        .map(|&(radius, angle)| Point::polar(radius, angle))
        .collect()
}

/// Repeat `pattern` `copies` times about the origin at equal angular steps
///
/// Copy `c` is rotated by `c * 2π / copies`, so a single spoke becomes a
/// rotationally symmetric point set.
pub fn cyclic_points(pattern: &[Point], copies: usize) -> Vec<Point> {
    if copies == 0 {
        return Vec::new();
    }
    let step = TAU / copies as f64;
    (0..copies)
        .flat_map(|c| {
            let angle = c as f64 * step;
            pattern
                .iter()
                .map(move |p| p.rotated_about(Point::ORIGIN, angle))
        })
        .collect()
}

/// Remove redundant vertices from a closed polygon in a single pass
///
/// A vertex is dropped when the edge arriving at it has the same slope as the
/// edge leaving it, which covers both points in the middle of a straight run
/// and repeated points. The comparison uses the previous *kept* vertex so a run
/// of several colinear points collapses to its end points.
pub fn remove_colinear(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let mut kept: Vec<Point> = Vec::with_capacity(n);
    for i in 0..n {
        let prev = kept.last().copied().unwrap_or(points[n - 1]);
        let current = points[i];
        let next = points[(i + 1) % n];
        if !same_slope(prev, current, next) {
            kept.push(current);
        }
    }

    if kept.len() != n {
        debug!(removed = n - kept.len(), "removed colinear vertices");
    }
    kept
}

fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Slopes `(y - prev_y) / (x - prev_x)` of the two edges are equal, compared
/// in cross-product form so vertical edges need no special case
fn same_slope(prev: Point, current: Point, next: Point) -> bool {
    let incoming = current - prev;
    let outgoing = next - current;
    let scale = incoming.x.hypot(incoming.y) * outgoing.x.hypot(outgoing.y);
    if scale == 0.0 {
        return true;
    }
    cross(incoming, outgoing).abs() <= EPSILON * scale
}
