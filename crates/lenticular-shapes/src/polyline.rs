//! Polyline transforms
//!
//! Both transforms take an open polyline and return a closed outline made of
//! the original points followed by a transformed copy in reverse order, so the
//! result walks out along the original and back along the copy.

use crate::point::Point;
use lenticular_core::{GeometryError, GeometryResult};

/// How the ends of the original polyline connect to the rotated copy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Join {
    /// Connect the end points with straight edges
    #[default]
    Straight,
    /// Route each connecting edge through a custom point: `end` sits between the
    /// last original point and the last rotated point, `start` between the
    /// first rotated point and the first original point
    Through { end: Point, start: Point },
}

fn require_polyline(polyline: &[Point]) -> GeometryResult<()> {
    if polyline.len() < 2 {
        return Err(GeometryError::TooFewPoints {
            min: 2,
            actual: polyline.len(),
        });
    }
    Ok(())
}

/// Close a polyline with a copy of itself translated by `(dx, dy)`
pub fn parallel_offset(polyline: &[Point], dx: f64, dy: f64) -> GeometryResult<Vec<Point>> {
    require_polyline(polyline)?;

    let mut outline = Vec::with_capacity(polyline.len() * 2);
    outline.extend_from_slice(polyline);
    outline.extend(polyline.iter().rev().map(|p| p.translated(dx, dy)));
    Ok(outline)
}

/// Close a polyline with a copy of itself rotated by `angle` radians about `centre`
pub fn rotate_and_join(
    polyline: &[Point],
    angle: f64,
    centre: Point,
    join: Join,
) -> GeometryResult<Vec<Point>> {
    require_polyline(polyline)?;

    let mut outline = Vec::with_capacity(polyline.len() * 2 + 2);
    outline.extend_from_slice(polyline);
    if let Join::Through { end, .. } = join {
        outline.push(end);
    }
    outline.extend(
        polyline
            .iter()
            .rev()
            .map(|p| p.rotated_about(centre, angle)),
    );
    if let Join::Through { start, .. } = join {
        outline.push(start);
    }
    Ok(outline)
}
