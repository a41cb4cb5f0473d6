//! Prismatic shapes
//!
//! Straight extrusion of a closed outline along +Z, the right-triangle outline
//! used for wedge-shaped spacers, and Euler-angle rotations in degrees.

use crate::point::Point;
use crate::projector::{project, AxesPlane, PolygonMesh};
use glam::{DQuat, DVec3, EulerRot};
use lenticular_core::{radians, GeometryError, GeometryResult};

/// Right triangle with the right angle at the origin
pub fn triangle90(width: f64, height: f64) -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(width, 0.0),
        Point::new(0.0, height),
    ]
}

fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    0.5 * (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
}

/// Extrude a closed outline from `z = 0` to `z = depth`
///
/// Vertex layout: bottom ring, bottom centroid, top ring, top centroid. The
/// bottom cap faces -Z, the top cap +Z and the side walls face outwards
/// whichever way the outline winds.
pub fn prism(points: &[Point], depth: f64) -> GeometryResult<PolygonMesh> {
    if !(depth.is_finite() && depth > 0.0) {
        return Err(GeometryError::NonPositiveDepth(depth));
    }

    let mut outline = points.to_vec();
    if signed_area(&outline) < 0.0 {
        outline.reverse();
    }

    let bottom = project(&outline, DVec3::ZERO, AxesPlane::XY)?;
    let top = project(&outline, DVec3::new(0.0, 0.0, depth), AxesPlane::XY)?;

    let mut mesh = PolygonMesh::new();
    for vertex in bottom.iter().chain(top.iter()) {
        mesh.add_vertex(*vertex);
    }

    let n = outline.len() as u32;
    let bottom_centre = n;
    let top_start = n + 1;
    let top_centre = top_start + n;
    for i in 0..n {
        let j = (i + 1) % n;
        mesh.add_triangle(j, i, bottom_centre);
        mesh.add_triangle(top_start + i, top_start + j, top_centre);
        mesh.add_triangle(i, j, top_start + j);
        mesh.add_triangle(i, top_start + j, top_start + i);
    }

    Ok(mesh)
}

/// Rotation from Euler angles in degrees, applied in Z-Y-X order
pub fn euler_rotation(x_degrees: f64, y_degrees: f64, z_degrees: f64) -> DQuat {
    DQuat::from_euler(
        EulerRot::ZYX,
        radians(z_degrees),
        radians(y_degrees),
        radians(x_degrees),
    )
}
