//! # 2D to 3D Projection
//!
//! Places a closed 2D outline on one of the three axis-aligned planes through a
//! centre point and fan-triangulates it around an appended centroid vertex.

use crate::point::Point;
use glam::{DVec3, Vec3};
use lenticular_core::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};

/// Axis-aligned plane an outline is drawn on
///
/// A counter-clockwise outline faces the positive direction of the remaining
/// axis: +Z for `XY`, +Y for `XZ`, +X for `YZ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxesPlane {
    XY,
    XZ,
    YZ,
}

impl AxesPlane {
    /// Map outline coordinates onto this plane through `centre`
    pub fn place(self, point: Point, centre: DVec3) -> DVec3 {
        let offset = match self {
            AxesPlane::XY => DVec3::new(point.x, point.y, 0.0),
            AxesPlane::XZ => DVec3::new(point.x, 0.0, -point.y),
            AxesPlane::YZ => DVec3::new(0.0, point.x, point.y),
        };
        centre + offset
    }

    /// Unit normal of a counter-clockwise outline on this plane
    pub fn normal(self) -> DVec3 {
        match self {
            AxesPlane::XY => DVec3::Z,
            AxesPlane::XZ => DVec3::Y,
            AxesPlane::YZ => DVec3::X,
        }
    }
}

impl std::str::FromStr for AxesPlane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(Self::XY),
            "xz" => Ok(Self::XZ),
            "yz" => Ok(Self::YZ),
            other => Err(format!("unknown plane '{}', expected xy, xz or yz", other)),
        }
    }
}

/// A triangle mesh with flat vertex and index buffers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    /// Vertex positions `[x, y, z, x, y, z, ...]`
    pub positions: Vec<f32>,
    /// Triangle indices `[i0, i1, i2, ...]`
    pub indices: Vec<u32>,
}

impl PolygonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        let start = index * 3;
        self.positions
            .get(start..start + 3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
    }

    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);
        index
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }
}

/// Project `points` onto `plane` through `centre`, appending their centroid
///
/// The returned buffer has `points.len() + 1` vertices; the last one is the
/// average of the projected outline.
pub fn project(points: &[Point], centre: DVec3, plane: AxesPlane) -> GeometryResult<Vec<DVec3>> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            min: 3,
            actual: points.len(),
        });
    }

    let mut vertices: Vec<DVec3> = points.iter().map(|p| plane.place(*p, centre)).collect();
    let centroid = vertices.iter().copied().sum::<DVec3>() / vertices.len() as f64;
    vertices.push(centroid);
    Ok(vertices)
}

/// Fan-triangulated mesh of a closed outline
///
/// Every edge `(i, i + 1 mod n)` forms a triangle with the centroid vertex `n`.
pub fn polygon_mesh(points: &[Point], centre: DVec3, plane: AxesPlane) -> GeometryResult<PolygonMesh> {
    let vertices = project(points, centre, plane)?;
    let n = points.len() as u32;

    let mut mesh = PolygonMesh::new();
    for vertex in &vertices {
        mesh.add_vertex(*vertex);
    }
    for i in 0..n {
        mesh.add_triangle(i, (i + 1) % n, n);
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(-1.0, -1.0),
            Point::new(1.0, -1.0),
            Point::new(1.0, 1.0),
            Point::new(-1.0, 1.0),
        ]
    }

    #[test]
    fn test_project_appends_centroid() {
        let centre = DVec3::new(5.0, 6.0, 7.0);
        let vertices = project(&unit_square(), centre, AxesPlane::XY).unwrap();
        assert_eq!(vertices.len(), 5);
        assert!((vertices[4] - centre).length() < 1e-12);
        assert!(vertices.iter().all(|v| (v.z - 7.0).abs() < 1e-12));
    }

    #[test]
    fn test_planes_keep_constant_axis() {
        let centre = DVec3::new(1.0, 2.0, 3.0);
        let xz = project(&unit_square(), centre, AxesPlane::XZ).unwrap();
        assert!(xz.iter().all(|v| (v.y - 2.0).abs() < 1e-12));
        let yz = project(&unit_square(), centre, AxesPlane::YZ).unwrap();
        assert!(yz.iter().all(|v| (v.x - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_fan_indices() {
        let mesh = polygon_mesh(&unit_square(), DVec3::ZERO, AxesPlane::XY).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(
            mesh.indices,
            vec![0, 1, 4, 1, 2, 4, 2, 3, 4, 3, 0, 4]
        );
    }

    #[test]
    fn test_fan_winding_matches_plane_normal() {
        for plane in [AxesPlane::XY, AxesPlane::XZ, AxesPlane::YZ] {
            let mesh = polygon_mesh(&unit_square(), DVec3::ZERO, plane).unwrap();
            let a = mesh.vertex(0).unwrap().as_dvec3();
            let b = mesh.vertex(1).unwrap().as_dvec3();
            let c = mesh.vertex(4).unwrap().as_dvec3();
            let normal = (b - a).cross(c - a).normalize();
            assert!((normal - plane.normal()).length() < 1e-6, "{:?}", plane);
        }
    }

    #[test]
    fn test_too_few_points() {
        let err = project(&unit_square()[..2], DVec3::ZERO, AxesPlane::XY).unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints { min: 3, actual: 2 });
    }
}
