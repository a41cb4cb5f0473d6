//! # Lenticular Shapes
//!
//! Pure 2D point generation plus projection of closed outlines into 3D vertex
//! and index buffers. These utilities build simple flat or prismatic meshes and
//! are independent of the panel pipeline.
//!
//! ## Components
//!
//! - **Generator**: regular and star polygons, polar and cyclic point sets,
//!   colinear-point removal
//! - **Polyline**: closing an open polyline with a translated or rotated copy
//! - **Projector**: placing a 2D outline on an axis-aligned plane and
//!   fan-triangulating it
//! - **Prism**: right triangles, straight extrusion and Euler rotations
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use lenticular_shapes::{generator, projector::{polygon_mesh, AxesPlane}};
//!
//! let points = generator::regular_polygon(24, &[1.0, 1.1, 1.0, 0.4], 1.0, 0.0,
//!     std::f64::consts::TAU).unwrap();
//! let mesh = polygon_mesh(&points, DVec3::ZERO, AxesPlane::XY).unwrap();
//! assert_eq!(mesh.triangle_count(), 24);
//! ```

pub mod generator;
pub mod point;
pub mod polyline;
pub mod prism;
pub mod projector;

pub use generator::{
    cyclic_points, line_intersection, polar_points, regular_polygon, remove_colinear,
    star_polygon,
};
pub use point::Point;
pub use polyline::{parallel_offset, rotate_and_join, Join};
pub use prism::{euler_rotation, prism, triangle90};
pub use projector::{polygon_mesh, project, AxesPlane, PolygonMesh};
