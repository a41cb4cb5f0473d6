//! # Lenticular Panel
//!
//! Builds lenticular panels: a zig-zag of narrow planar facets where each
//! facet family shows a strip of its own image, so the panel shows a
//! different picture depending on the viewing direction.
//!
//! - [`layout`] computes facet sizes, rotations and translations.
//! - [`facet`] is the per-facet lifecycle (`Empty`, `Placed`, `Textured`).
//! - [`panel`] ties faces, facets, slicers and the layout together.
//! - [`scene`] is the seam to whatever renders the facets.
//! - [`loader`] loads face images asynchronously.
//!
//! ```no_run
//! use lenticular_panel::{PanelModel, Scene};
//! use lenticular_settings::PanelConfig;
//!
//! let mut scene = Scene::new();
//! let mut panel = PanelModel::build(PanelConfig::default(), &mut scene)?;
//! let image = image::open("left.png")?.into_rgba8();
//! panel.load_face(&mut scene, 0, image)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod face;
pub mod facet;
pub mod layout;
pub mod loader;
pub mod panel;
pub mod scene;

pub use error::{LoadError, PanelError, PanelResult};
pub use face::Face;
pub use facet::{Facet, FacetId, FacetState};
pub use layout::{
    developed_width, half_angle, FacetGeometry, FacetLayoutBuilder, FacetPair, FacetVertex,
    LentilLayout, FACET_INDICES,
};
pub use loader::{FsImageLoader, ImageLoader, LoadEvent, LoadFailure, LoadQueue, LoadReport};
pub use panel::{PanelModel, ResizeReport};
pub use scene::{Resource, Scene, SceneContainer, SceneEvent, SceneMesh, SceneTexture};
