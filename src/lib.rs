//! # Lenticular
//!
//! Geometry and texture slicing for lenticular facet panels. A panel is a
//! zig-zag ridge of narrow planar facets; every other facet shows a strip of
//! one image, the rest show strips of a second image, so the panel reads as a
//! different picture from each side.
//!
//! ## Architecture
//!
//! The project is organized as a workspace with multiple crates:
//!
//! 1. **lenticular-core** - Errors, colours, vertical alignment, angle helpers
//! 2. **lenticular-shapes** - 2D point generators and 2D-to-3D projection
//! 3. **lenticular-slicer** - Letterboxing and slicing an image into strips
//! 4. **lenticular-settings** - Panel and scene configuration, JSON/TOML files
//! 5. **lenticular-panel** - Facet layout, scene graph lifecycle, async loading
//! 6. **lenticular** - Command line tool that ties the crates together

pub mod commands;

pub use lenticular_panel as panel;
pub use lenticular_settings as settings;
pub use lenticular_shapes as shapes;
pub use lenticular_slicer as slicer;

pub use lenticular_core::{Color, ConfigError, GeometryError, VerticalAlignment};
pub use lenticular_panel::{
    FacetLayoutBuilder, FsImageLoader, LentilLayout, LoadQueue, PanelError, PanelModel, Scene,
};
pub use lenticular_settings::{AspectRatio, FaceConfig, PanelConfig, SceneConfig};
pub use lenticular_slicer::{ImageSlicer, SliceGeometry, SliceParams};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    // stdout carries command output, so logs go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
