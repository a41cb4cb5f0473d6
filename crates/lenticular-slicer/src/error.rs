//! Error types for the slicer crate.

use lenticular_core::ConfigError;
use thiserror::Error;

/// Errors that can occur while slicing an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SliceError {
    /// A slicing parameter violates its contract.
    #[error("Invalid slicing parameters: {0}")]
    Config(#[from] ConfigError),

    /// The source raster has no pixels.
    #[error("Source image is empty")]
    EmptySource,

    /// The source is narrower than the number of slices.
    #[error("Source image is {source_width}px wide, too narrow for {slice_count} slices")]
    SourceTooNarrow {
        source_width: u32,
        slice_count: usize,
    },

    /// The padded canvas would exceed the raster size limits.
    #[error("Canvas of {width}x{height} pixels is too large")]
    CanvasTooLarge { width: u64, height: u64 },

    /// The source is taller than the padded canvas.
    #[error(
        "Image cannot be fit without clipping in the ignored axis: source height {source_height}px exceeds canvas height {canvas_height}px"
    )]
    VerticalOverflow {
        source_height: u32,
        canvas_height: u32,
    },

    /// The view was created before the canvas was last re-rasterised.
    #[error("Texture view of generation {view} is stale (canvas is at generation {canvas})")]
    StaleView { view: u64, canvas: u64 },

    /// The view was created from a different canvas.
    #[error("Texture view belongs to a different canvas")]
    ForeignView,
}

/// Result type alias for slicing operations.
pub type SliceResult<T> = Result<T, SliceError>;
