//! # Lenticular Slicer
//!
//! Turns an arbitrarily sized source raster into a border-padded canvas with a
//! target aspect ratio and partitions it into equal-width vertical strips.
//!
//! The canvas is rasterised once per slicing pass; every strip is a
//! [`TextureView`] (horizontal offset and scale) into that one raster, so no
//! strip is ever re-rasterised on its own.
//!
//! ```text
//!  +-------------- width = slice_width * slice_count --------------+
//!  |                          top border                           |
//!  | left |       source (possibly centre-cropped)        | right  |
//!  |                         bottom border                         |
//!  +---------------------------------------------------------------+
//!    view 0 | view 1 | ...                                | view n-1
//! ```

pub mod canvas;
pub mod error;
pub mod geometry;
pub mod slicer;
pub mod view;

pub use canvas::SliceCanvas;
pub use error::{SliceError, SliceResult};
pub use geometry::{PixelRect, SliceGeometry};
pub use slicer::{ImageSlicer, SliceParams};
pub use view::TextureView;
