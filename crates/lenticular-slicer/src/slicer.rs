//! Image slicer
//!
//! Pads or crops a source image to a target aspect ratio, rasterises it onto
//! the slicer's canvas and cuts the canvas into equal-width strip views.

use crate::canvas::SliceCanvas;
use crate::error::SliceResult;
use crate::geometry::SliceGeometry;
use crate::view::TextureView;
use image::RgbaImage;
use lenticular_core::{Color, VerticalAlignment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parameters for one slicing pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceParams {
    /// Width over height of the padded canvas
    pub target_aspect_ratio: f64,
    /// Number of strips
    pub slice_count: usize,
    /// Colour of the padding around the image
    pub border_color: Color,
    pub vertical_alignment: VerticalAlignment,
}

impl Default for SliceParams {
    fn default() -> Self {
        Self {
            target_aspect_ratio: 1.0,
            slice_count: 1,
            border_color: Color::default(),
            vertical_alignment: VerticalAlignment::default(),
        }
    }
}

/// Slices images onto a single reusable canvas
///
/// Every call to [`slice`](Self::slice) replaces the canvas content, so views
/// returned by earlier calls go stale.
#[derive(Debug, Default)]
pub struct ImageSlicer {
    canvas: SliceCanvas,
}

impl ImageSlicer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvas(&self) -> &SliceCanvas {
        &self.canvas
    }

    /// Slice `image` into `params.slice_count` strip views
    ///
    /// Geometry is validated before any pixel is touched: on error the canvas
    /// and its current views are left as they were.
    pub fn slice(&mut self, image: &RgbaImage, params: &SliceParams) -> SliceResult<Vec<TextureView>> {
        let geometry = SliceGeometry::compute(
            image.width(),
            image.height(),
            params.target_aspect_ratio,
            params.slice_count,
            params.vertical_alignment,
        )?;

        self.canvas.rasterize(image, geometry, params.border_color);
        debug!(
            canvas = %self.canvas.id(),
            generation = self.canvas.generation(),
            slices = params.slice_count,
            "sliced image"
        );
        Ok(self.canvas.views())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SliceError;
    use image::Rgba;

    #[test]
    fn test_error_leaves_canvas_untouched() {
        let mut slicer = ImageSlicer::new();
        let image = RgbaImage::from_pixel(800, 600, Rgba([1, 2, 3, 255]));
        let params = SliceParams {
            target_aspect_ratio: 1.5,
            slice_count: 9,
            ..SliceParams::default()
        };
        let views = slicer.slice(&image, &params).unwrap();

        let bad = SliceParams {
            slice_count: 0,
            ..params
        };
        assert!(matches!(
            slicer.slice(&image, &bad),
            Err(SliceError::Config(_))
        ));
        assert_eq!(slicer.canvas().generation(), 1);
        assert!(slicer.canvas().resolve(&views[0]).is_ok());
    }
}
