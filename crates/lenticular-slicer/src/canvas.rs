//! The shared raster every strip view reads from.

use crate::error::{SliceError, SliceResult};
use crate::geometry::{PixelRect, SliceGeometry};
use crate::view::TextureView;
use image::{imageops, Rgba, RgbaImage};
use lenticular_core::Color;
use std::fmt;
use tracing::trace;
use uuid::Uuid;

/// Padded canvas owned by one slicer
///
/// Each rasterisation bumps the generation, which invalidates every
/// [`TextureView`] cut from the previous raster. The pixel buffer is reused
/// when the new canvas has the same dimensions.
pub struct SliceCanvas {
    id: Uuid,
    generation: u64,
    image: RgbaImage,
    geometry: Option<SliceGeometry>,
}

impl SliceCanvas {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            generation: 0,
            image: RgbaImage::new(0, 0),
            geometry: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Number of completed rasterisations
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn geometry(&self) -> Option<&SliceGeometry> {
        self.geometry.as_ref()
    }

    /// Redraw the canvas for `geometry`: border colour everywhere outside the
    /// interior, the cropped source inside it
    pub(crate) fn rasterize(&mut self, source: &RgbaImage, geometry: SliceGeometry, border: Color) {
        if self.image.dimensions() != (geometry.width, geometry.height) {
            trace!(
                width = geometry.width,
                height = geometry.height,
                "reallocating slice canvas"
            );
            self.image = RgbaImage::new(geometry.width, geometry.height);
        }

        let border = Rgba(border.to_rgba());
        for rect in geometry.border_rects() {
            fill_rect(&mut self.image, rect, border);
        }

        let crop = geometry.source_crop();
        let cropped = imageops::crop_imm(source, crop.x, crop.y, crop.width, crop.height).to_image();
        imageops::replace(
            &mut self.image,
            &cropped,
            geometry.left_pad as i64,
            geometry.top_pad as i64,
        );

        self.geometry = Some(geometry);
        self.generation += 1;
    }

    /// View onto strip `index` of the current raster
    pub fn view(&self, index: usize) -> Option<TextureView> {
        let geometry = self.geometry.as_ref()?;
        if index >= geometry.slice_count {
            return None;
        }
        Some(TextureView {
            canvas: self.id,
            generation: self.generation,
            slice: index,
            offset: [geometry.slice_offset(index), 0.0],
            repeat: [geometry.slice_scale(), 1.0],
        })
    }

    /// Views onto every strip of the current raster, left to right
    pub fn views(&self) -> Vec<TextureView> {
        let count = self.geometry.map_or(0, |g| g.slice_count);
        (0..count).filter_map(|i| self.view(i)).collect()
    }

    /// Pixel strip a view covers, if the view is current
    pub fn resolve(&self, view: &TextureView) -> SliceResult<PixelRect> {
        if view.canvas != self.id {
            return Err(SliceError::ForeignView);
        }
        let stale = SliceError::StaleView {
            view: view.generation,
            canvas: self.generation,
        };
        if view.generation != self.generation {
            return Err(stale);
        }
        let geometry = self.geometry.as_ref().ok_or(stale)?;
        if view.slice >= geometry.slice_count {
            return Err(SliceError::ForeignView);
        }
        Ok(geometry.slice_rect(view.slice))
    }

    /// Copy of the pixels a view shows
    pub fn view_image(&self, view: &TextureView) -> SliceResult<RgbaImage> {
        let rect = self.resolve(view)?;
        Ok(imageops::crop_imm(&self.image, rect.x, rect.y, rect.width, rect.height).to_image())
    }
}

impl Default for SliceCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SliceCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCanvas")
            .field("id", &self.id)
            .field("generation", &self.generation)
            .field("dimensions", &self.image.dimensions())
            .field("geometry", &self.geometry)
            .finish()
    }
}

fn fill_rect(image: &mut RgbaImage, rect: PixelRect, colour: Rgba<u8>) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            image.put_pixel(x, y, colour);
        }
    }
}
