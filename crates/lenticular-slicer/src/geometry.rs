//! Crop and padding geometry of a sliced canvas.

use crate::error::{SliceError, SliceResult};
use lenticular_core::{ConfigError, VerticalAlignment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Absorbs floating-point noise before rounding a slice width up
const ROUNDING_TOLERANCE: f64 = 1e-9;

/// An axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x
            && y >= self.y
            && (x - self.x) < self.width
            && (y - self.y) < self.height
    }
}

/// Layout of a source image inside its padded, slice-aligned canvas
///
/// `width` is always `slice_width * slice_count`, so the canvas divides into
/// equal strips with integer arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceGeometry {
    pub source_width: u32,
    pub source_height: u32,
    pub slice_count: usize,
    pub slice_width: u32,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Width of the part of the source that is drawn
    pub image_width: u32,
    /// Columns cut from the left of the source when it is cropped
    pub left_clip: u32,
    pub left_pad: u32,
    pub top_pad: u32,
}

impl SliceGeometry {
    /// Work out crop and padding for a source of `source_width x source_height`
    ///
    /// When the target is wider than the source, the whole source width is
    /// kept and the canvas is padded left and right; the slice width is the
    /// smallest integer that makes the canvas at least `target_aspect_ratio *
    /// source_height` wide. Otherwise the source is centre-cropped to the
    /// largest multiple of `slice_count` columns, unless that crop would make
    /// the canvas shorter than the source, in which case the covering width is
    /// used as well and at most `slice_count - 1` columns are cropped or padded.
    /// Height then follows from the aspect ratio.
    pub fn compute(
        source_width: u32,
        source_height: u32,
        target_aspect_ratio: f64,
        slice_count: usize,
        alignment: VerticalAlignment,
    ) -> SliceResult<Self> {
        if source_width == 0 || source_height == 0 {
            return Err(SliceError::EmptySource);
        }
        if slice_count == 0 {
            return Err(ConfigError::InvalidSliceCount(slice_count).into());
        }
        if !(target_aspect_ratio.is_finite() && target_aspect_ratio > 0.0) {
            return Err(ConfigError::NonPositiveAspectRatio(target_aspect_ratio).into());
        }

        let count = slice_count as u64;
        let natural_aspect = source_width as f64 / source_height as f64;
        let covering = target_aspect_ratio * source_height as f64 / slice_count as f64;
        let covering_slice = ((covering - ROUNDING_TOLERANCE).ceil() as u64).max(1);

        let slice_width = if target_aspect_ratio > natural_aspect {
            covering_slice
        } else {
            let cropped_slice = source_width as u64 / count;
            if cropped_slice == 0 {
                return Err(SliceError::SourceTooNarrow {
                    source_width,
                    slice_count,
                });
            }
            let cropped_height = (cropped_slice * count) as f64 / target_aspect_ratio;
            if (cropped_height.round() as u64) < source_height as u64 {
                // the integer crop lost the rows; widen to the narrowest canvas that covers them
                covering_slice
            } else {
                cropped_slice
            }
        };

        // a huge finite aspect saturates the slice width, so the product must be checked
        let width = slice_width
            .checked_mul(count)
            .filter(|width| *width <= u32::MAX as u64)
            .ok_or(SliceError::CanvasTooLarge {
                width: slice_width.saturating_mul(count),
                height: source_height as u64,
            })?;
        let image_width = width.min(source_width as u64);
        let left_clip = (source_width as u64 - image_width) / 2;
        let left_pad = (width - image_width) / 2;
        let height = (width as f64 / target_aspect_ratio).round() as u64;

        let width_px = width as u32;
        let height_px = u32::try_from(height).map_err(|_| SliceError::CanvasTooLarge { width, height })?;

        if height_px < source_height {
            return Err(SliceError::VerticalOverflow {
                source_height,
                canvas_height: height_px,
            });
        }
        let top_pad = (alignment.value() * (height_px - source_height) as f64).floor() as u32;

        let geometry = Self {
            source_width,
            source_height,
            slice_count,
            slice_width: slice_width as u32,
            width: width_px,
            height: height_px,
            image_width: image_width as u32,
            left_clip: left_clip as u32,
            left_pad: left_pad as u32,
            top_pad,
        };
        debug!(?geometry, target_aspect_ratio, "computed slice geometry");
        Ok(geometry)
    }

    /// Region of the canvas the source is drawn into
    pub fn interior(&self) -> PixelRect {
        PixelRect::new(
            self.left_pad,
            self.top_pad,
            self.image_width,
            self.source_height,
        )
    }

    /// Region of the source that is drawn
    pub fn source_crop(&self) -> PixelRect {
        PixelRect::new(self.left_clip, 0, self.image_width, self.source_height)
    }

    /// Top, left, right and bottom border rectangles, skipping empty ones
    ///
    /// Together with [`interior`](Self::interior) they tile the canvas exactly.
    pub fn border_rects(&self) -> Vec<PixelRect> {
        let below_top = self.height - self.top_pad;
        let right_x = self.left_pad + self.image_width;
        let interior_bottom = self.top_pad + self.source_height;
        [
            PixelRect::new(0, 0, self.width, self.top_pad),
            PixelRect::new(0, self.top_pad, self.left_pad, below_top),
            PixelRect::new(right_x, self.top_pad, self.width - right_x, below_top),
            PixelRect::new(
                self.left_pad,
                interior_bottom,
                self.image_width,
                self.height - interior_bottom,
            ),
        ]
        .into_iter()
        .filter(|rect| !rect.is_empty())
        .collect()
    }

    /// Pixel strip covered by slice `index`
    pub fn slice_rect(&self, index: usize) -> PixelRect {
        PixelRect::new(
            index as u32 * self.slice_width,
            0,
            self.slice_width,
            self.height,
        )
    }

    /// Horizontal texture offset of slice `index` as a fraction of the width
    pub fn slice_offset(&self, index: usize) -> f64 {
        (index as u64 * self.slice_width as u64) as f64 / self.width as f64
    }

    /// Horizontal texture scale shared by every slice
    pub fn slice_scale(&self) -> f64 {
        self.slice_width as f64 / self.width as f64
    }
}
