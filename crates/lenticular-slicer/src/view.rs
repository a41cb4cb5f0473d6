//! Texture views into a shared slice canvas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A window onto one strip of a [`SliceCanvas`](crate::SliceCanvas)
///
/// A view owns no pixels. It records which canvas and which rasterisation
/// generation it was cut from, plus the horizontal offset and scale that map a
/// facet's `[0, 1]` UV square onto its strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureView {
    /// Canvas the view reads from
    pub canvas: Uuid,
    /// Canvas generation the view was created for
    pub generation: u64,
    /// Strip index, left to right
    pub slice: usize,
    /// UV offset `[u, v]`
    pub offset: [f64; 2],
    /// UV scale `[u, v]`
    pub repeat: [f64; 2],
}

impl TextureView {
    /// Map a facet-local UV coordinate into canvas UV space
    pub fn map_uv(&self, u: f64, v: f64) -> [f64; 2] {
        [
            self.offset[0] + u * self.repeat[0],
            self.offset[1] + v * self.repeat[1],
        ]
    }

    /// Whether two views show the same window of the same canvas, regardless
    /// of generation
    pub fn same_window(&self, other: &TextureView) -> bool {
        self.canvas == other.canvas
            && self.slice == other.slice
            && self.offset == other.offset
            && self.repeat == other.repeat
    }
}
