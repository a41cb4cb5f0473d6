//! Image slots of a panel.

use crate::error::{PanelError, PanelResult};
use crate::facet::{Facet, FacetId};
use crate::layout::LentilLayout;
use crate::scene::SceneContainer;
use image::RgbaImage;
use lenticular_core::{Color, VerticalAlignment};
use lenticular_settings::FaceConfig;
use lenticular_slicer::{ImageSlicer, SliceGeometry, SliceParams};
use tracing::debug;
use uuid::Uuid;

/// One image slot with its slicer and its facets, indexed by slice
#[derive(Debug)]
pub struct Face {
    index: usize,
    border_color: Color,
    vertical_alignment: VerticalAlignment,
    image: Option<RgbaImage>,
    slicer: ImageSlicer,
    facets: Vec<Facet>,
}

impl Face {
    pub(crate) fn new(index: usize, config: &FaceConfig) -> Self {
        Self {
            index,
            border_color: config.border_color,
            vertical_alignment: config.vertical_alignment,
            image: None,
            slicer: ImageSlicer::new(),
            facets: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn border_color(&self) -> Color {
        self.border_color
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Width over height of the loaded image
    pub fn natural_aspect(&self) -> Option<f64> {
        self.image
            .as_ref()
            .filter(|image| image.height() > 0)
            .map(|image| image.width() as f64 / image.height() as f64)
    }

    pub fn slicer(&self) -> &ImageSlicer {
        &self.slicer
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub(crate) fn set_image(&mut self, image: RgbaImage) {
        self.image = Some(image);
    }

    /// Bring the facet list in line with `layout`
    ///
    /// Facets past the new slice count are torn down, survivors get the new
    /// geometry in place and keep their textures, missing facets are placed
    /// untextured. Returns `(reused, created, disposed)` facet counts.
    pub(crate) fn sync_facets<S: SceneContainer + ?Sized>(
        &mut self,
        scene: &mut S,
        panel: Uuid,
        layout: &LentilLayout,
    ) -> (usize, usize, usize) {
        let count = layout.slice_count();
        let disposed = self.facets.len().saturating_sub(count);
        for mut facet in self.facets.drain(count.min(self.facets.len())..) {
            facet.teardown(scene);
        }

        let reused = self.facets.len();
        for (facet, pair) in self.facets.iter_mut().zip(&layout.pairs) {
            facet.place(scene, pair.facets()[self.index]);
        }

        for pair in &layout.pairs[reused..] {
            let mut facet = Facet::new(FacetId {
                panel,
                face: self.index,
                slice: pair.slice,
            });
            facet.place(scene, pair.facets()[self.index]);
            self.facets.push(facet);
        }

        (reused, count - reused, disposed)
    }

    /// Release every facet
    pub(crate) fn teardown<S: SceneContainer + ?Sized>(&mut self, scene: &mut S) {
        for mut facet in self.facets.drain(..) {
            facet.teardown(scene);
        }
    }

    fn slice_params(&self, target_aspect_ratio: f64) -> SliceParams {
        SliceParams {
            target_aspect_ratio,
            slice_count: self.facets.len(),
            border_color: self.border_color,
            vertical_alignment: self.vertical_alignment,
        }
    }

    /// Check that `image` can be sliced onto this face at `target_aspect_ratio`
    pub(crate) fn check(&self, image: &RgbaImage, target_aspect_ratio: f64) -> PanelResult<()> {
        let params = self.slice_params(target_aspect_ratio);
        SliceGeometry::compute(
            image.width(),
            image.height(),
            params.target_aspect_ratio,
            params.slice_count,
            params.vertical_alignment,
        )?;
        Ok(())
    }

    /// Drop the image and every texture, leaving the facets placed
    pub(crate) fn clear<S: SceneContainer + ?Sized>(&mut self, scene: &mut S) {
        for facet in &mut self.facets {
            facet.detach(scene);
        }
        self.image = None;
    }

    /// Re-slice the loaded image and retexture every facet
    ///
    /// The new geometry is checked before any texture is released, so an
    /// image that cannot be fitted leaves the face as it was.
    pub(crate) fn reslice<S: SceneContainer + ?Sized>(
        &mut self,
        scene: &mut S,
        target_aspect_ratio: f64,
    ) -> PanelResult<()> {
        let image = self.image.as_ref().ok_or(PanelError::NotLoaded(self.index))?;
        self.check(image, target_aspect_ratio)?;
        let params = self.slice_params(target_aspect_ratio);

        for facet in &mut self.facets {
            facet.detach(scene);
        }
        let views = self.slicer.slice(image, &params)?;
        for (facet, view) in self.facets.iter_mut().zip(views) {
            facet.attach(scene, self.slicer.canvas(), view)?;
        }
        debug!(
            face = self.index,
            target_aspect_ratio,
            generation = self.slicer.canvas().generation(),
            "resliced face"
        );
        Ok(())
    }
}
