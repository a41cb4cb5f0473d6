//! Panel model
//!
//! A [`PanelModel`] owns its faces and their facets, keeps the current facet
//! layout, and coordinates the layout builder with each face's slicer when
//! the configuration or an image changes.

use crate::error::{PanelError, PanelResult};
use crate::face::Face;
use crate::layout::{developed_width, half_angle, FacetLayoutBuilder, LentilLayout};
use crate::scene::SceneContainer;
use image::RgbaImage;
use lenticular_core::ConfigError;
use lenticular_settings::{AspectRatio, PanelConfig};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Outcome of a slice count change, in facet pairs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResizeReport {
    /// Pairs kept with their geometry replaced in place
    pub reused: usize,
    /// Pairs newly placed, untextured
    pub created: usize,
    /// Pairs torn down
    pub disposed: usize,
}

#[derive(Debug)]
pub struct PanelModel {
    id: Uuid,
    config: PanelConfig,
    aspect_ratio: f64,
    layout: LentilLayout,
    faces: Vec<Face>,
}

impl PanelModel {
    /// Validate `config`, lay out the facets and place them in `scene`
    ///
    /// Panels with an `"auto"` aspect ratio start from the developed width of
    /// one facet pair until every face has an image.
    pub fn build<S: SceneContainer + ?Sized>(config: PanelConfig, scene: &mut S) -> PanelResult<Self> {
        config.validate()?;

        let aspect_ratio = match config.aspect_ratio {
            AspectRatio::Fixed(value) => value,
            AspectRatio::Auto => developed_width(side_pair(&config), config.interlace_angle),
        };
        let id = Uuid::new_v4();
        let layout = layout_for(&config, aspect_ratio, config.slice_count)?;
        let mut faces: Vec<Face> = config
            .faces
            .iter()
            .enumerate()
            .map(|(index, face)| Face::new(index, face))
            .collect();
        for face in &mut faces {
            face.sync_facets(scene, id, &layout);
        }

        info!(
            panel = %id,
            slices = config.slice_count,
            aspect_ratio,
            auto = config.aspect_ratio.is_auto(),
            "Built panel"
        );

        Ok(Self {
            id,
            config,
            aspect_ratio,
            layout,
            faces,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Working configuration, including side lengths fitted by
    /// [`optimize`](Self::optimize)
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Current width over height of the panel
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn layout(&self) -> &LentilLayout {
        &self.layout
    }

    pub fn slice_count(&self) -> usize {
        self.layout.slice_count()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    pub fn is_fully_loaded(&self) -> bool {
        self.faces.iter().all(Face::is_loaded)
    }

    /// Aspect ratio a face's canvas is sliced at
    ///
    /// A face spans `slice_count` facets of its own length out of the
    /// developed width, at the panel height.
    pub fn target_aspect_ratio(&self, face: usize) -> PanelResult<f64> {
        let side = self
            .config
            .faces
            .get(face)
            .ok_or(PanelError::FaceIndex(face))?
            .side_length;
        Ok(side / self.layout.developed_width * self.aspect_ratio)
    }

    /// Store `image` in a face and retexture it
    ///
    /// The image is checked against the face's current target aspect ratio
    /// first; a rejected image leaves the face untouched. On an `"auto"` panel
    /// the face is sliced against the provisional layout, and once every face
    /// has an image the panel is re-fitted with [`optimize`](Self::optimize).
    pub fn load_face<S: SceneContainer + ?Sized>(
        &mut self,
        scene: &mut S,
        face: usize,
        image: RgbaImage,
    ) -> PanelResult<()> {
        let target = self.target_aspect_ratio(face)?;
        let slot = self.faces.get_mut(face).ok_or(PanelError::FaceIndex(face))?;
        if let Err(error) = slot.check(&image, target) {
            warn!(
                panel = %self.id,
                face,
                width = image.width(),
                height = image.height(),
                %error,
                "Rejected face image"
            );
            return Err(error);
        }
        info!(
            panel = %self.id,
            face,
            width = image.width(),
            height = image.height(),
            "Loaded face image"
        );
        slot.set_image(image);
        self.reslice(scene, face)?;

        if self.config.aspect_ratio.is_auto() {
            if self.is_fully_loaded() {
                self.optimize(scene)?;
            } else {
                debug!(panel = %self.id, face, "Waiting for every face before fitting the panel");
            }
        }
        Ok(())
    }

    /// Re-slice one face's current image onto its facets
    pub fn reslice<S: SceneContainer + ?Sized>(&mut self, scene: &mut S, face: usize) -> PanelResult<()> {
        let target = self.target_aspect_ratio(face)?;
        let slot = self.faces.get_mut(face).ok_or(PanelError::FaceIndex(face))?;
        slot.reslice(scene, target)
    }

    /// Change the number of facet pairs
    ///
    /// Pairs past `slice_count` are fully torn down; the others keep their
    /// facets and textures and only receive new geometry.
    pub fn resize<S: SceneContainer + ?Sized>(
        &mut self,
        scene: &mut S,
        slice_count: usize,
    ) -> PanelResult<ResizeReport> {
        let layout = layout_for(&self.config, self.aspect_ratio, slice_count)?;

        let mut report = ResizeReport::default();
        for face in &mut self.faces {
            let (reused, created, disposed) = face.sync_facets(scene, self.id, &layout);
            report = ResizeReport {
                reused,
                created,
                disposed,
            };
        }
        self.config.slice_count = slice_count;
        self.layout = layout;

        info!(
            panel = %self.id,
            slices = slice_count,
            reused = report.reused,
            created = report.created,
            disposed = report.disposed,
            "Resized panel"
        );
        Ok(report)
    }

    /// Fit side lengths and aspect ratio to the loaded images
    ///
    /// Each face's side length becomes its image aspect over the smallest
    /// image aspect, and the panel aspect becomes the developed width times
    /// that smallest aspect, so every face is sliced at its own image's aspect
    /// ratio and needs no cropping. The layout is rebuilt and every face
    /// re-sliced. A face whose image no longer fits is cleared and listed in
    /// [`PanelError::Reslice`]; the other faces are still re-sliced. Returns
    /// `false` without changes on a panel with a fixed aspect ratio.
    pub fn optimize<S: SceneContainer + ?Sized>(&mut self, scene: &mut S) -> PanelResult<bool> {
        if !self.config.aspect_ratio.is_auto() {
            return Ok(false);
        }
        let aspects = self
            .faces
            .iter()
            .map(|face| face.natural_aspect().ok_or(PanelError::NotLoaded(face.index())))
            .collect::<PanelResult<Vec<f64>>>()?;
        let min_aspect = aspects.iter().copied().fold(f64::INFINITY, f64::min);

        for (face, aspect) in self.config.faces.iter_mut().zip(&aspects) {
            face.side_length = aspect / min_aspect;
        }
        let sides = self.config.side_lengths();
        self.aspect_ratio = sides.iter().sum::<f64>()
            * half_angle(self.config.interlace_angle).cos()
            * min_aspect;

        let layout = layout_for(&self.config, self.aspect_ratio, self.slice_count())?;
        for face in &mut self.faces {
            face.sync_facets(scene, self.id, &layout);
        }
        self.layout = layout;

        info!(
            panel = %self.id,
            ?sides,
            aspect_ratio = self.aspect_ratio,
            "Optimized panel to loaded images"
        );

        // every face is attempted; one that no longer fits is cleared
        let mut failed = Vec::new();
        let mut first_error = None;
        for face in 0..self.faces.len() {
            if let Err(error) = self.reslice(scene, face) {
                warn!(panel = %self.id, face, %error, "Face no longer fits the fitted panel");
                self.faces[face].clear(scene);
                failed.push(face);
                first_error.get_or_insert(error);
            }
        }
        match first_error {
            None => Ok(true),
            Some(error) => Err(PanelError::Reslice {
                faces: failed,
                source: Box::new(error),
            }),
        }
    }

    /// Release every facet of the panel
    pub fn teardown<S: SceneContainer + ?Sized>(mut self, scene: &mut S) {
        for face in &mut self.faces {
            face.teardown(scene);
        }
        info!(panel = %self.id, "Tore down panel");
    }
}

fn side_pair(config: &PanelConfig) -> [f64; 2] {
    let sides = config.side_lengths();
    [
        sides.first().copied().unwrap_or(1.0),
        sides.get(1).copied().unwrap_or(1.0),
    ]
}

fn layout_for(config: &PanelConfig, aspect_ratio: f64, slice_count: usize) -> Result<LentilLayout, ConfigError> {
    let [first, second] = side_pair(config);
    FacetLayoutBuilder::new(config.width, slice_count)
        .with_side_lengths(first, second)
        .with_interlace_angle(config.interlace_angle)
        .with_aspect_ratio(aspect_ratio)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::FacetState;
    use crate::scene::Scene;
    use image::Rgba;

    fn fixed_panel(slices: usize) -> PanelConfig {
        PanelConfig {
            width: 9.0,
            aspect_ratio: AspectRatio::Fixed(1.5),
            slice_count: slices,
            ..PanelConfig::default()
        }
    }

    #[test]
    fn test_build_places_untextured_facets() {
        let mut scene = Scene::new();
        let panel = PanelModel::build(fixed_panel(9), &mut scene).unwrap();
        assert_eq!(scene.len(), 18);
        assert_eq!(scene.textured_count(), 0);
        for face in panel.faces() {
            assert_eq!(face.facets().len(), 9);
            assert!(face
                .facets()
                .iter()
                .all(|f| f.state() == FacetState::Placed));
        }
    }

    #[test]
    fn test_build_fails_fast() {
        let mut scene = Scene::new();
        let err = PanelModel::build(fixed_panel(0), &mut scene).unwrap_err();
        assert!(matches!(
            err,
            PanelError::Config(ConfigError::InvalidSliceCount(0))
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_target_aspect_ratio() {
        let mut scene = Scene::new();
        let mut config = fixed_panel(3);
        config.faces[0].side_length = 3.0;
        config.faces[1].side_length = 1.0;
        let panel = PanelModel::build(config, &mut scene).unwrap();
        let developed = panel.layout().developed_width;
        assert!((panel.target_aspect_ratio(0).unwrap() - 3.0 / developed * 1.5).abs() < 1e-12);
        assert!(matches!(
            panel.target_aspect_ratio(2),
            Err(PanelError::FaceIndex(2))
        ));
    }

    #[test]
    fn test_reslice_requires_image() {
        let mut scene = Scene::new();
        let mut panel = PanelModel::build(fixed_panel(3), &mut scene).unwrap();
        assert!(matches!(
            panel.reslice(&mut scene, 1),
            Err(PanelError::NotLoaded(1))
        ));
        let image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        assert!(matches!(
            panel.load_face(&mut scene, 5, image),
            Err(PanelError::FaceIndex(5))
        ));
    }

    #[test]
    fn test_optimize_is_noop_for_fixed_panels() {
        let mut scene = Scene::new();
        let mut panel = PanelModel::build(fixed_panel(3), &mut scene).unwrap();
        assert!(!panel.optimize(&mut scene).unwrap());
        assert_eq!(panel.aspect_ratio(), 1.5);
    }
}
