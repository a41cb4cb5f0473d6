//! Operations behind the command line subcommands
//!
//! Each function does the work of one subcommand and returns a serializable
//! summary; `main` only parses arguments and prints.

use anyhow::{Context, Result};
use glam::DVec3;
use lenticular_panel::{FsImageLoader, LentilLayout, LoadQueue, PanelModel, Scene};
use lenticular_settings::SceneConfig;
use lenticular_shapes::{polygon_mesh, regular_polygon, AxesPlane, PolygonMesh};
use lenticular_slicer::{ImageSlicer, SliceGeometry, SliceParams, TextureView};
use serde::Serialize;
use std::f64::consts::TAU;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the summary written by [`build_scene`]
pub const SUMMARY_FILE: &str = "summary.json";

/// Facet layout of every panel in a scene, without loading images
pub fn layout_scene(config: &SceneConfig) -> Result<Vec<LentilLayout>> {
    config.validate()?;
    let mut scene = Scene::new();
    config
        .panels
        .iter()
        .enumerate()
        .map(|(index, panel)| {
            let model = PanelModel::build(panel.clone(), &mut scene)
                .with_context(|| format!("Failed to build panel {}", index))?;
            let layout = model.layout().clone();
            model.teardown(&mut scene);
            Ok(layout)
        })
        .collect()
}

/// Canvas layout and per-strip views of a sliced file
#[derive(Debug, Clone, Serialize)]
pub struct SliceSummary {
    pub geometry: SliceGeometry,
    pub views: Vec<TextureView>,
}

/// Slice one image file and write the padded canvas to `output`
pub fn slice_file(input: &Path, output: &Path, params: &SliceParams) -> Result<SliceSummary> {
    let source = image::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?
        .into_rgba8();

    let mut slicer = ImageSlicer::new();
    let views = slicer.slice(&source, params)?;
    let canvas = slicer.canvas();
    let geometry = canvas
        .geometry()
        .copied()
        .context("Slicer produced no canvas geometry")?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    canvas
        .image()
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        width = geometry.width,
        height = geometry.height,
        "Sliced image"
    );
    Ok(SliceSummary { geometry, views })
}

/// One face of a built panel
#[derive(Debug, Clone, Serialize)]
pub struct FaceSummary {
    pub index: usize,
    pub image: Option<PathBuf>,
    /// Written canvas, absent when the face was never sliced
    pub canvas: Option<PathBuf>,
    pub geometry: Option<SliceGeometry>,
    pub textured_facets: usize,
}

/// One built panel
#[derive(Debug, Clone, Serialize)]
pub struct PanelSummary {
    pub index: usize,
    pub aspect_ratio: f64,
    pub side_lengths: Vec<f64>,
    pub layout: LentilLayout,
    pub faces: Vec<FaceSummary>,
    pub errors: Vec<String>,
}

/// Result of [`build_scene`]
#[derive(Debug, Clone, Serialize)]
pub struct SceneSummary {
    pub version: String,
    pub panels: Vec<PanelSummary>,
}

impl SceneSummary {
    pub fn error_count(&self) -> usize {
        self.panels.iter().map(|p| p.errors.len()).sum()
    }
}

/// Build every panel of the scene at `config_path`, load its images, and
/// write each sliced canvas plus a JSON summary into `out_dir`
///
/// Relative image paths resolve against the directory holding the
/// configuration file. A face that fails to load is recorded in the summary
/// and does not stop the other faces.
pub async fn build_scene(config_path: &Path, out_dir: &Path) -> Result<SceneSummary> {
    let config = SceneConfig::load_from_file(config_path)?;
    let root = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut scene = Scene::new();
    let mut panels = Vec::with_capacity(config.panels.len());
    for (index, panel_config) in config.panels.iter().enumerate() {
        let mut panel = PanelModel::build(panel_config.clone(), &mut scene)?;
        let mut queue = LoadQueue::new(FsImageLoader::with_root(root.clone()));
        for (face, face_config) in panel_config.faces.iter().enumerate() {
            if let Some(image) = &face_config.image {
                queue.request(face, image.clone());
            }
        }
        let report = queue.drive(&mut panel, &mut scene).await;

        let mut errors: Vec<String> = report
            .failed
            .iter()
            .map(|failure| format!("face {}: {}", failure.face, failure.error))
            .collect();
        errors.extend(
            report
                .aborted
                .iter()
                .map(|face| format!("face {}: load task aborted", face)),
        );

        let mut faces = Vec::with_capacity(panel.faces().len());
        for face in panel.faces() {
            // a face cleared by a failed re-fit still holds its last canvas
            let geometry = face
                .slicer()
                .canvas()
                .geometry()
                .copied()
                .filter(|_| face.is_loaded());
            let canvas = match geometry {
                Some(_) => {
                    let path = out_dir.join(format!("panel{}_face{}.png", index, face.index()));
                    face.slicer()
                        .canvas()
                        .image()
                        .save(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    Some(path)
                }
                None => None,
            };
            faces.push(FaceSummary {
                index: face.index(),
                image: panel_config.faces[face.index()].image.clone(),
                canvas,
                geometry,
                textured_facets: face.facets().iter().filter(|f| f.texture().is_some()).count(),
            });
        }

        for error in &errors {
            warn!(panel = index, %error, "Panel built with errors");
        }
        panels.push(PanelSummary {
            index,
            aspect_ratio: panel.aspect_ratio(),
            side_lengths: panel.config().side_lengths(),
            layout: panel.layout().clone(),
            faces,
            errors,
        });
        panel.teardown(&mut scene);
    }

    let summary = SceneSummary {
        version: crate::VERSION.to_string(),
        panels,
    };
    let summary_path = out_dir.join(SUMMARY_FILE);
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;
    info!(
        panels = summary.panels.len(),
        errors = summary.error_count(),
        path = %summary_path.display(),
        "Scene built"
    );
    Ok(summary)
}

/// Closed regular polygon centred on the origin, fan-triangulated on `plane`
pub fn polygon(sides: usize, radii: &[f64], plane: AxesPlane) -> Result<PolygonMesh> {
    let points = regular_polygon(sides, radii, 1.0, 0.0, TAU)?;
    Ok(polygon_mesh(&points, DVec3::ZERO, plane)?)
}
