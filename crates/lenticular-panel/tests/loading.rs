//! Asynchronous face loading.

use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};
use lenticular_panel::{
    FacetState, FsImageLoader, ImageLoader, LoadError, LoadQueue, PanelError, PanelModel, Scene,
};
use lenticular_settings::{AspectRatio, PanelConfig};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Serves solid images of fixed sizes after a fixed delay
#[derive(Default)]
struct MockLoader {
    images: HashMap<PathBuf, (u32, u32, u64)>,
}

impl MockLoader {
    fn with(mut self, path: &str, width: u32, height: u32, delay_ms: u64) -> Self {
        self.images
            .insert(PathBuf::from(path), (width, height, delay_ms));
        self
    }
}

#[async_trait]
impl ImageLoader for MockLoader {
    async fn load(&self, path: &Path) -> Result<DynamicImage, LoadError> {
        match self.images.get(path) {
            Some(&(width, height, delay_ms)) => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                let pixels = RgbaImage::from_pixel(width, height, Rgba([5, 6, 7, 255]));
                Ok(DynamicImage::ImageRgba8(pixels))
            }
            None => Err(LoadError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such image"),
            }),
        }
    }
}

fn fixed_panel(scene: &mut Scene) -> PanelModel {
    let config = PanelConfig {
        aspect_ratio: AspectRatio::Fixed(1.5),
        slice_count: 4,
        ..PanelConfig::default()
    };
    PanelModel::build(config, scene).unwrap()
}

#[tokio::test]
async fn test_faces_load_in_any_order() {
    let mut scene = Scene::new();
    let mut panel = fixed_panel(&mut scene);
    let loader = MockLoader::default()
        .with("slow.png", 80, 100, 40)
        .with("fast.png", 90, 100, 0);
    let mut queue = LoadQueue::new(loader);
    queue.request(0, "slow.png");
    queue.request(1, "fast.png");
    assert_eq!(queue.pending(), 2);

    let report = queue.drive(&mut panel, &mut scene).await;
    assert!(report.is_success());
    let mut loaded = report.loaded.clone();
    loaded.sort_unstable();
    assert_eq!(loaded, vec![0, 1]);
    assert_eq!(queue.pending(), 0);
    assert_eq!(scene.textured_count(), 8);
    assert_eq!(panel.face(0).unwrap().image().unwrap().width(), 80);
}

#[tokio::test]
async fn test_newer_request_supersedes_older() {
    let mut scene = Scene::new();
    let mut panel = fixed_panel(&mut scene);
    let loader = MockLoader::default()
        .with("old.png", 50, 100, 30)
        .with("new.png", 70, 100, 0);
    let mut queue = LoadQueue::new(loader);
    let first = queue.request(0, "old.png");
    let second = queue.request(0, "new.png");
    assert!(second > first);

    let report = queue.drive(&mut panel, &mut scene).await;
    assert_eq!(report.loaded, vec![0]);
    assert_eq!(report.superseded, 1);
    assert_eq!(panel.face(0).unwrap().image().unwrap().width(), 70);
    assert_eq!(scene.textured_count(), 4);
}

#[tokio::test]
async fn test_failed_load_leaves_face_untextured() {
    let mut scene = Scene::new();
    let mut panel = fixed_panel(&mut scene);
    let loader = MockLoader::default().with("ok.png", 90, 100, 0);
    let mut queue = LoadQueue::new(loader);
    queue.request(0, "ok.png");
    queue.request(1, "missing.png");

    let report = queue.drive(&mut panel, &mut scene).await;
    assert_eq!(report.loaded, vec![0]);
    assert_eq!(report.failed.len(), 1);
    let failure = &report.failed[0];
    assert_eq!(failure.face, 1);
    assert_eq!(failure.path, PathBuf::from("missing.png"));
    assert!(matches!(failure.error, PanelError::Load(LoadError::Io { .. })));

    assert!(panel
        .face(1)
        .unwrap()
        .facets()
        .iter()
        .all(|f| f.state() == FacetState::Placed));
    assert_eq!(scene.textured_count(), 4);
}

#[tokio::test]
async fn test_out_of_range_face_is_reported() {
    let mut scene = Scene::new();
    let mut panel = fixed_panel(&mut scene);
    let mut queue = LoadQueue::new(MockLoader::default().with("a.png", 10, 10, 0));
    queue.request(7, "a.png");
    let report = queue.drive(&mut panel, &mut scene).await;
    assert!(matches!(report.failed[0].error, PanelError::FaceIndex(7)));
}

#[tokio::test]
async fn test_auto_panel_optimizes_after_both_loads() {
    let mut scene = Scene::new();
    let config = PanelConfig {
        aspect_ratio: AspectRatio::Auto,
        slice_count: 3,
        ..PanelConfig::default()
    };
    let mut panel = PanelModel::build(config, &mut scene).unwrap();
    let loader = MockLoader::default()
        .with("wide.png", 300, 100, 10)
        .with("square.png", 100, 100, 0);
    let mut queue = LoadQueue::new(loader);
    queue.request(0, "wide.png");
    queue.request(1, "square.png");

    let report = queue.drive(&mut panel, &mut scene).await;
    assert!(report.is_success());
    assert_eq!(scene.textured_count(), 6);
    let sides = panel.config().side_lengths();
    assert!((sides[0] - 3.0).abs() < 1e-12);
    assert!((sides[1] - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn test_fs_loader_reads_png() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("face.png");
    RgbaImage::from_pixel(12, 8, Rgba([1, 2, 3, 255]))
        .save(&path)
        .unwrap();

    let loader = FsImageLoader::with_root(dir.path());
    let image = loader.load(Path::new("face.png")).await.unwrap();
    assert_eq!((image.width(), image.height()), (12, 8));

    let err = loader.load(Path::new("absent.png")).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(err.path(), &dir.path().join("absent.png"));
}

/// Panics for one path, serves a solid image for every other one
struct PanickingLoader {
    poison: PathBuf,
}

#[async_trait]
impl ImageLoader for PanickingLoader {
    async fn load(&self, path: &Path) -> Result<DynamicImage, LoadError> {
        if path == self.poison {
            panic!("decoder crashed on {}", path.display());
        }
        let pixels = RgbaImage::from_pixel(80, 100, Rgba([1, 2, 3, 255]));
        Ok(DynamicImage::ImageRgba8(pixels))
    }
}

#[tokio::test]
async fn test_panicked_task_is_reported_against_its_face() {
    let mut scene = Scene::new();
    let mut panel = fixed_panel(&mut scene);
    let mut queue = LoadQueue::new(PanickingLoader {
        poison: PathBuf::from("crash.png"),
    });
    queue.request(0, "crash.png");
    queue.request(1, "fine.png");
    assert!(queue.is_pending(0));

    let report = queue.drive(&mut panel, &mut scene).await;
    assert_eq!(report.aborted, vec![0]);
    assert_eq!(report.loaded, vec![1]);
    assert!(!report.is_success());
    assert!(!queue.is_pending(0));
    assert!(!queue.is_pending(1));
    assert_eq!(queue.pending(), 0);

    // the face is free for a fresh request
    queue.request(0, "fine.png");
    let report = queue.drive(&mut panel, &mut scene).await;
    assert_eq!(report.loaded, vec![0]);
    assert!(report.is_success());
    assert!(panel.is_fully_loaded());
}
