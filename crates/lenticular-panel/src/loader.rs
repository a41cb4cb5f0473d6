//! Asynchronous face image loading
//!
//! Every request runs as its own task. Completions are applied to the panel
//! one at a time in whatever order they finish. Each face keeps a ticket for
//! its latest request, and a completion carrying an older ticket is dropped,
//! so a second load for a face always supersedes the first. A task that
//! panics is reported against the face it was loading.

use crate::error::{LoadError, PanelError};
use crate::panel::PanelModel;
use crate::scene::SceneContainer;
use async_trait::async_trait;
use image::DynamicImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::{Id, JoinSet};
use tracing::{debug, info, warn};

/// Source of face images
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<DynamicImage, LoadError>;
}

/// Decodes images from the local filesystem on the blocking thread pool
#[derive(Debug, Clone, Default)]
pub struct FsImageLoader {
    root: Option<PathBuf>,
}

impl FsImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl ImageLoader for FsImageLoader {
    async fn load(&self, path: &Path) -> Result<DynamicImage, LoadError> {
        let path = self.resolve(path);
        let task_path = path.clone();
        match tokio::task::spawn_blocking(move || image::open(task_path)).await {
            Ok(Ok(image)) => Ok(image),
            Ok(Err(error)) => Err(LoadError::from_image(path, error)),
            Err(_) => Err(LoadError::Cancelled { path }),
        }
    }
}

/// A load that could not be applied to its face
#[derive(Debug)]
pub struct LoadFailure {
    pub face: usize,
    pub path: PathBuf,
    pub error: PanelError,
}

/// What happened to one completed request
#[derive(Debug)]
pub enum LoadEvent {
    /// The image was stored in the face
    Loaded { face: usize, path: PathBuf },
    /// The load or the following reslice failed
    Failed(LoadFailure),
    /// A newer request for the same face exists
    Superseded { face: usize, path: PathBuf },
    /// The task panicked or was cancelled
    Aborted { face: usize, path: PathBuf },
}

/// Summary of [`LoadQueue::drive`]
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<usize>,
    pub failed: Vec<LoadFailure>,
    pub superseded: usize,
    /// Faces whose load task panicked
    pub aborted: Vec<usize>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.aborted.is_empty()
    }
}

struct Request {
    face: usize,
    ticket: u64,
    path: PathBuf,
}

/// In-flight image requests for one panel
pub struct LoadQueue<L: ImageLoader + 'static> {
    loader: Arc<L>,
    tasks: JoinSet<Result<DynamicImage, LoadError>>,
    requests: HashMap<Id, Request>,
    tickets: HashMap<usize, u64>,
    next_ticket: u64,
}

impl<L: ImageLoader + 'static> LoadQueue<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader: Arc::new(loader),
            tasks: JoinSet::new(),
            requests: HashMap::new(),
            tickets: HashMap::new(),
            next_ticket: 0,
        }
    }

    /// Number of requests not yet applied
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the latest request for `face` has not been applied yet
    pub fn is_pending(&self, face: usize) -> bool {
        self.tickets.contains_key(&face)
    }

    /// Start loading `path` into `face`, superseding any earlier request for
    /// that face. Must be called from within a Tokio runtime.
    pub fn request(&mut self, face: usize, path: impl Into<PathBuf>) -> u64 {
        let path = path.into();
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.tickets.insert(face, ticket);
        debug!(face, ticket, path = %path.display(), "requested face image");

        let loader = Arc::clone(&self.loader);
        let task_path = path.clone();
        let handle = self
            .tasks
            .spawn(async move { loader.load(&task_path).await });
        self.requests.insert(handle.id(), Request { face, ticket, path });
        ticket
    }

    /// Wait for the next request to finish and apply it to `panel`
    ///
    /// Returns `None` once nothing is pending.
    pub async fn apply_next<S: SceneContainer + ?Sized>(
        &mut self,
        panel: &mut PanelModel,
        scene: &mut S,
    ) -> Option<LoadEvent> {
        let (request, result) = loop {
            let (id, joined) = match self.tasks.join_next_with_id().await? {
                Ok((id, result)) => (id, Ok(result)),
                Err(error) => (error.id(), Err(error)),
            };
            match self.requests.remove(&id) {
                Some(request) => break (request, joined),
                None => warn!(%id, "skipping completion of an unknown load task"),
            }
        };
        let Request { face, ticket, path } = request;

        let result = match result {
            Ok(result) => result,
            Err(error) => {
                self.settle(face, ticket);
                warn!(face, path = %path.display(), %error, "Image load task aborted");
                return Some(LoadEvent::Aborted { face, path });
            }
        };

        if !self.settle(face, ticket) {
            debug!(face, ticket, path = %path.display(), "discarding superseded load");
            return Some(LoadEvent::Superseded { face, path });
        }

        let outcome = result
            .map_err(PanelError::from)
            .and_then(|image| panel.load_face(scene, face, image.into_rgba8()));
        Some(match outcome {
            Ok(()) => LoadEvent::Loaded { face, path },
            Err(error) => {
                warn!(face, path = %path.display(), %error, "Face image could not be applied");
                LoadEvent::Failed(LoadFailure { face, path, error })
            }
        })
    }

    /// Release the ticket of `face` if `ticket` is still its latest request
    fn settle(&mut self, face: usize, ticket: u64) -> bool {
        if self.tickets.get(&face) == Some(&ticket) {
            self.tickets.remove(&face);
            true
        } else {
            false
        }
    }

    /// Apply every pending request
    pub async fn drive<S: SceneContainer + ?Sized>(
        &mut self,
        panel: &mut PanelModel,
        scene: &mut S,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        while let Some(event) = self.apply_next(panel, scene).await {
            match event {
                LoadEvent::Loaded { face, .. } => report.loaded.push(face),
                LoadEvent::Failed(failure) => report.failed.push(failure),
                LoadEvent::Superseded { .. } => report.superseded += 1,
                LoadEvent::Aborted { face, .. } => report.aborted.push(face),
            }
        }
        info!(
            panel = %panel.id(),
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            superseded = report.superseded,
            aborted = report.aborted.len(),
            "Finished loading face images"
        );
        report
    }
}
