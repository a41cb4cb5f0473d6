//! Error types for the panel crate.

use crate::facet::FacetId;
use lenticular_core::ConfigError;
use lenticular_slicer::SliceError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading an image for a face.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The image file could not be decoded.
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The loading task ended without producing an image.
    #[error("Loading {path} was cancelled")]
    Cancelled { path: PathBuf },
}

impl LoadError {
    /// Classify an `image` error for `path`
    pub fn from_image(path: PathBuf, error: image::ImageError) -> Self {
        match error {
            image::ImageError::IoError(source) => LoadError::Io { path, source },
            source => LoadError::Decode { path, source },
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Io { path, .. } | LoadError::Decode { path, .. } | LoadError::Cancelled { path } => {
                path
            }
        }
    }
}

/// Errors raised by panel operations.
#[derive(Error, Debug)]
pub enum PanelError {
    /// The panel configuration is invalid.
    #[error("Invalid panel configuration: {0}")]
    Config(#[from] ConfigError),

    /// A face image could not be sliced.
    #[error("Slicing failed: {0}")]
    Slice(#[from] SliceError),

    /// A face image could not be loaded.
    #[error("Image load failed: {0}")]
    Load(#[from] LoadError),

    /// The face index is out of range.
    #[error("Face index {0} is out of range")]
    FaceIndex(usize),

    /// The face has no image yet.
    #[error("Face {0} has no image loaded")]
    NotLoaded(usize),

    /// Faces whose image no longer fits after the panel was re-fitted.
    ///
    /// Those faces were cleared; `source` is the first failure.
    #[error("Faces {faces:?} could not be re-sliced: {source}")]
    Reslice {
        faces: Vec<usize>,
        #[source]
        source: Box<PanelError>,
    },

    /// A texture was attached to a facet that is not in the scene.
    #[error("Facet {0} is not placed in the scene")]
    NotPlaced(FacetId),
}

/// Result type for panel operations.
pub type PanelResult<T> = Result<T, PanelError>;
