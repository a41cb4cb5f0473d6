//! Scene graph seam
//!
//! Panels never talk to a renderer directly. They drive a [`SceneContainer`]
//! that owns the actual meshes, textures and materials. [`Scene`] is the
//! in-process container used by the command line tool and the tests; it keeps
//! an ordered log of every call it receives.

use crate::error::PanelResult;
use crate::facet::FacetId;
use crate::layout::FacetGeometry;
use lenticular_slicer::{PixelRect, SliceCanvas, TextureView};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::trace;

/// Per-facet resource a container can release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Resource {
    Texture,
    Material,
    Geometry,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Texture => write!(f, "texture"),
            Resource::Material => write!(f, "material"),
            Resource::Geometry => write!(f, "geometry"),
        }
    }
}

/// Receiver of facet meshes
pub trait SceneContainer {
    /// Add a new untextured mesh
    fn insert(&mut self, id: FacetId, geometry: &FacetGeometry);

    /// Replace the geometry of an existing mesh
    fn update_geometry(&mut self, id: FacetId, geometry: &FacetGeometry);

    /// Texture a mesh with one strip of `canvas`
    fn attach_texture(
        &mut self,
        id: FacetId,
        canvas: &SliceCanvas,
        view: &TextureView,
    ) -> PanelResult<()>;

    /// Release one resource of a mesh
    fn dispose(&mut self, id: FacetId, resource: Resource);

    /// Drop a mesh from the scene
    fn remove(&mut self, id: FacetId);
}

/// Everything a container was asked to do, in call order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SceneEvent {
    Inserted(FacetId),
    GeometryUpdated(FacetId),
    TextureAttached(FacetId),
    Disposed(FacetId, Resource),
    Removed(FacetId),
}

impl SceneEvent {
    pub fn facet(&self) -> FacetId {
        match *self {
            SceneEvent::Inserted(id)
            | SceneEvent::GeometryUpdated(id)
            | SceneEvent::TextureAttached(id)
            | SceneEvent::Disposed(id, _)
            | SceneEvent::Removed(id) => id,
        }
    }
}

/// Texture held by an in-memory mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneTexture {
    pub view: TextureView,
    /// Canvas pixels the view resolved to when attached
    pub pixels: PixelRect,
}

/// An in-memory mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SceneMesh {
    pub geometry: FacetGeometry,
    pub texture: Option<SceneTexture>,
}

/// In-memory scene graph
#[derive(Debug, Default)]
pub struct Scene {
    meshes: BTreeMap<FacetId, SceneMesh>,
    events: Vec<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh(&self, id: &FacetId) -> Option<&SceneMesh> {
        self.meshes.get(id)
    }

    pub fn meshes(&self) -> impl Iterator<Item = (&FacetId, &SceneMesh)> {
        self.meshes.iter()
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn textured_count(&self) -> usize {
        self.meshes.values().filter(|m| m.texture.is_some()).count()
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Drain the event log
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, event: SceneEvent) {
        trace!(?event, "scene event");
        self.events.push(event);
    }
}

impl SceneContainer for Scene {
    fn insert(&mut self, id: FacetId, geometry: &FacetGeometry) {
        self.meshes.insert(
            id,
            SceneMesh {
                geometry: *geometry,
                texture: None,
            },
        );
        self.record(SceneEvent::Inserted(id));
    }

    fn update_geometry(&mut self, id: FacetId, geometry: &FacetGeometry) {
        if let Some(mesh) = self.meshes.get_mut(&id) {
            mesh.geometry = *geometry;
        }
        self.record(SceneEvent::GeometryUpdated(id));
    }

    fn attach_texture(
        &mut self,
        id: FacetId,
        canvas: &SliceCanvas,
        view: &TextureView,
    ) -> PanelResult<()> {
        let pixels = canvas.resolve(view)?;
        if let Some(mesh) = self.meshes.get_mut(&id) {
            mesh.texture = Some(SceneTexture { view: *view, pixels });
        }
        self.record(SceneEvent::TextureAttached(id));
        Ok(())
    }

    fn dispose(&mut self, id: FacetId, resource: Resource) {
        if resource == Resource::Texture {
            if let Some(mesh) = self.meshes.get_mut(&id) {
                mesh.texture = None;
            }
        }
        self.record(SceneEvent::Disposed(id, resource));
    }

    fn remove(&mut self, id: FacetId) {
        self.meshes.remove(&id);
        self.record(SceneEvent::Removed(id));
    }
}
