//! Facet lifecycle
//!
//! ```text
//!            place                attach
//!   Empty ----------> Placed -------------> Textured
//!     ^               |    ^    detach         |
//!     |   teardown    |    +-------------------+
//!     +---------------+------------------------+
//! ```
//!
//! `place` on a facet that is already in the scene swaps its geometry and
//! keeps its state. `attach` on a textured facet releases the old texture
//! before the new one is attached. `teardown` releases texture, material and
//! geometry in that order before the mesh is removed.

use crate::error::{PanelError, PanelResult};
use crate::layout::FacetGeometry;
use crate::scene::{Resource, SceneContainer};
use lenticular_slicer::{SliceCanvas, TextureView};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of a facet within a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FacetId {
    pub panel: Uuid,
    pub face: usize,
    pub slice: usize,
}

impl fmt::Display for FacetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/face {}/slice {}", self.panel, self.face, self.slice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetState {
    /// Not in the scene
    Empty,
    /// In the scene without a texture
    Placed,
    /// In the scene with a texture
    Textured,
}

/// One planar quad of one face at one slice index
#[derive(Debug, Clone)]
pub struct Facet {
    id: FacetId,
    state: FacetState,
    geometry: Option<FacetGeometry>,
    texture: Option<TextureView>,
}

impl Facet {
    pub fn new(id: FacetId) -> Self {
        Self {
            id,
            state: FacetState::Empty,
            geometry: None,
            texture: None,
        }
    }

    pub fn id(&self) -> FacetId {
        self.id
    }

    pub fn state(&self) -> FacetState {
        self.state
    }

    pub fn geometry(&self) -> Option<&FacetGeometry> {
        self.geometry.as_ref()
    }

    pub fn texture(&self) -> Option<&TextureView> {
        self.texture.as_ref()
    }

    /// Insert the facet, or swap the geometry of a facet already in the scene
    pub fn place<S: SceneContainer + ?Sized>(&mut self, scene: &mut S, geometry: FacetGeometry) {
        match self.state {
            FacetState::Empty => {
                scene.insert(self.id, &geometry);
                self.state = FacetState::Placed;
            }
            FacetState::Placed | FacetState::Textured => {
                scene.dispose(self.id, Resource::Geometry);
                scene.update_geometry(self.id, &geometry);
            }
        }
        self.geometry = Some(geometry);
    }

    /// Texture the facet with `view`, releasing any previous texture first
    pub fn attach<S: SceneContainer + ?Sized>(
        &mut self,
        scene: &mut S,
        canvas: &SliceCanvas,
        view: TextureView,
    ) -> PanelResult<()> {
        if self.state == FacetState::Empty {
            return Err(PanelError::NotPlaced(self.id));
        }
        self.detach(scene);
        scene.attach_texture(self.id, canvas, &view)?;
        self.texture = Some(view);
        self.state = FacetState::Textured;
        Ok(())
    }

    /// Release the texture, keeping the facet in the scene
    pub fn detach<S: SceneContainer + ?Sized>(&mut self, scene: &mut S) {
        if self.state == FacetState::Textured {
            scene.dispose(self.id, Resource::Texture);
            self.texture = None;
            self.state = FacetState::Placed;
        }
    }

    /// Release every resource and remove the facet from the scene
    pub fn teardown<S: SceneContainer + ?Sized>(&mut self, scene: &mut S) {
        if self.state == FacetState::Empty {
            return;
        }
        self.detach(scene);
        scene.dispose(self.id, Resource::Material);
        scene.dispose(self.id, Resource::Geometry);
        scene.remove(self.id);
        self.geometry = None;
        self.state = FacetState::Empty;
    }
}
