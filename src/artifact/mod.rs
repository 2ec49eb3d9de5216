//! Per-object presentation artifacts.
//!
//! Every slot in the scene owns an [`ArtifactTriple`]: a tessellation, a
//! [`Paintable`] carrying presentation state, and an optional
//! [`PropertyDescriptor`]. Triples come from an [`ArtifactFactory`].

mod color;
mod paintable;
mod property;

pub use color::Color;
pub use paintable::Paintable;
pub use property::{Property, PropertyDescriptor, PropertyValue};

use std::sync::Arc;

use crate::error::{Result, SceneError};
use crate::geometry::GeomObject;
use crate::tessellation::{tessellate, Tessellation, TessellationParams};

/// The derived artifacts of one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactTriple {
    pub tessellation: Arc<Tessellation>,
    pub paintable: Paintable,
    pub properties: Option<PropertyDescriptor>,
}

impl ArtifactTriple {
    /// The stand-in for a slot whose derivation failed: a no-op
    /// tessellation, a paintable without mesh, and no properties.
    #[must_use]
    pub fn placeholder(color: Color, index: usize) -> Self {
        Self {
            tessellation: Arc::new(Tessellation::Noop),
            paintable: Paintable::placeholder(color, index),
            properties: None,
        }
    }

    /// Returns whether this triple is a derivation-failure placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.tessellation.is_noop() && !self.paintable.has_mesh()
    }
}

/// Produces the artifacts for one geometric object.
pub trait ArtifactFactory {
    /// Derives the triple for `object` at slot `index`, painted in `color`.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be tessellated or wrapped.
    fn derive(&self, object: &GeomObject, color: Color, index: usize) -> Result<ArtifactTriple>;
}

/// The built-in factory: tessellates with [`tessellate`] and describes the
/// object with [`PropertyDescriptor::for_object`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultArtifactFactory {
    params: TessellationParams,
}

impl DefaultArtifactFactory {
    /// Creates a factory using `params` for every tessellation.
    #[must_use]
    pub fn new(params: TessellationParams) -> Self {
        Self { params }
    }
}

impl ArtifactFactory for DefaultArtifactFactory {
    fn derive(&self, object: &GeomObject, color: Color, index: usize) -> Result<ArtifactTriple> {
        let tessellation = tessellate(object, self.params).map_err(|err| SceneError::ArtifactDerivation {
            index,
            reason: err.to_string(),
        })?;
        let tessellation = Arc::new(tessellation);
        Ok(ArtifactTriple {
            paintable: Paintable::new(Arc::clone(&tessellation), color, index),
            tessellation,
            properties: Some(PropertyDescriptor::for_object(object, index)),
        })
    }
}
