use std::ops::Range;
use std::sync::Arc;

use crate::artifact::{ArtifactFactory, ArtifactTriple, Color, Paintable, PropertyDescriptor};
use crate::geometry::GeomObject;

/// The index-aligned per-slot sequences of a scene.
///
/// Holds, for every slot: the object (absent after a failed decode or an
/// interior deletion), its color override, its derived artifacts, and
/// whether its paintable is in the render set. All four sequences have
/// the same length whenever control is outside a method of this type.
#[derive(Debug, Default)]
pub struct DerivedArtifactCache {
    objects: Vec<Option<Arc<GeomObject>>>,
    colors: Vec<Option<Color>>,
    artifacts: Vec<Option<ArtifactTriple>>,
    rendered: Vec<bool>,
}

impl DerivedArtifactCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of slots, present or absent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns whether all per-slot sequences have the same length.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        let n = self.objects.len();
        self.colors.len() == n && self.artifacts.len() == n && self.rendered.len() == n
    }

    /// Returns the object sequence, with `None` for absent slots.
    #[must_use]
    pub fn objects(&self) -> &[Option<Arc<GeomObject>>] {
        &self.objects
    }

    /// Returns the object at `index` if the slot is present.
    #[must_use]
    pub fn object(&self, index: usize) -> Option<&Arc<GeomObject>> {
        self.objects.get(index)?.as_ref()
    }

    /// Returns the color override at `index`.
    #[must_use]
    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied().flatten()
    }

    /// Returns the artifacts at `index`; `None` for cleared or out-of-range slots.
    #[must_use]
    pub fn artifacts(&self, index: usize) -> Option<&ArtifactTriple> {
        self.artifacts.get(index)?.as_ref()
    }

    #[must_use]
    pub fn paintable(&self, index: usize) -> Option<&Paintable> {
        self.artifacts(index).map(|a| &a.paintable)
    }

    pub fn paintable_mut(&mut self, index: usize) -> Option<&mut Paintable> {
        self.artifacts.get_mut(index)?.as_mut().map(|a| &mut a.paintable)
    }

    /// Returns the editable property descriptor at `index`, if one was derived.
    pub fn properties_mut(&mut self, index: usize) -> Option<&mut PropertyDescriptor> {
        self.artifacts.get_mut(index)?.as_mut()?.properties.as_mut()
    }

    /// Returns the paintables of the render set, in index order.
    pub fn render_list(&self) -> impl Iterator<Item = &Paintable> {
        self.artifacts
            .iter()
            .zip(&self.rendered)
            .filter(|(_, rendered)| **rendered)
            .filter_map(|(a, _)| a.as_ref().map(|a| &a.paintable))
    }

    /// Appends slots and derives artifacts for exactly the new range.
    ///
    /// Derivation never fails as a whole: an absent object or a factory
    /// error leaves a placeholder triple in that slot.
    pub fn append<I>(
        &mut self,
        entries: I,
        factory: &dyn ArtifactFactory,
        default_color: Color,
    ) -> Range<usize>
    where
        I: IntoIterator<Item = (Option<Arc<GeomObject>>, Option<Color>)>,
    {
        let start = self.len();
        for (object, color) in entries {
            self.objects.push(object);
            self.colors.push(color);
        }
        let range = start..self.len();
        for index in range.clone() {
            self.derive_slot(index, factory, default_color);
        }
        debug_assert!(self.is_aligned());
        range
    }

    fn derive_slot(&mut self, index: usize, factory: &dyn ArtifactFactory, default_color: Color) {
        let color = self.colors[index].unwrap_or(default_color);
        let derived = match &self.objects[index] {
            Some(object) => factory.derive(object, color, index),
            None => {
                tracing::warn!(index, "object missing, using placeholder artifacts");
                Ok(ArtifactTriple::placeholder(color, index))
            }
        };
        let triple = derived.unwrap_or_else(|err| {
            tracing::warn!(index, %err, "artifact derivation failed, using placeholder");
            ArtifactTriple::placeholder(color, index)
        });
        self.rendered.push(triple.paintable.has_mesh());
        self.artifacts.push(Some(triple));
    }

    /// Deletes slot `index`.
    ///
    /// The last slot is removed whether or not it holds an object. Any
    /// other slot is cleared in place so that the remaining indices keep
    /// their meaning. Either way, a run of absent slots left at the tail is
    /// then pruned. Returns `false`, and changes nothing, if `index` is out
    /// of range or names an absent interior slot.
    pub fn delete(&mut self, index: usize) -> bool {
        if index + 1 == self.len() {
            self.pop_tail();
        } else if self.object(index).is_some() {
            self.objects[index] = None;
            self.colors[index] = None;
            self.artifacts[index] = None;
            self.rendered[index] = false;
        } else {
            return false;
        }

        let mut pruned = 0;
        while matches!(self.objects.last(), Some(None)) {
            self.pop_tail();
            pruned += 1;
        }
        if pruned > 0 {
            tracing::debug!(pruned, "pruned trailing absent slots");
        }
        debug_assert!(self.is_aligned());
        true
    }

    fn pop_tail(&mut self) {
        self.objects.pop();
        self.colors.pop();
        self.artifacts.pop();
        self.rendered.pop();
    }

    /// Removes every slot.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.colors.clear();
        self.artifacts.clear();
        self.rendered.clear();
    }
}
