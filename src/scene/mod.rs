//! The in-memory scene repository.
//!
//! [`SceneManager`] owns an index-aligned store of geometric objects and
//! keeps derived presentation artifacts, the aggregate bounding box and
//! change notifications in sync with it. Indices are stable: deleting an
//! interior slot leaves an absent slot behind instead of shifting.

mod bounds;
mod cache;
mod observer;

pub use bounds::BoundingVolumeAggregator;
pub use cache::DerivedArtifactCache;
pub use observer::{ObserverId, ObserverRegistry, SceneObserver};

use std::io::{BufRead, Read, Write};
use std::rc::Rc;
use std::sync::Arc;

use crate::artifact::{
    ArtifactFactory, ArtifactTriple, Color, DefaultArtifactFactory, Paintable, PropertyDescriptor,
};
use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::geometry::{BoundingBox, GeomObject};
use crate::io::{self, BatchDecoder, ExchangeFormat, FormatKind, NativeRecords, Record};

/// Owns the objects of one scene and everything derived from them.
///
/// Every mutating operation that changes what an observer would see ends
/// with exactly one notification, unless updates are disabled.
pub struct SceneManager {
    config: SceneConfig,
    factory: Box<dyn ArtifactFactory>,
    cache: DerivedArtifactCache,
    bounds: BoundingVolumeAggregator,
    observers: ObserverRegistry,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneManager {
    /// Creates an empty scene with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Creates an empty scene using the built-in artifact factory.
    #[must_use]
    pub fn with_config(config: SceneConfig) -> Self {
        Self::with_factory(config, DefaultArtifactFactory::new(config.tessellation))
    }

    /// Creates an empty scene that derives artifacts with `factory`.
    #[must_use]
    pub fn with_factory(config: SceneConfig, factory: impl ArtifactFactory + 'static) -> Self {
        Self {
            config,
            factory: Box::new(factory),
            cache: DerivedArtifactCache::new(),
            bounds: BoundingVolumeAggregator::new(),
            observers: ObserverRegistry::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    // ── ingestion ──

    /// Appends `objects` with their color overrides.
    ///
    /// `colors` may be shorter than `objects`; missing entries mean "no
    /// override". Artifacts are derived for the new slots, the bounding box
    /// is recomputed and observers are notified once. Returns the number of
    /// objects added.
    ///
    /// # Errors
    ///
    /// Fails without changing the scene if any object is not
    /// three-dimensional, or if there are more colors than objects.
    pub fn ingest<I, O>(&mut self, objects: I, mut colors: Vec<Option<Color>>) -> Result<usize>
    where
        I: IntoIterator<Item = O>,
        O: Into<Arc<GeomObject>>,
    {
        let objects: Vec<Arc<GeomObject>> = objects.into_iter().map(Into::into).collect();
        if colors.len() > objects.len() {
            return Err(SceneError::LengthMismatch {
                objects: objects.len(),
                colors: colors.len(),
            });
        }
        if let Some((index, object)) = objects.iter().enumerate().find(|(_, o)| o.dimension() != 3) {
            return Err(SceneError::DimensionMismatch {
                index,
                dimension: object.dimension(),
            });
        }
        colors.resize(objects.len(), None);
        Ok(self.append(objects.into_iter().map(Some).zip(colors)))
    }

    /// Appends one slot per record, in order.
    ///
    /// A record without an object, or with an object that is not
    /// three-dimensional, becomes an absent slot. Returns the number of
    /// objects added; absent slots are not counted.
    pub fn ingest_records<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Record>,
    {
        let mut present = 0;
        let entries: Vec<_> = records
            .into_iter()
            .enumerate()
            .map(|(i, Record { object, color })| {
                let object = object.filter(|o| {
                    let ok = o.dimension() == 3;
                    if !ok {
                        tracing::warn!(record = i, dimension = o.dimension(), "dropping non-3D object");
                    }
                    ok
                });
                present += usize::from(object.is_some());
                (object.map(Arc::new), color)
            })
            .collect();
        let slots = self.append(entries);
        if slots > present {
            tracing::warn!(slots, present, "some records could not be read");
        }
        present
    }

    /// Decodes a whole stream with `decoder` and ingests the result.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the stream cannot be decoded, in which
    /// case nothing is ingested, or any error from [`ingest`](Self::ingest).
    pub fn ingest_batch(&mut self, decoder: &dyn BatchDecoder, reader: &mut dyn Read) -> Result<usize> {
        let batch = decoder.decode(reader).inspect_err(|err| {
            tracing::warn!(%err, "stream could not be decoded, nothing ingested");
        })?;
        self.ingest(batch.objects, batch.colors)
    }

    /// Reads objects in format `kind` from `reader`.
    ///
    /// # Errors
    ///
    /// Native streams never fail as a whole: unreadable records become
    /// absent slots and a read error ends the stream. Exchange documents
    /// fail as described for [`ingest_batch`](Self::ingest_batch).
    pub fn ingest_from_format<R: BufRead>(&mut self, kind: FormatKind, mut reader: R) -> Result<usize> {
        match kind {
            FormatKind::Native => Ok(self.ingest_records(NativeRecords::new(reader))),
            FormatKind::Exchange => self.ingest_batch(&ExchangeFormat, &mut reader),
        }
    }

    fn append<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (Option<Arc<GeomObject>>, Option<Color>)>,
    {
        let range = self
            .cache
            .append(entries, self.factory.as_ref(), self.config.default_color);
        self.bounds.recompute(self.cache.objects());
        tracing::debug!(start = range.start, added = range.len(), len = self.len(), "ingested");
        self.observers.notify();
        range.len()
    }

    // ── deletion ──

    /// Deletes the object at `index`.
    ///
    /// Deleting the last slot shrinks the scene, even when that slot is
    /// absent. Deleting any other slot leaves it absent. Absent slots that
    /// end up at the tail are dropped in both cases. The bounding box is not
    /// recomputed. Returns `false`, without notifying, if `index` is out of
    /// range or names an absent interior slot.
    pub fn delete_object(&mut self, index: usize) -> bool {
        if !self.cache.delete(index) {
            tracing::trace!(index, len = self.len(), "delete of absent slot ignored");
            return false;
        }
        tracing::debug!(index, len = self.len(), "object deleted");
        self.observers.notify();
        true
    }

    /// Removes every slot.
    ///
    /// The bounding box keeps its last value and observers are not
    /// notified; callers clearing as part of a larger change notify once
    /// when done.
    pub fn clear(&mut self) {
        self.cache.clear();
        tracing::debug!("scene cleared");
    }

    // ── selection and visibility ──

    /// Sets the selection state of slot `index`.
    ///
    /// Notifies only if the state actually changed, and returns whether it
    /// did. Absent and out-of-range slots are ignored.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        self.update_paintable(index, |p| {
            let changed = p.selected() != selected;
            p.set_selected(selected);
            changed
        })
    }

    /// Sets the visibility of slot `index`; same rules as [`set_selected`](Self::set_selected).
    pub fn set_visible(&mut self, index: usize, visible: bool) -> bool {
        self.update_paintable(index, |p| {
            let changed = p.visible() != visible;
            p.set_visible(visible);
            changed
        })
    }

    fn update_paintable(&mut self, index: usize, apply: impl FnOnce(&mut Paintable) -> bool) -> bool {
        if self.cache.object(index).is_none() {
            return false;
        }
        let changed = self.cache.paintable_mut(index).is_some_and(apply);
        if changed {
            self.observers.notify();
        }
        changed
    }

    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.paintable(index).is_some_and(Paintable::selected)
    }

    /// Returns whether slot `index` is visible; `false` for absent slots.
    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.cache.object(index).is_some() && self.paintable(index).is_some_and(Paintable::visible)
    }

    /// Returns the indices of present, selected slots in ascending order.
    #[must_use]
    pub fn selected_indices(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| self.cache.object(i).is_some() && self.is_selected(i))
            .collect()
    }

    /// Returns shared handles to the selected objects, in index order.
    #[must_use]
    pub fn extract_selected(&self) -> Vec<Arc<GeomObject>> {
        self.selected_indices()
            .into_iter()
            .filter_map(|i| self.object(i))
            .collect()
    }

    /// Writes the selected objects and their color overrides in format `kind`.
    ///
    /// Returns the number of objects written.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn export_selected(&self, kind: FormatKind, w: &mut dyn Write) -> Result<usize> {
        let selected: Vec<(Arc<GeomObject>, Option<Color>)> = self
            .selected_indices()
            .into_iter()
            .filter_map(|i| Some((self.object(i)?, self.color(i))))
            .collect();
        let entries: Vec<(&GeomObject, Option<Color>)> =
            selected.iter().map(|(o, c)| (o.as_ref(), *c)).collect();
        io::encode(kind, w, &entries)?;
        tracing::debug!(?kind, count = entries.len(), "selection exported");
        Ok(entries.len())
    }

    // ── bounds ──

    /// Returns the aggregate bounding box from the last recompute.
    ///
    /// `None` until some object could be bounded. May be a stale superset
    /// after deletions.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds.current()
    }

    /// Computes the union box of the present objects at `indices`.
    #[must_use]
    pub fn bounding_box_of(&self, indices: &[usize]) -> Option<BoundingBox> {
        BoundingVolumeAggregator::subset(self.cache.objects(), indices)
    }

    // ── observers ──

    pub fn register_observer<O: SceneObserver + 'static>(&mut self, observer: &Rc<O>) -> ObserverId {
        self.observers.register(observer)
    }

    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// Enables or suspends notifications. Re-enabling does not notify by itself.
    pub fn set_updates_enabled(&mut self, enabled: bool) {
        self.observers.set_enabled(enabled);
    }

    #[must_use]
    pub fn updates_enabled(&self) -> bool {
        self.observers.enabled()
    }

    /// Notifies all observers now, unless updates are disabled.
    pub fn notify(&mut self) -> usize {
        self.observers.notify()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ── accessors ──

    /// Returns the number of slots, including absent ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns a shared handle to the object at `index`, if present.
    #[must_use]
    pub fn object(&self, index: usize) -> Option<Arc<GeomObject>> {
        self.cache.object(index).cloned()
    }

    /// Like [`object`](Self::object), for callers that treat a missing slot as an error.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Index`] if the slot is absent or out of range.
    pub fn get(&self, index: usize) -> Result<Arc<GeomObject>> {
        self.object(index).ok_or(SceneError::Index {
            index,
            len: self.len(),
        })
    }

    #[must_use]
    pub fn color(&self, index: usize) -> Option<Color> {
        self.cache.color(index)
    }

    #[must_use]
    pub fn artifacts(&self, index: usize) -> Option<&ArtifactTriple> {
        self.cache.artifacts(index)
    }

    #[must_use]
    pub fn paintable(&self, index: usize) -> Option<&Paintable> {
        self.cache.paintable(index)
    }

    #[must_use]
    pub fn property_descriptor(&self, index: usize) -> Option<&PropertyDescriptor> {
        self.artifacts(index)?.properties.as_ref()
    }

    /// Returns the property descriptor at `index` for editing.
    pub fn property_descriptor_mut(&mut self, index: usize) -> Option<&mut PropertyDescriptor> {
        self.cache.properties_mut(index)
    }

    /// Returns the paintables that carry a mesh, in index order.
    pub fn render_list(&self) -> impl Iterator<Item = &Paintable> {
        self.cache.render_list()
    }

    /// Returns the render set restricted to visible paintables.
    pub fn visible_paintables(&self) -> impl Iterator<Item = &Paintable> {
        self.render_list().filter(|p| p.visible())
    }

    #[must_use]
    pub fn cache(&self) -> &DerivedArtifactCache {
        &self.cache
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::artifact::PropertyValue;
    use crate::geometry::{LineSegment, PointCloud, Sphere};
    use crate::math::{Point3, Vector3};
    use std::cell::Cell;

    #[derive(Default)]
    struct Counter(Cell<usize>);

    impl SceneObserver for Counter {
        fn observed_changed(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    impl Counter {
        fn hits(&self) -> usize {
            self.0.get()
        }
    }

    struct FailAt(usize);

    impl ArtifactFactory for FailAt {
        fn derive(&self, object: &GeomObject, color: Color, index: usize) -> Result<ArtifactTriple> {
            if index == self.0 {
                return Err(SceneError::ArtifactDerivation {
                    index,
                    reason: "refused".into(),
                });
            }
            DefaultArtifactFactory::default().derive(object, color, index)
        }
    }

    fn seg(x: f64) -> GeomObject {
        LineSegment::new(Point3::new(x, 0.0, 0.0), Point3::new(x, 1.0, 0.0))
            .unwrap()
            .into()
    }

    fn sphere(x: f64) -> GeomObject {
        Sphere::new(Point3::new(x, 0.0, 0.0), 1.0, Vector3::z(), Vector3::x())
            .unwrap()
            .into()
    }

    #[allow(clippy::cast_precision_loss)]
    fn scene_of(n: usize) -> SceneManager {
        let mut scene = SceneManager::new();
        scene.ingest((0..n).map(|i| seg(i as f64)), Vec::new()).unwrap();
        scene
    }

    fn observed(scene: &mut SceneManager) -> Rc<Counter> {
        let counter = Rc::new(Counter::default());
        scene.register_observer(&counter);
        counter
    }

    fn assert_aligned(scene: &SceneManager) {
        assert!(scene.cache().is_aligned());
    }

    // ── ingestion ──

    #[test]
    fn ingest_appends_and_notifies_once() {
        let mut scene = scene_of(2);
        let counter = observed(&mut scene);
        let added = scene.ingest([seg(5.0), sphere(0.0), seg(6.0)], vec![Some(Color::RED)]).unwrap();
        assert_eq!(added, 3);
        assert_eq!(scene.len(), 5);
        assert_eq!(counter.hits(), 1);
        assert_eq!(scene.color(2), Some(Color::RED));
        assert_eq!(scene.color(3), None);
        assert_eq!(scene.paintable(3).unwrap().color(), Color::BLUE);
        assert_eq!(scene.render_list().count(), 5);
        assert_aligned(&scene);
    }

    #[test]
    fn empty_ingest_still_notifies() {
        let mut scene = SceneManager::new();
        let counter = observed(&mut scene);
        assert_eq!(scene.ingest(Vec::<GeomObject>::new(), Vec::new()).unwrap(), 0);
        assert_eq!(counter.hits(), 1);
    }

    #[test]
    fn non_3d_object_rejects_whole_batch() {
        let mut scene = scene_of(1);
        let counter = observed(&mut scene);
        let flat: GeomObject = PointCloud::new(2, vec![0.0, 0.0, 1.0, 1.0]).unwrap().into();
        let err = scene.ingest([seg(1.0), flat], Vec::new()).unwrap_err();
        assert!(matches!(err, SceneError::DimensionMismatch { index: 1, dimension: 2 }));
        assert_eq!(scene.len(), 1);
        assert_eq!(counter.hits(), 0);
    }

    #[test]
    fn too_many_colors_rejects_batch() {
        let mut scene = SceneManager::new();
        let err = scene.ingest([seg(0.0)], vec![None, Some(Color::RED)]).unwrap_err();
        assert!(matches!(err, SceneError::LengthMismatch { objects: 1, colors: 2 }));
        assert!(scene.is_empty());
        assert!(scene.bounding_box().is_none());
    }

    #[test]
    fn failed_derivation_keeps_slot_as_placeholder() {
        let mut scene = SceneManager::with_factory(SceneConfig::default(), FailAt(1));
        assert_eq!(scene.ingest([seg(0.0), seg(1.0), seg(2.0)], Vec::new()).unwrap(), 3);
        assert_eq!(scene.len(), 3);
        assert!(scene.artifacts(1).unwrap().is_placeholder());
        assert!(scene.property_descriptor(1).is_none());
        assert!(!scene.is_selected(1));
        assert_eq!(scene.render_list().count(), 2);

        scene.set_selected(0, true);
        assert_eq!(scene.extract_selected().len(), 1);
        assert!(scene.set_selected(1, true));
        let selected = scene.extract_selected();
        assert_eq!(selected.len(), 2);
        assert_eq!(*selected[1], seg(1.0));
        assert_aligned(&scene);
    }

    #[test]
    fn native_stream_keeps_bad_records_as_absent_slots() {
        let text = "110 1 0 0\n0 0 0 1 0 0\n110 1 0 0\n0 0 0 0 0 0\n220 1 0 4 255 0 0 255\n0 0 0 1 0 0 1 1 0 0\n";
        let mut scene = SceneManager::new();
        let counter = observed(&mut scene);
        let added = scene.ingest_from_format(FormatKind::Native, text.as_bytes()).unwrap();
        assert_eq!(added, 2);
        assert_eq!(scene.len(), 3);
        assert!(scene.object(1).is_none());
        assert!(scene.artifacts(1).unwrap().is_placeholder());
        assert_eq!(scene.color(2), Some(Color::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(counter.hits(), 1);
        assert_aligned(&scene);
    }

    #[test]
    fn non_utf8_record_does_not_end_native_stream() {
        let bytes: &[u8] = b"110 1 0 0\n0 0 0 1 0 0\n110 1 0 0\n0 0 \xff 1 0 0\n110 1 0 0\n0 1 0 1 1 0\n";
        let mut scene = SceneManager::new();
        let added = scene.ingest_from_format(FormatKind::Native, bytes).unwrap();
        assert_eq!(added, 2);
        assert_eq!(scene.len(), 3);
        assert!(scene.object(1).is_none());
        assert!(scene.object(2).is_some());
    }

    #[test]
    fn stream_ending_in_bad_record_can_be_deleted_away() {
        let text = "110 1 0 0\n0 0 0 1 0 0\n110 1 0 0\nbad body\n";
        let mut scene = SceneManager::new();
        scene.ingest_from_format(FormatKind::Native, text.as_bytes()).unwrap();
        assert_eq!(scene.len(), 2);
        let counter = observed(&mut scene);

        assert!(scene.delete_object(1));
        assert_eq!(scene.len(), 1);
        assert!(scene.delete_object(0));
        assert!(scene.is_empty());
        assert_eq!(counter.hits(), 2);
        assert_aligned(&scene);
    }

    #[test]
    fn interior_delete_drops_absent_tail() {
        let text = "110 1 0 0\n0 0 0 1 0 0\n110 1 0 0\n0 1 0 1 1 0\n110 1 0 0\nbad body\n";
        let mut scene = SceneManager::new();
        scene.ingest_from_format(FormatKind::Native, text.as_bytes()).unwrap();
        assert_eq!(scene.len(), 3);

        assert!(scene.delete_object(1));
        assert_eq!(scene.len(), 1);
        assert!(scene.delete_object(0));
        assert!(scene.is_empty());
        assert_aligned(&scene);
    }

    #[test]
    fn undecodable_exchange_document_ingests_nothing() {
        let mut scene = scene_of(1);
        let counter = observed(&mut scene);
        let err = scene
            .ingest_from_format(FormatKind::Exchange, &b"[1, 2"[..])
            .unwrap_err();
        assert!(matches!(err, SceneError::Decode(_)));
        assert_eq!(scene.len(), 1);
        assert_eq!(counter.hits(), 0);
    }

    // ── deletion ──

    #[test]
    fn delete_last_then_first_empties_scene() {
        let mut scene = scene_of(2);
        let counter = observed(&mut scene);
        assert!(scene.delete_object(1));
        assert_eq!(scene.len(), 1);
        assert!(scene.delete_object(0));
        assert!(scene.is_empty());
        assert!(!scene.delete_object(0));
        assert_eq!(counter.hits(), 2);
        assert_aligned(&scene);
    }

    #[test]
    fn interior_delete_keeps_other_indices() {
        let mut scene = scene_of(4);
        let third = scene.object(2).unwrap();
        let counter = observed(&mut scene);
        assert!(scene.delete_object(1));
        assert_eq!(counter.hits(), 1);
        assert_eq!(scene.len(), 4);
        assert!(scene.object(1).is_none());
        assert!(Arc::ptr_eq(&scene.object(2).unwrap(), &third));
        assert!(!scene.set_selected(1, true));
        assert!(!scene.is_visible(1));
        assert!(matches!(scene.get(1), Err(SceneError::Index { index: 1, len: 4 })));
        assert!(scene.get(2).is_ok());
        assert_eq!(scene.render_list().count(), 3);

        // Removing the tail also drops the absent slot in front of it.
        assert!(scene.delete_object(3));
        assert!(scene.delete_object(2));
        assert_eq!(scene.len(), 1);
        assert_aligned(&scene);
    }

    #[test]
    fn bounding_box_is_stale_after_delete() {
        let mut scene = SceneManager::new();
        scene.ingest([seg(0.0), sphere(10.0)], Vec::new()).unwrap();
        let before = scene.bounding_box().unwrap();
        assert!(scene.delete_object(1));
        assert_eq!(scene.bounding_box(), Some(before));
        assert_eq!(scene.bounding_box_of(&[0, 1]).unwrap().max.x, 0.0);
    }

    #[test]
    fn clear_keeps_box_and_does_not_notify() {
        let mut scene = scene_of(3);
        let counter = observed(&mut scene);
        let before = scene.bounding_box();
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.bounding_box(), before);
        assert_eq!(counter.hits(), 0);
    }

    // ── selection and visibility ──

    #[test]
    fn redundant_selection_notifies_once() {
        let mut scene = scene_of(3);
        let counter = observed(&mut scene);
        assert!(scene.set_selected(2, true));
        assert!(!scene.set_selected(2, true));
        assert_eq!(counter.hits(), 1);
        assert!(scene.is_selected(2));
        assert_eq!(scene.selected_indices(), vec![2]);
    }

    #[test]
    fn redundant_hide_notifies_once() {
        let mut scene = scene_of(2);
        let counter = observed(&mut scene);
        scene.set_visible(0, false);
        scene.set_visible(0, false);
        assert_eq!(counter.hits(), 1);
        assert!(!scene.is_visible(0));
        assert_eq!(scene.render_list().count(), 2);
        assert_eq!(scene.visible_paintables().count(), 1);
    }

    #[test]
    fn out_of_range_selection_is_inert() {
        let mut scene = scene_of(1);
        let counter = observed(&mut scene);
        assert!(!scene.set_selected(9, true));
        assert!(!scene.set_visible(9, false));
        assert!(!scene.is_selected(9));
        assert_eq!(counter.hits(), 0);
    }

    // ── bounds ──

    #[test]
    fn aggregate_box_ignores_insertion_order() {
        let mut ab = SceneManager::new();
        ab.ingest([seg(-3.0), sphere(4.0)], Vec::new()).unwrap();
        let mut ba = SceneManager::new();
        ba.ingest([sphere(4.0), seg(-3.0)], Vec::new()).unwrap();

        let expected = seg(-3.0)
            .bounding_box()
            .unwrap()
            .union(&sphere(4.0).bounding_box().unwrap());
        assert_eq!(ab.bounding_box(), Some(expected));
        assert_eq!(ba.bounding_box(), Some(expected));
    }

    // ── observers ──

    #[test]
    fn suspended_updates_coalesce_into_one_notification() {
        let mut scene = SceneManager::new();
        let counter = observed(&mut scene);
        scene.set_updates_enabled(false);
        scene.ingest([seg(0.0)], Vec::new()).unwrap();
        scene.ingest([seg(1.0)], Vec::new()).unwrap();
        scene.set_selected(0, true);
        scene.set_updates_enabled(true);
        assert_eq!(counter.hits(), 0);
        assert_eq!(scene.notify(), 1);
        assert_eq!(counter.hits(), 1);
    }

    #[test]
    fn unregistered_observer_is_not_called() {
        let mut scene = SceneManager::new();
        let counter = Rc::new(Counter::default());
        let id = scene.register_observer(&counter);
        assert_eq!(scene.observer_count(), 1);
        assert!(scene.unregister_observer(id));
        scene.ingest([seg(0.0)], Vec::new()).unwrap();
        assert_eq!(counter.hits(), 0);
        assert_eq!(scene.observer_count(), 0);
    }

    // ── export ──

    #[test]
    fn selection_round_trips_through_both_formats() {
        let mut scene = SceneManager::new();
        scene
            .ingest([seg(0.0), sphere(3.0), seg(7.0)], vec![None, None, Some(Color::RED)])
            .unwrap();
        scene.set_selected(0, true);
        scene.set_selected(2, true);

        for kind in [FormatKind::Native, FormatKind::Exchange] {
            let mut buf = Vec::new();
            assert_eq!(scene.export_selected(kind, &mut buf).unwrap(), 2);

            let mut copy = SceneManager::new();
            assert_eq!(copy.ingest_from_format(kind, buf.as_slice()).unwrap(), 2);
            assert_eq!(copy.len(), 2);
            assert!((0..2).all(|i| copy.object(i).unwrap().dimension() == 3));
            assert_eq!(*copy.object(1).unwrap(), seg(7.0));
            assert!(copy.color(1).is_some());
        }
    }

    #[test]
    fn property_edits_stay_in_descriptor() {
        let mut scene = scene_of(1);
        let descriptor = scene.property_descriptor_mut(0).unwrap();
        assert!(descriptor.set("length", PropertyValue::Scalar(9.0)));
        assert_eq!(
            scene.property_descriptor(0).unwrap().get("length"),
            Some(&PropertyValue::Scalar(9.0))
        );
        assert_eq!(*scene.object(0).unwrap(), seg(0.0));
    }
}
