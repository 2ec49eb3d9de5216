use std::sync::Arc;

use crate::error::SceneError;
use crate::geometry::{BoundingBox, GeomObject};

/// Keeps the aggregate bounding box of a scene.
///
/// The aggregate is only refreshed by [`recompute`](Self::recompute). When
/// nothing can be bounded the previous box is kept, so after deletions the
/// aggregate may be a stale superset until the next recompute.
#[derive(Debug, Clone, Default)]
pub struct BoundingVolumeAggregator {
    bbox: Option<BoundingBox>,
}

impl BoundingVolumeAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last computed aggregate, or `None` if none was ever computed.
    #[must_use]
    pub fn current(&self) -> Option<BoundingBox> {
        self.bbox
    }

    /// Recomputes the aggregate over every present object.
    ///
    /// Absent slots are skipped, and so is any object whose own box fails.
    pub fn recompute(&mut self, objects: &[Option<Arc<GeomObject>>]) -> Option<BoundingBox> {
        let present = objects
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_deref().map(|obj| (i, obj)));
        if let Some(bbox) = union_of(present) {
            self.bbox = Some(bbox);
        }
        self.bbox
    }

    /// Computes the union box of the objects at `indices`.
    ///
    /// Out-of-range indices and absent slots are skipped silently.
    #[must_use]
    pub fn subset(objects: &[Option<Arc<GeomObject>>], indices: &[usize]) -> Option<BoundingBox> {
        let selected = indices.iter().filter_map(|&i| {
            objects
                .get(i)
                .and_then(|slot| slot.as_deref())
                .map(|obj| (i, obj))
        });
        union_of(selected)
    }
}

/// Seeds with the first object whose box can be computed, then unions the rest.
fn union_of<'a, I>(objects: I) -> Option<BoundingBox>
where
    I: Iterator<Item = (usize, &'a GeomObject)>,
{
    let mut acc: Option<BoundingBox> = None;
    for (index, object) in objects {
        match object.bounding_box() {
            Ok(bbox) => match acc.as_mut() {
                Some(a) => a.add_union_with(&bbox),
                None => acc = Some(bbox),
            },
            Err(err) => {
                let err = SceneError::Aggregation(format!("object {index}: {err}"));
                tracing::warn!(%err, "skipping object");
            }
        }
    }
    acc
}
