//! The exchange format: one JSON document holding every entity.
//!
//! ```json
//! {
//!   "format": "geoscene-exchange",
//!   "version": 1,
//!   "entities": [
//!     { "type": "line_segment", "color": [100.0, 0.0, 0.0], "data": [0, 0, 0, 1, 0, 0] }
//!   ]
//! }
//! ```
//!
//! Colors are RGB percentages. `data` is the object's canonical parameter
//! list, see [`GeomObject::to_params`].

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::artifact::Color;
use crate::error::{DecodeError, SceneError};
use crate::geometry::{GeomObject, TypeTag};

use super::{BatchDecoder, DecodedBatch};

/// Value of the document's `format` field.
pub const FORMAT_NAME: &str = "geoscene-exchange";
/// Highest document version understood.
pub const VERSION: u32 = 1;

/// Entities are decoded one at a time, after the header checks.
#[derive(Debug, Serialize, Deserialize)]
struct ExchangeDocument<E> {
    format: String,
    version: u32,
    #[serde(default)]
    entities: Vec<E>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ExchangeEntity {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<[f64; 3]>,
    data: Vec<f64>,
}

impl ExchangeEntity {
    fn decode(value: serde_json::Value) -> Result<(GeomObject, Option<Color>), SceneError> {
        let entity: Self = serde_json::from_value(value).map_err(DecodeError::from)?;
        let tag = TypeTag::from_name(&entity.kind).ok_or_else(|| DecodeError::UnknownType(entity.kind.clone()))?;
        let object = GeomObject::from_params(tag, &entity.data)?;
        Ok((object, entity.color.map(Color::from_percent_rgb)))
    }
}

/// Batch decoder for exchange documents.
///
/// A document that fails to parse, names another format, or carries a
/// newer version is rejected as a whole. Entities that do not describe a
/// valid object, including ones with the wrong shape, are dropped and the
/// rest of the document is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExchangeFormat;

impl BatchDecoder for ExchangeFormat {
    fn decode(&self, reader: &mut dyn Read) -> Result<DecodedBatch, DecodeError> {
        let doc: ExchangeDocument<serde_json::Value> = serde_json::from_reader(reader)?;
        if doc.format != FORMAT_NAME {
            return Err(DecodeError::WrongFormat {
                expected: FORMAT_NAME,
                found: doc.format,
            });
        }
        if doc.version == 0 || doc.version > VERSION {
            return Err(DecodeError::UnsupportedVersion {
                format: FORMAT_NAME,
                version: doc.version,
            });
        }

        let entities = doc.entities.len();
        let mut batch = DecodedBatch::default();
        for (i, value) in doc.entities.into_iter().enumerate() {
            match ExchangeEntity::decode(value) {
                Ok((object, color)) => {
                    batch.objects.push(object);
                    batch.colors.push(color);
                }
                Err(err) => tracing::warn!(entity = i, %err, "skipping entity"),
            }
        }
        tracing::debug!(
            entities,
            decoded = batch.objects.len(),
            "exchange document decoded"
        );
        Ok(batch)
    }
}

/// Writes `entries` as one exchange document.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn encode(w: &mut dyn Write, entries: &[(&GeomObject, Option<Color>)]) -> std::io::Result<()> {
    let doc = ExchangeDocument {
        format: FORMAT_NAME.to_owned(),
        version: VERSION,
        entities: entries
            .iter()
            .map(|&(object, color)| ExchangeEntity {
                kind: object.type_tag().name().to_owned(),
                color: color.map(Color::to_percent_rgb),
                data: object.to_params(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *w, &doc)?;
    w.write_all(b"\n")
}
