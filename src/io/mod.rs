//! Reading and writing scene objects.
//!
//! Two formats are supported. [`FormatKind::Native`] is a record-framed
//! text stream decoded one record at a time, so a bad record only costs
//! its own slot. [`FormatKind::Exchange`] is a single JSON document
//! decoded as a whole.

pub mod exchange;
mod header;
pub mod native;

pub use exchange::ExchangeFormat;
pub use header::{ObjectHeader, MAJOR_VERSION, MINOR_VERSION};
pub use native::NativeRecords;

use std::io::{Read, Write};

use crate::artifact::Color;
use crate::error::DecodeError;
use crate::geometry::GeomObject;

/// The supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Native,
    Exchange,
}

impl FormatKind {
    /// Picks a format from a file extension (`gsn` or `json`, any case).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "gsn" => Some(Self::Native),
            "json" => Some(Self::Exchange),
            _ => None,
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Native => "gsn",
            Self::Exchange => "json",
        }
    }
}

/// One decoded record: an object, or `None` if the record was unreadable.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub object: Option<GeomObject>,
    pub color: Option<Color>,
}

impl Record {
    #[must_use]
    pub fn absent(color: Option<Color>) -> Self {
        Self { object: None, color }
    }
}

/// The result of decoding a whole stream: objects with their color overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBatch {
    pub objects: Vec<GeomObject>,
    pub colors: Vec<Option<Color>>,
}

/// A decoder that turns a complete stream into one batch.
pub trait BatchDecoder {
    /// Decodes all objects in `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream as a whole cannot be decoded.
    fn decode(&self, reader: &mut dyn Read) -> Result<DecodedBatch, DecodeError>;
}

/// Writes `entries` to `w` in the given format.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn encode(kind: FormatKind, w: &mut dyn Write, entries: &[(&GeomObject, Option<Color>)]) -> std::io::Result<()> {
    match kind {
        FormatKind::Native => {
            for &(object, color) in entries {
                native::write_record(w, object, color)?;
            }
            Ok(())
        }
        FormatKind::Exchange => exchange::encode(w, entries),
    }
}
