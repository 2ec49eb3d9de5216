use std::io::Write;

use crate::artifact::Color;
use crate::error::DecodeError;
use crate::geometry::TypeTag;

/// Major version written into native headers.
pub const MAJOR_VERSION: u32 = 1;
/// Minor version written into native headers.
pub const MINOR_VERSION: u32 = 0;

/// The header line that precedes every native-format record.
///
/// Layout: `<type code> <major> <minor> <aux count> [aux...]`. Four aux
/// values are read as an 8-bit RGBA color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectHeader {
    pub tag: TypeTag,
    pub major: u32,
    pub minor: u32,
    pub auxdata: Vec<i64>,
}

impl ObjectHeader {
    /// Creates a current-version header, carrying `color` as aux data if given.
    #[must_use]
    pub fn new(tag: TypeTag, color: Option<Color>) -> Self {
        let auxdata = color
            .map(|c| c.to_rgba8().iter().map(|&b| i64::from(b)).collect())
            .unwrap_or_default();
        Self {
            tag,
            major: MAJOR_VERSION,
            minor: MINOR_VERSION,
            auxdata,
        }
    }

    /// Parses a header from one line of text; `line` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns an error on a missing or non-numeric field, an unknown type
    /// code, an unsupported major version, or an aux count that does not
    /// match the values present.
    pub fn parse(text: &str, line: usize) -> Result<Self, DecodeError> {
        let bad = |reason: String| DecodeError::Header { line, reason };
        let mut fields = text.split_whitespace();
        let mut next_u32 = |name: &str| -> Result<u32, DecodeError> {
            let field = fields.next().ok_or_else(|| bad(format!("missing {name}")))?;
            field
                .parse()
                .map_err(|_| bad(format!("{name} `{field}` is not a number")))
        };

        let code = next_u32("type code")?;
        let major = next_u32("major version")?;
        let minor = next_u32("minor version")?;
        let aux_count = next_u32("aux count")?;

        let tag = TypeTag::from_code(code).ok_or_else(|| DecodeError::UnknownType(code.to_string()))?;
        if major != MAJOR_VERSION {
            return Err(DecodeError::UnsupportedVersion {
                format: "native",
                version: major,
            });
        }

        let auxdata = fields
            .map(|f| f.parse::<i64>().map_err(|_| bad(format!("aux value `{f}` is not an integer"))))
            .collect::<Result<Vec<_>, _>>()?;
        if auxdata.len() != aux_count as usize {
            return Err(bad(format!(
                "aux count {aux_count} but {} values",
                auxdata.len()
            )));
        }

        Ok(Self {
            tag,
            major,
            minor,
            auxdata,
        })
    }

    /// Returns the color carried in the aux data, if there are exactly four values.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn color(&self) -> Option<Color> {
        let rgba: [i64; 4] = self.auxdata.as_slice().try_into().ok()?;
        Some(Color::from_rgba8(rgba.map(|v| v.clamp(0, 255) as u8)))
    }

    /// Writes the header (without trailing newline).
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write(&self, w: &mut dyn Write) -> std::io::Result<()> {
        write!(
            w,
            "{} {} {} {}",
            self.tag.code(),
            self.major,
            self.minor,
            self.auxdata.len()
        )?;
        for value in &self.auxdata {
            write!(w, " {value}")?;
        }
        Ok(())
    }
}
