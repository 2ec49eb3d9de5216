//! The native text format: a stream of header + body records.
//!
//! ```text
//! 110 1 0 4 255 0 0 255
//! 0 0 0 1 0 0
//! 220 1 0 0
//! 0 0 0 2 0 0 1 1 0 0
//! ```
//!
//! Each record is a header line followed by one body line holding the
//! object's parameter list. Blank lines between records are ignored.

use std::io::{BufRead, Write};

use crate::artifact::Color;
use crate::error::{DecodeError, GeometryError, Result, SceneError};
use crate::geometry::GeomObject;

use super::{ObjectHeader, Record};

/// Streaming reader over native-format records.
///
/// Yields one [`Record`] per header found. A record that cannot be decoded
/// is yielded with no object so the caller can keep an absent slot for it;
/// reading then continues with the next record. A line that is not valid
/// UTF-8 spoils only its own record. The stream ends at end of input, or at
/// the first I/O error.
pub struct NativeRecords<R> {
    reader: R,
    line: usize,
    done: bool,
}

impl<R: BufRead> NativeRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            done: false,
        }
    }

    /// Reads the next line, without its terminator. `None` at end of input
    /// or after an I/O error; a line that is not UTF-8 comes back as `Err`.
    fn read_line(&mut self) -> Option<std::result::Result<String, DecodeError>> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                self.line += 1;
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                Some(String::from_utf8(buf).map_err(|_| DecodeError::Encoding { line: self.line }))
            }
            Err(err) => {
                let err = DecodeError::Io(err);
                tracing::warn!(line = self.line + 1, %err, "keeping records read so far");
                self.done = true;
                None
            }
        }
    }

    fn decode_body(&self, header: &ObjectHeader, body: &str) -> Result<GeomObject> {
        let params = body
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|_| DecodeError::Body {
                    line: self.line,
                    reason: format!("`{field}` is not a number"),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let object = GeomObject::from_params(header.tag, &params)?;
        if object.dimension() != 3 {
            return Err(GeometryError::InvalidData(format!(
                "dimension must be 3, got {}",
                object.dimension()
            ))
            .into());
        }
        Ok(object)
    }
}

impl<R: BufRead> Iterator for NativeRecords<R> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.done {
            return None;
        }
        let header_text = loop {
            match self.read_line()? {
                Ok(text) if text.trim().is_empty() => {}
                text => break text,
            }
        };
        let header_line = self.line;

        let header = header_text.and_then(|text| ObjectHeader::parse(&text, header_line));
        // The body line belongs to this record even when the header is bad.
        let Some(body) = self.read_line() else {
            tracing::warn!(line = header_line, "record header without body");
            return Some(Record::absent(header.ok().and_then(|h| h.color())));
        };

        let header = match header {
            Ok(header) => header,
            Err(err) => {
                tracing::warn!(line = header_line, %err, "skipping record with bad header");
                return Some(Record::absent(None));
            }
        };
        let color = header.color();
        match body.map_err(SceneError::from).and_then(|body| self.decode_body(&header, &body)) {
            Ok(object) => Some(Record {
                object: Some(object),
                color,
            }),
            Err(err) => {
                tracing::warn!(line = self.line, tag = %header.tag, %err, "failed reading object");
                Some(Record::absent(color))
            }
        }
    }
}

/// Writes one native record: header line, then body line.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_record(w: &mut dyn Write, object: &GeomObject, color: Option<Color>) -> std::io::Result<()> {
    ObjectHeader::new(object.type_tag(), color).write(w)?;
    w.write_all(b"\n")?;
    object.write(w)?;
    w.write_all(b"\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{LineSegment, TypeTag};
    use crate::math::Point3;

    fn records(text: &str) -> Vec<Record> {
        NativeRecords::new(text.as_bytes()).collect()
    }

    #[test]
    fn reads_records_with_colors() {
        let recs = records("110 1 0 4 255 0 0 255\n0 0 0 1 0 0\n\n220 1 0 0\n0 0 0 2 0 0 1 1 0 0\n");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].object.as_ref().unwrap().type_tag(), TypeTag::LineSegment);
        assert_eq!(recs[0].color, Some(Color::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(recs[1].object.as_ref().unwrap().type_tag(), TypeTag::Sphere);
        assert_eq!(recs[1].color, None);
    }

    #[test]
    fn bad_body_becomes_absent_record() {
        let recs = records("110 1 0 0\n0 0 zero 1 0 0\n110 1 0 0\n0 0 0 1 0 0\n");
        assert_eq!(recs.len(), 2);
        assert!(recs[0].object.is_none());
        assert!(recs[1].object.is_some());
    }

    #[test]
    fn bad_header_becomes_absent_record() {
        let recs = records("999 1 0 0\n1 2 3\n110 1 0 0\n0 0 0 1 0 0\n");
        assert_eq!(recs.len(), 2);
        assert!(recs[0].object.is_none());
        assert!(recs[1].object.is_some());
    }

    #[test]
    fn non_utf8_line_spoils_only_its_record() {
        let bytes: &[u8] = b"110 1 0 0\n0 0 0 1 0 0\n110 1 0 0\n0 0 \xff 1 0 0\n\xfe\n1 2 3\n110 1 0 0\n0 1 0 1 1 0\n";
        let recs: Vec<Record> = NativeRecords::new(bytes).collect();
        assert_eq!(recs.len(), 4);
        assert!(recs[0].object.is_some());
        assert!(recs[1].object.is_none());
        assert!(recs[2].object.is_none());
        assert!(recs[3].object.is_some());
    }

    #[test]
    fn io_error_ends_stream_keeping_earlier_records() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk gone"))
            }
        }
        let reader = std::io::BufReader::new(std::io::Read::chain(&b"110 1 0 0\n0 0 0 1 0 0\n"[..], Broken));
        let mut stream = NativeRecords::new(reader);
        assert!(stream.next().unwrap().object.is_some());
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn planar_point_cloud_is_rejected_per_record() {
        let recs = records("400 1 0 0\n2 0 0 1 1\n");
        assert_eq!(recs.len(), 1);
        assert!(recs[0].object.is_none());
    }

    #[test]
    fn trailing_header_without_body() {
        let recs = records("110 1 0 0\n0 0 0 1 0 0\n110 1 0 4 0 0 255 255\n");
        assert_eq!(recs.len(), 2);
        assert!(recs[1].object.is_none());
        assert_eq!(recs[1].color, Some(Color::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn empty_stream_has_no_records() {
        assert!(records("").is_empty());
        assert!(records("\n\n  \n").is_empty());
    }

    #[test]
    fn written_record_reads_back() {
        let obj: GeomObject = LineSegment::new(Point3::new(0.1, 0.2, 0.3), Point3::new(-4.0, 5.5, 1e-7))
            .unwrap()
            .into();
        let mut buf = Vec::new();
        write_record(&mut buf, &obj, Some(Color::from_rgba8([1, 2, 3, 4]))).unwrap();
        let recs: Vec<Record> = NativeRecords::new(buf.as_slice()).collect();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].object.as_ref(), Some(&obj));
        assert_eq!(recs[0].color, Some(Color::from_rgba8([1, 2, 3, 4])));
    }
}
