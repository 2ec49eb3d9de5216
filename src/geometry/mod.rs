//! Geometric objects held by the scene.
//!
//! [`GeomObject`] is a closed set of object kinds. Every kind can report
//! its dimension and bounding box, and flattens to a canonical parameter
//! list that both file formats build on.

pub mod bounding_box;
pub mod curve;
pub mod point_cloud;
pub mod surface;

pub use bounding_box::BoundingBox;
pub use curve::{CircularArc, Curve, CurveDomain, LineSegment};
pub use point_cloud::PointCloud;
pub use surface::{PlanePatch, Sphere, Surface, SurfaceDomain};

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

/// Stable type tag of a geometric object, used when re-serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    LineSegment,
    CircularArc,
    PlanePatch,
    Sphere,
    PointCloud,
}

impl TypeTag {
    /// All tags, in code order.
    pub const ALL: [Self; 5] = [
        Self::LineSegment,
        Self::CircularArc,
        Self::PlanePatch,
        Self::Sphere,
        Self::PointCloud,
    ];

    /// Numeric code written in native-format headers.
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            Self::LineSegment => 110,
            Self::CircularArc => 120,
            Self::PlanePatch => 210,
            Self::Sphere => 220,
            Self::PointCloud => 400,
        }
    }

    /// Looks up a tag by its numeric code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Looks up a tag by its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Human-readable name, identical to the serialized form.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::LineSegment => "line_segment",
            Self::CircularArc => "circular_arc",
            Self::PlanePatch => "plane_patch",
            Self::Sphere => "sphere",
            Self::PointCloud => "point_cloud",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A geometric entity stored in the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum GeomObject {
    LineSegment(LineSegment),
    CircularArc(CircularArc),
    PlanePatch(PlanePatch),
    Sphere(Sphere),
    PointCloud(PointCloud),
}

impl GeomObject {
    /// Returns the dimension of the space the object lives in.
    #[must_use]
    pub fn dimension(&self) -> usize {
        match self {
            Self::PointCloud(cloud) => cloud.dimension(),
            _ => 3,
        }
    }

    /// Returns the object's type tag.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::LineSegment(_) => TypeTag::LineSegment,
            Self::CircularArc(_) => TypeTag::CircularArc,
            Self::PlanePatch(_) => TypeTag::PlanePatch,
            Self::Sphere(_) => TypeTag::Sphere,
            Self::PointCloud(_) => TypeTag::PointCloud,
        }
    }

    /// Computes the object's axis-aligned bounding box.
    ///
    /// # Errors
    ///
    /// Returns an error if the object has no well-defined box (an empty,
    /// non-3D or non-finite point cloud).
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        match self {
            Self::LineSegment(s) => Ok(s.bounding_box()),
            Self::CircularArc(a) => Ok(a.bounding_box()),
            Self::PlanePatch(p) => Ok(p.bounding_box()),
            Self::Sphere(s) => Ok(s.bounding_box()),
            Self::PointCloud(c) => c.bounding_box(),
        }
    }

    /// Returns the object as a parametric curve, if it is one.
    #[must_use]
    pub fn as_curve(&self) -> Option<&dyn Curve> {
        match self {
            Self::LineSegment(s) => Some(s),
            Self::CircularArc(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the object as a parametric surface, if it is one.
    #[must_use]
    pub fn as_surface(&self) -> Option<&dyn Surface> {
        match self {
            Self::PlanePatch(p) => Some(p),
            Self::Sphere(s) => Some(s),
            _ => None,
        }
    }

    /// Flattens the object into its canonical parameter list.
    ///
    /// Layouts:
    /// - line segment: `start(3) end(3)`
    /// - circular arc: `center(3) radius normal(3) ref_dir(3) start_angle end_angle`
    /// - plane patch: `origin(3) u_dir(3) v_dir(3) u_min u_max v_min v_max`
    /// - sphere: `center(3) radius axis(3) ref_dir(3)`
    /// - point cloud: `dimension coords...`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_params(&self) -> Vec<f64> {
        let mut out = Vec::new();
        match self {
            Self::LineSegment(s) => {
                out.extend(s.start().iter());
                out.extend(s.end().iter());
            }
            Self::CircularArc(a) => {
                let (start, end) = a.angles();
                out.extend(a.center().iter());
                out.push(a.radius());
                out.extend(a.normal().iter());
                out.extend(a.ref_dir().iter());
                out.extend([start, end]);
            }
            Self::PlanePatch(p) => {
                let d = p.domain();
                out.extend(p.origin().iter());
                out.extend(p.u_dir().iter());
                out.extend(p.v_dir().iter());
                out.extend([d.u_min, d.u_max, d.v_min, d.v_max]);
            }
            Self::Sphere(s) => {
                out.extend(s.center().iter());
                out.push(s.radius());
                out.extend(s.axis().iter());
                out.extend(s.ref_dir().iter());
            }
            Self::PointCloud(c) => {
                out.push(c.dimension() as f64);
                out.extend_from_slice(c.coords());
            }
        }
        out
    }

    /// Rebuilds an object from its tag and canonical parameter list.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter count does not match the layout
    /// of `tag` or the parameters describe invalid geometry.
    pub fn from_params(tag: TypeTag, params: &[f64]) -> Result<Self> {
        let mut p = ParamReader::new(tag, params);
        let object: Self = match tag {
            TypeTag::LineSegment => {
                p.expect_len(6)?;
                LineSegment::new(p.point(), p.point())?.into()
            }
            TypeTag::CircularArc => {
                p.expect_len(12)?;
                CircularArc::new(p.point(), p.scalar(), p.vector(), p.vector(), p.scalar(), p.scalar())?
                    .into()
            }
            TypeTag::PlanePatch => {
                p.expect_len(13)?;
                let (origin, u_dir, v_dir) = (p.point(), p.vector(), p.vector());
                let domain = SurfaceDomain::new(p.scalar(), p.scalar(), p.scalar(), p.scalar());
                PlanePatch::new(origin, u_dir, v_dir, domain)?.into()
            }
            TypeTag::Sphere => {
                p.expect_len(10)?;
                Sphere::new(p.point(), p.scalar(), p.vector(), p.vector())?.into()
            }
            TypeTag::PointCloud => {
                let (&dim, coords) = params.split_first().ok_or_else(|| {
                    GeometryError::InvalidData("point cloud is missing its dimension".into())
                })?;
                if dim.fract() != 0.0 || !(1.0..=f64::from(u16::MAX)).contains(&dim) {
                    return Err(GeometryError::InvalidData(format!(
                        "point cloud dimension {dim} is not a positive integer"
                    ))
                    .into());
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let dim = dim as usize;
                PointCloud::new(dim, coords.to_vec())?.into()
            }
        };
        Ok(object)
    }

    /// Writes the object body in native text form: its parameter list on one line.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write(&self, w: &mut dyn Write) -> std::io::Result<()> {
        let params = self.to_params();
        for (i, value) in params.iter().enumerate() {
            if i > 0 {
                w.write_all(b" ")?;
            }
            write!(w, "{value}")?;
        }
        Ok(())
    }
}

impl From<LineSegment> for GeomObject {
    fn from(value: LineSegment) -> Self {
        Self::LineSegment(value)
    }
}

impl From<CircularArc> for GeomObject {
    fn from(value: CircularArc) -> Self {
        Self::CircularArc(value)
    }
}

impl From<PlanePatch> for GeomObject {
    fn from(value: PlanePatch) -> Self {
        Self::PlanePatch(value)
    }
}

impl From<Sphere> for GeomObject {
    fn from(value: Sphere) -> Self {
        Self::Sphere(value)
    }
}

impl From<PointCloud> for GeomObject {
    fn from(value: PointCloud) -> Self {
        Self::PointCloud(value)
    }
}

/// Sequential reader over a fixed-layout parameter list.
struct ParamReader<'a> {
    tag: TypeTag,
    values: &'a [f64],
    pos: usize,
}

impl<'a> ParamReader<'a> {
    fn new(tag: TypeTag, values: &'a [f64]) -> Self {
        Self { tag, values, pos: 0 }
    }

    fn expect_len(&self, len: usize) -> Result<()> {
        if self.values.len() != len {
            return Err(GeometryError::InvalidData(format!(
                "{} expects {len} parameters, got {}",
                self.tag,
                self.values.len()
            ))
            .into());
        }
        Ok(())
    }

    fn scalar(&mut self) -> f64 {
        let v = self.values[self.pos];
        self.pos += 1;
        v
    }

    fn point(&mut self) -> Point3 {
        Point3::new(self.scalar(), self.scalar(), self.scalar())
    }

    fn vector(&mut self) -> Vector3 {
        Vector3::new(self.scalar(), self.scalar(), self.scalar())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn arc() -> GeomObject {
        CircularArc::new(Point3::new(1.0, 0.0, 0.0), 2.0, Vector3::z(), Vector3::x(), 0.0, 1.5)
            .unwrap()
            .into()
    }

    #[test]
    fn tag_codes_and_names_are_unique() {
        for a in TypeTag::ALL {
            assert_eq!(TypeTag::from_code(a.code()), Some(a));
        }
        assert_eq!(TypeTag::from_code(999), None);
        for tag in TypeTag::ALL {
            assert_eq!(TypeTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(TypeTag::from_name("nurbs"), None);
    }

    #[test]
    fn tag_name_matches_serde() {
        for tag in TypeTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.name()));
        }
    }

    #[test]
    fn params_rebuild_arc() {
        let obj = arc();
        let rebuilt = GeomObject::from_params(TypeTag::CircularArc, &obj.to_params()).unwrap();
        assert_eq!(rebuilt, obj);
    }

    #[test]
    fn wrong_parameter_count_is_rejected() {
        let err = GeomObject::from_params(TypeTag::Sphere, &[0.0, 0.0, 0.0, 1.0]).unwrap_err();
        assert!(err.to_string().contains("sphere expects 10 parameters"));
    }

    #[test]
    fn point_cloud_dimension_is_data() {
        let obj = GeomObject::from_params(TypeTag::PointCloud, &[2.0, 0.0, 0.0, 1.0, 1.0]).unwrap();
        assert_eq!(obj.dimension(), 2);
        assert!(GeomObject::from_params(TypeTag::PointCloud, &[2.5, 0.0]).is_err());
        assert!(GeomObject::from_params(TypeTag::PointCloud, &[]).is_err());
    }

    #[test]
    fn write_emits_one_line_of_params() {
        let obj: GeomObject = LineSegment::new(Point3::origin(), Point3::new(1.5, 0.0, -2.0))
            .unwrap()
            .into();
        let mut buf = Vec::new();
        obj.write(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0 0 0 1.5 0 -2");
    }

    #[test]
    fn only_curves_and_surfaces_expose_parametrizations() {
        assert!(arc().as_curve().is_some());
        assert!(arc().as_surface().is_none());
        let cloud: GeomObject = PointCloud::from_points(&[Point3::origin()]).into();
        assert!(cloud.as_curve().is_none() && cloud.as_surface().is_none());
    }
}
