mod tessellate_curve;
mod tessellate_surface;

pub use tessellate_curve::TessellateCurve;
pub use tessellate_surface::TessellateSurface;

use crate::error::{Result, TessellationError};
use crate::geometry::GeomObject;
use crate::math::{Point2, Point3, Vector3};

/// Quality knobs for [`tessellate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationParams {
    /// Maximum chord height allowed on curved geometry.
    pub tolerance: f64,
    /// Minimum number of segments for curved parameter ranges.
    pub min_segments: usize,
    /// Maximum number of segments for curved parameter ranges.
    pub max_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            min_segments: 4,
            max_segments: 256,
        }
    }
}

impl TessellationParams {
    /// Checks that the parameters describe a usable tessellation.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not positive or the segment
    /// bounds are empty.
    pub fn validate(&self) -> Result<()> {
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(TessellationError::InvalidParameters(format!(
                "tolerance {} must be positive",
                self.tolerance
            ))
            .into());
        }
        if self.min_segments == 0 || self.min_segments > self.max_segments {
            return Err(TessellationError::InvalidParameters(format!(
                "segment range {}..={} is empty",
                self.min_segments, self.max_segments
            ))
            .into());
        }
        Ok(())
    }

    /// Computes the number of chords needed to keep an arc of `radius`
    /// sweeping `sweep` radians within tolerance.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn angular_segments(&self, radius: f64, sweep: f64) -> usize {
        if radius > self.tolerance {
            let half_angle = (1.0 - self.tolerance / radius).acos();
            let computed = (sweep.abs() / (2.0 * half_angle)).ceil() as usize;
            computed.clamp(self.min_segments, self.max_segments)
        } else {
            self.min_segments
        }
    }
}

/// Sampled points along a curve, in parameter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// Sampled points.
    pub points: Vec<Point3>,
}

/// Indexed triangles over a surface's parameter grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Counter-clockwise vertex triples.
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Returns the number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

/// Renderable approximation of one geometric object.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Tessellation {
    /// Nothing to draw; stands in when derivation failed.
    #[default]
    Noop,
    Polyline(Polyline),
    Mesh(TriangleMesh),
    Points(Vec<Point3>),
}

impl Tessellation {
    /// Returns whether this is the no-op placeholder.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }

    /// Returns the number of vertices produced.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Noop => 0,
            Self::Polyline(p) => p.points.len(),
            Self::Mesh(m) => m.vertices.len(),
            Self::Points(p) => p.len(),
        }
    }
}

/// Tessellates any supported object with the given parameters.
///
/// # Errors
///
/// Returns an error if the parameters are invalid, the object is not
/// three-dimensional, or evaluating the geometry fails.
pub fn tessellate(object: &GeomObject, params: TessellationParams) -> Result<Tessellation> {
    params.validate()?;
    match object {
        GeomObject::LineSegment(segment) => {
            Ok(Tessellation::Polyline(TessellateCurve::new(segment, 1).execute()?))
        }
        GeomObject::CircularArc(arc) => {
            let (start, end) = arc.angles();
            let n = params.angular_segments(arc.radius(), end - start);
            Ok(Tessellation::Polyline(TessellateCurve::new(arc, n).execute()?))
        }
        GeomObject::PlanePatch(patch) => {
            Ok(Tessellation::Mesh(TessellateSurface::new(patch, 1, 1).execute()?))
        }
        GeomObject::Sphere(sphere) => {
            let n_u = params.angular_segments(sphere.radius(), std::f64::consts::TAU);
            let n_v = params.angular_segments(sphere.radius(), std::f64::consts::PI);
            Ok(Tessellation::Mesh(TessellateSurface::new(sphere, n_u, n_v).execute()?))
        }
        GeomObject::PointCloud(cloud) => {
            if cloud.is_empty() {
                return Err(TessellationError::Failed("point cloud has no points".into()).into());
            }
            Ok(Tessellation::Points(cloud.points()?))
        }
    }
}
