use crate::error::{GeometryError, Result};
use crate::geometry::BoundingBox;
use crate::math::{Point3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A bounded straight line between two points.
///
/// The parametric form is: `P(t) = start + t * (end - start)`, `t` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    start: Point3,
    end: Point3,
}

impl LineSegment {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoints coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate("segment endpoints coincide".into()).into());
        }
        Ok(Self { start, end })
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Returns the bounding box of the two endpoints.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.start, self.end)
    }
}

impl Curve for LineSegment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        Ok(self.start + (self.end - self.start) * t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, 1.0)
    }
}
