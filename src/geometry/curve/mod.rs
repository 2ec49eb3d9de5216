mod arc;
mod segment;

pub use arc::CircularArc;
pub use segment::LineSegment;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

/// Closed parameter interval `[t_min, t_max]` of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    pub t_min: f64,
    pub t_max: f64,
}

impl CurveDomain {
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Checks that `t` lies in the interval, give or take [`TOLERANCE`].
    pub(crate) fn check(&self, t: f64) -> Result<()> {
        if t.is_nan() || t < self.t_min - TOLERANCE || t > self.t_max + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into());
        }
        Ok(())
    }
}

/// A bounded parametric curve that can be sampled into a polyline.
pub trait Curve {
    /// Returns the point at parameter `t`.
    ///
    /// # Errors
    ///
    /// Fails when `t` lies outside [`domain`](Self::domain).
    fn evaluate(&self, t: f64) -> Result<Point3>;

    fn domain(&self) -> CurveDomain;
}
