use crate::error::{Result, TessellationError};
use crate::geometry::Curve;

use super::Polyline;

/// Samples a bounded curve into a polyline with evenly spaced parameters.
pub struct TessellateCurve<'a> {
    curve: &'a dyn Curve,
    segments: usize,
}

impl<'a> TessellateCurve<'a> {
    /// Creates a new `TessellateCurve` operation producing `segments` chords.
    #[must_use]
    pub fn new(curve: &'a dyn Curve, segments: usize) -> Self {
        Self { curve, segments }
    }

    /// Executes the tessellation, returning `segments + 1` points.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is unbounded, `segments` is zero, or
    /// evaluating the curve fails.
    pub fn execute(&self) -> Result<Polyline> {
        let domain = self.curve.domain();
        if !domain.t_min.is_finite() || !domain.t_max.is_finite() {
            return Err(TessellationError::Failed("curve domain is unbounded".into()).into());
        }
        if self.segments == 0 {
            return Err(TessellationError::InvalidParameters("zero curve segments".into()).into());
        }

        let mut points = Vec::with_capacity(self.segments + 1);
        for i in 0..=self.segments {
            #[allow(clippy::cast_precision_loss)]
            let frac = i as f64 / self.segments as f64;
            points.push(self.curve.evaluate(domain.t_min + frac * domain.span())?);
        }
        Ok(Polyline { points })
    }
}
