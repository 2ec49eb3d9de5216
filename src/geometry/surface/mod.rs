mod plane;
mod sphere;

pub use plane::PlanePatch;
pub use sphere::Sphere;

use crate::error::Result;
use crate::math::{Point3, Vector3};

/// Rectangular `(u, v)` parameter range of a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl SurfaceDomain {
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    #[must_use]
    pub fn u_span(&self) -> f64 {
        self.u_max - self.u_min
    }

    #[must_use]
    pub fn v_span(&self) -> f64 {
        self.v_max - self.v_min
    }

    /// Returns whether all four bounds are finite.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        [self.u_min, self.u_max, self.v_min, self.v_max]
            .iter()
            .all(|x| x.is_finite())
    }

    /// Maps grid cell corner `(iu, iv)` of an `n_u` by `n_v` grid to parameters.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn grid_point(&self, iu: usize, iv: usize, n_u: usize, n_v: usize) -> (f64, f64) {
        (
            self.u_min + self.u_span() * iu as f64 / n_u as f64,
            self.v_min + self.v_span() * iv as f64 / n_v as f64,
        )
    }
}

/// A parametric surface patch that can be meshed.
pub trait Surface {
    /// Returns the point at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Bounded patches fail when `(u, v)` lies outside [`domain`](Self::domain).
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3>;

    /// Returns the unit normal at `(u, v)`.
    ///
    /// # Errors
    ///
    /// Fails outside the domain or where the normal is undefined.
    fn normal(&self, u: f64, v: f64) -> Result<Vector3>;

    fn domain(&self) -> SurfaceDomain;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_point_hits_domain_corners() {
        let d = SurfaceDomain::new(-1.0, 1.0, 2.0, 6.0);
        assert_eq!(d.grid_point(0, 0, 4, 2), (-1.0, 2.0));
        assert_eq!(d.grid_point(4, 2, 4, 2), (1.0, 6.0));
        assert_eq!(d.grid_point(2, 1, 4, 2), (0.0, 4.0));
    }

    #[test]
    fn unbounded_domain_is_detected() {
        assert!(SurfaceDomain::new(0.0, 1.0, 0.0, 1.0).is_bounded());
        assert!(!SurfaceDomain::new(0.0, f64::INFINITY, 0.0, 1.0).is_bounded());
    }
}
