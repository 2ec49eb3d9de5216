use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{GeometryError, Result};
use crate::geometry::BoundingBox;
use crate::math::{unit, Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// A closed sphere, parametrized by longitude `u` in `[0, 2pi]` (zero at
/// `ref_dir`) and latitude `v` in `[-pi/2, pi/2]` (poles on `axis`).
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
}

impl Sphere {
    /// # Errors
    ///
    /// Fails on a non-positive radius, a zero `axis`, or a `ref_dir` that
    /// is not on the equator.
    pub fn new(center: Point3, radius: f64, axis: Vector3, ref_dir: Vector3) -> Result<Self> {
        if radius.is_nan() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!("sphere radius {radius} is not positive")).into());
        }
        let axis = unit(axis)?;
        let ref_dir = unit(ref_dir)?;
        if axis.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "sphere reference direction is off the equator".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
        })
    }

    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the axis direction (north pole, unit vector).
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Returns the reference direction (u=0 on equator).
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }

    /// Returns the surface area `4 * pi * r^2`.
    #[must_use]
    pub fn area(&self) -> f64 {
        4.0 * PI * self.radius * self.radius
    }

    /// Returns the box `center +/- radius`.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let r = Vector3::repeat(self.radius);
        BoundingBox::new(self.center - r, self.center + r)
    }

    /// Unit direction from the center towards `(u, v)`.
    fn direction(&self, u: f64, v: f64) -> Vector3 {
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_v, cos_v) = v.sin_cos();
        let east = self.axis.cross(&self.ref_dir);
        (self.ref_dir * cos_u + east * sin_u) * cos_v + self.axis * sin_v
    }
}

impl Surface for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        Ok(self.center + self.direction(u, v) * self.radius)
    }

    fn normal(&self, u: f64, v: f64) -> Result<Vector3> {
        Ok(unit(self.direction(u, v))?)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(0.0, TAU, -FRAC_PI_2, FRAC_PI_2)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x()).unwrap()
    }

    #[test]
    fn evaluate_north_pole() {
        let p = unit_sphere().evaluate(0.0, FRAC_PI_2).unwrap();
        assert!((p - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-9);
    }

    #[test]
    fn normal_points_outward() {
        let s = Sphere::new(Point3::new(1.0, 2.0, 3.0), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let n = s.normal(0.0, 0.0).unwrap();
        assert!((n - Vector3::x()).norm() < TOLERANCE);
    }

    #[test]
    fn invalid_radius() {
        assert!(Sphere::new(Point3::origin(), 0.0, Vector3::z(), Vector3::x()).is_err());
    }

    #[test]
    fn box_is_center_plus_minus_radius() {
        let s = Sphere::new(Point3::new(1.0, 2.0, 3.0), 2.0, Vector3::z(), Vector3::x()).unwrap();
        let b = s.bounding_box();
        assert_eq!(b.min, Point3::new(-1.0, 0.0, 1.0));
        assert_eq!(b.max, Point3::new(3.0, 4.0, 5.0));
    }
}
