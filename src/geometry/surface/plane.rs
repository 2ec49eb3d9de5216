use crate::error::{GeometryError, Result};
use crate::geometry::BoundingBox;
use crate::math::{unit, Point3, Vector3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// A rectangular patch of a plane.
///
/// Defined by an origin point, two orthogonal direction vectors
/// (`u_dir`, `v_dir`) and a parameter rectangle. The normal is `u_dir x v_dir`.
///
/// Points are `origin + u * u_dir + v * v_dir` over the patch domain.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanePatch {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
    domain: SurfaceDomain,
}

impl PlanePatch {
    /// Creates a new patch from an origin, two directions and a parameter rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vectors are zero-length, not
    /// perpendicular, or the parameter rectangle is empty.
    pub fn new(
        origin: Point3,
        u_dir: Vector3,
        v_dir: Vector3,
        domain: SurfaceDomain,
    ) -> Result<Self> {
        let u_dir = unit(u_dir)?;
        let v_dir = unit(v_dir)?;
        if u_dir.dot(&v_dir).abs() > TOLERANCE {
            return Err(
                GeometryError::Degenerate("plane directions must be perpendicular".into()).into(),
            );
        }
        let normal = u_dir.cross(&v_dir);

        let spans = [domain.u_span(), domain.v_span()];
        if spans.iter().any(|s| s.is_nan() || *s <= TOLERANCE) {
            return Err(GeometryError::Degenerate("plane patch has no area".into()).into());
        }

        Ok(Self {
            origin,
            u_dir,
            v_dir,
            normal,
            domain,
        })
    }

    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Unit normal, `u_dir x v_dir`.
    #[must_use]
    pub fn plane_normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the area of the patch.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.domain.u_span() * self.domain.v_span()
    }

    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.origin + self.u_dir * u + self.v_dir * v
    }

    /// Returns the bounding box of the four corners.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let d = self.domain;
        let mut bbox = BoundingBox::new(self.point_at(d.u_min, d.v_min), self.point_at(d.u_max, d.v_max));
        bbox.include(&self.point_at(d.u_max, d.v_min));
        bbox.include(&self.point_at(d.u_min, d.v_max));
        bbox
    }
}

impl Surface for PlanePatch {
    fn evaluate(&self, u: f64, v: f64) -> Result<Point3> {
        let d = self.domain;
        if u < d.u_min - TOLERANCE || u > d.u_max + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "u",
                value: u,
                min: d.u_min,
                max: d.u_max,
            }
            .into());
        }
        if v < d.v_min - TOLERANCE || v > d.v_max + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "v",
                value: v,
                min: d.v_min,
                max: d.v_max,
            }
            .into());
        }
        Ok(self.point_at(u, v))
    }

    fn normal(&self, _u: f64, _v: f64) -> Result<Vector3> {
        Ok(self.normal)
    }

    fn domain(&self) -> SurfaceDomain {
        self.domain
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn unit_square() -> PlanePatch {
        PlanePatch::new(
            Point3::origin(),
            Vector3::x(),
            Vector3::y(),
            SurfaceDomain::new(0.0, 1.0, 0.0, 1.0),
        )
        .unwrap()
    }

    #[test]
    fn normal_is_z() {
        let n = unit_square().normal(0.5, 0.5).unwrap();
        assert!((n - Vector3::z()).norm() < TOLERANCE);
    }

    #[test]
    fn evaluate_outside_rectangle_fails() {
        assert!(unit_square().evaluate(2.0, 0.5).is_err());
    }

    #[test]
    fn rejects_parallel_directions() {
        let res = PlanePatch::new(
            Point3::origin(),
            Vector3::x(),
            Vector3::x() * 2.0,
            SurfaceDomain::new(0.0, 1.0, 0.0, 1.0),
        );
        assert!(res.is_err());
    }

    #[test]
    fn rejects_empty_rectangle() {
        let res = PlanePatch::new(
            Point3::origin(),
            Vector3::x(),
            Vector3::y(),
            SurfaceDomain::new(0.0, 0.0, 0.0, 1.0),
        );
        assert!(res.is_err());
    }

    #[test]
    fn tilted_patch_box_covers_corners() {
        let patch = PlanePatch::new(
            Point3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::y(),
            SurfaceDomain::new(-1.0, 1.0, 0.0, 2.0),
        )
        .unwrap();
        let b = patch.bounding_box();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((b.min - Point3::new(1.0 - h, 0.0, -h)).norm() < 1e-9);
        assert!((b.max - Point3::new(1.0 + h, 2.0, h)).norm() < 1e-9);
        assert!((patch.area() - 4.0).abs() < TOLERANCE);
    }
}
