use std::f64::consts::{PI, TAU};

use crate::error::{GeometryError, Result};
use crate::geometry::BoundingBox;
use crate::math::{unit, Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

/// Part of a circle, swept counter-clockwise about `normal` from
/// `start_angle` to `end_angle`. Angle zero points along `ref_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularArc {
    center: Point3,
    radius: f64,
    normal: Vector3,
    ref_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl CircularArc {
    /// Builds an arc; `normal` and `ref_dir` are normalized.
    ///
    /// # Errors
    ///
    /// Fails on a non-positive radius, a zero axis, an `ref_dir` that is
    /// not in the arc plane, or a sweep outside `(0, 2pi]`.
    pub fn new(
        center: Point3,
        radius: f64,
        normal: Vector3,
        ref_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if radius.is_nan() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!("arc radius {radius} is not positive")).into());
        }
        let normal = unit(normal)?;
        let ref_dir = unit(ref_dir)?;

        if normal.dot(&ref_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "arc reference direction leaves the arc plane".into(),
            )
            .into());
        }

        let sweep = end_angle - start_angle;
        if sweep.is_nan() || sweep < TOLERANCE || sweep > TAU + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "sweep",
                value: sweep,
                min: 0.0,
                max: TAU,
            }
            .into());
        }

        Ok(Self {
            center,
            radius,
            normal,
            ref_dir,
            start_angle,
            end_angle,
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

    /// Unit axis of the arc plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Returns the zero-angle reference direction.
    #[must_use]
    pub fn ref_dir(&self) -> &Vector3 {
        &self.ref_dir
    }

    /// Returns the `(start, end)` angles in radians.
    #[must_use]
    pub fn angles(&self) -> (f64, f64) {
        (self.start_angle, self.end_angle)
    }

    /// In-plane direction at angle `pi/2`.
    fn quarter_dir(&self) -> Vector3 {
        self.normal.cross(&self.ref_dir)
    }

    fn point_at(&self, t: f64) -> Point3 {
        let (sin, cos) = t.sin_cos();
        self.center + (self.ref_dir * cos + self.quarter_dir() * sin) * self.radius
    }

    /// Computes the exact bounding box of the swept arc.
    ///
    /// Besides the endpoints, each axis reaches an extreme where
    /// `ref_dir[i] * cos(t) + quarter[i] * sin(t)` is stationary; those
    /// angles are included when they fall inside the sweep.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::new(self.point_at(self.start_angle), self.point_at(self.end_angle));
        let quarter = self.quarter_dir();
        for axis in 0..3 {
            let base = quarter[axis].atan2(self.ref_dir[axis]);
            for candidate in [base, base + PI] {
                let turns = ((self.start_angle - candidate) / TAU).ceil();
                let t = candidate + turns * TAU;
                if t <= self.end_angle {
                    bbox.include(&self.point_at(t));
                }
            }
        }
        bbox
    }
}

impl Curve for CircularArc {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        Ok(self.point_at(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }
}
