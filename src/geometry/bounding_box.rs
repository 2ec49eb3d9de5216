use crate::error::GeometryError;
use crate::math::{Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl BoundingBox {
    /// Creates a box from two corners, ordering each axis.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Creates the smallest box containing every point.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty or any coordinate is not finite.
    pub fn from_points<'a, I>(points: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut bbox: Option<Self> = None;
        for p in points {
            if !p.iter().all(|c| c.is_finite()) {
                return Err(GeometryError::InvalidData(
                    "non-finite coordinate in bounding box".into(),
                ));
            }
            match bbox.as_mut() {
                Some(b) => b.include(p),
                None => bbox = Some(Self::new(*p, *p)),
            }
        }
        bbox.ok_or_else(|| GeometryError::InvalidData("no points to bound".into()))
    }

    /// Grows the box so it contains `p`.
    pub fn include(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Grows the box so it contains `other`.
    pub fn add_union_with(&mut self, other: &Self) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// Returns the union of two boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.add_union_with(other);
        out
    }

    /// Returns whether `p` lies inside the box, within `tol`.
    #[must_use]
    pub fn contains(&self, p: &Point3, tol: f64) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] - tol && p[i] <= self.max[i] + tol)
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the edge lengths of the box.
    #[must_use]
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn new_orders_corners() {
        let b = BoundingBox::new(p(1.0, -1.0, 5.0), p(0.0, 2.0, 3.0));
        assert_eq!(b.min, p(0.0, -1.0, 3.0));
        assert_eq!(b.max, p(1.0, 2.0, 5.0));
    }

    #[test]
    fn union_is_symmetric() {
        let a = BoundingBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let b = BoundingBox::new(p(-2.0, 0.5, 0.5), p(0.5, 3.0, 0.7));
        assert_eq!(a.union(&b), b.union(&a));
        assert_eq!(a.union(&b).min, p(-2.0, 0.0, 0.0));
        assert_eq!(a.union(&b).max, p(1.0, 3.0, 1.0));
    }

    #[test]
    fn from_points_rejects_empty() {
        let empty: Vec<Point3> = Vec::new();
        assert!(BoundingBox::from_points(&empty).is_err());
    }

    #[test]
    fn from_points_rejects_nan() {
        let pts = [p(0.0, 0.0, 0.0), p(f64::NAN, 1.0, 1.0)];
        assert!(BoundingBox::from_points(&pts).is_err());
    }

    #[test]
    fn center_and_extent() {
        let b = BoundingBox::new(p(0.0, 0.0, 0.0), p(2.0, 4.0, 6.0));
        assert_relative_eq!(b.center(), p(1.0, 2.0, 3.0));
        assert_relative_eq!(b.extent(), Vector3::new(2.0, 4.0, 6.0));
        assert!(b.contains(&p(2.0, 4.0, 6.0), 0.0));
        assert!(!b.contains(&p(2.1, 4.0, 6.0), 0.0));
    }
}
