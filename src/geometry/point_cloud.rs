use crate::error::{GeometryError, Result};
use crate::geometry::BoundingBox;
use crate::math::Point3;

/// A set of points stored as a flat coordinate list.
///
/// Unlike the analytic kinds, a point cloud carries its own dimension, so
/// lower- or higher-dimensional data can be represented (and rejected by
/// the scene, which only accepts 3D objects).
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    dimension: usize,
    coords: Vec<f64>,
}

impl PointCloud {
    /// Creates a point cloud of `dimension`-tuples.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimension` is zero or `coords` is not a whole
    /// number of points.
    pub fn new(dimension: usize, coords: Vec<f64>) -> Result<Self> {
        if dimension == 0 {
            return Err(GeometryError::InvalidData("point cloud dimension is zero".into()).into());
        }
        if coords.len() % dimension != 0 {
            return Err(GeometryError::InvalidData(format!(
                "{} coordinates do not form {dimension}-tuples",
                coords.len()
            ))
            .into());
        }
        Ok(Self { dimension, coords })
    }

    /// Creates a 3D point cloud from points.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Self {
        Self {
            dimension: 3,
            coords: points.iter().flat_map(|p| [p.x, p.y, p.z]).collect(),
        }
    }

    /// Returns the dimension of each point.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len() / self.dimension
    }

    /// Returns whether the cloud has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Returns the raw coordinate list.
    #[must_use]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Returns the points of a 3D cloud.
    ///
    /// # Errors
    ///
    /// Returns an error if the cloud is not three-dimensional.
    pub fn points(&self) -> Result<Vec<Point3>> {
        if self.dimension != 3 {
            return Err(GeometryError::InvalidData(format!(
                "{}D point cloud has no 3D points",
                self.dimension
            ))
            .into());
        }
        Ok(self
            .coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect())
    }

    /// Computes the bounding box of the points.
    ///
    /// # Errors
    ///
    /// Returns an error if the cloud is not 3D, is empty, or holds a
    /// non-finite coordinate.
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        Ok(BoundingBox::from_points(&self.points()?)?)
    }
}
