/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Normalizes `v`, failing on a zero-length input.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`](crate::error::GeometryError::ZeroVector)
/// if `v` is shorter than [`TOLERANCE`].
pub fn unit(v: Vector3) -> Result<Vector3, crate::error::GeometryError> {
    let len = v.norm();
    if len < TOLERANCE {
        return Err(crate::error::GeometryError::ZeroVector);
    }
    Ok(v / len)
}
