use crate::error::{Result, TessellationError};
use crate::geometry::Surface;
use crate::math::{Point2, Vector3};

use super::TriangleMesh;

/// Tessellates a bounded parametric surface over a regular (u, v) grid.
pub struct TessellateSurface<'a> {
    surface: &'a dyn Surface,
    n_u: usize,
    n_v: usize,
}

impl<'a> TessellateSurface<'a> {
    /// Creates a new `TessellateSurface` operation with `n_u x n_v` cells.
    #[must_use]
    pub fn new(surface: &'a dyn Surface, n_u: usize, n_v: usize) -> Self {
        Self { surface, n_u, n_v }
    }

    /// Executes the tessellation.
    ///
    /// Emits a `(n_u + 1) x (n_v + 1)` vertex grid row by row,
    /// then splits each quad cell into two triangles. Degenerate normals
    /// (poles) fall back to `+Z`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, too large for `u32` indices,
    /// the domain is unbounded, or evaluating the surface fails.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let (n_u, n_v) = (self.n_u, self.n_v);
        if n_u == 0 || n_v == 0 {
            return Err(TessellationError::InvalidParameters("empty surface grid".into()).into());
        }
        let d = self.surface.domain();
        if !d.is_bounded() {
            return Err(TessellationError::Failed("surface domain is unbounded".into()).into());
        }

        let rows = n_v + 1;
        let cols = n_u + 1;
        if u32::try_from(rows * cols).is_err() {
            return Err(TessellationError::Failed("surface grid exceeds index range".into()).into());
        }

        let mut mesh = TriangleMesh::default();
        mesh.vertices.reserve(rows * cols);
        mesh.normals.reserve(rows * cols);
        mesh.uvs.reserve(rows * cols);
        mesh.indices.reserve(n_u * n_v * 2);

        for iv in 0..rows {
            for iu in 0..cols {
                let (u, v) = d.grid_point(iu, iv, n_u, n_v);
                mesh.vertices.push(self.surface.evaluate(u, v)?);
                mesh.normals.push(self.surface.normal(u, v).unwrap_or(Vector3::z()));
                mesh.uvs.push(Point2::new(u, v));
            }
        }

        for iv in 0..n_v {
            for iu in 0..n_u {
                let i00 = (iv * cols + iu) as u32;
                let i10 = (iv * cols + iu + 1) as u32;
                let i01 = ((iv + 1) * cols + iu) as u32;
                let i11 = ((iv + 1) * cols + iu + 1) as u32;
                mesh.indices.push([i00, i10, i11]);
                mesh.indices.push([i00, i11, i01]);
            }
        }

        Ok(mesh)
    }
}
