use crate::error::{OperationError, Result};
use crate::math::{Point3, TOLERANCE};
use crate::tessellation::TriangleMesh;

/// Outward-wound triangles over the corner layout produced by [`MakeCuboid`].
const CUBOID_FACES: [[u32; 3]; 12] = [
    [0, 2, 1],
    [0, 3, 2],
    [4, 5, 6],
    [4, 6, 7],
    [0, 1, 5],
    [0, 5, 4],
    [1, 2, 6],
    [1, 6, 5],
    [2, 3, 7],
    [2, 7, 6],
    [3, 0, 4],
    [3, 4, 7],
];

/// Creates an axis-aligned cuboid mesh from two corner points.
///
/// The mesh has 8 vertices (bottom ring then top ring, each counter-clockwise
/// seen from above) and 12 outward-facing triangles.
pub struct MakeCuboid {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeCuboid {
    /// Creates a new `MakeCuboid` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the cuboid has no extent
    /// along any axis.
    pub fn execute(&self) -> Result<TriangleMesh> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        if hi.x - lo.x < TOLERANCE || hi.y - lo.y < TOLERANCE || hi.z - lo.z < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "degenerate cuboid from {lo} to {hi}"
            ))
            .into());
        }

        let vertices = [lo.z, hi.z]
            .into_iter()
            .flat_map(|z| {
                [
                    Point3::new(lo.x, lo.y, z),
                    Point3::new(hi.x, lo.y, z),
                    Point3::new(hi.x, hi.y, z),
                    Point3::new(lo.x, hi.y, z),
                ]
            })
            .collect();

        Ok(TriangleMesh::from_parts(vertices, CUBOID_FACES.to_vec()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::MeshAdjacency;

    #[test]
    fn unit_cube() {
        let mesh = MakeCuboid::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
            .execute()
            .unwrap();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(MeshAdjacency::build(&mesh.indices).is_manifold());
    }

    #[test]
    fn faces_point_outward() {
        let mesh = MakeCuboid::new(Point3::new(1.0, 2.0, 3.0), Point3::new(3.0, 5.0, 4.0))
            .execute()
            .unwrap();
        assert!((mesh.signed_volume() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn flat_cuboid_is_rejected() {
        let result = MakeCuboid::new(Point3::origin(), Point3::new(1.0, 1.0, 0.0)).execute();
        assert!(result.is_err());
    }
}
