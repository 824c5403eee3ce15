mod tessellate_polygon;

pub use tessellate_polygon::TessellatePolygon;

use crate::math::{Point3, Vector3};

/// An indexed triangle mesh.
///
/// Triangles are wound counter-clockwise when viewed from outside the solid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh from vertex positions and triangle indices.
    #[must_use]
    pub fn from_parts(vertices: Vec<Point3>, indices: Vec<[u32; 3]>) -> Self {
        Self { vertices, indices }
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Appends another mesh, offsetting its indices past this mesh's vertices.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(
            other
                .indices
                .iter()
                .map(|[a, b, c]| [a + base, b + base, c + base]),
        );
    }

    /// Concatenates meshes in order into a single mesh.
    #[must_use]
    pub fn concatenate<'a>(meshes: impl IntoIterator<Item = &'a TriangleMesh>) -> Self {
        let mut combined = Self::new();
        for mesh in meshes {
            combined.merge(mesh);
        }
        combined
    }

    /// Translates every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// The three corner positions of triangle `index`.
    #[must_use]
    pub fn triangle(&self, index: usize) -> [Point3; 3] {
        let [a, b, c] = self.indices[index];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for a mesh without vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for v in &self.vertices[1..] {
            min = min.inf(v);
            max = max.sup(v);
        }
        Some((min, max))
    }

    /// Signed enclosed volume (positive when triangles face outward).
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        (0..self.indices.len())
            .map(|i| {
                let [a, b, c] = self.triangle(i);
                a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
            })
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tetrahedron() -> TriangleMesh {
        TriangleMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [0, 3, 2]],
        )
    }

    #[test]
    fn merge_offsets_indices() {
        let mut mesh = tetrahedron();
        mesh.merge(&tetrahedron());
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 8);
        assert_eq!(mesh.indices[4], [4, 6, 5]);
    }

    #[test]
    fn signed_volume_of_outward_tetrahedron() {
        let volume = tetrahedron().signed_volume();
        assert!((volume - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn translate_moves_bounds() {
        let mut mesh = tetrahedron();
        mesh.translate(Vector3::new(0.0, 0.0, 3.0));
        let (min, max) = mesh.bounds().unwrap();
        assert!((min.z - 3.0).abs() < 1e-12);
        assert!((max.z - 4.0).abs() < 1e-12);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert!(TriangleMesh::new().bounds().is_none());
        assert!(TriangleMesh::new().is_empty());
    }
}
