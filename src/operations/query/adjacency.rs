use std::collections::HashMap;

/// Edge-to-face adjacency of an indexed triangle mesh.
///
/// Edges are stored undirected with the smaller vertex index first.
#[derive(Debug, Clone)]
pub struct MeshAdjacency {
    edge_to_faces: HashMap<(u32, u32), Vec<usize>>,
}

impl MeshAdjacency {
    /// Builds adjacency from triangle indices.
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edge_to_faces: HashMap<(u32, u32), Vec<usize>> = HashMap::new();
        for (face_idx, &[a, b, c]) in faces.iter().enumerate() {
            for edge in [(a, b), (b, c), (c, a)] {
                edge_to_faces
                    .entry(normalize_edge(edge.0, edge.1))
                    .or_default()
                    .push(face_idx);
            }
        }
        Self { edge_to_faces }
    }

    /// Faces using the edge `v0`-`v1`, in either direction.
    #[must_use]
    pub fn faces_for_edge(&self, v0: u32, v1: u32) -> Option<&[usize]> {
        self.edge_to_faces
            .get(&normalize_edge(v0, v1))
            .map(Vec::as_slice)
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_faces.len()
    }

    /// Edges used by a single face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_to_faces.values().filter(|f| f.len() == 1).count()
    }

    /// Edges used by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_to_faces.values().filter(|f| f.len() > 2).count()
    }

    /// Whether every edge is shared by exactly two faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        !self.edge_to_faces.is_empty() && self.edge_to_faces.values().all(|f| f.len() == 2)
    }

    /// Whether the surface has no boundary edges.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edge_to_faces.values().all(|f| f.len() >= 2)
    }
}

#[inline]
fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tetrahedron() -> Vec<[u32; 3]> {
        vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]]
    }

    #[test]
    fn closed_tetrahedron_is_manifold() {
        let adj = MeshAdjacency::build(&tetrahedron());
        assert_eq!(adj.edge_count(), 6);
        assert_eq!(adj.boundary_edge_count(), 0);
        assert!(adj.is_manifold());
        assert!(adj.is_watertight());
    }

    #[test]
    fn open_surface_has_boundary() {
        let adj = MeshAdjacency::build(&[[0, 1, 2], [1, 3, 2]]);
        assert_eq!(adj.boundary_edge_count(), 4);
        assert_eq!(adj.faces_for_edge(2, 1).unwrap().len(), 2);
        assert!(!adj.is_manifold());
        assert!(!adj.is_watertight());
    }

    #[test]
    fn fan_of_three_is_non_manifold() {
        let adj = MeshAdjacency::build(&[[0, 1, 2], [0, 1, 3], [0, 1, 4]]);
        assert_eq!(adj.non_manifold_edge_count(), 1);
        assert!(!adj.is_manifold());
    }

    #[test]
    fn empty_mesh_is_not_manifold() {
        let adj = MeshAdjacency::build(&[]);
        assert!(!adj.is_manifold());
        assert!(adj.is_watertight());
    }
}
