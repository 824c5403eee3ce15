use std::collections::HashSet;

use crate::tessellation::TriangleMesh;

/// Removes faces that repeat the vertex set of an earlier face.
///
/// Winding and starting vertex are ignored, so a face and its flipped twin
/// count as duplicates. Returns the number of faces removed.
pub fn remove_duplicate_faces(mesh: &mut TriangleMesh) -> usize {
    let original_count = mesh.indices.len();
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(original_count);
    mesh.indices.retain(|face| {
        let mut key = *face;
        key.sort_unstable();
        seen.insert(key)
    });
    original_count - mesh.indices.len()
}

/// Removes faces with repeated indices or an area below `area_threshold`.
///
/// Returns the number of faces removed.
pub fn remove_degenerate_faces(mesh: &mut TriangleMesh, area_threshold: f64) -> usize {
    let original_count = mesh.indices.len();
    let vertices = &mesh.vertices;
    mesh.indices.retain(|&[a, b, c]| {
        if a == b || b == c || a == c {
            return false;
        }
        let (p0, p1, p2) = (
            vertices[a as usize],
            vertices[b as usize],
            vertices[c as usize],
        );
        (p1 - p0).cross(&(p2 - p0)).norm() * 0.5 >= area_threshold
    });
    original_count - mesh.indices.len()
}
