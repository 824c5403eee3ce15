use std::collections::VecDeque;

use crate::operations::query::MeshAdjacency;
use crate::tessellation::TriangleMesh;

/// Makes face winding consistent and outward-facing.
///
/// Faces are walked breadth-first across manifold edges; a neighbour that
/// traverses a shared edge in the same direction as the current face is
/// flipped. Each connected component whose signed volume is then negative is
/// inverted as a whole. Returns the number of faces whose winding changed.
pub fn fix_winding(mesh: &mut TriangleMesh) -> usize {
    let face_count = mesh.indices.len();
    let adjacency = MeshAdjacency::build(&mesh.indices);
    let mut visited = vec![false; face_count];
    let mut flipped = vec![false; face_count];

    for seed in 0..face_count {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let mut component = Vec::new();
        let mut queue = VecDeque::from([seed]);

        while let Some(face_idx) = queue.pop_front() {
            component.push(face_idx);
            let [a, b, c] = mesh.indices[face_idx];
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let Some(neighbours) = adjacency.faces_for_edge(u, v) else {
                    continue;
                };
                if neighbours.len() != 2 {
                    continue;
                }
                for &other in neighbours {
                    if other == face_idx || visited[other] {
                        continue;
                    }
                    if traverses(mesh.indices[other], u, v) {
                        mesh.indices[other].swap(1, 2);
                        flipped[other] = !flipped[other];
                    }
                    visited[other] = true;
                    queue.push_back(other);
                }
            }
        }

        let volume: f64 = component
            .iter()
            .map(|&f| {
                let [p0, p1, p2] = mesh.triangle(f);
                p0.coords.dot(&p1.coords.cross(&p2.coords))
            })
            .sum();
        if volume < 0.0 {
            for &f in &component {
                mesh.indices[f].swap(1, 2);
                flipped[f] = !flipped[f];
            }
        }
    }

    flipped.iter().filter(|&&f| f).count()
}

fn traverses(face: [u32; 3], u: u32, v: u32) -> bool {
    (0..3).any(|i| face[i] == u && face[(i + 1) % 3] == v)
}
