use std::collections::HashMap;

use crate::math::Point3;
use crate::tessellation::TriangleMesh;

/// Merges vertices closer than `epsilon` and compacts the vertex array.
///
/// Vertices are bucketed on a spatial hash with cells of `2 * epsilon`; each
/// vertex is compared against the 27 surrounding cells and folded into the
/// lowest-indexed match. Faces collapsed by the merge are dropped. Returns
/// the number of vertices removed.
#[allow(clippy::cast_possible_truncation)]
pub fn weld_vertices(mesh: &mut TriangleMesh, epsilon: f64) -> usize {
    let original_count = mesh.vertices.len();
    if original_count == 0 {
        return 0;
    }

    let cell_size = (epsilon * 2.0).max(f64::MIN_POSITIVE);
    let mut spatial_hash: HashMap<(i64, i64, i64), Vec<u32>> = HashMap::new();
    for (idx, position) in mesh.vertices.iter().enumerate() {
        spatial_hash
            .entry(cell_of(position, cell_size))
            .or_default()
            .push(idx as u32);
    }

    let mut remap: Vec<u32> = (0..original_count as u32).collect();
    let mut merged = 0usize;
    for (idx, position) in mesh.vertices.iter().enumerate() {
        let idx = idx as u32;
        if remap[idx as usize] != idx {
            continue;
        }
        let (cx, cy, cz) = cell_of(position, cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = spatial_hash.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &other in candidates {
                        if other <= idx || remap[other as usize] != other {
                            continue;
                        }
                        if (mesh.vertices[other as usize] - *position).norm() <= epsilon {
                            remap[other as usize] = idx;
                            merged += 1;
                        }
                    }
                }
            }
        }
    }

    if merged == 0 {
        return 0;
    }

    // Representatives always point at themselves, so one hop resolves.
    let mut compact = vec![u32::MAX; original_count];
    let mut vertices = Vec::with_capacity(original_count - merged);
    for idx in 0..original_count {
        let rep = remap[idx] as usize;
        if compact[rep] == u32::MAX {
            compact[rep] = vertices.len() as u32;
            vertices.push(mesh.vertices[rep]);
        }
        compact[idx] = compact[rep];
    }

    for face in &mut mesh.indices {
        for v in face.iter_mut() {
            *v = compact[*v as usize];
        }
    }
    mesh.indices.retain(|&[a, b, c]| a != b && b != c && a != c);
    mesh.vertices = vertices;

    original_count - mesh.vertices.len()
}

#[allow(clippy::cast_possible_truncation)]
fn cell_of(position: &Point3, cell_size: f64) -> (i64, i64, i64) {
    (
        (position.x / cell_size).floor() as i64,
        (position.y / cell_size).floor() as i64,
        (position.z / cell_size).floor() as i64,
    )
}
