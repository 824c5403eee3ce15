mod faces;
mod weld;
mod winding;

pub use faces::{remove_degenerate_faces, remove_duplicate_faces};
pub use weld::weld_vertices;
pub use winding::fix_winding;

use std::fmt;

use tracing::debug;

use crate::tessellation::TriangleMesh;

/// Counts reported by [`process`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairSummary {
    /// Vertices removed by welding.
    pub vertices_welded: usize,
    /// Faces removed as duplicates.
    pub duplicates_removed: usize,
    /// Faces removed for having next to no area.
    pub degenerates_removed: usize,
    /// Vertices left after repair.
    pub final_vertices: usize,
    /// Faces left after repair.
    pub final_faces: usize,
}

impl RepairSummary {
    /// Whether the pass changed the mesh.
    #[must_use]
    pub fn had_changes(&self) -> bool {
        self.vertices_welded > 0 || self.duplicates_removed > 0 || self.degenerates_removed > 0
    }
}

impl fmt::Display for RepairSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} verts ({} welded), {} faces ({} duplicate, {} degenerate)",
            self.final_vertices,
            self.vertices_welded,
            self.final_faces,
            self.duplicates_removed,
            self.degenerates_removed
        )
    }
}

/// Welds coincident vertices, then drops sliver and duplicate faces.
///
/// Applied to every concatenated mesh before it is handed back, so prisms or
/// cuboids that touch end up sharing vertices.
pub fn process(mesh: &mut TriangleMesh, weld_epsilon: f64, degenerate_area: f64) -> RepairSummary {
    let vertices_welded = weld_vertices(mesh, weld_epsilon);
    let degenerates_removed = remove_degenerate_faces(mesh, degenerate_area);
    let duplicates_removed = remove_duplicate_faces(mesh);
    let summary = RepairSummary {
        vertices_welded,
        duplicates_removed,
        degenerates_removed,
        final_vertices: mesh.vertex_count(),
        final_faces: mesh.triangle_count(),
    };
    debug!(%summary, "mesh processed");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::query::MeshAdjacency;

    fn quad_as_separate_triangles() -> TriangleMesh {
        TriangleMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [3, 4, 5], [3, 4, 5]],
        )
    }

    #[test]
    fn process_welds_and_dedupes() {
        let mut mesh = quad_as_separate_triangles();
        let summary = process(&mut mesh, 1e-8, 1e-12);
        assert_eq!(summary.vertices_welded, 2);
        assert_eq!(summary.duplicates_removed, 1);
        assert_eq!(summary.final_vertices, 4);
        assert_eq!(summary.final_faces, 2);
        assert!(summary.had_changes());
        assert_eq!(MeshAdjacency::build(&mesh.indices).edge_count(), 5);
    }

    #[test]
    fn process_drops_flat_faces() {
        // Vertex 2 lies on edge 0-1, so face [0, 1, 2] has no area
        let mut mesh = TriangleMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            vec![[0, 2, 3], [2, 1, 3], [0, 1, 2]],
        );
        let summary = process(&mut mesh, 1e-8, 1e-12);
        assert_eq!(summary.degenerates_removed, 1);
        assert_eq!(summary.final_faces, 2);
        assert!(summary.had_changes());
        assert_eq!(mesh.indices, vec![[0, 2, 3], [2, 1, 3]]);
    }

    #[test]
    fn clean_mesh_reports_no_changes() {
        let mut mesh = quad_as_separate_triangles();
        process(&mut mesh, 1e-8, 1e-12);
        let again = process(&mut mesh, 1e-8, 1e-12);
        assert!(!again.had_changes());
        assert_eq!(again.to_string(), "4 verts (0 welded), 2 faces (0 duplicate, 0 degenerate)");
    }
}
