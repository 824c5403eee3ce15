use tracing::{info, warn};

use super::Mesher;
use crate::math::Point3;
use crate::operations::creation::MakeCuboid;
use crate::operations::repair;
use crate::params::MeshingParams;
use crate::tessellation::TriangleMesh;
use crate::volume::{MaterialId, OccupancyMask, VoxelVolume};

/// Blocky strategy: every occupied run of pixels becomes a unit-height box.
///
/// Within a layer, each row is split into horizontal spans; identical spans
/// on consecutive rows are stacked into a single box. Every box is shrunk
/// inward by `cuboid_shrink` in X and Y so that neighbouring materials never
/// share a coplanar face.
#[derive(Debug, Clone, Copy, Default)]
pub struct CuboidMesher {
    params: MeshingParams,
}

impl CuboidMesher {
    /// Creates a cuboid mesher with the given parameters.
    #[must_use]
    pub fn new(params: MeshingParams) -> Self {
        Self { params }
    }

    /// Boxes covering one layer's mask, in image-row order.
    #[allow(clippy::cast_precision_loss)]
    fn layer_boxes(
        &self,
        mask: &OccupancyMask,
        z: usize,
        height_px: usize,
    ) -> Vec<(Point3, Point3)> {
        let shrink = self.params.cuboid_shrink;
        let rows = height_px.min(mask.height());
        let mut boxes = Vec::new();
        // (start, end) of each span still growing downward, with its first row
        let mut open: Vec<((usize, usize), usize)> = Vec::new();

        let mut emit = |(start, end): (usize, usize), first_row: usize, last_row: usize| {
            let y0 = (height_px - 1 - last_row) as f64 + shrink;
            let y1 = (height_px - first_row) as f64 - shrink;
            boxes.push((
                Point3::new(start as f64 + shrink, y0, z as f64),
                Point3::new(end as f64 - shrink, y1, (z + 1) as f64),
            ));
        };

        for row in 0..rows {
            let spans = mask.row_spans(row);
            let mut next_open = Vec::with_capacity(spans.len());
            for span in spans {
                match open.iter().position(|(s, _)| *s == span) {
                    Some(i) => next_open.push(open.swap_remove(i)),
                    None => next_open.push((span, row)),
                }
            }
            for (span, first_row) in open {
                emit(span, first_row, row - 1);
            }
            open = next_open;
        }
        for (span, first_row) in open {
            emit(span, first_row, rows - 1);
        }
        boxes
    }
}

impl Mesher for CuboidMesher {
    fn name(&self) -> &'static str {
        "cuboid"
    }

    fn generate_mesh(
        &self,
        volume: &VoxelVolume,
        material: MaterialId,
        height_px: usize,
    ) -> Option<TriangleMesh> {
        let mut mesh = TriangleMesh::new();
        let mut cuboids = 0usize;

        for z in 0..volume.depth() {
            let mask = volume.mask(z, material);
            if mask.is_empty() {
                continue;
            }
            for (min, max) in self.layer_boxes(&mask, z, height_px) {
                match MakeCuboid::new(min, max).execute() {
                    Ok(cuboid) => {
                        mesh.merge(&cuboid);
                        cuboids += 1;
                    }
                    Err(e) => warn!(material, z, error = %e, "skipping cuboid"),
                }
            }
        }

        if mesh.is_empty() {
            return None;
        }
        let summary = repair::process(
            &mut mesh,
            self.params.weld_epsilon,
            self.params.degenerate_area,
        );
        info!(
            strategy = self.name(),
            material,
            cuboids,
            vertices = summary.final_vertices,
            faces = summary.final_faces,
            "mesh generated"
        );
        Some(mesh)
    }
}
