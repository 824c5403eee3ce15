use tracing::{debug, debug_span, info, warn};

use crate::operations::boolean::MergePolygons;
use crate::operations::contour::{ClassifyContours, TracedPolygon};
use crate::operations::layers::{CompressLayers, LayerOrigin};
#[cfg(feature = "detail")]
use crate::operations::offset::RescueFeatures;
use crate::operations::repair;
use crate::operations::shaping::ExtrudeLayers;
use crate::params::MeshingParams;
use crate::tessellation::TriangleMesh;
use crate::volume::{MaterialId, VoxelVolume};

/// The contour-based pipeline shared by the smooth and detail strategies:
/// compress layers, trace and classify contours, optionally guard thin
/// features, merge, extrude, then weld the prisms into one mesh.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ContourPipeline {
    pub(crate) params: MeshingParams,
    pub(crate) guard_features: bool,
}

impl ContourPipeline {
    pub(crate) fn run(
        &self,
        strategy: &'static str,
        volume: &VoxelVolume,
        material: MaterialId,
        height_px: usize,
    ) -> Option<TriangleMesh> {
        let groups = CompressLayers::new(volume, material).execute();
        if groups.is_empty() {
            return None;
        }
        info!(
            strategy,
            material,
            layers = volume.depth(),
            groups = groups.len(),
            "compressed layers"
        );

        // Guarded features get their own expansion instead of the smooth one.
        let trace_params = if self.guard_features {
            self.params.with_smooth_expansion(0.0)
        } else {
            self.params
        };

        let mut prisms = Vec::new();
        for group in &groups {
            let origin = LayerOrigin::new(material, group.start_z, group.end_z);
            let _span = debug_span!(
                "layer_group",
                material,
                start_z = group.start_z,
                end_z = group.end_z
            )
            .entered();

            let traced = match ClassifyContours::new(&group.mask, height_px, trace_params)
                .with_origin(origin)
                .execute()
            {
                Ok(traced) => traced,
                Err(e) => {
                    warn!(
                        material,
                        start_z = group.start_z,
                        end_z = group.end_z,
                        error = %e,
                        "contour tracing failed, skipping group"
                    );
                    continue;
                }
            };
            let traced = self.guard(traced);
            let merged = MergePolygons::new(&traced).execute();
            debug!(
                traced = traced.len(),
                merged = merged.len(),
                "cross-section merged"
            );
            prisms.extend(
                ExtrudeLayers::new(&merged, origin, self.params.min_extrude_area).execute(),
            );
        }

        if prisms.is_empty() {
            return None;
        }
        let mut mesh = TriangleMesh::concatenate(&prisms);
        let summary = repair::process(
            &mut mesh,
            self.params.weld_epsilon,
            self.params.degenerate_area,
        );
        info!(
            strategy,
            material,
            prisms = prisms.len(),
            vertices = summary.final_vertices,
            faces = summary.final_faces,
            "mesh generated"
        );
        Some(mesh)
    }

    fn guard(&self, traced: Vec<TracedPolygon>) -> Vec<TracedPolygon> {
        #[cfg(feature = "detail")]
        {
            if self.guard_features {
                return RescueFeatures::new(self.params).execute(traced);
            }
        }
        traced
    }
}
