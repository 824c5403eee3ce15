use super::pipeline::ContourPipeline;
use super::Mesher;
use crate::params::MeshingParams;
use crate::tessellation::TriangleMesh;
use crate::volume::{MaterialId, VoxelVolume};

/// Contour strategy: traced outlines extruded into smooth-sided prisms.
///
/// Features under `min_contour_area` are dropped outright; nothing is done to
/// keep thin strokes alive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmoothMesher {
    params: MeshingParams,
}

impl SmoothMesher {
    /// Creates a smooth mesher with the given parameters.
    #[must_use]
    pub fn new(params: MeshingParams) -> Self {
        Self { params }
    }
}

impl Mesher for SmoothMesher {
    fn name(&self) -> &'static str {
        "smooth"
    }

    fn generate_mesh(
        &self,
        volume: &VoxelVolume,
        material: MaterialId,
        height_px: usize,
    ) -> Option<TriangleMesh> {
        ContourPipeline {
            params: self.params,
            guard_features: false,
        }
        .run(self.name(), volume, material, height_px)
    }
}
