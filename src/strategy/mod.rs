//! Meshing strategies and the factory that picks one by name.

mod cuboid;
mod detail;
mod materials;
mod pipeline;
mod smooth;

pub use cuboid::CuboidMesher;
pub use detail::{DetailMesher, SegmentationSupport};
pub use materials::MaterialMeshes;
pub use smooth::SmoothMesher;

use crate::params::MeshingParams;
use crate::tessellation::TriangleMesh;
use crate::volume::{MaterialId, VoxelVolume};

/// Turns one material of a voxel volume into a triangle mesh.
pub trait Mesher: Send + Sync {
    /// Stable identifier of the strategy.
    fn name(&self) -> &'static str;

    /// Meshes `material`, treating each layer as `height_px` image rows.
    ///
    /// Returns `None` when the material occupies no voxel or nothing survives
    /// the pipeline.
    fn generate_mesh(
        &self,
        volume: &VoxelVolume,
        material: MaterialId,
        height_px: usize,
    ) -> Option<TriangleMesh>;
}

/// One of the available meshing strategies.
#[derive(Debug, Clone, Copy)]
pub enum MeshStrategy {
    /// Axis-aligned boxes per pixel run.
    Cuboid(CuboidMesher),
    /// Traced contours extruded as prisms.
    Smooth(SmoothMesher),
    /// Traced contours with thin features rescued.
    Detail(DetailMesher),
}

impl MeshStrategy {
    /// Picks a strategy from a mode string with default parameters.
    ///
    /// See [`MeshStrategy::select_with`].
    #[must_use]
    pub fn select(mode: &str, support: SegmentationSupport) -> Self {
        Self::select_with(mode, MeshingParams::default(), support)
    }

    /// Picks a strategy from a mode string.
    ///
    /// Matching is case-insensitive and by substring: `woodblock`, `detail`
    /// or `版画` selects the detail strategy, `vector`, `smooth` or `矢量` the
    /// smooth one, and anything else the cuboid strategy.
    #[must_use]
    pub fn select_with(mode: &str, params: MeshingParams, support: SegmentationSupport) -> Self {
        let mode = mode.to_lowercase();
        let matches = |aliases: &[&str]| aliases.iter().any(|a| mode.contains(a));

        if matches(&["woodblock", "detail", "版画"]) {
            Self::Detail(DetailMesher::new(params, support))
        } else if matches(&["vector", "smooth", "矢量"]) {
            Self::Smooth(SmoothMesher::new(params))
        } else {
            Self::Cuboid(CuboidMesher::new(params))
        }
    }

    fn as_mesher(&self) -> &dyn Mesher {
        match self {
            Self::Cuboid(m) => m,
            Self::Smooth(m) => m,
            Self::Detail(m) => m,
        }
    }
}

impl Default for MeshStrategy {
    fn default() -> Self {
        Self::Cuboid(CuboidMesher::default())
    }
}

impl Mesher for MeshStrategy {
    fn name(&self) -> &'static str {
        self.as_mesher().name()
    }

    fn generate_mesh(
        &self,
        volume: &VoxelVolume,
        material: MaterialId,
        height_px: usize,
    ) -> Option<TriangleMesh> {
        self.as_mesher().generate_mesh(volume, material, height_px)
    }
}
