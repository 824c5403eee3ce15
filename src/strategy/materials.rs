#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use super::Mesher;
use crate::tessellation::TriangleMesh;
use crate::volume::{MaterialId, VoxelVolume};

/// Meshes several materials of one volume with a single strategy.
///
/// Materials are independent, so with the `parallel` feature they run on the
/// rayon pool. Results are ordered by material id either way, and materials
/// that produce no mesh are left out.
pub struct MaterialMeshes<'a, M: Mesher + ?Sized> {
    mesher: &'a M,
    volume: &'a VoxelVolume,
    height_px: usize,
}

impl<'a, M: Mesher + ?Sized> MaterialMeshes<'a, M> {
    /// Creates a new multi-material run.
    #[must_use]
    pub fn new(mesher: &'a M, volume: &'a VoxelVolume, height_px: usize) -> Self {
        Self {
            mesher,
            volume,
            height_px,
        }
    }

    /// Meshes the given materials.
    #[must_use]
    pub fn generate(&self, materials: &[MaterialId]) -> Vec<(MaterialId, TriangleMesh)> {
        let mut ids = materials.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mesh_one = |&material: &MaterialId| {
            (
                material,
                self.mesher
                    .generate_mesh(self.volume, material, self.height_px),
            )
        };

        #[cfg(feature = "parallel")]
        let results: Vec<(MaterialId, Option<TriangleMesh>)> =
            ids.par_iter().map(mesh_one).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<(MaterialId, Option<TriangleMesh>)> =
            ids.iter().map(mesh_one).collect();

        let meshes: Vec<(MaterialId, TriangleMesh)> = results
            .into_iter()
            .filter_map(|(material, mesh)| mesh.map(|m| (material, m)))
            .collect();
        info!(
            strategy = self.mesher.name(),
            requested = ids.len(),
            produced = meshes.len(),
            "materials meshed"
        );
        meshes
    }

    /// Meshes every material present in the volume.
    #[must_use]
    pub fn generate_all(&self) -> Vec<(MaterialId, TriangleMesh)> {
        self.generate(&self.volume.materials())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::strategy::CuboidMesher;

    fn two_material_volume() -> VoxelVolume {
        VoxelVolume::from_layers(&[vec![vec![1, 1, 0, 3], vec![1, 1, 0, 3]]]).unwrap()
    }

    #[test]
    fn results_are_sorted_and_skip_missing() {
        let volume = two_material_volume();
        let mesher = CuboidMesher::default();
        let meshes = MaterialMeshes::new(&mesher, &volume, 2).generate(&[3, 9, 1, 3]);
        let ids: Vec<MaterialId> = meshes.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn generate_all_covers_every_material() {
        let volume = two_material_volume();
        let mesher = CuboidMesher::default();
        let meshes = MaterialMeshes::new(&mesher, &volume, 2).generate_all();
        assert_eq!(meshes.len(), 3);
        assert!(meshes.iter().all(|(_, mesh)| !mesh.is_empty()));
    }
}
