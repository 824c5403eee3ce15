//! Runs every meshing strategy over a small synthetic two-material volume.
//!
//! Usage:
//! ```text
//! cargo run --example strategies
//! RUST_LOG=voxmesh=debug cargo run --example strategies
//! ```

use voxmesh::operations::creation::MakeAttachmentLoop;
use voxmesh::operations::query::MeshAdjacency;
use voxmesh::params::LoopParams;
use voxmesh::strategy::{MaterialMeshes, MeshStrategy, Mesher, SegmentationSupport};
use voxmesh::volume::VoxelVolume;

const SIZE: usize = 48;
const LAYERS: usize = 4;

/// A disk of material 1 crossed by a one-pixel stroke of material 2.
fn synthetic_volume() -> voxmesh::Result<VoxelVolume> {
    let centre = (SIZE / 2) as f64;
    let mut data = Vec::with_capacity(LAYERS * SIZE * SIZE);
    for _ in 0..LAYERS {
        for y in 0..SIZE {
            for x in 0..SIZE {
                let (dx, dy) = (x as f64 - centre, y as f64 - centre);
                let material = if y == SIZE / 2 && (4..SIZE - 4).contains(&x) {
                    2
                } else if dx.hypot(dy) < 16.0 {
                    1
                } else {
                    0
                };
                data.push(material);
            }
        }
    }
    VoxelVolume::new(LAYERS, SIZE, SIZE, data)
}

fn main() -> voxmesh::Result<()> {
    // Default: WARN for everything, INFO for voxmesh.
    // Override with RUST_LOG env var (e.g. RUST_LOG=voxmesh=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("strategies=info".parse().unwrap_or_default())
        .add_directive("voxmesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let volume = synthetic_volume()?;
    let support = SegmentationSupport::detect();

    for mode in ["voxel", "vector", "woodblock"] {
        let strategy = MeshStrategy::select(mode, support);
        let meshes = MaterialMeshes::new(&strategy, &volume, SIZE).generate(&[1, 2]);
        for (material, mesh) in &meshes {
            let adjacency = MeshAdjacency::build(&mesh.indices);
            tracing::info!(
                mode,
                strategy = strategy.name(),
                material,
                vertices = mesh.vertex_count(),
                faces = mesh.triangle_count(),
                watertight = adjacency.is_watertight(),
                "result"
            );
        }
    }

    let attachment = MakeAttachmentLoop::new(LoopParams::new(10.0, 15.0, 4.0, 2.0)).execute()?;
    let adjacency = MeshAdjacency::build(&attachment.indices);
    tracing::info!(
        vertices = attachment.vertex_count(),
        faces = attachment.triangle_count(),
        manifold = adjacency.is_manifold(),
        "attachment loop"
    );
    Ok(())
}
