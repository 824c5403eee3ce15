#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use voxmesh::operations::layers::CompressLayers;
use voxmesh::operations::query::MeshAdjacency;
use voxmesh::params::MeshingParams;
use voxmesh::strategy::{
    CuboidMesher, DetailMesher, MaterialMeshes, MeshStrategy, Mesher, SegmentationSupport,
    SmoothMesher,
};
use voxmesh::volume::{MaterialId, VoxelVolume};

fn volume_from(
    depth: usize,
    size: usize,
    material_at: impl Fn(usize, usize) -> MaterialId,
) -> VoxelVolume {
    let mut data = Vec::with_capacity(depth * size * size);
    for _ in 0..depth {
        for y in 0..size {
            for x in 0..size {
                data.push(material_at(x, y));
            }
        }
    }
    VoxelVolume::new(depth, size, size, data).unwrap()
}

#[allow(clippy::cast_precision_loss)]
fn within(x: usize, y: usize, centre: f64, radius: f64) -> bool {
    (x as f64 - centre).hypot(y as f64 - centre) < radius
}

fn disk_volume(depth: usize) -> VoxelVolume {
    volume_from(depth, 24, |x, y| u8::from(within(x, y, 12.0, 8.0)))
}

#[test]
fn identical_layers_compress_to_one_group() {
    let volume = disk_volume(5);
    let groups = CompressLayers::new(&volume, 1).execute();
    assert_eq!(groups.len(), 1);
    assert_eq!((groups[0].start_z, groups[0].end_z), (0, 4));
}

#[test]
fn smooth_disk_is_one_prism_of_full_height() {
    let volume = disk_volume(5);
    let mesh = SmoothMesher::default().generate_mesh(&volume, 1, 24).unwrap();

    let (min, max) = mesh.bounds().unwrap();
    assert_abs_diff_eq!(min.z, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(max.z, 5.0, epsilon = 1e-9);

    let adjacency = MeshAdjacency::build(&mesh.indices);
    assert!(adjacency.is_watertight());
    assert_eq!(adjacency.non_manifold_edge_count(), 0);

    // Traced radius of about 7.5 grown by the 6 px smooth expansion
    let cross_section = mesh.signed_volume() / 5.0;
    assert!(cross_section > 450.0 && cross_section < 700.0, "{cross_section}");
}

#[test]
fn cuboid_block_is_single_box() {
    let volume = volume_from(1, 2, |_, _| 1);
    let mesh = CuboidMesher::default().generate_mesh(&volume, 1, 2).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(MeshAdjacency::build(&mesh.indices).is_manifold());
    // 1.9 x 1.9 x 1 after the inward shrink
    assert_abs_diff_eq!(mesh.signed_volume(), 3.61, epsilon = 1e-9);
}

#[test]
fn missing_material_yields_nothing() {
    let volume = disk_volume(2);
    assert!(CuboidMesher::default().generate_mesh(&volume, 5, 24).is_none());
    assert!(SmoothMesher::default().generate_mesh(&volume, 5, 24).is_none());
    assert!(DetailMesher::default().generate_mesh(&volume, 5, 24).is_none());
}

#[test]
fn holes_are_cut_through() {
    let ring = volume_from(3, 30, |x, y| {
        u8::from(within(x, y, 15.0, 10.0) && !within(x, y, 15.0, 4.0))
    });
    let disk = volume_from(3, 30, |x, y| u8::from(within(x, y, 15.0, 10.0)));
    let ring_mesh = SmoothMesher::default().generate_mesh(&ring, 1, 30).unwrap();
    let disk_mesh = SmoothMesher::default().generate_mesh(&disk, 1, 30).unwrap();
    // Holes are expanded along with outlines, so the hole removes far more
    // than its pixel area
    assert!(
        ring_mesh.signed_volume() < 0.75 * disk_mesh.signed_volume(),
        "{} vs {}",
        ring_mesh.signed_volume(),
        disk_mesh.signed_volume()
    );
    assert!(MeshAdjacency::build(&ring_mesh.indices).is_watertight());
}

#[test]
fn generation_is_deterministic() {
    let volume = disk_volume(3);
    for strategy in ["voxel", "vector", "woodblock"] {
        let mesher = MeshStrategy::select(strategy, SegmentationSupport::detect());
        let first = mesher.generate_mesh(&volume, 1, 24);
        let second = mesher.generate_mesh(&volume, 1, 24);
        assert_eq!(first, second, "{strategy}");
    }
}

#[test]
fn detail_fallback_matches_smooth() {
    let volume = disk_volume(2);
    let fallback = DetailMesher::new(MeshingParams::default(), SegmentationSupport::Unavailable);
    assert!(fallback.is_fallback());
    assert_eq!(
        fallback.generate_mesh(&volume, 1, 24),
        SmoothMesher::default().generate_mesh(&volume, 1, 24),
    );
}

#[cfg(feature = "detail")]
#[test]
fn detail_thickens_thin_strokes() {
    // A 3 pixel wide bar survives cleanup but traces only 2 px wide
    let volume = volume_from(1, 32, |x, y| u8::from((6..26).contains(&x) && (14..17).contains(&y)));
    let unexpanded = SmoothMesher::new(MeshingParams::default().with_smooth_expansion(0.0));
    let smooth = unexpanded.generate_mesh(&volume, 1, 32).unwrap();
    let detail = DetailMesher::new(MeshingParams::default(), SegmentationSupport::Available)
        .generate_mesh(&volume, 1, 32)
        .unwrap();
    assert!(detail.signed_volume() > 2.0 * smooth.signed_volume());
}

#[test]
fn every_material_is_meshed_in_order() {
    let volume = volume_from(2, 24, |x, y| {
        if within(x, y, 12.0, 5.0) {
            3
        } else if within(x, y, 12.0, 10.0) {
            1
        } else {
            0
        }
    });
    let mesher = MeshStrategy::select("vector", SegmentationSupport::detect());
    let meshes = MaterialMeshes::new(&mesher, &volume, 24).generate(&[3, 1]);
    let ids: Vec<MaterialId> = meshes.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(meshes.iter().all(|(_, mesh)| !mesh.is_empty()));
}
