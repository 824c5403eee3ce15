#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use voxmesh::math::{Point2, Point3};
use voxmesh::operations::creation::{CapFacing, MakeAttachmentLoop, StitchRings};
use voxmesh::operations::query::MeshAdjacency;
use voxmesh::params::LoopParams;

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn concentric_rings(n_outer: usize, n_hole: usize) -> (Vec<Point3>, Vec<u32>, Vec<u32>) {
    let ring = |n: usize, r: f64| {
        (0..n).map(move |i| {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            Point3::new(r * a.cos(), r * a.sin(), 0.0)
        })
    };
    let positions: Vec<Point3> = ring(n_outer, 5.0).chain(ring(n_hole, 2.0)).collect();
    let outer = (0..n_outer as u32).collect();
    let hole = (n_outer as u32..(n_outer + n_hole) as u32).collect();
    (positions, outer, hole)
}

#[test]
fn thirty_two_by_thirty_two_gives_sixty_four_triangles() {
    let (positions, outer, hole) = concentric_rings(32, 32);
    for facing in [CapFacing::Up, CapFacing::Down] {
        let tris = StitchRings::new(&outer, &hole, &positions, facing)
            .execute()
            .unwrap();
        assert_eq!(tris.len(), 64);
    }
}

#[test]
fn standard_loop_is_manifold() {
    let params = LoopParams::new(10.0, 15.0, 4.0, 2.0);
    let mesh = MakeAttachmentLoop::new(params).execute().unwrap();
    let adjacency = MeshAdjacency::build(&mesh.indices);
    assert!(adjacency.is_manifold());
    assert_eq!(adjacency.boundary_edge_count(), 0);
    assert_eq!(adjacency.non_manifold_edge_count(), 0);
}

#[test]
fn loop_volume_matches_profile() {
    let params = LoopParams::new(10.0, 15.0, 4.0, 2.0);
    let mesh = MakeAttachmentLoop::new(params).execute().unwrap();
    // Rectangle 10 x 10, half disk r = 5, minus hole r = 2, all 2 mm thick;
    // polygonal arcs lose a little area
    let exact = 2.0 * (100.0 + std::f64::consts::PI * 25.0 / 2.0 - std::f64::consts::PI * 4.0);
    assert_relative_eq!(mesh.signed_volume(), exact, max_relative = 0.01);
}

#[test]
fn oversized_hole_is_clamped() {
    let params = LoopParams::new(10.0, 15.0, 50.0, 2.0);
    let op = MakeAttachmentLoop::new(params);
    let max_radius = op
        .hole_profile()
        .iter()
        .map(|p| (*p - Point2::new(0.0, 10.0)).norm())
        .fold(0.0, f64::max);
    assert_relative_eq!(max_radius, 4.0, epsilon = 1e-9);
    assert!(MeshAdjacency::build(&op.execute().unwrap().indices).is_manifold());
}
