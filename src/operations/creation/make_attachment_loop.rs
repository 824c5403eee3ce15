use std::f64::consts::{PI, TAU};

use tracing::info;

use super::stitch_rings::{CapFacing, StitchRings};
use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3, Vector3};
use crate::operations::repair::fix_winding;
use crate::params::LoopParams;
use crate::tessellation::TriangleMesh;

/// Creates a keychain attachment loop: a flat tab with a rounded end and a
/// round hole, as a closed prism.
///
/// The outer profile is a rectangle whose top edge is replaced by a
/// semicircle of radius `width / 2`; the hole is centred on the arc centre.
/// Dimensions are taken as given: non-positive values or a hole larger than
/// the tab produce a self-overlapping mesh.
pub struct MakeAttachmentLoop {
    params: LoopParams,
}

impl MakeAttachmentLoop {
    /// Creates a new `MakeAttachmentLoop` operation.
    #[must_use]
    pub fn new(params: LoopParams) -> Self {
        Self { params }
    }

    /// Outer profile, counter-clockwise from the bottom-left corner.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn outer_profile(&self) -> Vec<Point2> {
        let half_w = self.params.width / 2.0;
        let radius = self.params.arc_radius();
        let rect_h = self.params.rect_height();
        let n_arc = self.params.arc_segments;

        let mut points = Vec::with_capacity(n_arc + 3);
        points.push(Point2::new(-half_w, 0.0));
        points.push(Point2::new(half_w, 0.0));
        points.push(Point2::new(half_w, rect_h));
        for i in 1..n_arc {
            let angle = PI * i as f64 / n_arc as f64;
            points.push(Point2::new(
                radius * angle.cos(),
                rect_h + radius * angle.sin(),
            ));
        }
        points.push(Point2::new(-half_w, rect_h));
        points
    }

    /// Hole profile, counter-clockwise around the arc centre.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn hole_profile(&self) -> Vec<Point2> {
        let radius = self.params.hole_radius();
        let centre_y = self.params.rect_height();
        let n = self.params.hole_segments;
        (0..n)
            .map(|i| {
                let angle = TAU * i as f64 / n as f64;
                Point2::new(radius * angle.cos(), centre_y + radius * angle.sin())
            })
            .collect()
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the arc has fewer than 2
    /// segments or the hole fewer than 3.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        let p = &self.params;
        info!(
            width = p.width,
            length = p.length,
            hole = p.hole_diameter,
            thickness = p.thickness,
            x = p.offset.x,
            y = p.offset.y,
            "creating attachment loop"
        );
        if p.arc_segments < 2 || p.hole_segments < 3 {
            return Err(OperationError::InvalidInput(format!(
                "attachment loop needs at least 2 arc and 3 hole segments, got {} and {}",
                p.arc_segments, p.hole_segments
            ))
            .into());
        }

        let outer = self.outer_profile();
        let hole = self.hole_profile();
        let (n_outer, n_hole) = (outer.len() as u32, hole.len() as u32);

        let bottom_outer = 0;
        let bottom_hole = n_outer;
        let top_outer = n_outer + n_hole;
        let top_hole = 2 * n_outer + n_hole;

        let mut mesh = TriangleMesh::new();
        for z in [0.0, p.thickness] {
            mesh.vertices
                .extend(outer.iter().chain(&hole).map(|q| Point3::new(q.x, q.y, z)));
        }

        for i in 0..n_outer {
            let next = (i + 1) % n_outer;
            let (b, b_next) = (bottom_outer + i, bottom_outer + next);
            let (t, t_next) = (top_outer + i, top_outer + next);
            mesh.indices.push([b, b_next, t_next]);
            mesh.indices.push([b, t_next, t]);
        }
        for i in 0..n_hole {
            let next = (i + 1) % n_hole;
            let (b, b_next) = (bottom_hole + i, bottom_hole + next);
            let (t, t_next) = (top_hole + i, top_hole + next);
            mesh.indices.push([b, t, t_next]);
            mesh.indices.push([b, t_next, b_next]);
        }

        let ring = |start: u32, len: u32| (start..start + len).collect::<Vec<u32>>();
        let bottom = StitchRings::new(
            &ring(bottom_outer, n_outer),
            &ring(bottom_hole, n_hole),
            &mesh.vertices,
            CapFacing::Down,
        )
        .execute()?;
        let top = StitchRings::new(
            &ring(top_outer, n_outer),
            &ring(top_hole, n_hole),
            &mesh.vertices,
            CapFacing::Up,
        )
        .execute()?;
        mesh.indices.extend(bottom);
        mesh.indices.extend(top);

        mesh.translate(Vector3::new(p.offset.x, p.offset.y, 0.0));
        fix_winding(&mut mesh);

        info!(
            vertices = mesh.vertex_count(),
            faces = mesh.triangle_count(),
            "attachment loop created"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::query::MeshAdjacency;

    #[test]
    fn profile_sizes() {
        let op = MakeAttachmentLoop::new(LoopParams::default());
        assert_eq!(op.outer_profile().len(), 35);
        assert_eq!(op.hole_profile().len(), 32);
    }

    #[test]
    fn arc_tops_out_at_length() {
        let op = MakeAttachmentLoop::new(LoopParams::new(10.0, 15.0, 4.0, 2.0));
        let top = op
            .outer_profile()
            .iter()
            .map(|p| p.y)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((top - 15.0).abs() < 1e-9);
    }

    #[test]
    fn default_loop_is_closed_manifold() {
        let mesh = MakeAttachmentLoop::new(LoopParams::new(10.0, 15.0, 4.0, 2.0))
            .execute()
            .unwrap();
        assert_eq!(mesh.vertex_count(), 2 * (35 + 32));
        // 2 per side segment plus one per ring vertex on each cap
        assert_eq!(mesh.triangle_count(), 2 * 35 + 2 * 32 + 2 * 67);
        let adjacency = MeshAdjacency::build(&mesh.indices);
        assert!(adjacency.is_manifold());
        assert!(adjacency.is_watertight());
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn offset_moves_loop() {
        let mesh = MakeAttachmentLoop::new(LoopParams::default().with_offset(20.0, -5.0))
            .execute()
            .unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert!((min.x - 15.0).abs() < 1e-9);
        assert!((max.x - 25.0).abs() < 1e-9);
        assert!((min.y + 5.0).abs() < 1e-9);
        assert!(min.z.abs() < 1e-12);
        assert!((max.z - 2.0).abs() < 1e-12);
    }

    #[test]
    fn too_few_segments_rejected() {
        let params = LoopParams::default().with_segments(1, 32);
        assert!(MakeAttachmentLoop::new(params).execute().is_err());
    }
}
