use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3};

/// Which way a stitched cap faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapFacing {
    /// Top cap, normal along +Z.
    Up,
    /// Bottom cap, normal along -Z.
    Down,
}

/// Triangulates the annulus between an outer ring and a hole ring.
///
/// The rings may have different vertex counts. Two cursors start at index 0
/// of each ring; every step emits one triangle and advances the cursor whose
/// candidate edge is shorter in the XY plane, comparing (next outer, current
/// hole) against (current outer, next hole). Once a ring is exhausted only the
/// other cursor moves. Exactly `outer.len() + hole.len()` triangles result.
///
/// Both rings are expected counter-clockwise with the hole inside the outer
/// ring; the output is wound to face `facing`.
pub struct StitchRings<'a> {
    outer: &'a [u32],
    hole: &'a [u32],
    positions: &'a [Point3],
    facing: CapFacing,
}

impl<'a> StitchRings<'a> {
    /// Creates a new `StitchRings` operation over vertex indices into `positions`.
    #[must_use]
    pub fn new(
        outer: &'a [u32],
        hole: &'a [u32],
        positions: &'a [Point3],
        facing: CapFacing,
    ) -> Self {
        Self {
            outer,
            hole,
            positions,
            facing,
        }
    }

    /// Executes the stitching.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if either ring is empty or
    /// refers to a vertex outside `positions`.
    pub fn execute(&self) -> Result<Vec<[u32; 3]>> {
        if self.outer.is_empty() || self.hole.is_empty() {
            return Err(OperationError::InvalidInput("cannot stitch an empty ring".into()).into());
        }
        let vertex_count = self.positions.len();
        if let Some(bad) = self
            .outer
            .iter()
            .chain(self.hole)
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(OperationError::InvalidInput(format!(
                "ring vertex {bad} out of range for {vertex_count} positions"
            ))
            .into());
        }

        let (n_o, n_h) = (self.outer.len(), self.hole.len());
        let (mut oi, mut hi) = (0usize, 0usize);
        let mut triangles = Vec::with_capacity(n_o + n_h);

        for _ in 0..n_o + n_h {
            let o_curr = self.outer[oi % n_o];
            let o_next = self.outer[(oi + 1) % n_o];
            let h_curr = self.hole[hi % n_h];
            let h_next = self.hole[(hi + 1) % n_h];

            let advance_outer = if oi >= n_o {
                false
            } else if hi >= n_h {
                true
            } else {
                let dist_o = (self.xy(o_next) - self.xy(h_curr)).norm();
                let dist_h = (self.xy(o_curr) - self.xy(h_next)).norm();
                dist_o < dist_h
            };

            let triangle = if advance_outer {
                oi += 1;
                [o_curr, o_next, h_curr]
            } else {
                hi += 1;
                [o_curr, h_next, h_curr]
            };
            triangles.push(match self.facing {
                CapFacing::Up => triangle,
                CapFacing::Down => [triangle[0], triangle[2], triangle[1]],
            });
        }

        Ok(triangles)
    }

    fn xy(&self, index: u32) -> Point2 {
        let p = self.positions[index as usize];
        Point2::new(p.x, p.y)
    }
}
