use std::collections::HashMap;
use std::ops::Range;

use geo::{Contains, Point, Polygon};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{Result, TessellationError};
use crate::math::polygon_2d::{ring_points, signed_area_2d};
use crate::math::Point2;

/// Triangulation of a polygon with holes.
///
/// `points` holds every ring vertex exactly once, exterior ring first, then
/// each hole; `rings` gives the index range of each ring inside `points`.
/// Triangles are counter-clockwise in the XY plane.
#[derive(Debug, Clone, Default)]
pub struct PolygonTriangulation {
    pub points: Vec<Point2>,
    pub rings: Vec<Range<usize>>,
    pub triangles: Vec<[u32; 3]>,
}

/// Triangulates the interior of a polygon (holes excluded) using a
/// constrained Delaunay triangulation of its rings.
pub struct TessellatePolygon<'a> {
    polygon: &'a Polygon<f64>,
}

impl<'a> TessellatePolygon<'a> {
    /// Creates a new `TessellatePolygon` operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon<f64>) -> Self {
        Self { polygon }
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError`] if a ring is degenerate, a vertex cannot
    /// be inserted, or ring edges cross each other.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<PolygonTriangulation> {
        let mut points = Vec::new();
        let mut rings = Vec::new();
        for ring in std::iter::once(self.polygon.exterior()).chain(self.polygon.interiors()) {
            let ring_pts = ring_points(ring);
            if ring_pts.len() < 3 {
                return Err(TessellationError::InvalidParameters(format!(
                    "ring with {} vertices",
                    ring_pts.len()
                ))
                .into());
            }
            let start = points.len();
            points.extend(ring_pts);
            rings.push(start..points.len());
        }

        let mut cdt = ConstrainedDelaunayTriangulation::<SpadePoint2<f64>>::new();
        // Spade merges coincident inputs, so several ring vertices may share
        // one CDT vertex; the first one inserted owns it.
        let mut owner: HashMap<usize, u32> = HashMap::new();
        for range in &rings {
            let handles = insert_ring(&mut cdt, &points[range.clone()])?;
            for (offset, handle) in handles.iter().enumerate() {
                owner
                    .entry(handle.index())
                    .or_insert((range.start + offset) as u32);
            }
            constrain_loop(&mut cdt, &handles)?;
        }

        let mut triangles = Vec::new();
        for face_handle in cdt.inner_faces() {
            // Constraint edges are the ring edges, so a face lies wholly on
            // one side of the boundary and its centroid decides which.
            let [a, b, c] = face_handle.positions();
            let centroid = Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
            if !self.polygon.contains(&centroid) {
                continue;
            }
            let mut tri = [0u32; 3];
            for (i, vh) in face_handle.vertices().iter().enumerate() {
                tri[i] = *owner.get(&vh.fix().index()).ok_or_else(|| {
                    TessellationError::Failed("triangulation introduced a new vertex".into())
                })?;
            }
            let corners = [
                points[tri[0] as usize],
                points[tri[1] as usize],
                points[tri[2] as usize],
            ];
            if signed_area_2d(&corners) < 0.0 {
                tri.swap(1, 2);
            }
            triangles.push(tri);
        }

        Ok(PolygonTriangulation {
            points,
            rings,
            triangles,
        })
    }
}

type VertexFix = spade::handles::FixedVertexHandle;

fn insert_ring(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    points: &[Point2],
) -> Result<Vec<VertexFix>> {
    let mut handles = Vec::with_capacity(points.len());
    for p in points {
        let h = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }
    Ok(handles)
}

fn constrain_loop(
    cdt: &mut ConstrainedDelaunayTriangulation<SpadePoint2<f64>>,
    handles: &[VertexFix],
) -> Result<()> {
    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed("ring edges intersect".into()).into());
        }
        cdt.add_constraint(from, to);
    }
    Ok(())
}
