use geo::algorithm::orient::{Direction, Orient};
use geo::{Area, Polygon};
use tracing::warn;

use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::operations::layers::LayerOrigin;
use crate::tessellation::{TessellatePolygon, TriangleMesh};

/// Sweeps a polygon with holes straight up from `z = 0` into a closed prism.
pub struct ExtrudePolygon<'a> {
    polygon: &'a Polygon<f64>,
    height: f64,
}

impl<'a> ExtrudePolygon<'a> {
    /// Creates a new `ExtrudePolygon` operation.
    #[must_use]
    pub fn new(polygon: &'a Polygon<f64>, height: f64) -> Self {
        Self { polygon, height }
    }

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the height is not positive,
    /// or a tessellation error if the cap cannot be triangulated.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh> {
        if self.height < TOLERANCE {
            return Err(OperationError::InvalidInput(format!(
                "extrusion height must be positive, got {}",
                self.height
            ))
            .into());
        }

        // Exterior counter-clockwise, holes clockwise: material is always on
        // the left of every ring edge.
        let oriented = self.polygon.orient(Direction::Default);
        let cap = TessellatePolygon::new(&oriented).execute()?;
        if cap.triangles.is_empty() {
            return Err(OperationError::Failed("cap triangulation is empty".into()).into());
        }

        let n = cap.points.len() as u32;
        let mut mesh = TriangleMesh::new();
        mesh.vertices.reserve(cap.points.len() * 2);
        for p in &cap.points {
            mesh.vertices.push(Point3::new(p.x, p.y, 0.0));
        }
        for p in &cap.points {
            mesh.vertices.push(Point3::new(p.x, p.y, self.height));
        }

        for &[a, b, c] in &cap.triangles {
            mesh.indices.push([a, c, b]);
            mesh.indices.push([a + n, b + n, c + n]);
        }

        for ring in &cap.rings {
            let (start, end) = (ring.start as u32, ring.end as u32);
            for a in start..end {
                let b = if a + 1 == end { start } else { a + 1 };
                mesh.indices.push([a, b, b + n]);
                mesh.indices.push([a, b + n, a + n]);
            }
        }

        Ok(mesh)
    }
}

/// Extrudes the merged cross-section of one layer group.
///
/// Each polygon becomes a prism as tall as the group and is lifted to the
/// group's first layer. Polygons below `min_area` are ignored; a polygon that
/// fails to extrude is logged and skipped without affecting its siblings.
pub struct ExtrudeLayers<'a> {
    polygons: &'a [Polygon<f64>],
    origin: LayerOrigin,
    min_area: f64,
}

impl<'a> ExtrudeLayers<'a> {
    /// Creates a new `ExtrudeLayers` operation.
    #[must_use]
    pub fn new(polygons: &'a [Polygon<f64>], origin: LayerOrigin, min_area: f64) -> Self {
        Self {
            polygons,
            origin,
            min_area,
        }
    }

    /// Executes the extrusion, returning one prism per surviving polygon.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Vec<TriangleMesh> {
        let LayerOrigin {
            material,
            start_z,
            end_z,
        } = self.origin;
        let height = (end_z - start_z + 1) as f64;
        let lift = Vector3::new(0.0, 0.0, start_z as f64);

        let mut prisms = Vec::with_capacity(self.polygons.len());
        for polygon in self.polygons {
            let area = polygon.unsigned_area();
            if area < self.min_area {
                continue;
            }
            match ExtrudePolygon::new(polygon, height).execute() {
                Ok(mut prism) => {
                    prism.translate(lift);
                    prisms.push(prism);
                }
                Err(e) => warn!(
                    material,
                    start_z,
                    end_z,
                    area,
                    error = %e,
                    "extrusion failed, skipping polygon"
                ),
            }
        }
        prisms
    }
}
