use geo::{unary_union, Area, Polygon, Validation};

use crate::error::{PolygonError, Result};
use crate::math::polygon_2d::flatten;

/// Repairs a traced polygon so it is valid and non-negligible.
///
/// Invalid polygons (self-intersecting rings, bow-ties) are rebuilt through a
/// self-union, which behaves like a zero-width buffer: the ring is resolved
/// by its winding, so the reversed lobe of a bow-tie is dropped.
///
/// # Errors
///
/// Returns [`PolygonError::InvalidAfterRepair`] if the rebuilt geometry is
/// still invalid, or [`PolygonError::Negligible`] if its total area is below
/// `min_area`.
pub fn repair_polygon(polygon: Polygon<f64>, min_area: f64) -> Result<Vec<Polygon<f64>>> {
    let pieces = if polygon.is_valid() {
        vec![polygon]
    } else {
        let rebuilt = flatten(unary_union(std::iter::once(&polygon)));
        if rebuilt.is_empty() || !rebuilt.iter().all(Validation::is_valid) {
            return Err(PolygonError::InvalidAfterRepair.into());
        }
        rebuilt
    };

    let area: f64 = pieces.iter().map(Area::unsigned_area).sum();
    if area < min_area {
        return Err(PolygonError::Negligible(area).into());
    }
    Ok(pieces)
}
