use geo::{Area, Coord, LineString, MultiPolygon, Polygon};

use super::{Point2, TOLERANCE};
use crate::error::{PolygonError, Result};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the vertices of a closed ring without the repeated closing point
/// and without consecutive duplicates.
#[must_use]
pub fn ring_points(ring: &LineString<f64>) -> Vec<Point2> {
    let mut points: Vec<Point2> = Vec::with_capacity(ring.0.len());
    for c in &ring.0 {
        let p = Point2::new(c.x, c.y);
        if points.last().is_some_and(|last| (last - p).norm() < TOLERANCE) {
            continue;
        }
        points.push(p);
    }
    while points.len() > 1 {
        let (first, last) = (points[0], points[points.len() - 1]);
        if (first - last).norm() < TOLERANCE {
            points.pop();
        } else {
            break;
        }
    }
    points
}

/// Builds a hole-free polygon from an open point loop.
///
/// # Errors
///
/// Returns [`PolygonError::TooFewVertices`] if the loop has fewer than three
/// distinct vertices.
pub fn polygon_from_points(points: &[Point2]) -> Result<Polygon<f64>> {
    let ring = LineString::from(
        points
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect::<Vec<_>>(),
    );
    let distinct = ring_points(&ring).len();
    if distinct < 3 {
        return Err(PolygonError::TooFewVertices(distinct).into());
    }
    Ok(Polygon::new(ring, vec![]))
}

/// Total unsigned area of a set of polygons.
#[must_use]
pub fn total_area(polygons: &[Polygon<f64>]) -> f64 {
    polygons.iter().map(Area::unsigned_area).sum()
}

/// Flattens a multi-polygon into its constituent polygons, dropping empty ones.
#[must_use]
pub fn flatten(multi: MultiPolygon<f64>) -> Vec<Polygon<f64>> {
    multi
        .into_iter()
        .filter(|p| p.exterior().0.len() >= 4)
        .collect()
}
