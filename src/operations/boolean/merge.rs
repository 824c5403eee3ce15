use geo::{unary_union, BooleanOps, MultiPolygon, Polygon};

use crate::math::polygon_2d::flatten;
use crate::operations::contour::TracedPolygon;

/// Combines classified polygons into the material's cross-section.
///
/// Outer boundaries are unioned; every hole is then subtracted from the
/// union in turn. With no outer boundaries the result is empty no matter how
/// many holes there are.
pub struct MergePolygons<'a> {
    polygons: &'a [TracedPolygon],
}

impl<'a> MergePolygons<'a> {
    /// Creates a new `MergePolygons` operation.
    #[must_use]
    pub fn new(polygons: &'a [TracedPolygon]) -> Self {
        Self { polygons }
    }

    /// Executes the merge, returning a flat list of polygons with holes.
    #[must_use]
    pub fn execute(&self) -> Vec<Polygon<f64>> {
        let (holes, outers): (Vec<&TracedPolygon>, Vec<&TracedPolygon>) =
            self.polygons.iter().partition(|p| p.is_hole);

        let merged = match outers.as_slice() {
            [] => return Vec::new(),
            [single] => MultiPolygon::new(vec![single.polygon.clone()]),
            many => unary_union(many.iter().map(|p| &p.polygon)),
        };

        let merged = holes
            .iter()
            .fold(merged, |acc, hole| {
                acc.difference(&MultiPolygon::new(vec![hole.polygon.clone()]))
            });

        flatten(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::total_area;
    use geo::{Area, LineString};

    fn square(x: f64, y: f64, size: f64, is_hole: bool) -> TracedPolygon {
        TracedPolygon {
            polygon: Polygon::new(
                LineString::from(vec![
                    (x, y),
                    (x + size, y),
                    (x + size, y + size),
                    (x, y + size),
                    (x, y),
                ]),
                vec![],
            ),
            is_hole,
            pixel_area: size * size,
        }
    }

    #[test]
    fn no_outers_means_empty_regardless_of_holes() {
        let polys = vec![square(0.0, 0.0, 5.0, true), square(1.0, 1.0, 2.0, true)];
        assert!(MergePolygons::new(&polys).execute().is_empty());
        assert!(MergePolygons::new(&[]).execute().is_empty());
    }

    #[test]
    fn single_outer_is_identity() {
        let polys = vec![square(0.0, 0.0, 4.0, false)];
        let merged = MergePolygons::new(&polys).execute();
        assert_eq!(merged.len(), 1);
        assert!((merged[0].unsigned_area() - 16.0).abs() < 1e-9);
    }

    #[test]
    fn union_is_at_least_each_constituent() {
        let polys = vec![
            square(0.0, 0.0, 4.0, false),
            square(2.0, 2.0, 4.0, false),
            square(10.0, 0.0, 3.0, false),
        ];
        let merged = MergePolygons::new(&polys).execute();
        let area = total_area(&merged);
        for p in &polys {
            assert!(area + 1e-9 >= p.polygon.unsigned_area());
        }
        // Two overlapping squares fuse, the distant one stays separate
        assert_eq!(merged.len(), 2);
        assert!((area - (16.0 + 16.0 - 4.0 + 9.0)).abs() < 1e-4);
    }

    #[test]
    fn holes_are_subtracted() {
        let polys = vec![square(0.0, 0.0, 10.0, false), square(2.0, 2.0, 4.0, true)];
        let merged = MergePolygons::new(&polys).execute();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].interiors().len(), 1);
        assert!((total_area(&merged) - 84.0).abs() < 1e-4);
    }

    #[test]
    fn hole_splitting_region_yields_multiple_polygons() {
        let mut bar = square(0.0, 0.0, 9.0, false);
        bar.polygon = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (9.0, 0.0), (9.0, 3.0), (0.0, 3.0), (0.0, 0.0)]),
            vec![],
        );
        let slot = vec![(4.0, -1.0), (5.0, -1.0), (5.0, 4.0), (4.0, 4.0), (4.0, -1.0)];
        let cut = TracedPolygon {
            polygon: Polygon::new(LineString::from(slot), vec![]),
            is_hole: true,
            pixel_area: 5.0,
        };
        let merged = MergePolygons::new(&[bar, cut]).execute();
        assert_eq!(merged.len(), 2);
    }
}
