use geo::{Buffer, Polygon};
use imageproc::contours::{find_contours, Contour};
use imageproc::geometry::approximate_polygon_dp;
use tracing::{debug, warn};

use super::cleanup::despeckle;
use super::repair::repair_polygon;
use crate::error::{PolygonError, Result};
use crate::math::polygon_2d::{flatten, polygon_from_points, signed_area_2d};
use crate::math::Point2;
use crate::operations::layers::LayerOrigin;
use crate::params::MeshingParams;
use crate::volume::OccupancyMask;

/// A valid polygon traced from a mask, tagged with its role in the nesting.
#[derive(Debug, Clone)]
pub struct TracedPolygon {
    /// Polygon in world XY (Y up).
    pub polygon: Polygon<f64>,
    /// Whether the contour was enclosed by another contour.
    pub is_hole: bool,
    /// Area of the raw traced contour, in px².
    pub pixel_area: f64,
}

/// Traces the boundaries of a binary mask and classifies them as outer
/// boundaries or holes.
///
/// Image row `r` maps to world `y = image_height - 1 - r`.
pub struct ClassifyContours<'a> {
    mask: &'a OccupancyMask,
    image_height: usize,
    params: MeshingParams,
    origin: LayerOrigin,
}

impl<'a> ClassifyContours<'a> {
    /// Creates a new `ClassifyContours` operation.
    #[must_use]
    pub fn new(mask: &'a OccupancyMask, image_height: usize, params: MeshingParams) -> Self {
        Self {
            mask,
            image_height,
            params,
            origin: LayerOrigin::default(),
        }
    }

    /// Tags log output with the material and layers the mask came from.
    #[must_use]
    pub fn with_origin(mut self, origin: LayerOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// Executes tracing and classification.
    ///
    /// Contours that are too small, collapse under approximation, or cannot be
    /// repaired are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the mask cannot be rasterised.
    pub fn execute(&self) -> Result<Vec<TracedPolygon>> {
        let image = despeckle(&self.mask.to_gray_image()?, self.params.morphology_radius);
        let contours = find_contours::<i32>(&image);
        debug!(count = contours.len(), "traced contours");

        let mut polygons = Vec::new();
        for contour in &contours {
            let pixel_area = contour_area(contour);
            if pixel_area < self.params.min_contour_area {
                continue;
            }
            match self.contour_to_polygons(contour, pixel_area) {
                Ok(traced) => polygons.extend(traced),
                Err(e) => warn!(
                    material = self.origin.material,
                    start_z = self.origin.start_z,
                    end_z = self.origin.end_z,
                    area = pixel_area,
                    error = %e,
                    "skipping contour"
                ),
            }
        }
        Ok(polygons)
    }

    fn contour_to_polygons(
        &self,
        contour: &Contour<i32>,
        pixel_area: f64,
    ) -> Result<Vec<TracedPolygon>> {
        let approx = approximate_polygon_dp(&contour.points, self.params.approx_tolerance, true);
        if approx.len() < 3 {
            return Err(PolygonError::TooFewVertices(approx.len()).into());
        }

        let flip = to_f64(self.image_height) - 1.0;
        let points: Vec<Point2> = approx
            .iter()
            .map(|p| Point2::new(f64::from(p.x), flip - f64::from(p.y)))
            .collect();

        let polygon = polygon_from_points(&points)?;
        let mut pieces = repair_polygon(polygon, self.params.min_polygon_area)?;
        if self.params.smooth_expansion > 0.0 {
            pieces = pieces
                .iter()
                .flat_map(|p| flatten(p.buffer(self.params.smooth_expansion)))
                .collect();
        }

        let is_hole = contour.parent.is_some();
        Ok(pieces
            .into_iter()
            .map(|polygon| TracedPolygon {
                polygon,
                is_hole,
                pixel_area,
            })
            .collect())
    }
}

/// Area enclosed by the raw traced contour (pixel centres), in px².
fn contour_area(contour: &Contour<i32>) -> f64 {
    let points: Vec<Point2> = contour
        .points
        .iter()
        .map(|p| Point2::new(f64::from(p.x), f64::from(p.y)))
        .collect();
    signed_area_2d(&points).abs()
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(n: usize) -> f64 {
    n as f64
}
