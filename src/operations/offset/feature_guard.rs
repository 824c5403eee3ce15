use geo::algorithm::buffer::{BufferStyle, LineJoin};
use geo::{Area, Buffer, Polygon};
use tracing::{debug, info};

use crate::math::polygon_2d::flatten;
use crate::operations::contour::TracedPolygon;
use crate::params::MeshingParams;

/// How a polygon was treated by [`RescueFeatures`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFate {
    /// Narrower than the minimum feature width; dilated to survive.
    Rescued,
    /// Wide enough; given the small uniform expansion only.
    Expanded,
}

/// Protects features narrower than the minimum feature width.
///
/// Each polygon is tested by eroding it by half the minimum width. If nothing
/// meaningful survives, the feature would vanish under later smoothing, so it
/// is dilated by half the width plus a margin with mitred joins. Otherwise it
/// only receives the uniform expansion that compensates for contour tracing
/// running through pixel centres. The decision is made once per polygon.
pub struct RescueFeatures {
    params: MeshingParams,
}

impl RescueFeatures {
    /// Creates a new `RescueFeatures` operation.
    #[must_use]
    pub fn new(params: MeshingParams) -> Self {
        Self { params }
    }

    /// Decides whether `polygon` needs rescuing.
    #[must_use]
    pub fn classify(&self, polygon: &Polygon<f64>) -> FeatureFate {
        let eroded = polygon.buffer(-self.params.min_feature_width / 2.0);
        if eroded.0.is_empty() || eroded.unsigned_area() < self.params.min_polygon_area {
            FeatureFate::Rescued
        } else {
            FeatureFate::Expanded
        }
    }

    /// Buffers a single polygon according to its fate.
    #[must_use]
    pub fn apply(&self, polygon: &Polygon<f64>) -> (FeatureFate, Vec<Polygon<f64>>) {
        let fate = self.classify(polygon);
        let distance = match fate {
            FeatureFate::Rescued => self.params.rescue_distance(),
            FeatureFate::Expanded => self.params.normal_expansion,
        };
        let style =
            BufferStyle::new(distance).line_join(LineJoin::Miter(self.params.mitre_angle()));
        (fate, flatten(polygon.buffer_with_style(style)))
    }

    /// Executes the rescue pass over traced polygons, preserving hole flags.
    #[must_use]
    pub fn execute(&self, polygons: Vec<TracedPolygon>) -> Vec<TracedPolygon> {
        let mut rescued = 0usize;
        let mut out = Vec::with_capacity(polygons.len());
        for traced in polygons {
            let (fate, buffered) = self.apply(&traced.polygon);
            if fate == FeatureFate::Rescued {
                rescued += 1;
                info!(area = traced.pixel_area, "rescued thin feature");
            }
            out.extend(buffered.into_iter().map(|polygon| TracedPolygon {
                polygon,
                is_hole: traced.is_hole,
                pixel_area: traced.pixel_area,
            }));
        }
        debug!(rescued, total = out.len(), "feature guard finished");
        out
    }
}
