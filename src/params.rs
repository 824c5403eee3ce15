//! Tunable constants for the meshing pipelines and the attachment loop.
//!
//! The defaults were chosen empirically against real prints; override them
//! through the `with_*` setters rather than editing the values in place.

use crate::math::Vector2;

/// Parameters shared by the cuboid, smooth, and detail-preserving strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshingParams {
    /// Douglas-Peucker tolerance applied to traced contours, in pixels.
    pub approx_tolerance: f64,
    /// Traced contours enclosing less area than this (px²) are discarded.
    pub min_contour_area: f64,
    /// Polygons below this area after validity repair are dropped.
    pub min_polygon_area: f64,
    /// Merged polygons below this area are not extruded.
    pub min_extrude_area: f64,
    /// Narrowest feature, in pixels, that survives later smoothing unaided.
    pub min_feature_width: f64,
    /// Extra outward distance added on top of half the feature width when a
    /// fragile feature is rescued.
    pub rescue_margin: f64,
    /// Uniform outward expansion for features that need no rescue.
    pub normal_expansion: f64,
    /// Mitre limit used by both rescue and normal expansion, as the ratio of
    /// mitre length to offset distance.
    pub mitre_limit: f64,
    /// Inward shrink of every cuboid face, in voxels.
    pub cuboid_shrink: f64,
    /// Outward expansion the smooth strategy applies to every polygon.
    pub smooth_expansion: f64,
    /// Distance under which vertices are welded together.
    pub weld_epsilon: f64,
    /// Faces with less area than this are dropped after welding.
    pub degenerate_area: f64,
    /// Radius of the square structuring element used for mask cleanup
    /// (1 gives a 3x3 kernel, 0 disables cleanup).
    pub morphology_radius: u8,
}

impl Default for MeshingParams {
    fn default() -> Self {
        Self {
            approx_tolerance: 0.1,
            min_contour_area: 4.0,
            min_polygon_area: 0.01,
            min_extrude_area: 0.01,
            min_feature_width: 4.0,
            rescue_margin: 0.5,
            normal_expansion: 0.5,
            mitre_limit: 5.0,
            cuboid_shrink: 0.05,
            smooth_expansion: 6.0,
            weld_epsilon: 1e-8,
            degenerate_area: 1e-12,
            morphology_radius: 1,
        }
    }
}

impl MeshingParams {
    /// Set the contour approximation tolerance.
    #[must_use]
    pub fn with_approx_tolerance(mut self, tolerance: f64) -> Self {
        self.approx_tolerance = tolerance;
        self
    }

    /// Set the minimum traced contour area.
    #[must_use]
    pub fn with_min_contour_area(mut self, area: f64) -> Self {
        self.min_contour_area = area;
        self
    }

    /// Set the minimum feature width protected by the detail strategy.
    #[must_use]
    pub fn with_min_feature_width(mut self, width: f64) -> Self {
        self.min_feature_width = width;
        self
    }

    /// Set the rescue margin.
    #[must_use]
    pub fn with_rescue_margin(mut self, margin: f64) -> Self {
        self.rescue_margin = margin;
        self
    }

    /// Set the uniform expansion for non-fragile features.
    #[must_use]
    pub fn with_normal_expansion(mut self, distance: f64) -> Self {
        self.normal_expansion = distance;
        self
    }

    /// Set the cuboid shrink factor.
    #[must_use]
    pub fn with_cuboid_shrink(mut self, shrink: f64) -> Self {
        self.cuboid_shrink = shrink;
        self
    }

    /// Set the smooth-strategy expansion.
    #[must_use]
    pub fn with_smooth_expansion(mut self, distance: f64) -> Self {
        self.smooth_expansion = distance;
        self
    }

    /// Set the morphology kernel radius.
    #[must_use]
    pub fn with_morphology_radius(mut self, radius: u8) -> Self {
        self.morphology_radius = radius;
        self
    }

    /// Distance a fragile feature is dilated by when rescued.
    #[must_use]
    pub fn rescue_distance(&self) -> f64 {
        self.min_feature_width / 2.0 + self.rescue_margin
    }

    /// Smallest corner angle, in radians, that still receives a sharp mitre.
    ///
    /// A corner of interior angle `θ` has mitre ratio `1 / sin(θ / 2)`, so
    /// corners sharper than this angle are bevelled instead.
    #[must_use]
    pub fn mitre_angle(&self) -> f64 {
        2.0 * (1.0 / self.mitre_limit.max(1.0)).asin()
    }
}

/// Dimensions of a keychain attachment loop, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopParams {
    /// Overall width of the loop.
    pub width: f64,
    /// Length from the attachment edge to the top of the arc.
    pub length: f64,
    /// Requested hole diameter (clamped so the hole never breaches the wall).
    pub hole_diameter: f64,
    /// Extrusion thickness.
    pub thickness: f64,
    /// Translation applied to the finished loop.
    pub offset: Vector2,
    /// Segments in the semicircular arc of the outer profile.
    pub arc_segments: usize,
    /// Segments in the circular hole.
    pub hole_segments: usize,
    /// Largest hole radius as a fraction of the outer half-width.
    pub max_hole_ratio: f64,
    /// Lower bound on the straight section below the arc.
    pub min_rect_height: f64,
}

impl Default for LoopParams {
    fn default() -> Self {
        Self {
            width: 10.0,
            length: 15.0,
            hole_diameter: 4.0,
            thickness: 2.0,
            offset: Vector2::zeros(),
            arc_segments: 32,
            hole_segments: 32,
            max_hole_ratio: 0.8,
            min_rect_height: 0.2,
        }
    }
}

impl LoopParams {
    /// Creates loop parameters with the given dimensions and default tessellation.
    #[must_use]
    pub fn new(width: f64, length: f64, hole_diameter: f64, thickness: f64) -> Self {
        Self {
            width,
            length,
            hole_diameter,
            thickness,
            ..Self::default()
        }
    }

    /// Set the attachment offset.
    #[must_use]
    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Vector2::new(x, y);
        self
    }

    /// Set the arc and hole segment counts.
    #[must_use]
    pub fn with_segments(mut self, arc_segments: usize, hole_segments: usize) -> Self {
        self.arc_segments = arc_segments;
        self.hole_segments = hole_segments;
        self
    }

    /// Radius of the outer arc.
    #[must_use]
    pub fn arc_radius(&self) -> f64 {
        self.width / 2.0
    }

    /// Effective hole radius after clamping against the outer wall.
    #[must_use]
    pub fn hole_radius(&self) -> f64 {
        (self.hole_diameter / 2.0).min(self.arc_radius() * self.max_hole_ratio)
    }

    /// Height of the straight section, which is also the arc centre's y.
    #[must_use]
    pub fn rect_height(&self) -> f64 {
        self.min_rect_height.max(self.length - self.arc_radius())
    }
}
