use tracing::warn;

use super::pipeline::ContourPipeline;
use super::Mesher;
use crate::params::MeshingParams;
use crate::tessellation::TriangleMesh;
use crate::volume::{MaterialId, VoxelVolume};

/// Whether thin-feature segmentation can run in this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationSupport {
    /// The feature guard is compiled in.
    Available,
    /// The feature guard is missing; detail meshing degrades to smooth.
    Unavailable,
}

impl SegmentationSupport {
    /// Support provided by the current build (the `detail` cargo feature).
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(feature = "detail") {
            Self::Available
        } else {
            Self::Unavailable
        }
    }
}

impl Default for SegmentationSupport {
    fn default() -> Self {
        Self::detect()
    }
}

/// Detail-preserving strategy: the smooth pipeline with thin features
/// rescued before merging, so one-pixel strokes survive into the print.
///
/// Without segmentation support it behaves exactly like
/// [`SmoothMesher`](super::SmoothMesher) and reports the fallback.
#[derive(Debug, Clone, Copy)]
pub struct DetailMesher {
    params: MeshingParams,
    support: SegmentationSupport,
}

impl DetailMesher {
    /// Creates a detail mesher.
    ///
    /// Support claimed by the caller is ignored when the build lacks the
    /// `detail` feature.
    #[must_use]
    pub fn new(params: MeshingParams, support: SegmentationSupport) -> Self {
        let support = match (support, SegmentationSupport::detect()) {
            (SegmentationSupport::Available, SegmentationSupport::Available) => {
                SegmentationSupport::Available
            }
            _ => {
                warn!("segmentation support unavailable, falling back to smooth meshing");
                SegmentationSupport::Unavailable
            }
        };
        Self { params, support }
    }

    /// Whether this mesher is running as the smooth fallback.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.support == SegmentationSupport::Unavailable
    }
}

impl Default for DetailMesher {
    fn default() -> Self {
        Self::new(MeshingParams::default(), SegmentationSupport::detect())
    }
}

impl Mesher for DetailMesher {
    fn name(&self) -> &'static str {
        if self.is_fallback() {
            "smooth"
        } else {
            "detail"
        }
    }

    fn generate_mesh(
        &self,
        volume: &VoxelVolume,
        material: MaterialId,
        height_px: usize,
    ) -> Option<TriangleMesh> {
        ContourPipeline {
            params: self.params,
            guard_features: !self.is_fallback(),
        }
        .run(self.name(), volume, material, height_px)
    }
}
