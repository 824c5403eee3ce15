use thiserror::Error;

/// Top-level error type for the voxel meshing pipeline.
#[derive(Debug, Error)]
pub enum VoxmeshError {
    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error(transparent)]
    Polygon(#[from] PolygonError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to voxel volume construction and access.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("volume data has {actual} cells, expected {expected} ({depth}x{height}x{width})")]
    ShapeMismatch {
        depth: usize,
        height: usize,
        width: usize,
        expected: usize,
        actual: usize,
    },

    #[error("layer {layer} is ragged: expected {expected} cells, got {actual}")]
    RaggedLayer {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    #[error("dimension {0} exceeds the supported image size")]
    TooLarge(usize),
}

/// Errors related to 2D polygon construction and repair.
#[derive(Debug, Error)]
pub enum PolygonError {
    #[error("ring has {0} distinct vertices, at least 3 are required")]
    TooFewVertices(usize),

    #[error("polygon is still invalid after repair")]
    InvalidAfterRepair,

    #[error("polygon area {0} is below the minimum")]
    Negligible(f64),
}

/// Errors related to meshing operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation input: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`VoxmeshError`].
pub type Result<T> = std::result::Result<T, VoxmeshError>;
