mod classify;
mod cleanup;
mod repair;

pub use classify::{ClassifyContours, TracedPolygon};
pub use cleanup::despeckle;
pub use repair::repair_polygon;
