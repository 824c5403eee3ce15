mod merge;

pub use merge::MergePolygons;
