mod extrude;

pub use extrude::{ExtrudeLayers, ExtrudePolygon};
