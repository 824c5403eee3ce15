mod compress;

pub use compress::{CompressLayers, LayerGroup, LayerOrigin};
