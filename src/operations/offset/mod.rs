mod feature_guard;

pub use feature_guard::{FeatureFate, RescueFeatures};
