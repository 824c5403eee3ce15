pub mod boolean;
pub mod contour;
pub mod creation;
pub mod layers;
#[cfg(feature = "detail")]
pub mod offset;
pub mod query;
pub mod repair;
pub mod shaping;
