//! Converts labeled voxel volumes into watertight triangle meshes for
//! multi-material printing.
//!
//! A [`volume::VoxelVolume`] is meshed one material at a time by a
//! [`strategy::Mesher`]: blocky cuboids, smooth extruded contours, or
//! contours with thin features preserved. The
//! [`operations::creation::MakeAttachmentLoop`] operation builds the keychain
//! loop that can be added to a print.

pub mod error;
pub mod math;
pub mod operations;
pub mod params;
pub mod strategy;
pub mod tessellation;
pub mod volume;

pub use error::{Result, VoxmeshError};
