mod make_attachment_loop;
mod make_cuboid;
mod stitch_rings;

pub use make_attachment_loop::MakeAttachmentLoop;
pub use make_cuboid::MakeCuboid;
pub use stitch_rings::{CapFacing, StitchRings};
