use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};

/// Removes isolated noise from a binary mask: a morphological close (fills
/// pinholes) followed by an open (drops specks), both with a square
/// structuring element of the given radius.
///
/// A radius of zero returns the image unchanged.
#[must_use]
pub fn despeckle(image: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return image.clone();
    }
    let closed = close(image, Norm::LInf, radius);
    open(&closed, Norm::LInf, radius)
}
