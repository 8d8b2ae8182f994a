use crate::compute::ImageBackend;
use crate::frame::GrayscaleFrame;

/// Darkest and brightest value of a (blurred) grayscale image.
pub fn intensity_extrema(backend: &dyn ImageBackend, blurred: &GrayscaleFrame) -> Option<(u8, u8)> {
    backend.min_max(blurred)
}

/// Glare means the whole frame is washed out: the brightest region is near
/// saturation *and* even the darkest region stays bright. A frame with a
/// saturated highlight next to genuinely dark areas is normal contrast.
pub fn is_glare(min: u8, max: u8, min_threshold: u8, max_threshold: u8) -> bool {
    max >= max_threshold && min >= min_threshold
}
