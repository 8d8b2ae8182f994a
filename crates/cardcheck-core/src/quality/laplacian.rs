use crate::compute::ImageBackend;
use crate::frame::GrayscaleFrame;

/// Compute Laplacian variance of a grayscale image; higher means sharper.
///
/// The variance is the squared population standard deviation of the
/// Laplacian response over every pixel. A uniform image scores exactly 0.
pub fn laplacian_variance(backend: &dyn ImageBackend, gray: &GrayscaleFrame) -> f64 {
    let response = backend.laplacian(gray);
    let (_, std_dev) = backend.mean_std_dev(&response);
    std_dev * std_dev
}

/// A frame is blurry when its Laplacian variance is below `threshold`.
pub fn is_blurry(variance: f64, threshold: f64) -> bool {
    variance < threshold
}
