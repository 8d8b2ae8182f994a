pub mod cpu;

use std::sync::Arc;

use ndarray::Array2;

use crate::error::Result;
use crate::frame::{GrayscaleFrame, VideoFrame};

pub use cpu::CpuBackend;

/// Image-processing operations the quality analyzer is built on.
///
/// The analyzer receives a backend at construction, so alternative
/// implementations (or instrumented ones in tests) can be swapped in.
/// Every operation returns a new grid and leaves its input untouched.
pub trait ImageBackend: Send + Sync {
    /// Human-readable backend name for logs.
    fn name(&self) -> &str;

    /// Luma-weighted RGB to single-channel conversion.
    fn to_grayscale(&self, frame: &VideoFrame) -> GrayscaleFrame;

    /// Gaussian blur with a square `kernel_size` x `kernel_size` kernel.
    /// Sigma is derived from the kernel size.
    fn gaussian_blur(&self, gray: &GrayscaleFrame, kernel_size: usize) -> Result<GrayscaleFrame>;

    /// Discrete Laplacian (second-derivative) response.
    fn laplacian(&self, gray: &GrayscaleFrame) -> Array2<f64>;

    /// Population mean and standard deviation over every element.
    /// An empty grid yields `(0.0, 0.0)`.
    fn mean_std_dev(&self, data: &Array2<f64>) -> (f64, f64);

    /// Global minimum and maximum intensity, or `None` for an empty image.
    fn min_max(&self, gray: &GrayscaleFrame) -> Option<(u8, u8)>;
}

/// The backend used when the caller does not inject one.
pub fn default_backend() -> Arc<dyn ImageBackend> {
    Arc::new(CpuBackend)
}
