/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.114;

/// Height-over-width ratio of an ISO/IEC 7810 ID-1 card.
pub const DEFAULT_TARGET_ASPECT_RATIO: f64 = 1.586;

/// Maximum distance from the target ratio at which the observed ratio snaps.
pub const DEFAULT_ASPECT_RATIO_TOLERANCE: f64 = 0.1;

/// Side length of the square Gaussian kernel applied before measuring extrema.
pub const DEFAULT_KERNEL_SIZE: usize = 19;

/// Delay between two sampling cycles.
pub const DEFAULT_SAMPLE_DELAY_MS: u64 = 500;

/// Laplacian variance below which a frame counts as blurry.
/// Calibrated for the Laplacian of the unblurred 8-bit grayscale image.
pub const DEFAULT_BLUR_THRESHOLD: f64 = 100.0;

/// Darkest blurred intensity at or above which a bright frame counts as glare.
pub const DEFAULT_MIN_INTENSITY_THRESHOLD: u8 = 10;

/// Brightest blurred intensity at or above which a frame may count as glare.
pub const DEFAULT_MAX_INTENSITY_THRESHOLD: u8 = 250;
