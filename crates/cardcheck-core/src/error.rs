use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardCheckError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidBufferLength { expected: usize, actual: usize },

    #[error("Unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(usize),

    #[error("Invalid Gaussian kernel size {0}: must be odd and positive")]
    InvalidKernelSize(usize),

    #[error("Invalid crop region: {0}")]
    InvalidCrop(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    /// An injected backend found no pixels in a frame that reported a size.
    #[error("Empty frame")]
    EmptyFrame,
}

pub type Result<T> = std::result::Result<T, CardCheckError>;
