use image::DynamicImage;
use ndarray::{s, Array2, Array3};

use crate::error::{CardCheckError, Result};
use crate::geometry::CropRect;

/// An immutable snapshot of one video frame.
/// Pixels are 8-bit RGB or RGBA, row-major, shape = (height, width, channels).
#[derive(Clone, Debug, PartialEq)]
pub struct VideoFrame {
    data: Array3<u8>,
}

impl VideoFrame {
    /// Build a frame from interleaved RGBA bytes.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        Self::from_raw(width, height, 4, pixels)
    }

    /// Build a frame from interleaved RGB bytes.
    pub fn from_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        Self::from_raw(width, height, 3, pixels)
    }

    /// Build a frame from interleaved bytes with 3 or 4 channels per pixel.
    ///
    /// A zero-sized frame is allowed: a camera that has not warmed up yet
    /// reports one, and the analyzer skips it.
    pub fn from_raw(width: u32, height: u32, channels: usize, pixels: Vec<u8>) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(CardCheckError::UnsupportedChannels(channels));
        }
        let expected = width as usize * height as usize * channels;
        if pixels.len() != expected {
            return Err(CardCheckError::InvalidBufferLength {
                expected,
                actual: pixels.len(),
            });
        }
        let data = Array3::from_shape_vec((height as usize, width as usize, channels), pixels)
            .map_err(|_| CardCheckError::InvalidDimensions { width, height })?;
        Ok(Self { data })
    }

    /// Convert a decoded image into an RGBA frame.
    pub fn from_image(img: &DynamicImage) -> Result<Self> {
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.data.dim().1 as u32
    }

    pub fn height(&self) -> u32 {
        self.data.dim().0 as u32
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// True when the frame has no pixels at all.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// RGB triple at (row, col). Alpha, if present, is ignored.
    pub fn rgb(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    /// Copy the pixels inside `rect` into a new frame.
    pub fn crop(&self, rect: &CropRect) -> Result<VideoFrame> {
        let r = rect.validated(self.width(), self.height())?;
        let (x, y) = (r.x as usize, r.y as usize);
        let (w, h) = (r.width as usize, r.height as usize);
        let data = self.data.slice(s![y..y + h, x..x + w, ..]).to_owned();
        Ok(VideoFrame { data })
    }
}

/// Single-channel 8-bit intensity image with the dimensions of its source frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayscaleFrame {
    /// Intensity data, row-major, shape = (height, width)
    pub data: Array2<u8>,
}

impl GrayscaleFrame {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }
}

/// Raw measurements of one analysis cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityScore {
    /// Variance of the Laplacian response. Low means few strong edges.
    pub variance: f64,
    /// Darkest value of the blurred grayscale image.
    pub min_intensity: u8,
    /// Brightest value of the blurred grayscale image.
    pub max_intensity: u8,
}

/// Threshold verdict derived from a [`QualityScore`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub is_blurry: bool,
    pub is_glare: bool,
}

impl Classification {
    /// Whether the frame may be accepted. Either flag disables capture.
    pub fn can_capture(&self) -> bool {
        !self.is_blurry && !self.is_glare
    }
}

/// Snapshot published once per sampling cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityReport {
    /// Index of the cycle within its sampling run, starting at 1.
    pub cycle: u64,
    pub score: QualityScore,
    pub classification: Classification,
}
