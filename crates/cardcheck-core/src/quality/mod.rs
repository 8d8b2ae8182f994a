pub mod analyzer;
pub mod glare;
pub mod laplacian;

pub use analyzer::FrameQualityAnalyzer;

use crate::config::QualityConfig;
use crate::frame::{Classification, QualityScore};

/// Fixed thresholds a [`QualityScore`] is classified against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub blur: f64,
    pub min_intensity: u8,
    pub max_intensity: u8,
}

impl From<&QualityConfig> for Thresholds {
    fn from(config: &QualityConfig) -> Self {
        Self {
            blur: config.blur_threshold,
            min_intensity: config.min_intensity_threshold,
            max_intensity: config.max_intensity_threshold,
        }
    }
}

impl Thresholds {
    pub fn classify(&self, score: &QualityScore) -> Classification {
        Classification {
            is_blurry: laplacian::is_blurry(score.variance, self.blur),
            is_glare: glare::is_glare(
                score.min_intensity,
                score.max_intensity,
                self.min_intensity,
                self.max_intensity,
            ),
        }
    }
}
