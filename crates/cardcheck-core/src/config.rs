use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ASPECT_RATIO_TOLERANCE, DEFAULT_BLUR_THRESHOLD, DEFAULT_KERNEL_SIZE,
    DEFAULT_MAX_INTENSITY_THRESHOLD, DEFAULT_MIN_INTENSITY_THRESHOLD, DEFAULT_SAMPLE_DELAY_MS,
    DEFAULT_TARGET_ASPECT_RATIO,
};
use crate::error::{CardCheckError, Result};

/// Every tunable of the card checker, loadable from TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardCheckConfig {
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub quality: QualityConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
}

impl CardCheckConfig {
    /// Parse and validate a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.quality.validate()?;
        self.sampling.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Card ratio (height over width) the observed ratio snaps to.
    pub target_aspect_ratio: f64,
    /// Maximum distance from the target at which snapping happens.
    pub aspect_ratio_tolerance: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            target_aspect_ratio: DEFAULT_TARGET_ASPECT_RATIO,
            aspect_ratio_tolerance: DEFAULT_ASPECT_RATIO_TOLERANCE,
        }
    }
}

impl GeometryConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.target_aspect_ratio.is_finite() && self.target_aspect_ratio > 0.0) {
            return Err(CardCheckError::InvalidConfig(format!(
                "target_aspect_ratio must be positive, got {}",
                self.target_aspect_ratio
            )));
        }
        if !(self.aspect_ratio_tolerance.is_finite() && self.aspect_ratio_tolerance >= 0.0) {
            return Err(CardCheckError::InvalidConfig(format!(
                "aspect_ratio_tolerance must be non-negative, got {}",
                self.aspect_ratio_tolerance
            )));
        }
        Ok(())
    }
}

/// Which grayscale image the Laplacian is taken of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaplacianSource {
    /// The unblurred grayscale frame.
    #[default]
    Grayscale,
    /// The Gaussian-blurred grayscale frame. Variances are much lower, so
    /// `blur_threshold` needs recalibrating (single digits).
    Blurred,
}

impl std::fmt::Display for LaplacianSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grayscale => write!(f, "Grayscale"),
            Self::Blurred => write!(f, "Blurred"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Gaussian kernel side length, odd.
    pub kernel_size: usize,
    /// Laplacian variance below which a frame is blurry.
    pub blur_threshold: f64,
    /// Glare needs the darkest blurred value at or above this.
    pub min_intensity_threshold: u8,
    /// Glare needs the brightest blurred value at or above this.
    pub max_intensity_threshold: u8,
    pub laplacian_source: LaplacianSource,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_KERNEL_SIZE,
            blur_threshold: DEFAULT_BLUR_THRESHOLD,
            min_intensity_threshold: DEFAULT_MIN_INTENSITY_THRESHOLD,
            max_intensity_threshold: DEFAULT_MAX_INTENSITY_THRESHOLD,
            laplacian_source: LaplacianSource::default(),
        }
    }
}

impl QualityConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kernel_size == 0 || self.kernel_size % 2 == 0 {
            return Err(CardCheckError::InvalidKernelSize(self.kernel_size));
        }
        if !(self.blur_threshold.is_finite() && self.blur_threshold >= 0.0) {
            return Err(CardCheckError::InvalidConfig(format!(
                "blur_threshold must be non-negative, got {}",
                self.blur_threshold
            )));
        }
        if self.min_intensity_threshold > self.max_intensity_threshold {
            return Err(CardCheckError::InvalidConfig(format!(
                "min_intensity_threshold ({}) exceeds max_intensity_threshold ({})",
                self.min_intensity_threshold, self.max_intensity_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Delay between two sampling cycles, in milliseconds.
    pub sample_delay_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_delay_ms: DEFAULT_SAMPLE_DELAY_MS,
        }
    }
}

impl SamplingConfig {
    pub fn sample_delay(&self) -> Duration {
        Duration::from_millis(self.sample_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_delay_ms == 0 {
            return Err(CardCheckError::InvalidConfig(
                "sample_delay_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}
