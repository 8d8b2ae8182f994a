use std::sync::Arc;

use tracing::debug;

use crate::compute::{default_backend, ImageBackend};
use crate::config::{LaplacianSource, QualityConfig};
use crate::error::{CardCheckError, Result};
use crate::frame::{Classification, QualityScore, VideoFrame};

use super::glare::intensity_extrema;
use super::laplacian::laplacian_variance;
use super::Thresholds;

/// Scores single frames for sharpness and glare.
///
/// Stateless between calls: every grid derived from a frame (grayscale,
/// blurred, Laplacian response) lives only for the duration of one call.
#[derive(Clone)]
pub struct FrameQualityAnalyzer {
    backend: Arc<dyn ImageBackend>,
    kernel_size: usize,
    laplacian_source: LaplacianSource,
    thresholds: Thresholds,
}

impl std::fmt::Debug for FrameQualityAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameQualityAnalyzer")
            .field("backend", &self.backend.name())
            .field("kernel_size", &self.kernel_size)
            .field("laplacian_source", &self.laplacian_source)
            .field("thresholds", &self.thresholds)
            .finish()
    }
}

impl FrameQualityAnalyzer {
    /// Build an analyzer over an injected backend. The config is validated.
    pub fn new(backend: Arc<dyn ImageBackend>, config: &QualityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backend,
            kernel_size: config.kernel_size,
            laplacian_source: config.laplacian_source,
            thresholds: Thresholds::from(config),
        })
    }

    /// Build an analyzer on the CPU backend.
    pub fn with_default_backend(config: &QualityConfig) -> Result<Self> {
        Self::new(default_backend(), config)
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Measure a frame. Returns `Ok(None)` for a zero-sized frame.
    pub fn score(&self, frame: &VideoFrame) -> Result<Option<QualityScore>> {
        if frame.is_empty() {
            debug!(
                width = frame.width(),
                height = frame.height(),
                "skipping empty frame"
            );
            return Ok(None);
        }

        let backend = self.backend.as_ref();
        let gray = backend.to_grayscale(frame);
        let blurred = backend.gaussian_blur(&gray, self.kernel_size)?;

        let variance = match self.laplacian_source {
            LaplacianSource::Grayscale => laplacian_variance(backend, &gray),
            LaplacianSource::Blurred => laplacian_variance(backend, &blurred),
        };
        let (min_intensity, max_intensity) =
            intensity_extrema(backend, &blurred).ok_or(CardCheckError::EmptyFrame)?;

        Ok(Some(QualityScore {
            variance,
            min_intensity,
            max_intensity,
        }))
    }

    pub fn classify(&self, score: &QualityScore) -> Classification {
        self.thresholds.classify(score)
    }

    /// Measure and classify a frame. Returns `Ok(None)` for a zero-sized frame.
    pub fn analyze(&self, frame: &VideoFrame) -> Result<Option<(QualityScore, Classification)>> {
        Ok(self
            .score(frame)?
            .map(|score| (score, self.classify(&score))))
    }
}
