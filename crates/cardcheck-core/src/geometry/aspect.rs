use tracing::debug;

use crate::consts::{DEFAULT_ASPECT_RATIO_TOLERANCE, DEFAULT_TARGET_ASPECT_RATIO};

/// Choose the crop ratio (height over width) for an observed source size.
///
/// Returns `target` when the observed ratio is within `tolerance` of it and
/// the observed ratio otherwise. A source with a zero dimension has no
/// observable ratio and yields `target`.
pub fn solve(observed_width: u32, observed_height: u32, target: f64, tolerance: f64) -> f64 {
    if observed_width == 0 || observed_height == 0 {
        return target;
    }
    let observed = observed_height as f64 / observed_width as f64;
    if (observed - target).abs() <= tolerance {
        target
    } else {
        observed
    }
}

/// Solves the aspect ratio once per attached video source.
#[derive(Clone, Debug)]
pub struct AspectRatioSolver {
    target: f64,
    tolerance: f64,
    solved: Option<f64>,
}

impl Default for AspectRatioSolver {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_ASPECT_RATIO, DEFAULT_ASPECT_RATIO_TOLERANCE)
    }
}

impl AspectRatioSolver {
    pub fn new(target: f64, tolerance: f64) -> Self {
        Self {
            target,
            tolerance,
            solved: None,
        }
    }

    /// The ratio in effect: the solved one, or the target before any attach.
    pub fn ratio(&self) -> f64 {
        self.solved.unwrap_or(self.target)
    }

    pub fn is_solved(&self) -> bool {
        self.solved.is_some()
    }

    /// Solve for a newly ready source. Later calls keep the first result
    /// until [`reset`](Self::reset) is called.
    ///
    /// Returns `Some(ratio)` only on the call that actually solved.
    pub fn attach(&mut self, observed_width: u32, observed_height: u32) -> Option<f64> {
        if self.solved.is_some() {
            return None;
        }
        let ratio = solve(observed_width, observed_height, self.target, self.tolerance);
        debug!(observed_width, observed_height, ratio, "aspect ratio solved");
        self.solved = Some(ratio);
        Some(ratio)
    }

    /// Forget the solved ratio, e.g. when the video source changes.
    pub fn reset(&mut self) {
        self.solved = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_solves_once() {
        let mut solver = AspectRatioSolver::default();
        assert_eq!(solver.attach(1000, 2000), Some(2.0));
        assert_eq!(solver.attach(1000, 1586), None);
        assert_eq!(solver.ratio(), 2.0);

        solver.reset();
        assert!(!solver.is_solved());
        assert_eq!(solver.ratio(), DEFAULT_TARGET_ASPECT_RATIO);
        assert_eq!(solver.attach(1000, 1600), Some(DEFAULT_TARGET_ASPECT_RATIO));
    }

    #[test]
    fn test_zero_dimension_yields_target() {
        assert_eq!(solve(0, 720, 1.586, 0.1), 1.586);
        assert_eq!(solve(1280, 0, 1.586, 0.1), 1.586);
    }
}
