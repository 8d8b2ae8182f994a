use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Context, Result};
use cardcheck_core::frame::VideoFrame;
use cardcheck_core::io::{list_frame_files, load_frame};
use cardcheck_core::sampler::FrameSource;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// A directory of still images played back as a camera feed.
///
/// Playback is paced by the sampler: each tick shows the next image, and
/// `current_frame` keeps returning the shown one until the next tick. One
/// tick after the last image the source stops playing.
pub struct ReplaySource {
    frames: Vec<VideoFrame>,
    /// Ticks seen so far, capped one past the last frame.
    ticks: AtomicUsize,
}

impl ReplaySource {
    pub fn open(dir: &Path) -> Result<Self> {
        let files = list_frame_files(dir)
            .with_context(|| format!("Failed to list frames in {}", dir.display()))?;
        if files.is_empty() {
            bail!("No image files found in {}", dir.display());
        }

        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        pb.set_message("Loading frames");

        let mut frames = Vec::with_capacity(files.len());
        for path in &files {
            let frame = load_frame(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            frames.push(frame);
            pb.inc(1);
        }
        pb.finish_and_clear();

        debug!(count = frames.len(), dir = %dir.display(), "replay frames loaded");
        Ok(Self::from_frames(frames))
    }

    pub fn from_frames(frames: Vec<VideoFrame>) -> Self {
        Self {
            frames,
            ticks: AtomicUsize::new(0),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Every frame has been shown and playback has ended.
    pub fn exhausted(&self) -> bool {
        self.ticks.load(Ordering::Acquire) > self.frames.len()
    }
}

impl FrameSource for ReplaySource {
    fn current_frame(&self) -> Option<VideoFrame> {
        let shown = self.ticks.load(Ordering::Acquire).min(self.frames.len());
        shown.checked_sub(1).and_then(|i| self.frames.get(i)).cloned()
    }

    fn native_size(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|f| (f.width(), f.height()))
    }

    fn is_playing(&self) -> bool {
        !self.exhausted()
    }

    fn advance(&self) {
        let len = self.frames.len();
        let _ = self
            .ticks
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |t| {
                (t <= len).then_some(t + 1)
            });
    }
}
