use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Result;
use crate::frame::{QualityReport, VideoFrame};
use crate::quality::FrameQualityAnalyzer;

/// A live video source the sampler pulls frames from.
///
/// Shared read-only between the sampler thread and whoever renders the
/// preview; the sampler never mutates it.
pub trait FrameSource: Send + Sync {
    /// Latest frame, or `None` while the camera has nothing to give.
    fn current_frame(&self) -> Option<VideoFrame>;

    /// Native resolution, or `None` before the source is ready.
    fn native_size(&self) -> Option<(u32, u32)>;

    /// Whether the video is currently playing.
    fn is_playing(&self) -> bool;

    /// Called once per sampling tick, before the frame is read. Sources that
    /// play back on demand move to their next frame here; live cameras keep
    /// the default.
    fn advance(&self) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerState {
    Idle,
    Sampling,
}

impl std::fmt::Display for SamplerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Sampling => write!(f, "Sampling"),
        }
    }
}

enum Control {
    Stop,
}

struct Running {
    control: mpsc::Sender<Control>,
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Periodically scores the source's current frame on a worker thread.
///
/// At most one sampling loop exists at a time. Reports are sent over the
/// channel handed to [`start`](Self::start); cycles run strictly one after
/// another, the first one `delay` after starting.
pub struct Sampler {
    source: Arc<dyn FrameSource>,
    analyzer: FrameQualityAnalyzer,
    delay: Duration,
    running: Option<Running>,
}

impl Sampler {
    pub fn new(source: Arc<dyn FrameSource>, analyzer: FrameQualityAnalyzer, delay: Duration) -> Self {
        Self {
            source,
            analyzer,
            delay,
            running: None,
        }
    }

    pub fn state(&self) -> SamplerState {
        if self.running.is_some() {
            SamplerState::Sampling
        } else {
            SamplerState::Idle
        }
    }

    /// Start sampling, publishing each report into `tx`.
    ///
    /// A loop that is already running is stopped first, so the latest call
    /// wins.
    pub fn start<T>(&mut self, tx: mpsc::Sender<T>) -> Result<()>
    where
        T: From<QualityReport> + Send + 'static,
    {
        self.stop();

        let (control_tx, control_rx) = mpsc::channel::<Control>();
        let cancelled = Arc::new(AtomicBool::new(false));

        let source = Arc::clone(&self.source);
        let analyzer = self.analyzer.clone();
        let delay = self.delay;
        let flag = Arc::clone(&cancelled);

        let handle = std::thread::Builder::new()
            .name("cardcheck-sampler".into())
            .spawn(move || {
                sampling_loop(source.as_ref(), &analyzer, delay, &control_rx, &flag, &tx);
            })?;

        debug!(delay_ms = delay.as_millis() as u64, "sampling started");
        self.running = Some(Running {
            control: control_tx,
            cancelled,
            handle,
        });
        Ok(())
    }

    /// Stop sampling and wait for the worker to exit.
    ///
    /// A cycle already in flight finishes (and may publish once); no frame is
    /// captured after this returns.
    pub fn stop(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };
        running.cancelled.store(true, Ordering::Release);
        let _ = running.control.send(Control::Stop);
        if running.handle.join().is_err() {
            warn!("sampler thread panicked");
        }
        debug!("sampling stopped");
    }

    /// Switch to another source. Sampling is stopped.
    pub fn replace_source(&mut self, source: Arc<dyn FrameSource>) {
        self.stop();
        self.source = source;
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn sampling_loop<T>(
    source: &dyn FrameSource,
    analyzer: &FrameQualityAnalyzer,
    delay: Duration,
    control: &mpsc::Receiver<Control>,
    cancelled: &AtomicBool,
    tx: &mpsc::Sender<T>,
) where
    T: From<QualityReport>,
{
    let mut cycle = 0u64;

    loop {
        match control.recv_timeout(delay) {
            Ok(Control::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
        if cancelled.load(Ordering::Acquire) {
            break;
        }
        source.advance();
        if !source.is_playing() {
            debug!("source not playing, skipping cycle");
            continue;
        }
        let Some(frame) = source.current_frame() else {
            debug!("no frame available, skipping cycle");
            continue;
        };

        match analyzer.analyze(&frame) {
            Ok(Some((score, classification))) => {
                cycle += 1;
                let report = QualityReport {
                    cycle,
                    score,
                    classification,
                };
                if tx.send(T::from(report)).is_err() {
                    debug!("report receiver dropped, sampling ends");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "quality cycle failed"),
        }
    }
}
