use std::sync::mpsc;
use std::sync::Arc;

use tracing::{debug, info};

use crate::compute::ImageBackend;
use crate::config::CardCheckConfig;
use crate::error::Result;
use crate::frame::{QualityReport, VideoFrame};
use crate::geometry::{AspectRatioSolver, Geometry};
use crate::quality::FrameQualityAnalyzer;
use crate::sampler::{FrameSource, Sampler, SamplerState};

/// Everything a camera session publishes to the UI layer.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Crop ratio solved for the attached source. Once per attach.
    AspectRatio(f64),
    /// Container size and crop offsets after a resize.
    Geometry(Geometry),
    /// One sampling cycle's result.
    Quality(QualityReport),
    /// Sampling started or stopped.
    StateChanged(SamplerState),
}

impl From<QualityReport> for SessionEvent {
    fn from(report: QualityReport) -> Self {
        Self::Quality(report)
    }
}

/// One attached camera: geometry plus the quality sampling loop.
///
/// Sampling runs exactly while the video is playing, the source reports a
/// non-zero size, and no frame has been accepted. Every transition is driven
/// by one of the `on_*` signals.
pub struct CameraSession {
    source: Arc<dyn FrameSource>,
    solver: AspectRatioSolver,
    sampler: Sampler,
    container_width: Option<u32>,
    geometry: Option<Geometry>,
    playing: bool,
    frame_held: bool,
    events: mpsc::Sender<SessionEvent>,
}

impl CameraSession {
    /// Create a session and the receiver its events are published on.
    pub fn new(
        source: Arc<dyn FrameSource>,
        backend: Arc<dyn ImageBackend>,
        config: &CardCheckConfig,
    ) -> Result<(Self, mpsc::Receiver<SessionEvent>)> {
        config.validate()?;
        let analyzer = FrameQualityAnalyzer::new(backend, &config.quality)?;
        let sampler = Sampler::new(
            Arc::clone(&source),
            analyzer,
            config.sampling.sample_delay(),
        );
        let solver = AspectRatioSolver::new(
            config.geometry.target_aspect_ratio,
            config.geometry.aspect_ratio_tolerance,
        );
        let (events, rx) = mpsc::channel();

        Ok((
            Self {
                source,
                solver,
                sampler,
                container_width: None,
                geometry: None,
                playing: false,
                frame_held: false,
                events,
            },
            rx,
        ))
    }

    pub fn state(&self) -> SamplerState {
        self.sampler.state()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.solver.ratio()
    }

    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    pub fn is_frame_held(&self) -> bool {
        self.frame_held
    }

    /// The source became playable. Solves the aspect ratio on the first call
    /// per attach and starts sampling if no frame is held.
    pub fn on_can_play(&mut self) -> Result<()> {
        if let Some((w, h)) = self.ready_size() {
            if let Some(ratio) = self.solver.attach(w, h) {
                info!(width = w, height = h, ratio, "video source ready");
                self.publish(SessionEvent::AspectRatio(ratio));
                self.refresh_geometry();
            }
        }
        self.playing = true;
        self.sync_sampling()
    }

    /// The display container was resized to `width` pixels.
    pub fn on_resize(&mut self, width: u32) {
        self.container_width = Some(width);
        self.refresh_geometry();
    }

    /// The source's native resolution changed.
    pub fn on_source_resized(&mut self) {
        self.refresh_geometry();
    }

    /// The capture collaborator accepted a frame. Sampling stops.
    pub fn on_frame_accepted(&mut self) -> Result<()> {
        self.frame_held = true;
        self.sync_sampling()
    }

    /// The accepted frame was discarded. Sampling resumes if playing.
    pub fn on_frame_cleared(&mut self) -> Result<()> {
        self.frame_held = false;
        self.sync_sampling()
    }

    /// Playback stopped. Sampling stops.
    pub fn on_playback_stopped(&mut self) -> Result<()> {
        self.playing = false;
        self.sync_sampling()
    }

    /// A different video source was attached. Sampling stops and the solved
    /// ratio and geometry are discarded; wait for the next `on_can_play`.
    pub fn on_source_changed(&mut self, source: Arc<dyn FrameSource>) {
        let was_sampling = self.sampler.state() == SamplerState::Sampling;
        self.sampler.replace_source(Arc::clone(&source));
        self.source = source;
        self.solver.reset();
        self.geometry = None;
        self.playing = false;
        if was_sampling {
            self.publish(SessionEvent::StateChanged(SamplerState::Idle));
        }
        debug!("video source changed, geometry reset");
    }

    /// The current frame cut down to the container's crop window, for the
    /// capture collaborator. `None` when no frame or geometry is available.
    pub fn capture_crop(&self) -> Result<Option<VideoFrame>> {
        let Some(frame) = self.source.current_frame() else {
            return Ok(None);
        };
        let Some(window) = self
            .geometry
            .and_then(|g| g.crop_window())
            .and_then(|r| r.clipped(frame.width(), frame.height()))
        else {
            return Ok(None);
        };
        frame.crop(&window).map(Some)
    }

    fn refresh_geometry(&mut self) {
        let Some(width) = self.container_width else {
            return;
        };
        let geometry = Geometry::compute(self.ready_size(), width, self.solver.ratio());
        if self.geometry != Some(geometry) {
            self.geometry = Some(geometry);
            self.publish(SessionEvent::Geometry(geometry));
        }
    }

    fn sync_sampling(&mut self) -> Result<()> {
        let wanted = self.playing && !self.frame_held && self.ready_size().is_some();
        match (wanted, self.sampler.state()) {
            (true, SamplerState::Idle) => {
                self.sampler.start(self.events.clone())?;
                self.publish(SessionEvent::StateChanged(SamplerState::Sampling));
            }
            (false, SamplerState::Sampling) => {
                self.sampler.stop();
                self.publish(SessionEvent::StateChanged(SamplerState::Idle));
            }
            _ => {}
        }
        Ok(())
    }

    /// Native size once the source reports real dimensions. A camera that
    /// is still warming up reports zero and counts as not ready.
    fn ready_size(&self) -> Option<(u32, u32)> {
        self.source
            .native_size()
            .filter(|&(w, h)| w > 0 && h > 0)
    }

        fn publish(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}
