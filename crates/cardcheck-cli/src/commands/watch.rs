use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use cardcheck_core::compute::{default_backend, ImageBackend};
use cardcheck_core::config::CardCheckConfig;
use cardcheck_core::frame::VideoFrame;
use cardcheck_core::sampler::FrameSource;
use cardcheck_core::session::{CameraSession, SessionEvent};
use clap::Args;
use tracing::info;

use crate::replay::ReplaySource;
use crate::summary::{print_config_summary, print_geometry, print_report, print_state, Styles};

#[derive(Args)]
pub struct WatchArgs {
    /// Directory of frames, replayed in file-name order
    pub dir: PathBuf,

    /// Display container width in pixels
    #[arg(long, default_value = "640")]
    pub container_width: u32,

    /// Stop after this many quality reports
    #[arg(long)]
    pub max_reports: Option<u64>,

    /// Accept the first usable frame and take its crop
    #[arg(long)]
    pub accept: bool,
}

/// How a replay session ended.
pub struct WatchOutcome {
    pub reports: u64,
    pub usable: u64,
    /// Crop of the accepted frame, when `--accept` found a usable one.
    pub accepted: Option<VideoFrame>,
}

pub fn run(args: &WatchArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let replay = Arc::new(ReplaySource::open(&args.dir)?);
    let backend = default_backend();
    print_config_summary(&config, backend.name());
    println!(
        "Replaying {} frames from {}\n",
        replay.frame_count(),
        args.dir.display()
    );

    let outcome = watch(&config, backend, replay, args)?;

    let s = Styles::new();
    println!(
        "\n{} reports, {} usable",
        s.value.apply_to(outcome.reports),
        s.good.apply_to(outcome.usable)
    );
    if args.accept && outcome.accepted.is_none() {
        println!("{}", s.bad.apply_to("No frame was accepted"));
    }
    Ok(())
}

/// Drive a camera session over the replay and print its events until the
/// report limit, the first accepted frame, or the end of the replay.
fn watch(
    config: &CardCheckConfig,
    backend: Arc<dyn ImageBackend>,
    replay: Arc<ReplaySource>,
    args: &WatchArgs,
) -> Result<WatchOutcome> {
    let source: Arc<dyn FrameSource> = replay.clone();
    let (mut session, rx) = CameraSession::new(source, backend, config)?;
    session.on_resize(args.container_width);
    session.on_can_play()?;

    // Long enough that a quiet channel means the replay ran dry.
    let idle_timeout = config.sampling.sample_delay() * 4 + Duration::from_millis(250);
    let s = Styles::new();
    let mut outcome = WatchOutcome {
        reports: 0,
        usable: 0,
        accepted: None,
    };

    loop {
        let event = match rx.recv_timeout(idle_timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) if replay.exhausted() => break,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        match event {
            SessionEvent::AspectRatio(ratio) => {
                println!("  {} {:.4}", s.label.apply_to("aspect ratio:"), ratio);
            }
            SessionEvent::Geometry(g) => print_geometry(&g),
            SessionEvent::StateChanged(state) => print_state(state),
            SessionEvent::Quality(report) => {
                outcome.reports += 1;
                print_report(&report);
                if report.classification.can_capture() {
                    outcome.usable += 1;
                    if args.accept {
                        // Stops sampling, so the replay holds the scored frame.
                        session.on_frame_accepted()?;
                        outcome.accepted = take_crop(&session)?;
                        break;
                    }
                }
                if args.max_reports.is_some_and(|max| outcome.reports >= max) {
                    break;
                }
            }
        }
    }

    session.on_playback_stopped()?;
    Ok(outcome)
}

fn take_crop(session: &CameraSession) -> Result<Option<VideoFrame>> {
    let s = Styles::new();
    let crop = session.capture_crop()?;
    match &crop {
        Some(frame) => {
            info!(
                width = frame.width(),
                height = frame.height(),
                "accepted frame captured"
            );
            println!(
                "  {} crop {}x{}",
                s.good.apply_to("accepted"),
                frame.width(),
                frame.height()
            );
        }
        None => println!("  {}", s.bad.apply_to("no frame to capture")),
    }
    Ok(crop)
}
