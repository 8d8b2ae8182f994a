#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use cardcheck_core::frame::VideoFrame;
use cardcheck_core::sampler::FrameSource;

/// RGBA frame filled with one color.
pub fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> VideoFrame {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        pixels.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    VideoFrame::from_rgba(width, height, pixels).expect("valid solid frame")
}

/// Black/white checkerboard with square cells of `cell` pixels.
pub fn checkerboard_frame(width: u32, height: u32, cell: u32) -> VideoFrame {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for row in 0..height {
        for col in 0..width {
            let v = if (row / cell + col / cell) % 2 == 0 { 255 } else { 0 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    VideoFrame::from_rgba(width, height, pixels).expect("valid checkerboard frame")
}

/// White frame with a black square of side `block` in the top-left corner.
pub fn white_with_dark_corner(width: u32, height: u32, block: u32) -> VideoFrame {
    let mut pixels = Vec::with_capacity((width * height * 3) as usize);
    for row in 0..height {
        for col in 0..width {
            let v = if row < block && col < block { 0 } else { 255 };
            pixels.extend_from_slice(&[v, v, v]);
        }
    }
    VideoFrame::from_rgb(width, height, pixels).expect("valid frame")
}

/// Frame source that always returns the same frame and counts captures
/// and sampling ticks.
pub struct CountingSource {
    frame: VideoFrame,
    playing: AtomicBool,
    captures: AtomicUsize,
    ticks: AtomicUsize,
}

impl CountingSource {
    pub fn new(frame: VideoFrame) -> Self {
        Self {
            frame,
            playing: AtomicBool::new(true),
            captures: AtomicUsize::new(0),
            ticks: AtomicUsize::new(0),
        }
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }

    pub fn ticks(&self) -> usize {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::SeqCst);
    }
}

impl FrameSource for CountingSource {
    fn current_frame(&self) -> Option<VideoFrame> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        Some(self.frame.clone())
    }

    fn native_size(&self) -> Option<(u32, u32)> {
        Some((self.frame.width(), self.frame.height()))
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn advance(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }
}

/// Frame source whose frame can be swapped or withheld during a test.
pub struct SwitchableSource {
    frame: Mutex<Option<VideoFrame>>,
}

impl SwitchableSource {
    pub fn new(frame: Option<VideoFrame>) -> Self {
        Self {
            frame: Mutex::new(frame),
        }
    }

    pub fn set_frame(&self, frame: Option<VideoFrame>) {
        *self.frame.lock().unwrap() = frame;
    }
}

impl FrameSource for SwitchableSource {
    fn current_frame(&self) -> Option<VideoFrame> {
        self.frame.lock().unwrap().clone()
    }

    fn native_size(&self) -> Option<(u32, u32)> {
        self.frame
            .lock()
            .unwrap()
            .as_ref()
            .map(|f| (f.width(), f.height()))
    }

    fn is_playing(&self) -> bool {
        true
    }
}
