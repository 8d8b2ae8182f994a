use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::frame::VideoFrame;

/// File extensions recognised as still frames.
const FRAME_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// Decode an image file into an RGBA video frame.
pub fn load_frame(path: &Path) -> Result<VideoFrame> {
    let img = image::open(path)?;
    VideoFrame::from_image(&img)
}

/// Whether the path has an extension of a decodable still image.
pub fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Image files in `dir`, sorted by file name so numbered frames replay in order.
pub fn list_frame_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_frame_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
