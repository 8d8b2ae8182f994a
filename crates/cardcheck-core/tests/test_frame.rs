mod common;

use image::{Rgb, RgbImage};

use cardcheck_core::error::CardCheckError;
use cardcheck_core::frame::{Classification, VideoFrame};
use cardcheck_core::geometry::CropRect;
use cardcheck_core::io::{is_frame_file, list_frame_files, load_frame};

use common::solid_frame;

#[test]
fn test_frame_dimensions() {
    let frame = solid_frame(5, 3, [1, 2, 3]);
    assert_eq!(frame.width(), 5);
    assert_eq!(frame.height(), 3);
    assert_eq!(frame.channels(), 4);
    assert!(!frame.is_empty());
    assert_eq!(frame.rgb(2, 4), [1, 2, 3]);
}

#[test]
fn test_buffer_length_is_checked() {
    let err = VideoFrame::from_rgb(2, 2, vec![0; 11]).unwrap_err();
    assert!(matches!(
        err,
        CardCheckError::InvalidBufferLength {
            expected: 12,
            actual: 11
        }
    ));
}

#[test]
fn test_channel_count_is_checked() {
    let err = VideoFrame::from_raw(2, 2, 2, vec![0; 8]).unwrap_err();
    assert!(matches!(err, CardCheckError::UnsupportedChannels(2)));
}

#[test]
fn test_zero_sized_frame_is_empty() {
    let frame = VideoFrame::from_rgba(0, 4, Vec::new()).unwrap();
    assert!(frame.is_empty());
}

#[test]
fn test_crop_copies_window() {
    // 4x4 RGB, red channel = row * 16 + col
    let mut pixels = Vec::new();
    for row in 0..4u8 {
        for col in 0..4u8 {
            pixels.extend_from_slice(&[row * 16 + col, 0, 0]);
        }
    }
    let frame = VideoFrame::from_rgb(4, 4, pixels).unwrap();
    let crop = frame
        .crop(&CropRect { x: 1, y: 1, width: 2, height: 2 })
        .unwrap();

    assert_eq!((crop.width(), crop.height()), (2, 2));
    assert_eq!(crop.rgb(0, 0)[0], 17);
    assert_eq!(crop.rgb(0, 1)[0], 18);
    assert_eq!(crop.rgb(1, 0)[0], 33);
    assert_eq!(crop.rgb(1, 1)[0], 34);
}

#[test]
fn test_crop_out_of_bounds_fails() {
    let frame = solid_frame(4, 4, [0, 0, 0]);
    let err = frame
        .crop(&CropRect { x: 3, y: 0, width: 2, height: 2 })
        .unwrap_err();
    assert!(matches!(err, CardCheckError::InvalidCrop(_)));
}

#[test]
fn test_can_capture_requires_both_flags_clear() {
    let ok = Classification::default();
    assert!(ok.can_capture());
    let blurry = Classification {
        is_blurry: true,
        is_glare: false,
    };
    assert!(!blurry.can_capture());
    let glare = Classification {
        is_blurry: false,
        is_glare: true,
    };
    assert!(!glare.can_capture());
}

// ---------------------------------------------------------------------------
// Loading frames from disk
// ---------------------------------------------------------------------------

#[test]
fn test_load_frame_from_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let mut img = RgbImage::new(6, 4);
    img.put_pixel(2, 1, Rgb([10, 20, 30]));
    img.save(&path).unwrap();

    let frame = load_frame(&path).unwrap();
    assert_eq!((frame.width(), frame.height()), (6, 4));
    assert_eq!(frame.channels(), 4);
    assert_eq!(frame.rgb(1, 2), [10, 20, 30]);
    assert_eq!(frame.rgb(0, 0), [0, 0, 0]);
}

#[test]
fn test_load_missing_frame_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_frame(&dir.path().join("nope.png")).is_err());
}

#[test]
fn test_list_frame_files_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["002.png", "001.png", "notes.txt", "003.JPG"] {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }
    let files = list_frame_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["001.png", "002.png", "003.JPG"]);
}

#[test]
fn test_is_frame_file() {
    assert!(is_frame_file(std::path::Path::new("a/b.jpeg")));
    assert!(!is_frame_file(std::path::Path::new("a/b")));
    assert!(!is_frame_file(std::path::Path::new("a/b.toml")));
}
