mod common;

use approx::assert_relative_eq;
use ndarray::{array, Array2};

use cardcheck_core::compute::{CpuBackend, ImageBackend};
use cardcheck_core::frame::{GrayscaleFrame, VideoFrame};

use common::{checkerboard_frame, solid_frame};

#[test]
fn test_grayscale_uses_bt601_weights() {
    let backend = CpuBackend;
    let pixels = vec![
        255, 0, 0, 255, //
        0, 255, 0, 255, //
        0, 0, 255, 255, //
        255, 255, 255, 0,
    ];
    let frame = VideoFrame::from_rgba(4, 1, pixels).unwrap();
    let gray = backend.to_grayscale(&frame);
    assert_eq!(gray.data, array![[76u8, 150, 29, 255]]);
}

#[test]
fn test_grayscale_keeps_dimensions() {
    let frame = solid_frame(7, 3, [10, 20, 30]);
    let gray = CpuBackend.to_grayscale(&frame);
    assert_eq!(gray.width(), 7);
    assert_eq!(gray.height(), 3);
}

#[test]
fn test_blur_preserves_uniform_image() {
    let gray = GrayscaleFrame::new(Array2::from_elem((12, 9), 255u8));
    let blurred = CpuBackend.gaussian_blur(&gray, 19).unwrap();
    assert!(blurred.data.iter().all(|&v| v == 255));

    let gray = GrayscaleFrame::new(Array2::from_elem((5, 5), 37u8));
    let blurred = CpuBackend.gaussian_blur(&gray, 3).unwrap();
    assert!(blurred.data.iter().all(|&v| v == 37));
}

#[test]
fn test_blur_smooths_an_edge() {
    let mut data = Array2::<u8>::zeros((8, 40));
    for row in 0..8 {
        for col in 20..40 {
            data[[row, col]] = 255;
        }
    }
    let blurred = CpuBackend
        .gaussian_blur(&GrayscaleFrame::new(data), 19)
        .unwrap();
    let left = blurred.data[[4, 19]];
    let right = blurred.data[[4, 20]];
    assert!(left > 0 && left < 255, "left of edge = {left}");
    assert!(right > 0 && right < 255, "right of edge = {right}");
    assert!(right > left);
    // Far from the edge nothing changes.
    assert_eq!(blurred.data[[4, 0]], 0);
    assert_eq!(blurred.data[[4, 39]], 255);
}

#[test]
fn test_blur_rejects_even_kernel() {
    let gray = GrayscaleFrame::new(Array2::zeros((4, 4)));
    assert!(CpuBackend.gaussian_blur(&gray, 18).is_err());
}

#[test]
fn test_blur_handles_kernel_larger_than_image() {
    let gray = GrayscaleFrame::new(array![[0u8, 255], [255, 0]]);
    let blurred = CpuBackend.gaussian_blur(&gray, 19).unwrap();
    assert_eq!(blurred.data.dim(), (2, 2));
}

#[test]
fn test_laplacian_point_response() {
    let mut data = Array2::<u8>::zeros((5, 5));
    data[[2, 2]] = 10;
    let lap = CpuBackend.laplacian(&GrayscaleFrame::new(data));
    assert_eq!(lap[[2, 2]], -40.0);
    assert_eq!(lap[[1, 2]], 10.0);
    assert_eq!(lap[[2, 3]], 10.0);
    assert_eq!(lap[[1, 1]], 0.0);
    assert_eq!(lap[[0, 0]], 0.0);
}

#[test]
fn test_laplacian_reflects_at_borders() {
    // Horizontal ramp: interior second derivative is zero, borders mirror
    // the neighbour without repeating the edge pixel.
    let data = array![[0u8, 10, 20, 30, 40], [0, 10, 20, 30, 40]];
    let lap = CpuBackend.laplacian(&GrayscaleFrame::new(data));
    assert_eq!(lap[[0, 0]], 20.0);
    assert_eq!(lap[[0, 2]], 0.0);
    assert_eq!(lap[[1, 4]], -20.0);
}

#[test]
fn test_mean_std_dev_population() {
    let data = array![[1.0, 2.0], [3.0, 4.0]];
    let (mean, std_dev) = CpuBackend.mean_std_dev(&data);
    assert_relative_eq!(mean, 2.5);
    assert_relative_eq!(std_dev, 1.25f64.sqrt());
}

#[test]
fn test_mean_std_dev_empty_is_zero() {
    let data = Array2::<f64>::zeros((0, 3));
    assert_eq!(CpuBackend.mean_std_dev(&data), (0.0, 0.0));
}

#[test]
fn test_min_max() {
    let gray = GrayscaleFrame::new(array![[12u8, 200], [3, 90]]);
    assert_eq!(CpuBackend.min_max(&gray), Some((3, 200)));
    let empty = GrayscaleFrame::new(Array2::zeros((0, 0)));
    assert_eq!(CpuBackend.min_max(&empty), None);
}

#[test]
fn test_large_frame_runs_parallel_path() {
    // 320x240 is above the row-parallel threshold.
    let frame = checkerboard_frame(320, 240, 16);
    let gray = CpuBackend.to_grayscale(&frame);
    let blurred = CpuBackend.gaussian_blur(&gray, 5).unwrap();
    assert_eq!(blurred.data.dim(), (240, 320));
    // Cell centers are far enough from edges to keep their value.
    assert_eq!(blurred.data[[8, 8]], 255);
    assert_eq!(blurred.data[[8, 24]], 0);
}
