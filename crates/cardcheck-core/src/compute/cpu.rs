use ndarray::{Array2, Zip};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{CardCheckError, Result};
use crate::frame::{GrayscaleFrame, VideoFrame};

use super::ImageBackend;

/// CPU backend using Rayon for parallelism on large frames.
pub struct CpuBackend;

impl ImageBackend for CpuBackend {
    fn name(&self) -> &str {
        "CPU/Rayon"
    }

    fn to_grayscale(&self, frame: &VideoFrame) -> GrayscaleFrame {
        let (h, w) = (frame.height() as usize, frame.width() as usize);
        let data = build_grid(h, w, |row, col| {
            let [r, g, b] = frame.rgb(row, col);
            let luma = LUMINANCE_R * r as f64 + LUMINANCE_G * g as f64 + LUMINANCE_B * b as f64;
            to_u8(luma)
        });
        GrayscaleFrame::new(data)
    }

    fn gaussian_blur(&self, gray: &GrayscaleFrame, kernel_size: usize) -> Result<GrayscaleFrame> {
        let kernel = gaussian_kernel(kernel_size)?;
        let (h, w) = gray.data.dim();
        let radius = (kernel.len() / 2) as isize;
        let src = &gray.data;

        let after_rows = build_grid(h, w, |row, col| {
            let mut sum = 0.0f64;
            for (ki, &kv) in kernel.iter().enumerate() {
                let src_col = reflect_101(col as isize + ki as isize - radius, w);
                sum += src[[row, src_col]] as f64 * kv;
            }
            sum
        });

        let after_cols = build_grid(h, w, |row, col| {
            let mut sum = 0.0f64;
            for (ki, &kv) in kernel.iter().enumerate() {
                let src_row = reflect_101(row as isize + ki as isize - radius, h);
                sum += after_rows[[src_row, col]] * kv;
            }
            to_u8(sum)
        });

        Ok(GrayscaleFrame::new(after_cols))
    }

    fn laplacian(&self, gray: &GrayscaleFrame) -> Array2<f64> {
        // 3x3 kernel:
        //   0  1  0
        //   1 -4  1
        //   0  1  0
        let (h, w) = gray.data.dim();
        let src = &gray.data;
        build_grid(h, w, |row, col| {
            let (r, c) = (row as isize, col as isize);
            let up = src[[reflect_101(r - 1, h), col]] as f64;
            let down = src[[reflect_101(r + 1, h), col]] as f64;
            let left = src[[row, reflect_101(c - 1, w)]] as f64;
            let right = src[[row, reflect_101(c + 1, w)]] as f64;
            up + down + left + right - 4.0 * src[[row, col]] as f64
        })
    }

    fn mean_std_dev(&self, data: &Array2<f64>) -> (f64, f64) {
        let count = data.len();
        if count == 0 {
            return (0.0, 0.0);
        }
        let n = count as f64;
        let mean = data.sum() / n;
        let sum_sq_dev: f64 = data.iter().map(|&v| (v - mean) * (v - mean)).sum();
        (mean, (sum_sq_dev / n).sqrt())
    }

    fn min_max(&self, gray: &GrayscaleFrame) -> Option<(u8, u8)> {
        if gray.data.is_empty() {
            return None;
        }
        Some(
            gray.data
                .iter()
                .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalized 1D Gaussian kernel of odd length `size`.
///
/// Sigma follows the usual derivation from the aperture:
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel(size: usize) -> Result<Vec<f64>> {
    if size == 0 || size % 2 == 0 {
        return Err(CardCheckError::InvalidKernelSize(size));
    }
    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let radius = (size / 2) as f64;
    let s2 = 2.0 * sigma * sigma;

    let mut kernel: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - radius;
            (-x * x / s2).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    Ok(kernel)
}

/// Map an out-of-range index back into `0..n` by mirroring around the edge
/// pixel without repeating it (`-1 -> 1`, `n -> n - 2`).
fn reflect_101(mut i: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let last = n as isize - 1;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}

fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Evaluate `f(row, col)` for every cell, row-parallel for large grids.
fn build_grid<T, F>(h: usize, w: usize, f: F) -> Array2<T>
where
    T: Copy + Default + Send + Sync,
    F: Fn(usize, usize) -> T + Sync,
{
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let mut out = Array2::<T>::from_elem((h, w), T::default());
        Zip::indexed(&mut out).par_for_each(|(row, col), v| *v = f(row, col));
        out
    } else {
        Array2::from_shape_fn((h, w), |(row, col)| f(row, col))
    }
}
