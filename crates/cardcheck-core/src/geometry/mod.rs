pub mod aspect;
pub mod crop;
pub mod offsets;

pub use aspect::AspectRatioSolver;
pub use crop::CropRect;
pub use offsets::{compute_offsets, container_for_width};

/// Display and crop geometry for the attached source at its current size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub aspect_ratio: f64,
    pub offset_x: u32,
    pub offset_y: u32,
    pub container_width: u32,
    pub container_height: u32,
}

impl Geometry {
    /// Size the container from its measured width and center it on the source.
    pub fn compute(source: Option<(u32, u32)>, container_width: u32, aspect_ratio: f64) -> Self {
        let (container_width, container_height) = container_for_width(container_width, aspect_ratio);
        let (offset_x, offset_y) = compute_offsets(
            source.map(|(w, _)| w),
            source.map(|(_, h)| h),
            container_width,
            container_height,
        );
        Self {
            aspect_ratio,
            offset_x,
            offset_y,
            container_width,
            container_height,
        }
    }

    /// The source region shown in the container, or `None` for an empty container.
    pub fn crop_window(&self) -> Option<CropRect> {
        if self.container_width == 0 || self.container_height == 0 {
            return None;
        }
        Some(CropRect {
            x: self.offset_x,
            y: self.offset_y,
            width: self.container_width,
            height: self.container_height,
        })
    }
}
