use crate::error::{CardCheckError, Result};

/// A rectangle in source-frame coordinates for cropping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Validate the crop rect against source dimensions.
    pub fn validated(&self, src_w: u32, src_h: u32) -> Result<CropRect> {
        if self.width == 0 || self.height == 0 {
            return Err(CardCheckError::InvalidCrop(
                "Crop width and height must be > 0".into(),
            ));
        }

        let fits_x = self.x.checked_add(self.width).is_some_and(|r| r <= src_w);
        let fits_y = self.y.checked_add(self.height).is_some_and(|b| b <= src_h);
        if !fits_x || !fits_y {
            return Err(CardCheckError::InvalidCrop(format!(
                "Crop region ({},{} {}x{}) exceeds source dimensions ({src_w}x{src_h})",
                self.x, self.y, self.width, self.height
            )));
        }

        Ok(*self)
    }

    /// Clip the rect to the source so it can always be cut out.
    /// Returns `None` when nothing of it overlaps the source.
    pub fn clipped(&self, src_w: u32, src_h: u32) -> Option<CropRect> {
        if self.x >= src_w || self.y >= src_h {
            return None;
        }
        let width = self.width.min(src_w - self.x);
        let height = self.height.min(src_h - self.y);
        if width == 0 || height == 0 {
            return None;
        }
        Some(CropRect {
            x: self.x,
            y: self.y,
            width,
            height,
        })
    }
}
