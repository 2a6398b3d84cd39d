use image::{GrayImage, Luma};

use crate::types::Axis;

/// Ink/no-ink view of a grayscale glyph, same dimensions as its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

/// Mark every pixel darker than `threshold` as ink.
pub fn build_mask(image: &GrayImage, threshold: u8) -> BinaryMask {
    BinaryMask {
        width: image.width(),
        height: image.height(),
        ink: image.pixels().map(|Luma([v])| *v < threshold).collect(),
    }
}

impl BinaryMask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Vertical => self.width,
            Axis::Horizontal => self.height,
        }
    }

    /// Length of a cut line perpendicular to the scan axis.
    fn line_length(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.ink[(y * self.width + x) as usize]
    }

    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&ink| ink).count()
    }

    fn line_ink(&self, axis: Axis, pos: u32) -> usize {
        match axis {
            Axis::Vertical => (0..self.height).filter(|&y| self.is_ink(pos, y)).count(),
            Axis::Horizontal => {
                let start = (pos * self.width) as usize;
                self.ink[start..start + self.width as usize]
                    .iter()
                    .filter(|&&ink| ink)
                    .count()
            }
        }
    }

    /// Fraction of ink on the full row or column at `pos`.
    pub fn line_density(&self, axis: Axis, pos: u32) -> f32 {
        self.band_density(axis, pos, pos + 1)
    }

    /// Fraction of ink in the lines `start..end`, clamped to the image.
    pub fn band_density(&self, axis: Axis, start: u32, end: u32) -> f32 {
        let end = end.min(self.extent(axis));
        if start >= end || self.line_length(axis) == 0 {
            return 0.0;
        }
        let ink: usize = (start..end).map(|pos| self.line_ink(axis, pos)).sum();
        let total = (end - start) as usize * self.line_length(axis) as usize;
        ink as f32 / total as f32
    }

    /// Render as a binary image: ink is 255, everything else 0.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            if self.is_ink(x, y) { Luma([255u8]) } else { Luma([0u8]) }
        })
    }
}
