use image::GrayImage;
use crate::{
    error::{DetectionError, Result},
    types::{Axis, SearchRange, SplitCandidate},
};

/// Turns a sample character into a square grayscale glyph bitmap
pub trait GlyphRasterizer: Send + Sync {
    /// Render `ch` onto a blank canvas; fails when the glyph is missing or blank
    fn render(&self, ch: char) -> Result<GrayImage>;
}

/// Ranks candidate cut positions along one axis of a glyph bitmap
pub trait BoundaryDetector: Send + Sync {
    /// Scored cuts, lowest (best) score first
    fn find_optimal_split(
        &self,
        image: &GrayImage,
        axis: Axis,
        search_range: SearchRange,
        scan_step: f32,
        num_candidates: usize,
    ) -> std::result::Result<Vec<SplitCandidate>, DetectionError>;
}

/// Bitmap-to-bitmap cleanup applied to an extracted part
pub trait PartPostProcessor: Send + Sync {
    fn process(&self, image: &GrayImage) -> GrayImage;
}
