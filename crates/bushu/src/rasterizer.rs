use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use ab_glyph::{Font, FontVec, PxScale, point};
use image::{GrayImage, Luma};
use tracing::debug;

use crate::{
    error::{PartsError, Result},
    traits::GlyphRasterizer,
    types::BACKGROUND,
};

/// Scale that draws a font's em square `em_px` pixels tall.
///
/// ab_glyph scales by ascent minus descent, not by the em, so the height is
/// converted through the font's units per em. Fonts without one fall back to
/// treating the em as the full line height.
pub fn em_scale(em_px: f32, height_unscaled: f32, units_per_em: Option<f32>) -> PxScale {
    match units_per_em {
        Some(upem) if upem > 0.0 => PxScale::from(em_px * height_unscaled / upem),
        _ => PxScale::from(em_px),
    }
}

/// Renders glyphs from a TrueType/OpenType font, one glyph centered per
/// square canvas at an em size equal to the canvas size.
pub struct FontRasterizer {
    font: FontVec,
    canvas_size: u32,
}

impl FontRasterizer {
    pub fn from_file(path: impl AsRef<Path>, canvas_size: u32) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        Self::load(data, path.to_path_buf(), canvas_size)
    }

    pub fn from_bytes(data: Vec<u8>, canvas_size: u32) -> Result<Self> {
        Self::load(data, PathBuf::from("<memory>"), canvas_size)
    }

    fn load(data: Vec<u8>, path: PathBuf, canvas_size: u32) -> Result<Self> {
        if canvas_size == 0 {
            return Err(PartsError::InvalidValue("canvas_size must be non-zero".into()));
        }
        let font = FontVec::try_from_vec(data).map_err(|e| PartsError::FontLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!("Loaded font {} ({} glyphs)", path.display(), font.glyph_count());
        Ok(Self { font, canvas_size })
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.font.glyph_id(ch).0 != 0
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn render(&self, ch: char) -> Result<GrayImage> {
        if !self.has_glyph(ch) {
            return Err(PartsError::MissingGlyph(ch));
        }

        let size = self.canvas_size as f32;
        let scale = em_scale(size, self.font.height_unscaled(), self.font.units_per_em());
        let glyph = self.font.glyph_id(ch).with_scale_and_position(scale, point(0.0, 0.0));
        let outlined = self.font.outline_glyph(glyph).ok_or(PartsError::EmptyGlyph(ch))?;

        let bounds = outlined.px_bounds();
        let left = ((size - bounds.width()) / 2.0).floor() as i64;
        let top = ((size - bounds.height()) / 2.0).floor() as i64;
        let canvas_size = i64::from(self.canvas_size);

        let mut canvas = GrayImage::from_pixel(self.canvas_size, self.canvas_size, Luma([BACKGROUND]));
        let mut inked = false;
        outlined.draw(|x, y, coverage| {
            let (cx, cy) = (left + i64::from(x), top + i64::from(y));
            if cx < 0 || cy < 0 || cx >= canvas_size || cy >= canvas_size {
                return;
            }
            let value = BACKGROUND - (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            let pixel = canvas.get_pixel_mut(cx as u32, cy as u32);
            if value < pixel[0] {
                pixel[0] = value;
                inked = true;
            }
        });

        if !inked {
            return Err(PartsError::EmptyGlyph(ch));
        }
        Ok(canvas)
    }
}

/// Pre-rendered glyph bitmaps keyed by character.
///
/// Lets callers that already hold renders (the editor canvas) drive the
/// extractor without a font file.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: HashMap<char, GrayImage>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyph(mut self, ch: char, image: GrayImage) -> Self {
        self.insert(ch, image);
        self
    }

    pub fn insert(&mut self, ch: char, image: GrayImage) {
        self.glyphs.insert(ch, image);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphRasterizer for GlyphTable {
    fn render(&self, ch: char) -> Result<GrayImage> {
        let image = self.glyphs.get(&ch).ok_or(PartsError::MissingGlyph(ch))?;
        if image.pixels().all(|p| p[0] == BACKGROUND) {
            return Err(PartsError::EmptyGlyph(ch));
        }
        Ok(image.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_table_lookup() {
        let mut inked = GrayImage::from_pixel(8, 8, Luma([BACKGROUND]));
        inked.put_pixel(3, 3, Luma([0u8]));
        let table = GlyphTable::new()
            .with_glyph('林', inked.clone())
            .with_glyph('　', GrayImage::from_pixel(8, 8, Luma([BACKGROUND])));

        assert_eq!(table.len(), 2);
        assert_eq!(table.render('林').expect("Glyph is present"), inked);
        assert!(matches!(table.render('森'), Err(PartsError::MissingGlyph('森'))));
        assert!(matches!(table.render('　'), Err(PartsError::EmptyGlyph('　'))));
    }

    #[test]
    fn test_em_scale_matches_canvas() {
        // DejaVu Sans metrics: ascent 1901, descent -483, 2048 units per em.
        let scale = em_scale(1024.0, 2384.0, Some(2048.0));
        assert_eq!(scale.y, 1192.0);
        assert_eq!(scale.x, scale.y);
        // One em maps to exactly the canvas size.
        assert_eq!(scale.y * 2048.0 / 2384.0, 1024.0);

        // CJK fonts commonly use 1000 units per em with a full-em line height.
        assert_eq!(em_scale(2048.0, 1000.0, Some(1000.0)).y, 2048.0);
        assert_eq!(em_scale(512.0, 1160.0, Some(1000.0)).y, 593.92);
    }

    #[test]
    fn test_em_scale_without_units_per_em() {
        assert_eq!(em_scale(256.0, 900.0, None).y, 256.0);
        assert_eq!(em_scale(256.0, 900.0, Some(0.0)).y, 256.0);
    }

    #[test]
    fn test_invalid_font_bytes() {
        let result = FontRasterizer::from_bytes(b"not a font".to_vec(), 256);
        assert!(matches!(result, Err(PartsError::FontLoad { .. })));
    }

    #[test]
    fn test_missing_font_file() {
        let result = FontRasterizer::from_file("/nonexistent/font.ttf", 256);
        assert!(matches!(result, Err(PartsError::Io(_))));
    }
}
