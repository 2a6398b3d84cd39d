use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, Rgba, RgbaImage};

use crate::{error::Result, types::BACKGROUND};

/// Black ink on a transparent background: alpha is `255 - intensity`.
pub fn to_transparent(image: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let Luma([v]) = *image.get_pixel(x, y);
        Rgba([0, 0, 0, BACKGROUND - v])
    })
}

/// Inverse of [`to_transparent`]; color channels are ignored.
pub fn from_transparent(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([_, _, _, alpha]) = *image.get_pixel(x, y);
        Luma([BACKGROUND - alpha])
    })
}

pub fn save_transparent_png(image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    to_transparent(image).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Read a part PNG back into a grayscale bitmap.
pub fn load_part_png(path: impl AsRef<Path>) -> Result<GrayImage> {
    let image = image::open(path)?.to_rgba8();
    Ok(from_transparent(&image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ink_becomes_opaque() {
        let img = GrayImage::from_fn(3, 1, |x, _| Luma([[0u8, 128, 255][x as usize]]));
        let rgba = to_transparent(&img);
        assert_eq!(rgba.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(rgba.get_pixel(1, 0), &Rgba([0, 0, 0, 127]));
        assert_eq!(rgba.get_pixel(2, 0), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_png_file_reloads_same_intensities() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("hen_きへん_木.png");

        let img = GrayImage::from_fn(16, 12, |x, y| Luma([((x * 13 + y * 7) % 256) as u8]));
        save_transparent_png(&img, &path).expect("Should save PNG");

        let reloaded = load_part_png(&path).expect("Should load PNG");
        assert_eq!(reloaded, img);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("missing").join("part.png");
        let img = GrayImage::from_pixel(4, 4, Luma([0u8]));
        assert!(save_transparent_png(&img, &path).is_err());
    }
}
