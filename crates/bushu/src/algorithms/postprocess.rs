use image::{GrayImage, Luma, imageops};
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::{
    algorithms::binarize::build_mask,
    traits::PartPostProcessor,
    types::BACKGROUND,
};

/// Erase 4-connected ink components smaller than `min_component_size` pixels.
///
/// Pixels darker than `ink_threshold` count as ink. Larger components are
/// left untouched, pixel for pixel. Labelling is union-find based, so large
/// blobs cost no stack depth.
pub fn remove_noise(image: &GrayImage, min_component_size: u32, ink_threshold: u8) -> GrayImage {
    let ink = build_mask(image, ink_threshold).to_image();
    let labels = connected_components(&ink, Connectivity::Four, Luma([0u8]));

    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    if max_label == 0 {
        return image.clone();
    }
    let mut sizes = vec![0u32; max_label + 1];
    for label in labels.pixels() {
        sizes[label[0] as usize] += 1;
    }

    let mut result = image.clone();
    for (x, y, label) in labels.enumerate_pixels() {
        let label = label[0] as usize;
        if label != 0 && sizes[label] < min_component_size {
            result.put_pixel(x, y, Luma([BACKGROUND]));
        }
    }
    result
}

/// Tight `(x, y, width, height)` box around every non-background pixel.
pub fn content_bounds(image: &GrayImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[0] == BACKGROUND {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crop to the content bounding box; blank images come back unchanged.
pub fn trim_whitespace(image: &GrayImage) -> GrayImage {
    match content_bounds(image) {
        Some((x, y, width, height)) => imageops::crop_imm(image, x, y, width, height).to_image(),
        None => image.clone(),
    }
}

#[derive(Debug, Clone)]
pub struct NoiseRemover {
    pub min_component_size: u32,
    pub ink_threshold: u8,
}

impl Default for NoiseRemover {
    fn default() -> Self {
        Self {
            min_component_size: 50,
            ink_threshold: 128,
        }
    }
}

impl PartPostProcessor for NoiseRemover {
    fn process(&self, image: &GrayImage) -> GrayImage {
        remove_noise(image, self.min_component_size, self.ink_threshold)
    }
}

#[derive(Debug, Clone, Default)]
pub struct WhitespaceTrimmer;

impl PartPostProcessor for WhitespaceTrimmer {
    fn process(&self, image: &GrayImage) -> GrayImage {
        trim_whitespace(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(w: u32, h: u32) -> GrayImage {
        GrayImage::from_pixel(w, h, Luma([BACKGROUND]))
    }

    fn fill_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }

    fn ink_count(img: &GrayImage) -> usize {
        img.pixels().filter(|p| p[0] < 128).count()
    }

    #[test]
    fn test_blank_image_unchanged() {
        let img = blank(2048, 2048);
        assert_eq!(remove_noise(&img, 50, 128), img);
        assert_eq!(trim_whitespace(&img), img);
    }

    #[test]
    fn test_small_specks_erased_large_kept() {
        let mut img = blank(60, 60);
        fill_rect(&mut img, 5, 5, 15, 15, 0); // 100 px
        fill_rect(&mut img, 40, 40, 43, 43, 20); // 9 px speck

        let cleaned = remove_noise(&img, 50, 128);

        for y in 5..15 {
            for x in 5..15 {
                assert_eq!(cleaned.get_pixel(x, y), img.get_pixel(x, y));
            }
        }
        for y in 40..43 {
            for x in 40..43 {
                assert_eq!(cleaned.get_pixel(x, y)[0], BACKGROUND);
            }
        }
        assert!(ink_count(&cleaned) <= ink_count(&img));
        assert_eq!(ink_count(&cleaned), 100);
    }

    #[test]
    fn test_diagonal_neighbours_are_separate_components() {
        let mut img = blank(40, 40);
        // Two 7x7 blocks touching only at a corner: 49 px each.
        fill_rect(&mut img, 0, 0, 7, 7, 0);
        fill_rect(&mut img, 7, 7, 14, 14, 0);

        let cleaned = remove_noise(&img, 50, 128);
        assert_eq!(ink_count(&cleaned), 0);

        // Same shape joined along an edge survives.
        fill_rect(&mut img, 7, 0, 8, 7, 0);
        let cleaned = remove_noise(&img, 50, 128);
        assert_eq!(ink_count(&cleaned), ink_count(&img));
    }

    #[test]
    fn test_light_antialiasing_is_not_ink() {
        let mut img = blank(20, 20);
        fill_rect(&mut img, 2, 2, 4, 4, 200);
        let cleaned = remove_noise(&img, 50, 128);
        assert_eq!(cleaned, img);
    }

    #[test]
    fn test_trim_touches_all_sides() {
        let mut img = blank(100, 80);
        fill_rect(&mut img, 20, 10, 30, 15, 0);
        fill_rect(&mut img, 60, 50, 61, 70, 0);

        assert_eq!(content_bounds(&img), Some((20, 10, 41, 60)));
        let trimmed = trim_whitespace(&img);
        assert_eq!(trimmed.dimensions(), (41, 60));

        let (x, y, w, h) = content_bounds(&trimmed).expect("Trimmed image has content");
        assert_eq!((x, y), (0, 0));
        assert_eq!((w, h), trimmed.dimensions());
    }

    #[test]
    fn test_trim_keeps_faint_pixels() {
        let mut img = blank(10, 10);
        img.put_pixel(3, 4, Luma([254u8]));
        assert_eq!(trim_whitespace(&img).dimensions(), (1, 1));
    }

    #[test]
    fn test_post_processors_compose() {
        let mut img = blank(50, 50);
        fill_rect(&mut img, 10, 10, 30, 30, 0);
        img.put_pixel(45, 45, Luma([0u8]));

        let processors: Vec<Box<dyn PartPostProcessor>> =
            vec![Box::new(NoiseRemover::default()), Box::new(WhitespaceTrimmer)];
        let result = processors.iter().fold(img, |acc, p| p.process(&acc));
        assert_eq!(result.dimensions(), (20, 20));
    }
}
