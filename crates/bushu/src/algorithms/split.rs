use image::{GrayImage, Luma, imageops};

use crate::{
    algorithms::boundary::cut_position,
    types::{BACKGROUND, SplitTopology},
};

/// Secondary horizontal cut of roof-anchored compounds (`top_left`, `top_right`).
pub const TOP_ANCHORED_CUT: f32 = 0.4;
/// Secondary horizontal cut of floor-anchored compounds (`left_bottom`, `right_bottom`).
pub const BOTTOM_ANCHORED_CUT: f32 = 0.7;

/// Axis-aligned rectangle `(x, y, width, height)`.
type Region = (u32, u32, u32, u32);

fn crop(image: &GrayImage, (x, y, width, height): Region) -> GrayImage {
    imageops::crop_imm(image, x, y, width, height).to_image()
}

/// Paste each region of `image` back at its own position on a blank canvas
/// of the same size.
fn composite(image: &GrayImage, regions: &[Region]) -> GrayImage {
    let mut canvas = GrayImage::from_pixel(image.width(), image.height(), Luma([BACKGROUND]));
    for &region in regions {
        let strip = crop(image, region);
        imageops::replace(&mut canvas, &strip, region.0 as i64, region.1 as i64);
    }
    canvas
}

/// Carve the part described by `topology` out of a full glyph.
///
/// Simple topologies crop; compound ones composite two strips onto a blank
/// canvas of the full glyph size so the part keeps its natural position.
/// Cuts land at `round(size * ratio)` rather than truncating, the same pixel
/// the detector scored for that ratio.
/// `ratio` is not validated: 0 or 1 yields a zero-width or full-size crop.
/// `frame` returns the glyph unchanged since enclosures are not isolated.
pub fn split_glyph(image: &GrayImage, topology: SplitTopology, ratio: f32) -> GrayImage {
    let (w, h) = image.dimensions();

    match topology {
        SplitTopology::Left => crop(image, (0, 0, cut_position(w, ratio), h)),
        SplitTopology::Right => {
            let x = cut_position(w, ratio);
            crop(image, (x, 0, w - x, h))
        }
        SplitTopology::Top => crop(image, (0, 0, w, cut_position(h, ratio))),
        SplitTopology::Bottom => {
            let y = cut_position(h, ratio);
            crop(image, (0, y, w, h - y))
        }
        SplitTopology::LeftBottom => {
            let x = cut_position(w, ratio);
            let y = cut_position(h, BOTTOM_ANCHORED_CUT);
            composite(image, &[(0, 0, x, h), (0, y, w, h - y)])
        }
        SplitTopology::TopLeft => {
            let x = cut_position(w, ratio);
            let y = cut_position(h, TOP_ANCHORED_CUT);
            composite(image, &[(0, 0, w, y), (0, 0, x, h)])
        }
        // Right-walled compounds measure `ratio` as the wall's share of the width.
        SplitTopology::TopRight => {
            let x = cut_position(w, 1.0 - ratio);
            let y = cut_position(h, TOP_ANCHORED_CUT);
            composite(image, &[(0, 0, w, y), (x, 0, w - x, h)])
        }
        SplitTopology::RightBottom => {
            let x = cut_position(w, 1.0 - ratio);
            let y = cut_position(h, BOTTOM_ANCHORED_CUT);
            composite(image, &[(x, 0, w - x, h), (0, y, w, h - y)])
        }
        SplitTopology::Frame => image.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every pixel has a distinct-ish dark value so crops can be traced back.
    fn gradient(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| Luma([((x * 7 + y * 3) % 200) as u8]))
    }

    #[test]
    fn test_left_right_partition_width() {
        let img = gradient(100, 60);
        for ratio in [0.1, 0.25, 0.333, 0.5, 0.7, 0.95] {
            let left = split_glyph(&img, SplitTopology::Left, ratio);
            let right = split_glyph(&img, SplitTopology::Right, ratio);
            assert_eq!(left.width() + right.width(), 100, "ratio {ratio}");
            assert_eq!(left.height(), 60);
            assert_eq!(right.height(), 60);
            // No gap or overlap: the right crop starts where the left ends.
            assert_eq!(right.get_pixel(0, 10), img.get_pixel(left.width(), 10));
            assert_eq!(left.get_pixel(left.width() - 1, 10), img.get_pixel(left.width() - 1, 10));
        }
    }

    #[test]
    fn test_top_bottom_partition_height() {
        let img = gradient(40, 90);
        for ratio in [0.2, 0.45, 0.8] {
            let top = split_glyph(&img, SplitTopology::Top, ratio);
            let bottom = split_glyph(&img, SplitTopology::Bottom, ratio);
            assert_eq!(top.height() + bottom.height(), 90);
            assert_eq!(top.width(), 40);
            assert_eq!(bottom.get_pixel(5, 0), img.get_pixel(5, top.height()));
        }
    }

    #[test]
    fn test_left_width_grows_with_ratio() {
        let img = gradient(100, 10);
        let widths: Vec<u32> = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]
            .iter()
            .map(|&r| split_glyph(&img, SplitTopology::Left, r).width())
            .collect();
        assert!(widths.windows(2).all(|w| w[0] < w[1]), "{widths:?}");
    }

    #[test]
    fn test_cut_rounds_to_nearest_pixel() {
        let img = gradient(10, 10);
        // 4.6 px rounds up; a truncating cut would give 4.
        assert_eq!(split_glyph(&img, SplitTopology::Left, 0.46).width(), 5);
        assert_eq!(split_glyph(&img, SplitTopology::Right, 0.46).width(), 5);
        assert_eq!(split_glyph(&img, SplitTopology::Top, 0.44).height(), 4);
    }

    #[test]
    fn test_degenerate_ratios() {
        let img = gradient(50, 50);
        assert_eq!(split_glyph(&img, SplitTopology::Left, 0.0).width(), 0);
        assert_eq!(split_glyph(&img, SplitTopology::Left, 1.0).width(), 50);
        assert_eq!(split_glyph(&img, SplitTopology::Right, 1.0).width(), 0);
    }

    #[test]
    fn test_left_bottom_keeps_l_shape_in_place() {
        let img = gradient(100, 100);
        let part = split_glyph(&img, SplitTopology::LeftBottom, 0.3);

        assert_eq!(part.dimensions(), (100, 100));
        // Left wall.
        assert_eq!(part.get_pixel(10, 10), img.get_pixel(10, 10));
        // Floor.
        assert_eq!(part.get_pixel(90, 80), img.get_pixel(90, 80));
        // Upper right is outside both strips.
        assert_eq!(part.get_pixel(90, 10)[0], BACKGROUND);
        assert_eq!(part.get_pixel(30, 69)[0], BACKGROUND);
    }

    #[test]
    fn test_top_left_and_top_right() {
        let img = gradient(100, 100);

        let top_left = split_glyph(&img, SplitTopology::TopLeft, 0.45);
        assert_eq!(top_left.get_pixel(80, 20), img.get_pixel(80, 20));
        assert_eq!(top_left.get_pixel(20, 80), img.get_pixel(20, 80));
        assert_eq!(top_left.get_pixel(80, 80)[0], BACKGROUND);

        let top_right = split_glyph(&img, SplitTopology::TopRight, 0.3);
        assert_eq!(top_right.get_pixel(10, 20), img.get_pixel(10, 20));
        assert_eq!(top_right.get_pixel(85, 80), img.get_pixel(85, 80));
        assert_eq!(top_right.get_pixel(20, 80)[0], BACKGROUND);
        assert_eq!(top_right.get_pixel(69, 80)[0], BACKGROUND);
    }

    #[test]
    fn test_right_bottom() {
        let img = gradient(100, 100);
        let part = split_glyph(&img, SplitTopology::RightBottom, 0.25);
        assert_eq!(part.get_pixel(90, 5), img.get_pixel(90, 5));
        assert_eq!(part.get_pixel(5, 95), img.get_pixel(5, 95));
        assert_eq!(part.get_pixel(5, 5)[0], BACKGROUND);
    }

    #[test]
    fn test_frame_is_identity() {
        let img = gradient(64, 64);
        assert_eq!(split_glyph(&img, SplitTopology::Frame, 0.5), img);
        assert_eq!(split_glyph(&img, SplitTopology::Frame, 0.1), img);
    }
}
