use image::GrayImage;
use tracing::debug;

use crate::{
    algorithms::binarize::{BinaryMask, build_mask},
    config::DetectorParams,
    error::DetectionError,
    traits::BoundaryDetector,
    types::{Axis, SearchRange, SplitCandidate},
};

/// Pixel index of a cut at `ratio` along an axis of length `size`.
pub fn cut_position(size: u32, ratio: f32) -> u32 {
    ((size as f32 * ratio).round().max(0.0) as u32).min(size)
}

/// Ranks cuts by blending ink density on the cut line with the density
/// contrast across it.
///
/// `score = density_weight * density + edge_weight * (1 - edge_score)`;
/// lower is better. A good cut runs through blank space right next to a
/// dense component.
#[derive(Debug, Clone)]
pub struct DensityEdgeDetector {
    pub threshold: u8,
    pub params: DetectorParams,
}

impl Default for DensityEdgeDetector {
    fn default() -> Self {
        Self {
            threshold: 200,
            params: DetectorParams::default(),
        }
    }
}

impl DensityEdgeDetector {
    pub fn new(threshold: u8, params: DetectorParams) -> Self {
        Self { threshold, params }
    }

    fn near_edge(&self, pos: u32, size: u32) -> bool {
        pos < self.params.edge_margin || size - pos < self.params.edge_margin
    }

    /// Absolute density difference between the bands just before and just
    /// after `pos`. Zero within `edge_margin` of either edge.
    pub fn edge_score(&self, mask: &BinaryMask, axis: Axis, pos: u32) -> f32 {
        let size = mask.extent(axis);
        if pos > size || self.near_edge(pos, size) {
            return 0.0;
        }
        let band = self.params.edge_band;
        let before = mask.band_density(axis, pos.saturating_sub(band), pos);
        let after = mask.band_density(axis, pos, pos.saturating_add(band));
        (before - after).abs()
    }

    /// Score every cut in the range without ranking or truncating.
    pub fn score_all(
        &self,
        mask: &BinaryMask,
        axis: Axis,
        search_range: SearchRange,
        scan_step: f32,
    ) -> Vec<SplitCandidate> {
        let size = mask.extent(axis);
        search_range
            .ratios(scan_step)
            .filter_map(|ratio| {
                let position = cut_position(size, ratio);
                if position == 0 || position >= size || self.near_edge(position, size) {
                    return None;
                }
                let density = mask.line_density(axis, position);
                let edge_score = self.edge_score(mask, axis, position);
                let score = self.params.density_weight * density
                    + self.params.edge_weight * (1.0 - edge_score);
                Some(SplitCandidate {
                    ratio,
                    position,
                    score,
                    density,
                    edge_score,
                })
            })
            .collect()
    }
}

impl BoundaryDetector for DensityEdgeDetector {
    fn find_optimal_split(
        &self,
        image: &GrayImage,
        axis: Axis,
        search_range: SearchRange,
        scan_step: f32,
        num_candidates: usize,
    ) -> Result<Vec<SplitCandidate>, DetectionError> {
        if scan_step.is_nan() || scan_step <= 0.0 {
            return Err(DetectionError::InvalidStep(scan_step));
        }
        if !search_range.is_valid() {
            return Err(DetectionError::InvalidRange {
                min: search_range.min,
                max: search_range.max,
            });
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(DetectionError::EmptyImage);
        }

        let mask = build_mask(image, self.threshold);
        let mut candidates = self.score_all(&mask, axis, search_range, scan_step);
        if candidates.is_empty() {
            return Err(DetectionError::NoCandidates);
        }

        // Stable: ties keep scan order, so the smallest ratio wins.
        candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
        candidates.truncate(num_candidates);

        if let Some(best) = candidates.first() {
            debug!(
                "{axis} split: best ratio {:.3} (pos {}, density {:.3}, edge {:.3}, score {:.4})",
                best.ratio, best.position, best.density, best.edge_score, best.score
            );
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn blank(size: u32) -> GrayImage {
        GrayImage::from_pixel(size, size, Luma([255u8]))
    }

    fn fill_rect(img: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }

    #[test]
    fn test_cut_position_rounds() {
        assert_eq!(cut_position(2048, 0.59), 1208);
        assert_eq!(cut_position(100, 0.356), 36);
        assert_eq!(cut_position(100, 0.0), 0);
        assert_eq!(cut_position(100, 1.0), 100);
    }

    #[test]
    fn test_blank_canvas_scores_uniformly() {
        let detector = DensityEdgeDetector::default();
        let candidates = detector
            .find_optimal_split(&blank(2048), Axis::Vertical, SearchRange::default(), 0.02, 100)
            .expect("Blank canvas still has candidates");

        assert_eq!(candidates.len(), 26);
        for candidate in &candidates {
            assert_eq!(candidate.density, 0.0);
            assert_eq!(candidate.edge_score, 0.0);
            assert!((candidate.score - 0.3).abs() < 1e-6);
        }
        // All tied, so scan order is kept.
        assert!((candidates[0].ratio - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_boundary_inside_range_ranks_best() {
        // Right edge of the block sits exactly on the 0.59 cut (1208px).
        let mut img = blank(2048);
        fill_rect(&mut img, 800, 100, 1208, 1900);

        let detector = DensityEdgeDetector::default();
        let candidates = detector
            .find_optimal_split(&img, Axis::Vertical, SearchRange::default(), 0.02, 1)
            .expect("Should find a split");

        assert_eq!(candidates.len(), 1);
        let best = candidates[0];
        assert_eq!(best.position, 1208);
        assert!((best.ratio - 0.59).abs() < 1e-4);
        assert_eq!(best.density, 0.0);
        assert!(best.edge_score > 0.8);
    }

    #[test]
    fn test_horizontal_scan_finds_gap_below_block() {
        let mut img = blank(200);
        fill_rect(&mut img, 20, 10, 180, 82);
        fill_rect(&mut img, 20, 120, 180, 190);

        let detector = DensityEdgeDetector::default();
        let best = detector
            .find_optimal_split(&img, Axis::Horizontal, SearchRange::default(), 0.02, 1)
            .expect("Should find a split")[0];

        // First blank row under the top block.
        assert_eq!(best.position, 82);
        assert_eq!(best.density, 0.0);
    }

    #[test]
    fn test_results_sorted_by_score() {
        let mut img = blank(300);
        fill_rect(&mut img, 30, 30, 90, 270);
        fill_rect(&mut img, 140, 60, 150, 240);
        fill_rect(&mut img, 200, 10, 260, 290);

        let detector = DensityEdgeDetector::default();
        let candidates = detector
            .find_optimal_split(&img, Axis::Vertical, SearchRange::new(0.0, 1.0), 0.01, usize::MAX)
            .expect("Should find candidates");

        assert!(candidates.len() > 50);
        assert!(candidates.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_edge_positions_excluded() {
        let mut img = blank(20);
        fill_rect(&mut img, 0, 0, 2, 20);

        let detector = DensityEdgeDetector::default();
        let candidates = detector
            .find_optimal_split(&img, Axis::Vertical, SearchRange::new(0.0, 1.0), 0.05, usize::MAX)
            .expect("Should find candidates");

        assert!(!candidates.is_empty());
        for candidate in &candidates {
            assert!(candidate.position >= 3, "position {} too close to start", candidate.position);
            assert!(candidate.position <= 17, "position {} too close to end", candidate.position);
        }
    }

    #[test]
    fn test_edge_score_zero_near_edges() {
        let mut img = blank(20);
        fill_rect(&mut img, 0, 0, 2, 20);
        let detector = DensityEdgeDetector::default();
        let mask = build_mask(&img, 200);

        assert_eq!(detector.edge_score(&mask, Axis::Vertical, 2), 0.0);
        assert_eq!(detector.edge_score(&mask, Axis::Vertical, 19), 0.0);
        assert!(detector.edge_score(&mask, Axis::Vertical, 3) > 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let detector = DensityEdgeDetector::default();
        let img = blank(20);

        assert_eq!(
            detector.find_optimal_split(&img, Axis::Vertical, SearchRange::default(), 0.0, 1),
            Err(DetectionError::InvalidStep(0.0))
        );
        assert!(matches!(
            detector.find_optimal_split(&img, Axis::Vertical, SearchRange::new(0.7, 0.3), 0.02, 1),
            Err(DetectionError::InvalidRange { .. })
        ));
        assert_eq!(
            detector.find_optimal_split(&GrayImage::new(0, 0), Axis::Vertical, SearchRange::default(), 0.02, 1),
            Err(DetectionError::EmptyImage)
        );
        assert_eq!(
            detector.find_optimal_split(&img, Axis::Vertical, SearchRange::new(0.0, 0.01), 0.02, 1),
            Err(DetectionError::NoCandidates)
        );
    }
}
