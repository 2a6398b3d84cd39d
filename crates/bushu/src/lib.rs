//! # Radical Part Extraction Library
//!
//! Cuts radicals (偏旁: hen, tsukuri, kanmuri, ashi, nyou, tare, kamae) out of
//! rendered CJK glyphs and exports them as transparent PNG parts with a JSON
//! catalog.
//!
//! ## Core Features
//!
//! - **Fallback rendering**: each catalog entry lists alternate sample
//!   characters tried in order when the font lacks the primary one
//! - **Dynamic boundary detection**: simple left/right/top/bottom cuts are
//!   moved to the column or row that best separates the components
//! - **Nine split topologies**: half cuts, L-shaped composites and frames
//! - **Cleanup**: small ink specks are removed and whitespace trimmed
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bushu::{ExtractionConfig, PartCatalog, PartExtractor};
//!
//! let extractor = PartExtractor::for_font("NotoSerifJP-Regular.otf", ExtractionConfig::standalone())?;
//! let report = extractor.extract_all_parts(PartCatalog::builtin(), "assets/parts", |current, total, name| {
//!     println!("[{current}/{total}] {name}");
//! })?;
//! println!("{} of {} parts extracted", report.stats.success, report.stats.total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Extractor
//!
//! ```rust,no_run
//! use bushu::{ExtractionConfig, GlyphTable, PartExtractor, DensityEdgeDetector, DetectorParams};
//!
//! let extractor = PartExtractor::builder()
//!     .with_config(ExtractionConfig::default().with_noise_removal(false))
//!     .set_rasterizer(GlyphTable::new())
//!     .set_detector(DensityEdgeDetector::new(180, DetectorParams::default()))
//!     .build()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod config;
pub mod traits;
pub mod algorithms;
pub mod rasterizer;
pub mod catalog;
pub mod pipeline;
pub mod io;
pub mod manager;

pub use error::{DetectionError, PartsError, Result};
pub use types::*;
pub use config::{DetectorParams, ExtractionConfig};
pub use traits::*;
pub use algorithms::*;
pub use rasterizer::{FontRasterizer, GlyphTable};
pub use catalog::{PartCatalog, PartCatalogEntry};
pub use pipeline::{
    BatchCollector, BatchStats, ExtractionReport, PartExtractor, PartOverrides, builder::PartExtractorBuilder,
    delete_part,
};
pub use io::*;
pub use manager::{CommandOutput, PartCommand, PartManager};

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn create_test_glyph() -> GrayImage {
        let mut img = GrayImage::from_pixel(120, 120, Luma([255u8]));
        for y in 10..110 {
            for x in 10..40 {
                img.put_pixel(x, y, Luma([0u8]));
            }
            for x in 70..110 {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
        img
    }

    #[test]
    fn test_left_and_right_halves_cover_the_glyph() {
        let extractor = PartExtractor::builder()
            .set_rasterizer(GlyphTable::new().with_glyph('林', create_test_glyph()))
            .build()
            .expect("Should build extractor");

        let left = PartCatalogEntry::new(Category::Hen, "きへん", '木', '林', SplitTopology::Left, 0.4);
        let right = PartCatalogEntry::new(Category::Tsukuri, "き", '木', '林', SplitTopology::Right, 0.6);

        let left = extractor.extract_part_image(&left);
        let right = extractor.extract_part_image(&right);
        assert!(left.success() && right.success());

        // Both detections land on the same gap, so each half holds one block.
        assert_eq!(left.part.map(|p| p.dimensions()), Some((30, 100)));
        assert_eq!(right.part.map(|p| p.dimensions()), Some((40, 100)));
    }

    #[test]
    fn test_builtin_catalog_file_names_unique() {
        let mut names: Vec<String> = PartCatalog::builtin().iter().map(PartCatalogEntry::file_name).collect();
        let count = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_config_schema_lists_knobs() {
        let schema = serde_json::to_string(&ExtractionConfig::schema()).expect("Should serialize schema");
        assert!(schema.contains("dynamic_boundary_detection_enabled"));
        assert!(schema.contains("noise_removal_min_component_size"));
    }
}
