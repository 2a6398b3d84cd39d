pub mod batch;
pub mod builder;

use std::{fs, path::Path};

use image::GrayImage;
use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use tracing::{debug, info, warn};

use crate::{
    algorithms::{split_glyph, trim_whitespace},
    catalog::{PartCatalog, PartCatalogEntry},
    config::ExtractionConfig,
    error::{PartsError, Result},
    io::{PARTS_CATALOG_FILE, PartsCatalogFile, PartRecord, save_transparent_png},
    traits::{BoundaryDetector, GlyphRasterizer, PartPostProcessor},
    types::{
        Category, DetectionOutcome, ExtractionFailure, ExtractionResult, SplitCandidate, SplitSpec,
        SplitTopology,
    },
};

pub use batch::{BatchCollector, BatchStats, CategoryStats, ExtractionReport, FailedPart};
pub use builder::PartExtractorBuilder;

/// Manual adjustments applied when re-extracting one part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PartOverrides {
    pub sample: Option<char>,
    pub split: Option<SplitTopology>,
    /// A fixed ratio also switches off dynamic detection for the call.
    pub ratio: Option<f32>,
}

/// Drives catalog entries through render, detect, split and cleanup.
pub struct PartExtractor {
    config: ExtractionConfig,
    rasterizer: Box<dyn GlyphRasterizer>,
    detector: Box<dyn BoundaryDetector>,
    postprocessors: Vec<Box<dyn PartPostProcessor>>,
}

impl PartExtractor {
    pub fn builder() -> PartExtractorBuilder {
        PartExtractorBuilder::new()
    }

    pub fn new(
        config: ExtractionConfig,
        rasterizer: Box<dyn GlyphRasterizer>,
        detector: Box<dyn BoundaryDetector>,
        postprocessors: Vec<Box<dyn PartPostProcessor>>,
    ) -> Self {
        Self {
            config,
            rasterizer,
            detector,
            postprocessors,
        }
    }

    /// Extractor rendering from the font at `font_path`.
    pub fn for_font(font_path: impl AsRef<Path>, config: ExtractionConfig) -> Result<Self> {
        Self::builder()
            .with_config(config)
            .with_font(font_path.as_ref())
            .build()
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Render the first candidate the rasterizer accepts.
    fn render_sample(&self, candidates: &[char]) -> std::result::Result<(char, GrayImage), ExtractionFailure> {
        for &ch in candidates {
            match self.rasterizer.render(ch) {
                Ok(image) => return Ok((ch, image)),
                Err(e) => debug!("Cannot render '{ch}': {e}"),
            }
        }
        Err(ExtractionFailure::Render {
            tried: candidates.to_vec(),
        })
    }

    /// Ratio to cut `image` at, plus what detection did to get it.
    pub fn detect_ratio(&self, image: &GrayImage, spec: SplitSpec, enabled: bool) -> (f32, DetectionOutcome) {
        if !enabled {
            return (spec.ratio, DetectionOutcome::Disabled);
        }
        let Some(axis) = spec.topology.detection_axis() else {
            return (spec.ratio, DetectionOutcome::NotApplicable);
        };

        let found = self.detector.find_optimal_split(
            image,
            axis,
            self.config.search_range(axis),
            self.config.scan_step,
            self.config.detector.num_candidates.max(1),
        );
        match found.as_deref() {
            Ok([best, ..]) => (
                best.ratio,
                DetectionOutcome::Detected {
                    ratio: best.ratio,
                    score: best.score,
                },
            ),
            Ok([]) => {
                warn!("Detector returned no candidates, keeping ratio {:.2}", spec.ratio);
                (
                    spec.ratio,
                    DetectionOutcome::Failed {
                        reason: "detector returned no candidates".into(),
                    },
                )
            }
            Err(e) => {
                warn!("Boundary detection failed ({e}), keeping ratio {:.2}", spec.ratio);
                (spec.ratio, DetectionOutcome::Failed { reason: e.to_string() })
            }
        }
    }

    /// Ranked cut candidates for an entry's first renderable sample.
    pub fn detect_candidates(
        &self,
        entry: &PartCatalogEntry,
        num_candidates: usize,
    ) -> Result<(char, Vec<SplitCandidate>)> {
        let axis = entry.split.detection_axis().ok_or_else(|| {
            PartsError::InvalidValue(format!("{} splits are never detected", entry.split))
        })?;
        let (used_char, image) = self
            .render_sample(&entry.candidates())
            .map_err(|e| PartsError::InvalidValue(e.to_string()))?;
        let candidates = self.detector.find_optimal_split(
            &image,
            axis,
            self.config.search_range(axis),
            self.config.scan_step,
            num_candidates,
        )?;
        Ok((used_char, candidates))
    }

    fn extract_with(&self, entry: &PartCatalogEntry, detection_enabled: bool) -> ExtractionResult {
        let mut result = ExtractionResult {
            part: None,
            failure: None,
            used_char: None,
            default_ratio: entry.ratio,
            used_ratio: entry.ratio,
            detection: DetectionOutcome::Skipped,
            ratio_changed: false,
        };

        let (used_char, glyph) = match self.render_sample(&entry.candidates()) {
            Ok(rendered) => rendered,
            Err(failure) => {
                result.failure = Some(failure);
                return result;
            }
        };
        result.used_char = Some(used_char);
        if used_char != entry.sample {
            debug!("{}: '{}' unavailable, using '{used_char}'", entry.name, entry.sample);
        }

        let (ratio, detection) = self.detect_ratio(&glyph, entry.split_spec(), detection_enabled);
        result.used_ratio = ratio;
        result.detection = detection;
        result.ratio_changed = (ratio - entry.ratio).abs() > self.config.ratio_change_tolerance;

        let split = split_glyph(&glyph, entry.split, ratio);
        if split.width() == 0 || split.height() == 0 {
            result.failure = Some(ExtractionFailure::Split {
                width: split.width(),
                height: split.height(),
            });
            return result;
        }

        let cleaned = self
            .postprocessors
            .iter()
            .fold(split, |image, step| step.process(&image));
        result.part = Some(trim_whitespace(&cleaned));
        result
    }

    /// Render, detect, split and clean one entry without touching the disk.
    pub fn extract_part_image(&self, entry: &PartCatalogEntry) -> ExtractionResult {
        self.extract_with(entry, self.config.dynamic_boundary_detection_enabled)
    }

    /// Extract one entry and save it as a transparent PNG at `output_path`.
    ///
    /// Never fails as a whole: every problem ends up in the result.
    pub fn extract_single_part(&self, entry: &PartCatalogEntry, output_path: impl AsRef<Path>) -> ExtractionResult {
        let result = self.extract_part_image(entry);
        self.save_result(entry, result, output_path.as_ref())
    }

    fn save_result(&self, entry: &PartCatalogEntry, mut result: ExtractionResult, output_path: &Path) -> ExtractionResult {
        let saved = result.part.as_ref().map(|part| save_transparent_png(part, output_path));
        if let Some(Err(e)) = saved {
            result.failure = Some(ExtractionFailure::Save {
                path: output_path.display().to_string(),
                reason: e.to_string(),
            });
            result.part = None;
        }

        match &result.failure {
            None if result.ratio_changed => info!(
                "✓ {} {} ({}) ratio {:.2}→{:.2}",
                entry.category.label(),
                entry.name,
                result.used_char.unwrap_or(entry.sample),
                result.default_ratio,
                result.used_ratio
            ),
            None => info!(
                "✓ {} {} ({})",
                entry.category.label(),
                entry.name,
                result.used_char.unwrap_or(entry.sample)
            ),
            Some(failure) => warn!("✗ {} {}: {failure}", entry.category.label(), entry.name),
        }
        result
    }

    /// Extract a whole catalog into `output_dir` and write `parts_catalog.json`.
    ///
    /// `progress` gets `(current, total, name)` before each entry. Only
    /// failures to create the directory or write the catalog are errors.
    pub fn extract_all_parts<F>(
        &self,
        catalog: &PartCatalog,
        output_dir: impl AsRef<Path>,
        mut progress: F,
    ) -> Result<ExtractionReport>
    where
        F: FnMut(usize, usize, &str),
    {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let total = catalog.len();
        info!("Extracting {total} parts into {}", output_dir.display());

        let mut collector = BatchCollector::new(output_dir);
        for (index, entry) in catalog.iter().enumerate() {
            progress(index + 1, total, &entry.name);
            let result = self.extract_single_part(entry, output_dir.join(entry.file_name()));
            collector.record(entry, &result);
        }
        collector.finish()
    }

    /// Re-run one already extracted part with manual overrides.
    ///
    /// Overwrites its PNG and updates its `parts_catalog.json` record on
    /// success; a failed attempt leaves both untouched.
    pub fn re_extract(
        &self,
        parts_dir: impl AsRef<Path>,
        category: Category,
        name: &str,
        overrides: &PartOverrides,
    ) -> Result<ExtractionResult> {
        let parts_dir = parts_dir.as_ref();
        let catalog_path = parts_dir.join(PARTS_CATALOG_FILE);
        let mut catalog = PartsCatalogFile::load(&catalog_path)?;
        let record = catalog
            .get(category, name)
            .cloned()
            .ok_or_else(|| unknown_part(category, name))?;

        let entry = PartCatalogEntry::new(
            category,
            name,
            record.character,
            overrides.sample.unwrap_or(record.sample),
            overrides.split.unwrap_or(record.split),
            overrides.ratio.unwrap_or(record.ratio),
        );
        let detection_enabled = overrides.ratio.is_none() && self.config.dynamic_boundary_detection_enabled;

        let result = self.extract_with(&entry, detection_enabled);
        let result = self.save_result(&entry, result, &parts_dir.join(&record.file));

        if let (true, Some(used_char)) = (result.success(), result.used_char) {
            catalog.insert(
                name,
                PartRecord {
                    sample: used_char,
                    split: entry.split,
                    ratio: entry.ratio,
                    detected_ratio: result.used_ratio,
                    ..record
                },
            );
            catalog.save(&catalog_path)?;
        }
        Ok(result)
    }
}

/// Remove a part's PNG and its `parts_catalog.json` record.
pub fn delete_part(parts_dir: impl AsRef<Path>, category: Category, name: &str) -> Result<PartRecord> {
    let parts_dir = parts_dir.as_ref();
    let catalog_path = parts_dir.join(PARTS_CATALOG_FILE);
    let mut catalog = PartsCatalogFile::load(&catalog_path)?;
    let record = catalog
        .remove(category, name)
        .ok_or_else(|| unknown_part(category, name))?;

    let png = parts_dir.join(&record.file);
    if png.exists() {
        fs::remove_file(&png)?;
    }
    catalog.save(&catalog_path)?;
    info!("Deleted {} {} ({})", category.label(), name, record.file);
    Ok(record)
}

fn unknown_part(category: Category, name: &str) -> PartsError {
    PartsError::UnknownPart {
        category: category.to_string(),
        name: name.to_string(),
    }
}
