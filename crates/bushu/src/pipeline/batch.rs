use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::info;

use crate::{
    catalog::PartCatalogEntry,
    error::Result,
    io::{PARTS_CATALOG_FILE, PartRecord, PartsCatalogFile},
    types::{Category, ExtractionResult},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub success: usize,
    pub failed: usize,
}

/// Success and failure counts of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub by_category: BTreeMap<Category, CategoryStats>,
    /// Entries whose used ratio differs from the catalog default.
    pub ratio_changed: usize,
    /// Entries where the detector failed and the default ratio was kept.
    pub detection_fallbacks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedPart {
    pub category: Category,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub stats: BatchStats,
    pub failures: Vec<FailedPart>,
    pub catalog_path: PathBuf,
    #[serde(skip)]
    pub catalog: PartsCatalogFile,
}

/// Accumulates per-entry results into stats and the output catalog.
///
/// Results must be fed in catalog order for the report to be reproducible.
#[derive(Debug)]
pub struct BatchCollector {
    output_dir: PathBuf,
    stats: BatchStats,
    failures: Vec<FailedPart>,
    catalog: PartsCatalogFile,
}

impl BatchCollector {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            stats: BatchStats::default(),
            failures: Vec::new(),
            catalog: PartsCatalogFile::new(),
        }
    }

    pub fn stats(&self) -> &BatchStats {
        &self.stats
    }

    pub fn record(&mut self, entry: &PartCatalogEntry, result: &ExtractionResult) {
        self.stats.total += 1;
        let category = self.stats.by_category.entry(entry.category).or_default();

        if result.detection.fell_back() {
            self.stats.detection_fallbacks += 1;
        }

        match (result.success(), result.used_char) {
            (true, Some(used_char)) => {
                self.stats.success += 1;
                category.success += 1;
                if result.ratio_changed {
                    self.stats.ratio_changed += 1;
                }
                self.catalog.insert(
                    entry.name.clone(),
                    PartRecord {
                        character: entry.character,
                        sample: used_char,
                        file: entry.file_name(),
                        split: entry.split,
                        ratio: entry.ratio,
                        detected_ratio: result.used_ratio,
                        category: entry.category,
                    },
                );
            }
            _ => {
                self.stats.failed += 1;
                category.failed += 1;
                self.failures.push(FailedPart {
                    category: entry.category,
                    name: entry.name.clone(),
                    reason: result.error_reason().unwrap_or_else(|| "no part produced".into()),
                });
            }
        }
    }

    /// Write `parts_catalog.json` and log the summary.
    pub fn finish(self) -> Result<ExtractionReport> {
        let catalog_path = self.output_dir.join(PARTS_CATALOG_FILE);
        self.catalog.save(&catalog_path)?;
        log_summary(&self.stats, &catalog_path);

        Ok(ExtractionReport {
            stats: self.stats,
            failures: self.failures,
            catalog_path,
            catalog: self.catalog,
        })
    }
}

fn log_summary(stats: &BatchStats, catalog_path: &Path) {
    for (category, counts) in &stats.by_category {
        info!("{}: {} ok, {} failed", category.label(), counts.success, counts.failed);
    }
    info!(
        "Extracted {}/{} parts ({} failed, {} ratio changes, {} detection fallbacks); catalog at {}",
        stats.success,
        stats.total,
        stats.failed,
        stats.ratio_changed,
        stats.detection_fallbacks,
        catalog_path.display()
    );
}
