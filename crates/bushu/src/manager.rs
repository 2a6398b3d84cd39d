use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{
    catalog::PartCatalog,
    error::Result,
    io::PartRecord,
    pipeline::{ExtractionReport, PartExtractor, PartOverrides, delete_part},
    types::{Category, PartSummary, SplitCandidate, SplitTopology},
};

#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum PartCommand {
    /// Extract every catalog entry into the parts directory
    #[serde(rename = "extract_all")]
    ExtractAll,

    /// Extract a single catalog entry
    #[serde(rename = "extract_part")]
    ExtractPart { category: Category, name: String },

    /// Re-extract a saved part with manual overrides
    #[serde(rename = "re_extract")]
    ReExtract {
        category: Category,
        name: String,
        sample: Option<char>,
        split: Option<SplitTopology>,
        ratio: Option<f32>,
    },

    /// Delete a saved part and its catalog record
    #[serde(rename = "delete_part")]
    DeletePart { category: Category, name: String },

    /// Rank cut positions for an entry without extracting it
    #[serde(rename = "detect_split")]
    DetectSplit {
        category: Category,
        name: String,
        #[schemars(range(min = 1, max = 100))]
        num_candidates: usize,
    },
}

impl PartCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(PartCommand)
    }

    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ExtractAll => "Extract every catalog entry as a transparent PNG and write parts_catalog.json",
            Self::ExtractPart { .. } => "Extract one catalog entry as a transparent PNG",
            Self::ReExtract { .. } => "Re-extract a saved part with an overridden sample, split or ratio",
            Self::DeletePart { .. } => "Delete a saved part PNG and its parts_catalog.json record",
            Self::DetectSplit { .. } => "List the best cut candidates for a left/right/top/bottom entry",
        }
    }
}

/// Result of [`PartManager::execute`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "result", rename_all = "snake_case")]
pub enum CommandOutput {
    Report(ExtractionReport),
    Part(PartSummary),
    Deleted(PartRecord),
    Candidates {
        used_char: char,
        candidates: Vec<SplitCandidate>,
    },
}

/// Runs [`PartCommand`]s against one catalog and one parts directory.
#[derive(Clone)]
pub struct PartManager {
    extractor: Arc<PartExtractor>,
    catalog: PartCatalog,
    parts_dir: PathBuf,
}

impl PartManager {
    pub fn new(extractor: Arc<PartExtractor>, catalog: PartCatalog, parts_dir: impl Into<PathBuf>) -> Self {
        Self {
            extractor,
            catalog,
            parts_dir: parts_dir.into(),
        }
    }

    pub fn extractor(&self) -> &Arc<PartExtractor> {
        &self.extractor
    }

    pub fn catalog(&self) -> &PartCatalog {
        &self.catalog
    }

    pub fn parts_dir(&self) -> &Path {
        &self.parts_dir
    }

    pub fn execute(&self, command: PartCommand) -> Result<CommandOutput> {
        match command {
            PartCommand::ExtractAll => self
                .extractor
                .extract_all_parts(&self.catalog, &self.parts_dir, |_, _, _| {})
                .map(CommandOutput::Report),
            PartCommand::ExtractPart { category, name } => {
                let entry = self.catalog.get(category, &name)?;
                std::fs::create_dir_all(&self.parts_dir)?;
                let result = self
                    .extractor
                    .extract_single_part(entry, self.parts_dir.join(entry.file_name()));
                Ok(CommandOutput::Part(result.summary()))
            }
            PartCommand::ReExtract {
                category,
                name,
                sample,
                split,
                ratio,
            } => {
                let overrides = PartOverrides { sample, split, ratio };
                let result = self
                    .extractor
                    .re_extract(&self.parts_dir, category, &name, &overrides)?;
                Ok(CommandOutput::Part(result.summary()))
            }
            PartCommand::DeletePart { category, name } => {
                delete_part(&self.parts_dir, category, &name).map(CommandOutput::Deleted)
            }
            PartCommand::DetectSplit {
                category,
                name,
                num_candidates,
            } => {
                let entry = self.catalog.get(category, &name)?;
                let (used_char, candidates) = self.extractor.detect_candidates(entry, num_candidates)?;
                Ok(CommandOutput::Candidates { used_char, candidates })
            }
        }
    }
}
