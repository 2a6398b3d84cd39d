use bushu::{ExtractionConfig, PartCatalog, PartsError};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    PartsError(#[from] PartsError),
    #[error("Missing 'font_path' in job file and no --font given")]
    MissingFont,
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// One batch extraction run, loadable from TOML or JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExtractionJob {
    /// TrueType/OpenType font to render samples from
    pub font_path: Option<String>,
    /// Directory receiving the PNG parts and parts_catalog.json
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// JSON catalog replacing the built-in one
    pub catalog: Option<String>,
    #[serde(default = "ExtractionConfig::standalone")]
    pub config: ExtractionConfig,
}

fn default_output_dir() -> String {
    "assets/parts".to_string()
}

impl Default for ExtractionJob {
    fn default() -> Self {
        Self {
            font_path: None,
            output_dir: default_output_dir(),
            catalog: None,
            config: ExtractionConfig::standalone(),
        }
    }
}

impl ExtractionJob {
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        let job: ExtractionJob = toml::from_str(content)?;
        Ok(job)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load the job
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    pub fn font_path(&self) -> Result<&str, CliError> {
        self.font_path.as_deref().ok_or(CliError::MissingFont)
    }

    /// The job's catalog file, or the built-in catalog
    pub fn load_catalog(&self) -> Result<PartCatalog, CliError> {
        match &self.catalog {
            Some(path) => Ok(PartCatalog::from_json_file(path)?),
            None => Ok(PartCatalog::builtin().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bushu::{Axis, SearchRange};

    #[test]
    fn test_toml_job() {
        let job = ExtractionJob::from_toml(
            r#"
            font_path = "fonts/NotoSerifJP-Regular.otf"
            output_dir = "out/parts"

            [config]
            canvas_size = 2048
            scan_step = 0.01

            [config.search_range_vertical]
            min = 0.3
            max = 0.7
            "#,
        )
        .expect("Should parse TOML job");

        assert_eq!(job.font_path().expect("Font is set"), "fonts/NotoSerifJP-Regular.otf");
        assert_eq!(job.config.canvas_size, 2048);
        assert_eq!(job.config.scan_step, 0.01);
        assert_eq!(job.config.search_range(Axis::Vertical), SearchRange::new(0.3, 0.7));
        assert_eq!(job.config.binary_threshold, 200);
    }

    #[test]
    fn test_json_job_defaults() {
        let job = ExtractionJob::from_json(r#"{ "font_path": "font.ttf" }"#).expect("Should parse JSON job");
        assert_eq!(job.output_dir, "assets/parts");
        assert_eq!(job.config, ExtractionConfig::standalone());
        assert!(job.load_catalog().expect("Built-in catalog").len() > 100);
    }

    #[test]
    fn test_missing_font_and_bad_extension() {
        assert!(matches!(ExtractionJob::default().font_path(), Err(CliError::MissingFont)));
        assert!(matches!(
            ExtractionJob::from_file("job.yaml"),
            Err(CliError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let job = ExtractionJob {
            font_path: Some("font.otf".into()),
            ..ExtractionJob::default()
        };
        let parsed = ExtractionJob::from_toml(&job.to_toml().expect("Should serialize")).expect("Should parse");
        assert_eq!(parsed, job);
    }
}
