use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartsError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to load font {path}: {reason}")]
    FontLoad { path: PathBuf, reason: String },

    #[error("Font has no glyph for '{0}'")]
    MissingGlyph(char),

    #[error("Glyph for '{0}' rendered without any ink")]
    EmptyGlyph(char),

    #[error("Unknown part {category}/{name}")]
    UnknownPart { category: String, name: String },

    #[error("Boundary detection failed: {0}")]
    Detection(#[from] DetectionError),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PartsError>;

/// Reasons the boundary detector could not produce a cut.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("scan step must be positive, got {0}")]
    InvalidStep(f32),

    #[error("search range [{min}, {max}] is empty or outside [0, 1]")]
    InvalidRange { min: f32, max: f32 },

    #[error("image has zero extent along the scan axis")]
    EmptyImage,

    #[error("no cut position inside the search range")]
    NoCandidates,
}
