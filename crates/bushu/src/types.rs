use image::GrayImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use thiserror::Error;

/// Single-channel glyph raster. 0 is full ink, 255 is blank paper.
pub type Bitmap = GrayImage;

/// Intensity of untouched background.
pub const BACKGROUND: u8 = 255;

/// Direction a cut line is scanned along.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    /// Cut lines are columns; the scan moves along x.
    Vertical,
    /// Cut lines are rows; the scan moves along y.
    Horizontal,
}

/// Geometric pattern used to carve a part out of a full glyph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SplitTopology {
    Left,
    Right,
    Top,
    Bottom,
    /// L-shape hugging the left and bottom edges (辶, 廴).
    LeftBottom,
    /// Roof plus left wall (广, 厂).
    TopLeft,
    TopRight,
    RightBottom,
    /// Enclosures (門, 囗) keep the whole glyph.
    Frame,
}

impl SplitTopology {
    /// Axis scanned by dynamic detection, `None` for compound shapes.
    pub fn detection_axis(self) -> Option<Axis> {
        match self {
            SplitTopology::Left | SplitTopology::Right => Some(Axis::Vertical),
            SplitTopology::Top | SplitTopology::Bottom => Some(Axis::Horizontal),
            _ => None,
        }
    }
}

/// Position class of a radical inside its host character.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    #[default]
    Hen,
    Tsukuri,
    Kanmuri,
    Ashi,
    Nyou,
    Tare,
    Kamae,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Hen => "偏（へん）",
            Category::Tsukuri => "旁（つくり）",
            Category::Kanmuri => "冠（かんむり）",
            Category::Ashi => "脚（あし）",
            Category::Nyou => "繞（にょう）",
            Category::Tare => "垂（たれ）",
            Category::Kamae => "構（かまえ）",
        }
    }
}

/// Topology plus the catalog's default cut ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SplitSpec {
    pub topology: SplitTopology,
    pub ratio: f32,
}

impl SplitSpec {
    pub fn new(topology: SplitTopology, ratio: f32) -> Self {
        Self { topology, ratio }
    }
}

/// Inclusive ratio interval scanned by the boundary detector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchRange {
    pub min: f32,
    pub max: f32,
}

impl SearchRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && 0.0 <= self.min
            && self.min <= self.max
            && self.max <= 1.0
    }

    /// Ratios `min, min + step, ...` up to and including `max`.
    ///
    /// Each ratio is computed from its index so rounding error does not
    /// accumulate over long scans.
    pub fn ratios(self, step: f32) -> impl Iterator<Item = f32> {
        let min = self.min;
        let count = if step > 0.0 && self.max >= self.min {
            ((self.max - self.min) / step + 1e-4).floor() as usize + 1
        } else {
            0
        };
        (0..count).map(move |i| min + step * i as f32)
    }
}

impl Default for SearchRange {
    fn default() -> Self {
        Self { min: 0.25, max: 0.75 }
    }
}

/// One scored cut position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitCandidate {
    pub ratio: f32,
    /// Pixel index of the cut line along the scan axis.
    pub position: u32,
    pub score: f32,
    pub density: f32,
    pub edge_score: f32,
}

/// What dynamic detection did for one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionOutcome {
    /// Detection switched off in the configuration.
    Disabled,
    /// Compound topology; the catalog ratio is always used.
    NotApplicable,
    Detected { ratio: f32, score: f32 },
    /// The detector failed and the catalog ratio was kept.
    Failed { reason: String },
    /// Rendering failed before detection could run.
    Skipped,
}

impl DetectionOutcome {
    pub fn fell_back(&self) -> bool {
        matches!(self, DetectionOutcome::Failed { .. })
    }
}

/// Terminal failure of one catalog entry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionFailure {
    #[error("rendering failed for all alternates ({})", .tried.iter().collect::<String>())]
    Render { tried: Vec<char> },

    #[error("split produced an empty {width}x{height} image")]
    Split { width: u32, height: u32 },

    #[error("failed to save {path}: {reason}")]
    Save { path: String, reason: String },
}

/// Outcome of extracting a single catalog entry.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The trimmed part bitmap, present on success.
    pub part: Option<Bitmap>,
    pub failure: Option<ExtractionFailure>,
    /// Sample actually rendered; differs from the primary after a fallback.
    pub used_char: Option<char>,
    pub default_ratio: f32,
    pub used_ratio: f32,
    pub detection: DetectionOutcome,
    /// Used ratio differs from the catalog default beyond the tolerance.
    pub ratio_changed: bool,
}

impl ExtractionResult {
    pub fn success(&self) -> bool {
        self.failure.is_none() && self.part.is_some()
    }

    pub fn error_reason(&self) -> Option<String> {
        self.failure.as_ref().map(ToString::to_string)
    }

    pub fn summary(&self) -> PartSummary {
        PartSummary {
            success: self.success(),
            used_char: self.used_char,
            default_ratio: self.default_ratio,
            used_ratio: self.used_ratio,
            ratio_changed: self.ratio_changed,
            detection: self.detection.clone(),
            size: self.part.as_ref().map(GrayImage::dimensions),
            error: self.error_reason(),
        }
    }
}

/// Serializable view of an [`ExtractionResult`] without the bitmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartSummary {
    pub success: bool,
    pub used_char: Option<char>,
    pub default_ratio: f32,
    pub used_ratio: f32,
    pub ratio_changed: bool,
    pub detection: DetectionOutcome,
    /// Width and height of the trimmed part.
    pub size: Option<(u32, u32)>,
    pub error: Option<String>,
}
