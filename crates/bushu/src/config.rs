use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PartsError, Result},
    types::{Axis, SearchRange},
};

/// Canvas size used by the glyph editor.
pub const EDITOR_CANVAS_SIZE: u32 = 2048;
/// Canvas size used by the standalone extractor.
pub const STANDALONE_CANVAS_SIZE: u32 = 1024;

/// Scoring constants of the density/edge boundary heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetectorParams {
    /// Weight of ink density on the cut line.
    pub density_weight: f32,
    /// Weight of `1 - edge_score`.
    pub edge_weight: f32,
    /// Width in pixels of the bands compared on either side of a cut.
    pub edge_band: u32,
    /// Cuts closer than this to either edge are never reported.
    pub edge_margin: u32,
    /// How many ranked candidates to return.
    pub num_candidates: usize,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            density_weight: 0.7,
            edge_weight: 0.3,
            edge_band: 5,
            edge_margin: 3,
            num_candidates: 1,
        }
    }
}

/// Every tunable of the extraction core.
///
/// Constructed once by the caller and handed to the extractor; runtime
/// adjustments go through the `with_*` setters on the caller's copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExtractionConfig {
    pub dynamic_boundary_detection_enabled: bool,
    pub search_range_vertical: SearchRange,
    pub search_range_horizontal: SearchRange,
    pub scan_step: f32,
    /// Pixels darker than this count as ink for boundary detection.
    pub binary_threshold: u8,
    pub noise_removal_enabled: bool,
    pub noise_removal_min_component_size: u32,
    /// Pixels darker than this count as ink for noise removal.
    pub noise_ink_threshold: u8,
    /// Rasterization resolution (square canvas).
    pub canvas_size: u32,
    /// Used ratios further than this from the catalog default are flagged.
    pub ratio_change_tolerance: f32,
    pub detector: DetectorParams,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dynamic_boundary_detection_enabled: true,
            search_range_vertical: SearchRange::default(),
            search_range_horizontal: SearchRange::default(),
            scan_step: 0.02,
            binary_threshold: 200,
            noise_removal_enabled: true,
            noise_removal_min_component_size: 50,
            noise_ink_threshold: 128,
            canvas_size: EDITOR_CANVAS_SIZE,
            ratio_change_tolerance: 0.01,
            detector: DetectorParams::default(),
        }
    }
}

impl ExtractionConfig {
    /// Defaults of the standalone extractor: 1024px canvas.
    pub fn standalone() -> Self {
        Self {
            canvas_size: STANDALONE_CANVAS_SIZE,
            ..Self::default()
        }
    }

    pub fn search_range(&self, axis: Axis) -> SearchRange {
        match axis {
            Axis::Vertical => self.search_range_vertical,
            Axis::Horizontal => self.search_range_horizontal,
        }
    }

    pub fn with_dynamic_detection(mut self, enabled: bool) -> Self {
        self.dynamic_boundary_detection_enabled = enabled;
        self
    }

    pub fn with_noise_removal(mut self, enabled: bool) -> Self {
        self.noise_removal_enabled = enabled;
        self
    }

    pub fn with_canvas_size(mut self, canvas_size: u32) -> Self {
        self.canvas_size = canvas_size;
        self
    }

    pub fn with_search_range(mut self, axis: Axis, range: SearchRange) -> Self {
        match axis {
            Axis::Vertical => self.search_range_vertical = range,
            Axis::Horizontal => self.search_range_horizontal = range,
        }
        self
    }

    pub fn with_scan_step(mut self, scan_step: f32) -> Self {
        self.scan_step = scan_step;
        self
    }

    pub fn with_binary_threshold(mut self, threshold: u8) -> Self {
        self.binary_threshold = threshold;
        self
    }

    pub fn with_min_component_size(mut self, size: u32) -> Self {
        self.noise_removal_min_component_size = size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (name, range) in [
            ("search_range_vertical", self.search_range_vertical),
            ("search_range_horizontal", self.search_range_horizontal),
        ] {
            if !range.is_valid() {
                return Err(PartsError::InvalidValue(format!(
                    "{name} must satisfy 0 <= min <= max <= 1, got [{}, {}]",
                    range.min, range.max
                )));
            }
        }
        if self.scan_step.is_nan() || self.scan_step <= 0.0 {
            return Err(PartsError::InvalidValue(format!(
                "scan_step must be positive, got {}",
                self.scan_step
            )));
        }
        if self.canvas_size == 0 {
            return Err(PartsError::InvalidValue("canvas_size must be non-zero".into()));
        }
        if self.detector.num_candidates == 0 {
            return Err(PartsError::InvalidValue(
                "detector.num_candidates must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ExtractionConfig)
    }
}
