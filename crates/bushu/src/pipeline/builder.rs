use std::path::PathBuf;

use crate::{
    algorithms::{DensityEdgeDetector, NoiseRemover},
    config::ExtractionConfig,
    error::{PartsError, Result},
    pipeline::PartExtractor,
    rasterizer::FontRasterizer,
    traits::{BoundaryDetector, GlyphRasterizer, PartPostProcessor},
};

/// Builder for [`PartExtractor`] with a fluent API
pub struct PartExtractorBuilder {
    config: ExtractionConfig,
    font_path: Option<PathBuf>,
    rasterizer: Option<Box<dyn GlyphRasterizer>>,
    detector: Option<Box<dyn BoundaryDetector>>,
    postprocessors: Vec<Box<dyn PartPostProcessor>>,
}

impl PartExtractorBuilder {
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            font_path: None,
            rasterizer: None,
            detector: None,
            postprocessors: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Rasterize from a font file, loaded at `build` with the final canvas size
    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }

    /// Set the rasterizer (replaces any font path)
    pub fn set_rasterizer<R>(mut self, rasterizer: R) -> Self
    where
        R: GlyphRasterizer + 'static,
    {
        self.rasterizer = Some(Box::new(rasterizer));
        self.font_path = None;
        self
    }

    /// Set the boundary detector (replaces the density/edge default)
    pub fn set_detector<D>(mut self, detector: D) -> Self
    where
        D: BoundaryDetector + 'static,
    {
        self.detector = Some(Box::new(detector));
        self
    }

    /// Add a cleanup step, run after noise removal and before the trim
    pub fn add_postprocessor<P>(mut self, postprocessor: P) -> Self
    where
        P: PartPostProcessor + 'static,
    {
        self.postprocessors.push(Box::new(postprocessor));
        self
    }

    pub fn build(self) -> Result<PartExtractor> {
        self.config.validate()?;

        let rasterizer = match (self.rasterizer, self.font_path) {
            (Some(rasterizer), _) => rasterizer,
            (None, Some(path)) => Box::new(FontRasterizer::from_file(&path, self.config.canvas_size)?),
            (None, None) => {
                return Err(PartsError::InvalidValue(
                    "a font path or glyph rasterizer is required".into(),
                ));
            }
        };

        let detector = self.detector.unwrap_or_else(|| {
            Box::new(DensityEdgeDetector::new(
                self.config.binary_threshold,
                self.config.detector.clone(),
            ))
        });

        let mut postprocessors: Vec<Box<dyn PartPostProcessor>> = Vec::new();
        if self.config.noise_removal_enabled {
            postprocessors.push(Box::new(NoiseRemover {
                min_component_size: self.config.noise_removal_min_component_size,
                ink_threshold: self.config.noise_ink_threshold,
            }));
        }
        postprocessors.extend(self.postprocessors);

        Ok(PartExtractor::new(self.config, rasterizer, detector, postprocessors))
    }
}

impl Default for PartExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
