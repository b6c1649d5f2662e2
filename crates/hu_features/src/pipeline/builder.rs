use crate::{
    config::ExtractionConfig,
    error::Result,
    pipeline::Pipeline,
    traits::{ImagePreprocessor, ContourExtractor, ContourSimplifier, ShapeSelector},
    algorithms::{
        AdaptiveThresholdPreprocessor,
        ChainApproximation,
        CollinearRunSimplifier,
        ErosionPreprocessor,
        ImageprocContourExtractor,
        InvertPreprocessor,
        LargestAreaSelector,
    },
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Option<Box<dyn ContourExtractor>>,
    simplifier: Option<Box<dyn ContourSimplifier>>,
    selector: Option<Box<dyn ShapeSelector>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            preprocessors: Vec::new(),
            contour_extractor: None,
            simplifier: None,
            selector: None,
        }
    }

    /// Add a preprocessor to the pipeline
    pub fn add_preprocessor<P>(mut self, preprocessor: P) -> Self
    where
        P: ImagePreprocessor + 'static,
    {
        self.preprocessors.push(Box::new(preprocessor));
        self
    }

    /// Set the contour extractor (replaces any existing one)
    pub fn set_contour_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ContourExtractor + 'static,
    {
        self.contour_extractor = Some(Box::new(extractor));
        self
    }

    /// Set the contour simplifier (replaces any existing one)
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: ContourSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    /// Set the shape selector (replaces any existing one)
    pub fn set_selector<S>(mut self, selector: S) -> Self
    where
        S: ShapeSelector + 'static,
    {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Store contours according to `approximation`
    pub fn with_chain_approximation(mut self, approximation: ChainApproximation) -> Self {
        self.simplifier = approximation
            .simplifier()
            .map(|s| Box::new(s) as Box<dyn ContourSimplifier>);
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let contour_extractor = self.contour_extractor
            .unwrap_or_else(|| Box::new(ImageprocContourExtractor));

        let selector = self.selector
            .unwrap_or_else(|| Box::new(LargestAreaSelector));

        Pipeline::new(
            self.preprocessors,
            contour_extractor,
            self.simplifier,
            selector,
        )
    }

    /// Adaptive threshold, invert, erode, then pick the largest contour
    pub fn from_config(config: &ExtractionConfig) -> Result<Pipeline> {
        let threshold = AdaptiveThresholdPreprocessor::new(config.block_size, config.offset)?;
        let erosion = ErosionPreprocessor::new(config.erosion_radius, config.erosion_iterations)?;

        Ok(Self::new()
            .add_preprocessor(threshold)
            .add_preprocessor(InvertPreprocessor)
            .add_preprocessor(erosion)
            .set_contour_extractor(ImageprocContourExtractor)
            .with_chain_approximation(config.chain_approximation)
            .set_selector(LargestAreaSelector)
            .build())
    }

    /// The pipeline for dark figures on a light background with default parameters
    pub fn standard() -> Pipeline {
        Self::new()
            .add_preprocessor(AdaptiveThresholdPreprocessor::default())
            .add_preprocessor(InvertPreprocessor)
            .add_preprocessor(ErosionPreprocessor::default())
            .set_simplifier(CollinearRunSimplifier)
            .build()
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
