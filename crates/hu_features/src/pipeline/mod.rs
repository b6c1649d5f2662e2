pub mod builder;

use image::{DynamicImage, GrayImage};
use tracing::debug;
use crate::{
    error::Result,
    moments::Moments,
    types::{Contour, FeatureVector, ShapeAnalysis},
    traits::{ImagePreprocessor, ContourExtractor, ContourSimplifier, ShapeSelector},
};

/// Shape feature extraction pipeline: binarize, find contours, pick the
/// dominant one and describe it with log-scaled Hu invariants.
pub struct Pipeline {
    preprocessors: Vec<Box<dyn ImagePreprocessor>>,
    contour_extractor: Box<dyn ContourExtractor>,
    simplifier: Option<Box<dyn ContourSimplifier>>,
    selector: Box<dyn ShapeSelector>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        preprocessors: Vec<Box<dyn ImagePreprocessor>>,
        contour_extractor: Box<dyn ContourExtractor>,
        simplifier: Option<Box<dyn ContourSimplifier>>,
        selector: Box<dyn ShapeSelector>,
    ) -> Self {
        Self {
            preprocessors,
            contour_extractor,
            simplifier,
            selector,
        }
    }

    /// Run the preprocessors in sequence, producing the binary mask
    pub fn binarize(&self, image: &GrayImage) -> Result<GrayImage> {
        let mut processed_image = image.clone();
        for preprocessor in &self.preprocessors {
            processed_image = preprocessor.preprocess(&processed_image)?;
        }
        Ok(processed_image)
    }

    /// All contours of the binarized image, in extraction order
    pub fn contours(&self, image: &GrayImage) -> Result<Vec<Contour>> {
        let mask = self.binarize(image)?;
        let mut contours = self.contour_extractor.extract_contours(&mask)?;
        if let Some(simplifier) = &self.simplifier {
            simplifier.simplify(&mut contours)?;
        }
        Ok(contours)
    }

    /// The dominant contour of a grayscale image, `None` when there is no shape
    pub fn dominant_contour(&self, image: &GrayImage) -> Result<Option<Contour>> {
        if image.width() == 0 || image.height() == 0 {
            debug!("Degenerate image {}x{}", image.width(), image.height());
            return Ok(None);
        }

        let mut contours = self.contours(image)?;
        debug!("Found {} contours", contours.len());

        let Some(index) = self.selector.select(&contours) else {
            return Ok(None);
        };
        Ok(Some(contours.swap_remove(index)))
    }

    /// Dominant contour and its feature vector
    pub fn analyze(&self, image: &DynamicImage) -> Result<Option<ShapeAnalysis>> {
        let gray = image.to_luma8();
        let analysis = self.dominant_contour(&gray)?.map(|contour| {
            let features = describe(&contour);
            ShapeAnalysis { contour, features }
        });
        Ok(analysis)
    }

    /// Feature vector of the image's dominant shape
    pub fn extract(&self, image: &DynamicImage) -> Result<Option<FeatureVector>> {
        Ok(self.analyze(image)?.map(|analysis| analysis.features))
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} preprocessors, 1 contour extractor, {} simplifier, 1 shape selector",
            self.preprocessors.len(),
            if self.simplifier.is_some() { "1" } else { "no" }
        )
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        builder::PipelineBuilder::standard()
    }
}

/// Log-scaled Hu invariants of a contour
pub fn describe(contour: &Contour) -> FeatureVector {
    FeatureVector::from(Moments::of_contour(contour).hu_invariants())
}
