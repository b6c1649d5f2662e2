use image::GrayImage;
use crate::{error::Result, types::Contour};

/// Trait for image preprocessing algorithms
pub trait ImagePreprocessor: Send + Sync {
    /// Preprocess the input image (e.g., threshold, invert, erode)
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract every border of the binary image as a flat list.
    /// Non-zero pixels are foreground.
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for contour point reduction algorithms
pub trait ContourSimplifier: Send + Sync {
    /// Reduce the point count of the contours in place
    fn simplify(&self, contours: &mut [Contour]) -> Result<()>;
}

/// Trait for picking the contour to describe
pub trait ShapeSelector: Send + Sync {
    /// Index of the selected contour, `None` when `contours` is empty.
    /// Must be deterministic for a given input.
    fn select(&self, contours: &[Contour]) -> Option<usize>;
}
