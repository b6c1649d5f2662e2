use image::GrayImage;
use crate::{error::Result, traits::ContourExtractor, types::Contour};

/// Imageproc-based contour extractor.
///
/// Returns outer borders and hole borders alike, in the order the border
/// following algorithm meets them (row-major scan), without hierarchy.
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourExtractor;

impl ContourExtractor for ImageprocContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Result<Vec<Contour>> {
        let contours = imageproc::contours::find_contours::<i32>(binary_image);

        let result = contours
            .into_iter()
            .map(|contour| {
                Contour::new(contour.points.iter().map(|p| [p.x, p.y]).collect())
            })
            .collect();

        Ok(result)
    }
}
