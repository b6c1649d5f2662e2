use image::{GrayImage, ImageBuffer, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::separable_filter_equal;

use crate::{
    error::{HuError, Result},
    traits::ImagePreprocessor,
};

/// Gaussian-weighted local-mean threshold.
///
/// A pixel becomes white when its intensity exceeds the Gaussian-weighted
/// mean of its `block_size x block_size` neighborhood minus `c`, black
/// otherwise. Dark figures therefore come out black on a white background.
#[derive(Debug, Clone)]
pub struct AdaptiveThresholdPreprocessor {
    pub block_size: u32,
    pub c: f64,
}

impl Default for AdaptiveThresholdPreprocessor {
    fn default() -> Self {
        Self {
            block_size: 67,
            c: 2.0,
        }
    }
}

impl AdaptiveThresholdPreprocessor {
    pub fn new(block_size: u32, c: f64) -> Result<Self> {
        if block_size < 3 || block_size % 2 == 0 {
            return Err(HuError::InvalidParameter(format!(
                "adaptive threshold block size must be odd and at least 3, got {block_size}"
            )));
        }
        if !c.is_finite() {
            return Err(HuError::InvalidParameter(format!(
                "adaptive threshold offset must be finite, got {c}"
            )));
        }
        Ok(Self { block_size, c })
    }

    /// Normalized 1-D Gaussian kernel of length `block_size`, with sigma
    /// derived from the length.
    fn kernel(&self) -> Vec<f32> {
        let size = self.block_size as usize;
        let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
        let half = (size / 2) as f64;
        let scale = -0.5 / (sigma * sigma);

        let raw: Vec<f64> = (0..size)
            .map(|i| {
                let d = i as f64 - half;
                (scale * d * d).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        raw.into_iter().map(|w| (w / sum) as f32).collect()
    }

    /// Gaussian-weighted local mean of every pixel, replicating border pixels.
    fn local_mean(&self, image: &GrayImage) -> ImageBuffer<Luma<f32>, Vec<f32>> {
        let intensities = ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            Luma([image.get_pixel(x, y)[0] as f32])
        });
        separable_filter_equal(&intensities, &self.kernel())
    }
}

impl ImagePreprocessor for AdaptiveThresholdPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        if image.width() == 0 || image.height() == 0 {
            return Ok(image.clone());
        }

        let mean = self.local_mean(image);
        let c = self.c as f32;
        let mut out = GrayImage::new(image.width(), image.height());
        for ((dst, src), m) in out.pixels_mut().zip(image.pixels()).zip(mean.pixels()) {
            let threshold = m[0].round().clamp(0.0, 255.0) - c;
            *dst = if src[0] as f32 > threshold { Luma([255]) } else { Luma([0]) };
        }
        Ok(out)
    }
}

/// Swaps foreground and background of an 8-bit image
#[derive(Debug, Clone, Default)]
pub struct InvertPreprocessor;

impl ImagePreprocessor for InvertPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        let mut out = image.clone();
        image::imageops::invert(&mut out);
        Ok(out)
    }
}

/// Morphological erosion with a square all-ones structuring element of side
/// `2 * radius + 1`, applied `iterations` times.
#[derive(Debug, Clone)]
pub struct ErosionPreprocessor {
    pub radius: u8,
    pub iterations: u32,
}

impl Default for ErosionPreprocessor {
    fn default() -> Self {
        Self {
            radius: 1,
            iterations: 1,
        }
    }
}

impl ErosionPreprocessor {
    pub fn new(radius: u8, iterations: u32) -> Result<Self> {
        if radius == 0 {
            return Err(HuError::InvalidParameter(
                "erosion radius must be at least 1".to_string(),
            ));
        }
        Ok(Self { radius, iterations })
    }
}

impl ImagePreprocessor for ErosionPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> Result<GrayImage> {
        let mut out = image.clone();
        for _ in 0..self.iterations {
            out = imageproc::morphology::erode(&out, Norm::LInf, self.radius);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::drawing::draw_filled_rect_mut;
    use imageproc::rect::Rect;

    fn dark_square_on_light() -> GrayImage {
        let mut img = GrayImage::from_pixel(100, 100, Luma([230u8]));
        draw_filled_rect_mut(&mut img, Rect::at(30, 30).of_size(20, 20), Luma([20u8]));
        img
    }

    #[test]
    fn test_rejects_invalid_block_size() {
        assert!(AdaptiveThresholdPreprocessor::new(4, 2.0).is_err());
        assert!(AdaptiveThresholdPreprocessor::new(1, 2.0).is_err());
        assert!(AdaptiveThresholdPreprocessor::new(67, f64::NAN).is_err());
        assert!(AdaptiveThresholdPreprocessor::new(67, 2.0).is_ok());
    }

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        let kernel = AdaptiveThresholdPreprocessor::default().kernel();
        assert_eq!(kernel.len(), 67);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
        assert_eq!(kernel[0], kernel[66]);
        assert!(kernel[33] > kernel[32]);
    }

    #[test]
    fn test_local_mean_replicates_border() {
        let img = GrayImage::from_pixel(40, 30, Luma([200u8]));
        let mean = AdaptiveThresholdPreprocessor::default().local_mean(&img);
        assert_eq!(mean.dimensions(), (40, 30));
        for corner in [(0, 0), (39, 0), (0, 29), (39, 29), (20, 15)] {
            let value = mean.get_pixel(corner.0, corner.1)[0];
            assert!((value - 200.0).abs() < 0.05, "{:?}: {}", corner, value);
        }
    }

    #[test]
    fn test_local_mean_weights_center() {
        let mut img = GrayImage::from_pixel(81, 81, Luma([0u8]));
        img.put_pixel(40, 40, Luma([255u8]));
        let preprocessor = AdaptiveThresholdPreprocessor::new(9, 2.0).unwrap();
        let kernel = preprocessor.kernel();
        let mean = preprocessor.local_mean(&img);

        let expected = 255.0 * kernel[4] * kernel[4];
        assert!((mean.get_pixel(40, 40)[0] - expected).abs() < 1e-3);
        assert!(mean.get_pixel(40, 40)[0] > mean.get_pixel(41, 40)[0]);
        assert_eq!(mean.get_pixel(50, 40)[0], 0.0);
    }

    #[test]
    fn test_uniform_image_is_all_white() {
        let img = GrayImage::from_pixel(50, 40, Luma([128u8]));
        let out = AdaptiveThresholdPreprocessor::default().preprocess(&img).unwrap();
        assert!(out.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_dark_figure_is_black() {
        let img = dark_square_on_light();
        let out = AdaptiveThresholdPreprocessor::default().preprocess(&img).unwrap();
        assert_eq!(out.get_pixel(31, 31)[0], 0);
        assert_eq!(out.get_pixel(5, 5)[0], 255);
        assert_eq!(out.get_pixel(60, 60)[0], 255);
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_invert() {
        let img = GrayImage::from_pixel(3, 3, Luma([255u8]));
        let out = InvertPreprocessor.preprocess(&img).unwrap();
        assert!(out.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_erosion_removes_single_pixels_and_shrinks_blocks() {
        let mut img = GrayImage::new(30, 30);
        img.put_pixel(3, 3, Luma([255u8]));
        draw_filled_rect_mut(&mut img, Rect::at(10, 10).of_size(10, 10), Luma([255u8]));

        let out = ErosionPreprocessor::default().preprocess(&img).unwrap();
        assert_eq!(out.get_pixel(3, 3)[0], 0);
        assert_eq!(out.get_pixel(10, 10)[0], 0);
        assert_eq!(out.get_pixel(11, 11)[0], 255);
        assert_eq!(out.get_pixel(18, 18)[0], 255);
        assert_eq!(out.get_pixel(19, 19)[0], 0);
    }

    #[test]
    fn test_erosion_rejects_zero_radius() {
        assert!(ErosionPreprocessor::new(0, 1).is_err());
    }
}
