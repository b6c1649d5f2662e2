//! Diagnostic rendering of a selected contour over its source image.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::types::Contour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContourStyle {
    pub color: Rgb<u8>,
    pub thickness: u32,
}

impl Default for ContourStyle {
    fn default() -> Self {
        Self {
            color: Rgb([0, 255, 0]),
            thickness: 2,
        }
    }
}

/// Copy of `image` with `contour` drawn as a closed polyline.
pub fn annotate_contour(image: &DynamicImage, contour: &Contour, style: &ContourStyle) -> RgbImage {
    let mut canvas = image.to_rgb8();
    let points = &contour.points;
    if points.is_empty() {
        return canvas;
    }

    let thickness = style.thickness.max(1) as i32;
    for i in 0..points.len() {
        let [x0, y0] = points[i];
        let [x1, y1] = points[(i + 1) % points.len()];
        for dy in 0..thickness {
            for dx in 0..thickness {
                draw_line_segment_mut(
                    &mut canvas,
                    ((x0 + dx) as f32, (y0 + dy) as f32),
                    ((x1 + dx) as f32, (y1 + dy) as f32),
                    style.color,
                );
            }
        }
    }
    canvas
}
