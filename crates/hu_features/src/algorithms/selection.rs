use crate::{traits::ShapeSelector, types::Contour};

/// Picks the contour enclosing the largest area.
///
/// On exact ties the first contour in extraction order wins.
#[derive(Debug, Clone, Default)]
pub struct LargestAreaSelector;

impl ShapeSelector for LargestAreaSelector {
    fn select(&self, contours: &[Contour]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, contour) in contours.iter().enumerate() {
            let area = contour.area();
            match best {
                Some((_, best_area)) if area <= best_area => {}
                _ => best = Some((i, area)),
            }
        }
        best.map(|(i, _)| i)
    }
}
