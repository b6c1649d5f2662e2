use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use strum::{Display, EnumString, IntoStaticStr, VariantNames};
use crate::{error::Result, traits::ContourSimplifier, types::Contour};

/// How contour points are stored after border following
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, VariantNames, IntoStaticStr,
    PartialEq, Eq
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChainApproximation {
    /// Keep every traced boundary point
    None,
    /// Collapse straight horizontal, vertical and diagonal runs to their end points
    #[default]
    Simple,
}

impl ChainApproximation {
    /// The simplifier implementing this approximation, if any
    pub fn simplifier(self) -> Option<CollinearRunSimplifier> {
        match self {
            Self::None => None,
            Self::Simple => Some(CollinearRunSimplifier),
        }
    }
}

/// Drops points lying strictly inside a straight run of a closed contour.
///
/// The enclosed polygon is unchanged, so area and moments are unchanged.
#[derive(Debug, Clone, Default)]
pub struct CollinearRunSimplifier;

impl CollinearRunSimplifier {
    fn compress(points: &[[i32; 2]]) -> Vec<[i32; 2]> {
        let n = points.len();
        if n < 3 {
            return points.to_vec();
        }

        let kept: Vec<[i32; 2]> = (0..n)
            .filter(|&i| {
                let [px, py] = points[(i + n - 1) % n];
                let [cx, cy] = points[i];
                let [nx, ny] = points[(i + 1) % n];
                let (ax, ay) = ((cx - px) as i64, (cy - py) as i64);
                let (bx, by) = ((nx - cx) as i64, (ny - cy) as i64);
                let collinear = ax * by - ay * bx == 0;
                let forward = ax * bx + ay * by > 0;
                !(collinear && forward)
            })
            .map(|i| points[i])
            .collect();

        if kept.is_empty() { points.to_vec() } else { kept }
    }
}

impl ContourSimplifier for CollinearRunSimplifier {
    fn simplify(&self, contours: &mut [Contour]) -> Result<()> {
        for contour in contours {
            contour.points = Self::compress(&contour.points);
        }
        Ok(())
    }
}
