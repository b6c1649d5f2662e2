use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Number of invariant shape moments in a feature vector.
pub const FEATURE_COUNT: usize = 7;

/// Column names of the feature part of a dataset row.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = ["hu1", "hu2", "hu3", "hu4", "hu5", "hu6", "hu7"];

/// Boundary of one connected foreground region, as `[x, y]` pixel coordinates
/// in tracing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<[i32; 2]>,
}

impl Contour {
    pub fn new(points: Vec<[i32; 2]>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert to a geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f64> {
        let exterior: Vec<Coord<f64>> = self
            .points
            .iter()
            .map(|&[x, y]| Coord {
                x: x as f64,
                y: y as f64,
            })
            .collect();

        Polygon::new(LineString::new(exterior), Vec::new())
    }

    /// Area enclosed by the contour polyline. Contours with fewer than three
    /// points enclose nothing.
    pub fn area(&self) -> f64 {
        use geo::Area;
        if self.points.len() < 3 {
            return 0.0;
        }
        self.to_geo_polygon().unsigned_area()
    }

    /// Get the bounding box of the contour as `(min, max)` corners.
    pub fn bounding_box(&self) -> Option<([i32; 2], [i32; 2])> {
        let first = *self.points.first()?;
        let bounds = self.points.iter().fold((first, first), |(min, max), &[x, y]| {
            ([min[0].min(x), min[1].min(y)], [max[0].max(x), max[1].max(y)])
        });
        Some(bounds)
    }
}

/// The seven raw Hu invariants, in order `I1..I7`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HuInvariants(pub [f64; FEATURE_COUNT]);

/// Log-rescaled Hu invariants, ready for a dataset row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub(crate) [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl From<HuInvariants> for FeatureVector {
    fn from(raw: HuInvariants) -> Self {
        Self(raw.0.map(crate::moments::log_rescale))
    }
}

/// Dominant contour of an image together with its feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeAnalysis {
    pub contour: Contour,
    pub features: FeatureVector,
}
