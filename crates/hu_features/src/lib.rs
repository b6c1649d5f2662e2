//! # Hu Shape Features
//!
//! Turns folders of labeled images into a table of shape descriptors for
//! downstream classification.
//!
//! Each image goes through a trait-based pipeline: adaptive threshold,
//! inversion and erosion produce a binary mask, border following lists its
//! contours, the contour enclosing the largest area is kept, and its seven Hu
//! moment invariants are log-scaled into a [`FeatureVector`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! let image = hu_features::open_image(std::path::Path::new("logo.png"))?;
//! if let Some(features) = hu_features::extract(&image) {
//!     println!("{:?}", features.values());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Dataset
//!
//! ```rust,no_run
//! use hu_features::{DatasetBuilder, DatasetConfig};
//!
//! let config = DatasetConfig {
//!     headless_save: true,
//!     ..Default::default()
//! };
//! let report = DatasetBuilder::new(config)?.run()?;
//! println!("{} rows", report.rows_written());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod moments;
pub mod pipeline;
pub mod render;
pub mod review;
pub mod io;
pub mod config;
pub mod dataset;

// Re-exports for convenience
pub use error::{HuError, Result};
pub use types::{Contour, FeatureVector, HuInvariants, ShapeAnalysis, FEATURE_COUNT, FEATURE_NAMES};
pub use traits::*;
pub use algorithms::*;
pub use moments::{log_rescale, Moments};
pub use pipeline::{describe, Pipeline, builder::PipelineBuilder};
pub use render::{annotate_contour, ContourStyle};
pub use review::{HeadlessReview, InteractiveReview, NoReview, ReviewCallback, ReviewItem};
pub use io::{open_image, FeatureTableWriter};
pub use config::{DatasetConfig, ExtractionConfig};
pub use dataset::{build, BuildReport, DatasetBuilder, SkipReason, SkippedFile};

use image::DynamicImage;

/// Feature vector of the dominant shape of `image` using the standard
/// pipeline, `None` when no shape is found.
pub fn extract(image: &DynamicImage) -> Option<FeatureVector> {
    match Pipeline::default().extract(image) {
        Ok(features) => features,
        Err(e) => {
            tracing::warn!("Feature extraction failed: {}", e);
            None
        }
    }
}
