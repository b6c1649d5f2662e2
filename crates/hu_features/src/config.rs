use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::algorithms::ChainApproximation;

/// Parameters of the shape feature extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Side of the square neighborhood of the adaptive threshold. Odd, at least 3.
    pub block_size: u32,
    /// Constant subtracted from the local mean before comparing.
    pub offset: f64,
    /// Radius of the square erosion element (1 means 3x3).
    pub erosion_radius: u8,
    /// Number of erosion passes.
    pub erosion_iterations: u32,
    /// Point representation of extracted contours.
    pub chain_approximation: ChainApproximation,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            block_size: 67,
            offset: 2.0,
            erosion_radius: 1,
            erosion_iterations: 1,
            chain_approximation: ChainApproximation::Simple,
        }
    }
}

/// Everything a dataset build needs
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    /// Labels to process, in output order. Each is a sub-directory of `input_root`.
    pub labels: Vec<String>,
    /// Directory holding one folder of images per label.
    pub input_root: PathBuf,
    /// Path of the CSV table to write.
    pub output_csv: PathBuf,
    /// Maximum number of files read per label.
    pub max_per_label: usize,
    /// Save contour-annotated images instead of waiting for interactive review.
    pub headless_save: bool,
    pub extraction: ExtractionConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            labels: vec!["apple".to_string(), "nike".to_string(), "mercedes".to_string()],
            input_root: PathBuf::from("logos"),
            output_csv: PathBuf::from("generated_data").join("hu.csv"),
            max_per_label: 15,
            headless_save: false,
            extraction: ExtractionConfig::default(),
        }
    }
}

impl DatasetConfig {
    /// Directory next to the output table where annotated images go.
    pub fn contours_dir(&self) -> PathBuf {
        self.output_dir().join("contours")
    }

    pub fn output_dir(&self) -> &Path {
        self.output_csv.parent().unwrap_or_else(|| Path::new(""))
    }

    /// JSON schema of the configuration
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DatasetConfig)
    }
}
