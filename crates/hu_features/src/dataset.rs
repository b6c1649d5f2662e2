//! Dataset builder: walks `input_root/<label>/*`, extracts one feature row per
//! usable image and appends it to the output table.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use strum::Display;
use tracing::{info, warn};

use crate::{
    config::DatasetConfig,
    error::Result,
    io::{open_image, FeatureTableWriter},
    pipeline::{builder::PipelineBuilder, Pipeline},
    review::{HeadlessReview, InteractiveReview, NoReview, ReviewCallback, ReviewItem},
    types::ShapeAnalysis,
};

/// Why a file produced no row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// Could not be decoded as an image
    Unreadable,
    /// No contour after binarization
    NoShape,
    /// The extraction pipeline reported an error
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub label: String,
    pub reason: SkipReason,
}

/// What a build did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Output table location, when written to a file
    pub output: Option<PathBuf>,
    /// Source files of the written rows, in row order
    pub written: Vec<PathBuf>,
    /// Rows written per label, in label order
    pub per_label: Vec<(String, usize)>,
    pub skipped: Vec<SkippedFile>,
    /// Labels with no input files
    pub empty_labels: Vec<String>,
}

impl BuildReport {
    pub fn rows_written(&self) -> usize {
        self.written.len()
    }
}

pub struct DatasetBuilder {
    config: DatasetConfig,
    pipeline: Pipeline,
}

impl DatasetBuilder {
    /// Builder with the extraction pipeline described by `config.extraction`
    pub fn new(config: DatasetConfig) -> Result<Self> {
        let pipeline = PipelineBuilder::from_config(&config.extraction)?;
        Ok(Self::with_pipeline(config, pipeline))
    }

    pub fn with_pipeline(config: DatasetConfig, pipeline: Pipeline) -> Self {
        Self { config, pipeline }
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Build with the review mode selected by `headless_save`: annotated images
    /// saved to the contours directory, or an interactive preview waiting on stdin.
    pub fn run(&self) -> Result<BuildReport> {
        if self.config.headless_save {
            let dir = self.config.contours_dir();
            std::fs::create_dir_all(&dir)?;
            self.build(&mut HeadlessReview::new(dir))
        } else {
            let preview = self.config.output_dir().join("review.png");
            self.build(&mut InteractiveReview::stdin(preview))
        }
    }

    /// Write the table to `config.output_csv`. Failing to open it aborts
    /// before any image is read.
    pub fn build(&self, review: &mut dyn ReviewCallback) -> Result<BuildReport> {
        let output = &self.config.output_csv;
        let mut table = FeatureTableWriter::create(output)?;

        let mut report = self.build_into(&mut table, review)?;
        table.finish()?;

        info!("Saved {} rows to {}", report.rows_written(), output.display());
        report.output = Some(output.clone());
        Ok(report)
    }

    /// Header then one row per usable image, label order outer, file name order inner
    pub fn build_into<W: Write>(
        &self,
        table: &mut FeatureTableWriter<W>,
        review: &mut dyn ReviewCallback,
    ) -> Result<BuildReport> {
        let max = self.config.max_per_label;
        let mut report = BuildReport::default();
        table.write_header()?;

        for label in &self.config.labels {
            let dir = self.config.input_root.join(label);
            let files = label_files(&dir);
            if files.is_empty() {
                warn!("No files found for label '{}' in {}", label, dir.display());
                report.empty_labels.push(label.clone());
                continue;
            }

            let mut written = 0;
            for (idx, path) in files.iter().take(max).enumerate() {
                info!("Processing {} -> {} ({}/{})", label, file_name(path), idx + 1, max);

                match self.process_file(label, path, review) {
                    Ok(analysis) => {
                        table.write_row(&analysis.features, label)?;
                        report.written.push(path.clone());
                        written += 1;
                    }
                    Err(reason) => {
                        warn!("Skipping {} ({})", path.display(), reason);
                        report.skipped.push(SkippedFile {
                            path: path.clone(),
                            label: label.clone(),
                            reason,
                        });
                    }
                }
            }
            report.per_label.push((label.clone(), written));
        }

        Ok(report)
    }

    fn process_file(
        &self,
        label: &str,
        path: &Path,
        review: &mut dyn ReviewCallback,
    ) -> std::result::Result<ShapeAnalysis, SkipReason> {
        let image = open_image(path).map_err(|e| {
            warn!("Could not read {}: {}", path.display(), e);
            SkipReason::Unreadable
        })?;

        let analysis = match self.pipeline.analyze(&image) {
            Ok(Some(analysis)) => analysis,
            Ok(None) => {
                warn!("No contours found in {}", path.display());
                return Err(SkipReason::NoShape);
            }
            Err(e) => {
                warn!("Extraction failed for {}: {}", path.display(), e);
                return Err(SkipReason::Failed);
            }
        };

        let item = ReviewItem {
            label,
            source: path,
            image: &image,
            contour: &analysis.contour,
        };
        if let Err(e) = review.review(&item) {
            warn!("Review failed for {}: {}", path.display(), e);
        }

        Ok(analysis)
    }
}

/// Regular, non-hidden files of `dir` sorted by file name. A missing or
/// unreadable directory has no files.
pub fn label_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| !file_name(path).starts_with('.'))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Build a table from `input_root/<label>/*` into `sink` with the default
/// extraction pipeline and no review.
pub fn build<W: Write>(
    labels: &[String],
    input_root: &Path,
    max_per_label: usize,
    sink: W,
) -> Result<BuildReport> {
    let config = DatasetConfig {
        labels: labels.to_vec(),
        input_root: input_root.to_path_buf(),
        max_per_label,
        ..Default::default()
    };
    let builder = DatasetBuilder::new(config)?;

    let mut table = FeatureTableWriter::new(sink);
    let report = builder.build_into(&mut table, &mut NoReview)?;
    table.finish()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", ".hidden", "c.jpg"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let names: Vec<String> = label_files(dir.path()).iter().map(|p| file_name(p)).collect();
        assert_eq!(names, ["a.png", "b.png", "c.jpg"]);
    }

    #[test]
    fn test_missing_directory_has_no_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(label_files(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NoShape.to_string(), "no_shape");
    }
}
