//! Review callbacks invoked for every image that produced a feature row.
//!
//! Reviews only look at the contour; they never change the features.

use std::io::{BufRead, StdinLock};
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::info;

use crate::{
    error::Result,
    render::{annotate_contour, ContourStyle},
    types::Contour,
};

/// One processed image handed to a review callback
#[derive(Debug, Clone, Copy)]
pub struct ReviewItem<'a> {
    pub label: &'a str,
    pub source: &'a Path,
    pub image: &'a DynamicImage,
    pub contour: &'a Contour,
}

impl ReviewItem<'_> {
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `<label>__<original file name>`
    pub fn annotated_name(&self) -> String {
        format!("{}__{}", self.label, self.file_name())
    }
}

pub trait ReviewCallback {
    fn review(&mut self, item: &ReviewItem<'_>) -> Result<()>;
}

/// Skips review entirely
#[derive(Debug, Clone, Default)]
pub struct NoReview;

impl ReviewCallback for NoReview {
    fn review(&mut self, _item: &ReviewItem<'_>) -> Result<()> {
        Ok(())
    }
}

/// Saves every annotated image into a directory and moves on
#[derive(Debug, Clone)]
pub struct HeadlessReview {
    pub dir: PathBuf,
    pub style: ContourStyle,
}

impl HeadlessReview {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            style: ContourStyle::default(),
        }
    }
}

impl ReviewCallback for HeadlessReview {
    fn review(&mut self, item: &ReviewItem<'_>) -> Result<()> {
        let path = self.dir.join(item.annotated_name());
        annotate_contour(item.image, item.contour, &self.style).save(&path)?;
        Ok(())
    }
}

/// Writes a preview image and blocks until a line arrives on `input`.
///
/// End of input stops the blocking; later items are previewed without waiting.
pub struct InteractiveReview<R: BufRead> {
    preview_path: PathBuf,
    input: R,
    style: ContourStyle,
    exhausted: bool,
}

impl<R: BufRead> InteractiveReview<R> {
    pub fn new(preview_path: impl Into<PathBuf>, input: R) -> Self {
        Self {
            preview_path: preview_path.into(),
            input,
            style: ContourStyle::default(),
            exhausted: false,
        }
    }

    pub fn preview_path(&self) -> &Path {
        &self.preview_path
    }
}

impl InteractiveReview<StdinLock<'static>> {
    /// Waits on the process's standard input
    pub fn stdin(preview_path: impl Into<PathBuf>) -> Self {
        Self::new(preview_path, std::io::stdin().lock())
    }
}

impl<R: BufRead> ReviewCallback for InteractiveReview<R> {
    fn review(&mut self, item: &ReviewItem<'_>) -> Result<()> {
        annotate_contour(item.image, item.contour, &self.style).save(&self.preview_path)?;
        if self.exhausted {
            return Ok(());
        }

        info!(
            "Review {} for {} ({}), press Enter to continue",
            self.preview_path.display(),
            item.label,
            item.file_name()
        );
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.exhausted = true;
        }
        Ok(())
    }
}
