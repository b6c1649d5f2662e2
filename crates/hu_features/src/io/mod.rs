pub mod csv;

pub use self::csv::*;

use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::Result;

/// Decode the image at `path`, picking the format from the file contents so
/// missing or wrong extensions do not matter.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}
