use hu_features::DatasetConfig;

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Load a dataset configuration from TOML string
pub fn config_from_toml(content: &str) -> Result<DatasetConfig, CliError> {
    Ok(toml::from_str(content)?)
}

/// Load a dataset configuration from JSON string
pub fn config_from_json(content: &str) -> Result<DatasetConfig, CliError> {
    Ok(serde_json::from_str(content)?)
}

/// Auto-detect file format and load configuration
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DatasetConfig, CliError> {
    let path_ref = path.as_ref();
    match path_ref.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => config_from_toml(&fs::read_to_string(path_ref)?),
        Some("json") => config_from_json(&fs::read_to_string(path_ref)?),
        _ => Err(CliError::UnsupportedFileFormat),
    }
}

/// Save a configuration, format chosen by extension
pub fn save_config<P: AsRef<Path>>(config: &DatasetConfig, path: P) -> Result<(), CliError> {
    let path_ref = path.as_ref();
    let content = match path_ref.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::to_string_pretty(config)?,
        Some("json") => serde_json::to_string_pretty(config)?,
        _ => return Err(CliError::UnsupportedFileFormat),
    };
    fs::write(path_ref, content)?;
    Ok(())
}
