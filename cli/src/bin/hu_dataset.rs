use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use hu_features::{annotate_contour, open_image, ContourStyle, DatasetBuilder, DatasetConfig, PipelineBuilder, FEATURE_NAMES};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about = "Build Hu moment feature tables from labeled images", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract features for every labeled image and write the CSV table
    Build {
        /// Path to a TOML or JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory holding one folder per label
        #[arg(long)]
        input_root: Option<PathBuf>,
        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Label to process (repeatable, replaces the configured list)
        #[arg(short, long = "label")]
        labels: Vec<String>,
        /// Maximum number of files per label
        #[arg(long)]
        max_per_label: Option<usize>,
        /// Save annotated contours instead of waiting for review
        #[arg(long)]
        headless: bool,
    },
    /// Print the feature vector of a single image
    Extract {
        /// Image to analyze
        image: PathBuf,
        /// Path to a TOML or JSON configuration file (extraction section is used)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Write the image with its dominant contour drawn to this path
        #[arg(long)]
        annotate: Option<PathBuf>,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            input_root,
            output,
            labels,
            max_per_label,
            headless,
        } => {
            let mut config = load(config.as_deref())?;
            if let Some(input_root) = input_root {
                config.input_root = input_root;
            }
            if let Some(output) = output {
                config.output_csv = output;
            }
            if !labels.is_empty() {
                config.labels = labels;
            }
            if let Some(max) = max_per_label {
                config.max_per_label = max;
            }
            config.headless_save |= headless;
            build_dataset(config)?;
        }
        Commands::Extract { image, config, annotate } => {
            let config = load(config.as_deref())?;
            extract_one(&config, &image, annotate.as_deref())?;
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&DatasetConfig::schema())?);
        }
    }

    Ok(())
}

fn load(path: Option<&Path>) -> Result<DatasetConfig> {
    match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Ok(cli::load_config(path)?)
        }
        None => Ok(DatasetConfig::default()),
    }
}

fn build_dataset(config: DatasetConfig) -> Result<()> {
    info!(
        "Building dataset for {} labels from {} (max {} per label)",
        config.labels.len(),
        config.input_root.display(),
        config.max_per_label
    );

    let report = DatasetBuilder::new(config)?.run()?;

    for (label, rows) in &report.per_label {
        info!("{}: {} rows", label, rows);
    }
    if !report.skipped.is_empty() {
        warn!("Skipped {} files", report.skipped.len());
    }
    if let Some(output) = &report.output {
        info!("✅ Dataset saved to {}", output.display());
    }
    Ok(())
}

fn extract_one(config: &DatasetConfig, path: &Path, annotate: Option<&Path>) -> Result<()> {
    let pipeline = PipelineBuilder::from_config(&config.extraction)?;
    let image = open_image(path)?;

    let Some(analysis) = pipeline.analyze(&image)? else {
        return Err(eyre!("No shape found in {}", path.display()));
    };

    for (name, value) in FEATURE_NAMES.iter().zip(analysis.features.values()) {
        println!("{name} = {value:?}");
    }

    if let Some(out) = annotate {
        annotate_contour(&image, &analysis.contour, &ContourStyle::default()).save(out)?;
        info!("Annotated image saved to {}", out.display());
    }
    Ok(())
}
