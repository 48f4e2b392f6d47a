use std::path::{Path, PathBuf};

use clap::Parser;

pub const DEFAULT_CONFIG_PATH: &str = "config/extraction_config.yaml";

// Define command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing the source PDF files
    #[arg(short = 'w', long)]
    pub working_dir: PathBuf,

    /// Directory the JSON result files are written to
    #[arg(short = 'o', long)]
    pub output_dir: PathBuf,

    /// Path to the extraction configuration YAML file.
    /// Built-in defaults are used when the default file is absent.
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Optional: Port for the Prometheus metrics HTTP endpoint
    #[arg(long)]
    pub metrics_port: Option<u16>,

    /// Validate the extraction configuration and exit
    #[arg(long)]
    pub validate_config: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Optional: Directory for daily-rotated log files (in addition to stderr)
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// True when `--config` was left at its default value.
    pub fn uses_default_config(&self) -> bool {
        self.config.as_path() == Path::new(DEFAULT_CONFIG_PATH)
    }
}
