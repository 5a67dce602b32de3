//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CIP - Lint domain profiles and run profile-based detection.
#[derive(Debug, Parser)]
#[command(name = "cip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Settings file (TOML)
    #[arg(short, long, global = true, env = "CIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names and scores only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate every profile document in a directory
    Validate(ValidateArgs),

    /// Validate a single profile document
    Check(CheckArgs),

    /// List the profiles a directory would register
    List(ListArgs),

    /// Run detection under a registered profile
    Detect(DetectArgs),
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Directory of profile documents
    pub dir: PathBuf,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Profile document (YAML)
    pub file: PathBuf,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Profile directory (defaults to the configured profiles_dir)
    pub dir: Option<PathBuf>,
}

/// Arguments for the detect command.
#[derive(Debug, Parser)]
pub struct DetectArgs {
    /// Registered profile name
    pub profile: String,

    /// Layer values, one per profile layer (e.g. 0.6,0.4,0.5,0.7)
    #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
    pub values: Vec<f64>,

    /// Detection mode
    #[arg(short, long, value_enum, default_value = "friction")]
    pub mode: ModeArg,

    /// Temporal multiplier
    #[arg(long, default_value = "1.0")]
    pub f_time: f64,

    /// Temporal kernel type; must be on the profile's allowlist
    #[arg(short, long)]
    pub kernel: Option<String>,

    /// Threshold override as name=value (repeatable)
    #[arg(short, long = "threshold", value_parser = parse_threshold)]
    pub thresholds: Vec<(String, f64)>,

    /// Interaction mode
    #[arg(long, default_value = "dynamic")]
    pub interaction_mode: String,

    /// Interaction override mode
    #[arg(long, default_value = "scale")]
    pub override_mode: String,

    /// Profile directory (defaults to the configured profiles_dir)
    #[arg(long)]
    pub profiles_dir: Option<PathBuf>,

    /// Detector endpoint (defaults to the configured detector_url)
    #[arg(long)]
    pub detector_url: Option<String>,
}

/// Detection mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Friction detection
    Friction,
    /// Emergence detection
    Emergence,
}

impl From<ModeArg> for cip_domain::DetectionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Friction => cip_domain::DetectionMode::Friction,
            ModeArg::Emergence => cip_domain::DetectionMode::Emergence,
        }
    }
}

fn parse_threshold(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", s))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("threshold '{}' must be a number", name))?;
    Ok((name.trim().to_string(), value))
}
