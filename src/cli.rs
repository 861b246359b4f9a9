use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "lowchol",
    about = "Estimate the cholesterol risk of a dish from its likely ingredients",
    version
)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["dish", "ingredients", "ocr", "ocr_base64"])
))]
pub struct Cli {
    /// Dish name to analyze, e.g. "Fettuccine Alfredo"
    pub dish: Option<String>,

    /// Comma-separated ingredient list to score directly, skipping extraction
    #[arg(long, value_name = "LIST")]
    pub ingredients: Option<String>,

    /// Label shown for an `--ingredients` list
    #[arg(long, value_name = "NAME", requires = "ingredients")]
    pub label: Option<String>,

    /// Extract text from a menu image and analyze every dish on it
    #[arg(long, value_name = "IMAGE")]
    pub ocr: Option<PathBuf>,

    /// Like --ocr, for a file holding a base64-encoded image
    #[arg(long = "ocr-base64", value_name = "FILE")]
    pub ocr_base64: Option<PathBuf>,

    /// Config file [default: ./.lowchol/config.toml, fallback ~/.config/lowchol/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show the per-ingredient score breakdown
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print one line per dish
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
