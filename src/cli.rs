use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use figma_tokens::{FileRef, Mode};

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Css,
}

/// Extract design tokens from a Figma file.
#[derive(Debug, Parser)]
#[command(name = "figma-tokens", version, about)]
pub struct Cli {
    /// What to extract
    #[arg(value_enum, default_value_t = Mode::Typography)]
    pub mode: Mode,

    /// Figma file key or link; overrides FIGMA_FILE_KEY / FILE_ID
    #[arg(short = 'k', long)]
    pub file_key: Option<FileRef>,

    /// Read a saved `GET /v1/files/:key` response instead of calling the API
    #[arg(short, long, conflicts_with = "file_key")]
    pub input: Option<PathBuf>,

    /// Only extract below this node (e.g. 12:34)
    #[arg(long)]
    pub node_id: Option<String>,

    /// Output format: json, css
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}
