use anyhow::Context;
use clap::Parser;
use figma_tokens::{
    client::parse_file, extract, FigmaClient, FigmaConfig, FileRef, Report,
};
use tracing::info;

mod cli;

use cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("figma-tokens error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let (file, linked_node) = match &cli.input {
        Some(path) => {
            let data = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file = parse_file(&data)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            (file, None)
        }
        None => {
            let mut config = FigmaConfig::load_with_dotenv().context("failed to load config")?;
            if let Some(file_key) = cli.file_key.clone() {
                config.file_key = Some(file_key);
            }
            config.require_access_token()?;
            let file_ref: FileRef = config.require_file_key()?.clone();

            let client = FigmaClient::new(&config)?;
            let Some(file) = client.fetch_document(&file_ref).await else {
                return Ok(());
            };
            (file, file_ref.node_id)
        }
    };

    let node_id = cli.node_id.or(linked_node);
    let report = extract(cli.mode, &file, node_id.as_deref())
        .with_context(|| format!("failed to extract {}", cli.mode.name()))?;
    info!(mode = cli.mode.name(), tokens = report.len(), "extracted");

    print(&report, cli.format, cli.mode.name())
}

fn print(report: &Report, format: OutputFormat, mode: &str) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Css => {
            let Some(css) = report.to_css() else {
                anyhow::bail!("{mode} has no CSS output, use --format json");
            };
            println!("{css}");
        }
    }
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("FIGMA_TOKENS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
