// gpd-maker: contract and justification contexts from the agreements sheet
use anyhow::{Context, Result};
use clap::Parser;
use engine::config::Settings;
use engine::services::{self, DocumentKind, JsonContextRenderer, RunOptions};
use engine::transform::{RussianSpeller, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gpd-maker", version, about)]
struct Cli {
    /// JSON settings file; built-in defaults are used when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Agreements workbook (`.xlsx`) or delimited text export, overrides `data_file`
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Contract start date, printed verbatim, overrides `start_date`
    #[arg(long, value_name = "TEXT")]
    start_date: Option<String>,

    /// Output root, overrides `result_dir`
    #[arg(long, value_name = "DIR")]
    result_dir: Option<PathBuf>,

    /// Render only one document kind
    #[arg(long, value_enum)]
    only: Option<DocumentKind>,

    /// Build and check every context without writing documents
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env).init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(input) = cli.input {
        settings.data_file = input;
    }
    if let Some(start_date) = cli.start_date {
        settings.start_date = start_date;
    }
    if let Some(result_dir) = cli.result_dir {
        settings.result_dir = result_dir;
    }
    settings.validate().context("invalid settings")?;

    info!("Starting gpd-maker on {}", settings.data_file.display());
    let options = RunOptions {
        only: cli.only,
        dry_run: cli.dry_run,
    };
    let summary = services::run(
        &settings,
        Arc::new(RussianSpeller::new()),
        &SystemClock,
        &JsonContextRenderer,
        &options,
    )
    .map_err(|e| {
        error!(row = ?e.row(), "Run aborted: {}", e);
        e
    })
    .context("run aborted")?;

    info!(
        "Done: {} contractors, {} documents written",
        summary.records,
        summary.written.len()
    );
    Ok(())
}
