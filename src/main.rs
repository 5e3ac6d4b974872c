use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use title_highlight::{HighlightOutcome, HighlightRequest, HighlightScheduler, Highlighter, OutputMode};

#[derive(Parser, Debug)]
#[command(name = "title-highlight")]
#[command(about = "Highlight feature phrases in a transcribed title and print layers or segments as JSON")]
#[command(version)]
struct Args {
    /// JSON request file with text, mapping and optional features/style
    request: PathBuf,

    /// Override the output mode given in the request
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Layers,
    Segments,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Layers => OutputMode::Layers,
            Mode::Segments => OutputMode::Segments,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging on stderr keeps stdout free for the result document
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    if !args.request.is_file() {
        anyhow::bail!("Request file does not exist: {}", args.request.display());
    }

    let mut request = HighlightRequest::load(&args.request).await?;
    if let Some(mode) = args.mode {
        request.mode = mode.into();
    }

    let highlighter = Highlighter::new(request.config())?;
    let scheduler = HighlightScheduler::new(Arc::new(highlighter));
    let job = request.into_job()?;

    info!(
        "Highlighting {} characters for {} features",
        job.text.chars().count(),
        job.features.len()
    );

    let result = match scheduler.submit(job).resolve().await? {
        HighlightOutcome::Ready(result) => result,
        HighlightOutcome::Superseded => anyhow::bail!("Highlight request was superseded"),
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");

    Ok(())
}
