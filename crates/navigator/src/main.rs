// Chunk: docs/chunks/scenario_replay - Scripted navigator sessions

//! compass-replay: runs a navigator scenario against an in-memory host.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use compass::scenario::{Replay, Scenario};
use compass::Settings;

#[derive(Parser, Debug)]
#[command(name = "compass-replay")]
#[command(about = "Replay a scripted navigator session and print what the navigator does")]
struct Args {
    /// Scenario file (JSON)
    scenario: PathBuf,

    /// Settings file; defaults to the user's compass settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::load_default()?,
    };

    let level = if args.debug || settings.debug { "debug" } else { "warn" };
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    let text = fs::read_to_string(&args.scenario)
        .with_context(|| format!("failed to read scenario {}", args.scenario.display()))?;
    let scenario: Scenario = serde_json::from_str(&text)
        .with_context(|| format!("invalid scenario {}", args.scenario.display()))?;

    let mut replay = Replay::new(&scenario, settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    replay.run(&scenario.steps, &mut out)?;
    out.flush()?;
    Ok(())
}
