use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use handoff::config::HandoffConfig;
use std::path::{Path, PathBuf};

const DISCARD_DEVICE: &str = "/dev/null";

#[derive(Parser, Debug)]
#[command(
    name = "extract",
    about = "Extract session data from an agent transcript and draft a handoff"
)]
struct Cli {
    /// Transcript file (one JSON record per line).
    input: PathBuf,

    /// Where to write the handoff skeleton. Omit it, or pass /dev/null, to
    /// print the session summary as JSON instead.
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let extraction = handoff::extract_session(&cli.input);

    match skeleton_target(cli.output.as_deref()) {
        None => {
            let json = serde_json::to_string_pretty(&extraction.summary)
                .context("serialize session summary")?;
            println!("{json}");
        }
        Some(output) => {
            let config = HandoffConfig::from_env();
            let today = Local::now().date_naive();
            if let Err(e) =
                handoff::write_skeleton(&extraction.summary, &config.template_path, output, today)
            {
                tracing::error!("{e}");
            }
        }
    }
    Ok(())
}

/// The handoff destination, or `None` when the summary goes to stdout.
fn skeleton_target(output: Option<&Path>) -> Option<&Path> {
    output.filter(|p| *p != Path::new(DISCARD_DEVICE))
}
