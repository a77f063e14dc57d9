use anyhow::Result;
use chrono::Local;
use clap::Parser;
use formgen::config::FormgenConfig;
use formgen::{GenerateOptions, Theme};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "render",
    about = "Generate an interactive HTML form from a YAML definition",
    after_help = "Examples:\n  render survey.yaml\n  render survey.yaml -o out/survey.html --theme biopunk"
)]
struct Cli {
    /// YAML form definition.
    input: PathBuf,

    /// Output HTML file (default: input path with .html extension).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Theme::Terminal)]
    theme: Theme,

    /// Directory with theme stylesheets and form scripts.
    #[arg(long)]
    templates_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = FormgenConfig::from_env(cli.templates_dir);
    let generated = formgen::generate_form(&GenerateOptions {
        input: cli.input,
        output: cli.output,
        theme: cli.theme,
        templates_dir: config.templates_dir,
        today: Local::now().date_naive(),
    })?;

    let absolute = std::fs::canonicalize(&generated.output)
        .unwrap_or_else(|_| generated.output.clone());
    println!("✓ Generated form: {}", generated.output.display());
    println!("  Theme: {}", generated.theme);
    println!("  Open in browser: file://{}", absolute.display());
    Ok(())
}
