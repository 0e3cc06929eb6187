use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use kaiseki_config::Config;
use kaiseki_core::{AnalysisError, TokenizeError};
use kaiseki_lang_japanese::{Analyzer, LinderaTokenizer, ReferenceFrequencyLookup};
use tracing_subscriber::util::SubscriberInitExt;

mod extract;
mod logging;
mod report;


/// Compute statistics of Japanese text.
#[derive(Parser)]
#[command(name = "kaiseki", version, about)]
struct Cli {
    /// Path to a .txt, .epub or .html file
    path: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (subscriber, log_filter) = logging::subscriber(logging::initial_filter(), std::io::stderr);
    subscriber.init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {e:#}");
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::apply_config_filter(
        &log_filter,
        &config.log_filter,
        std::env::var_os("RUST_LOG").is_some(),
    );

    match run(&cli.path, &config) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Analysis aborted: {e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn run(path: &Path, config: &Config) -> anyhow::Result<String> {
    tracing::info!("Analyzing {}", path.display());
    let text = extract::file_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let reference =
        ReferenceFrequencyLookup::load(&config.reference.vocab_path, &config.reference.kanji_path)?;
    let tokenizer = LinderaTokenizer::new(config.tokenizer.mode, &config.tokenizer.dictionary)
        .context("Failed to initialize tokenizer")?;

    let analysis = Analyzer::new(&tokenizer, &reference).analyze_text(&text)?;
    tracing::info!(
        "Analyzed {} sentences, {} words",
        analysis.document.sentence_count,
        analysis.document.vocab_count
    );

    Ok(report::render(&analysis))
}

/// Map the root failure to a stable exit code
pub(crate) fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(analysis) = cause.downcast_ref::<AnalysisError>() {
            return analysis.exit_code();
        }
        if cause.downcast_ref::<TokenizeError>().is_some() {
            return 4;
        }
    }
    1
}
