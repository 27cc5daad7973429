//! ipa-lookup - IPA transcription command-line tool
//!
//! Prints the space-joined transcription of the given words for one
//! registered language, or lists the registered languages.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ipa_common::config::{resolve_config, ResolvedConfig};
use ipa_common::logging::init_tracing;
use ipa_lookup::{Transcriber, BUILTIN_REGISTRY};
use tracing::{info, warn};

/// Command-line arguments for ipa-lookup
#[derive(Parser, Debug)]
#[command(name = "ipa-lookup")]
#[command(about = "Look up IPA transcriptions from public reference sources")]
#[command(version)]
struct Args {
    /// Configuration file (overrides IPA_LOOKUP_CONFIG and the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level for ipa-lookup crates (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Maximum number of words looked up at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Registered language identifier (see --list-languages)
    #[arg(short, long, required_unless_present = "list_languages")]
    language: Option<String>,

    /// Print registered languages and exit
    #[arg(long)]
    list_languages: bool,

    /// Words to transcribe
    words: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let ResolvedConfig {
        mut config,
        warnings,
    } = resolve_config(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging.level)?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    if let Some(concurrency) = args.concurrency {
        config.lookup.concurrency = concurrency;
    }
    config.validate()?;

    if args.list_languages {
        for language in BUILTIN_REGISTRY.languages() {
            println!("{}", language);
        }
        return Ok(());
    }

    let language = args.language.context("--language is required")?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting ipa-lookup");

    let transcriber =
        Transcriber::from_config(&config).context("Failed to initialise HTTP client")?;
    let transcription = transcriber.transcribe(args.words.as_slice(), &language).await?;

    println!("{}", transcription);
    Ok(())
}
