use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use workchain::config::Config;
use workchain::dictionary::memory::InMemoryDictionary;
use workchain::dictionary::{Dictionary, build_processor, lookup_all};
use workchain::unit::outline;

/// Definitions used when no --dictionary file is given.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("chain", "a series of connected links"),
    ("worker", "one who performs a task"),
    ("guard", "a watch kept to decide who may pass"),
    ("handler", "one who takes charge of a problem"),
];

#[derive(Parser)]
#[command(name = "workchain", version, about = "Look up words through a processor chain.")]
struct Cli {
    /// Words to look up. Each one runs through the processor with its own context.
    words: Vec<String>,

    /// JSON file of "word": "definition" pairs (default: a small built-in set)
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Print the processor layout instead of running lookups
    #[arg(long, default_value_t = false)]
    describe: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.init_tracing()?;

    let dictionary: Arc<dyn Dictionary> = match &cli.dictionary {
        Some(path) => {
            let dict = InMemoryDictionary::from_json_file(path)?;
            tracing::info!(path = %path.display(), entries = dict.len(), "dictionary loaded");
            Arc::new(dict)
        }
        None => Arc::new(InMemoryDictionary::new(BUILTIN_ENTRIES.iter().copied())),
    };

    // Built once, shared by every lookup.
    let processor = build_processor(dictionary);

    if cli.describe {
        print!("{}", outline(&processor));
        return Ok(());
    }

    if cli.words.is_empty() {
        anyhow::bail!("no words given (try --help)");
    }

    let mut failed = false;
    for result in lookup_all(&processor, cli.words).await {
        match result {
            Ok(report) => println!("{}", serde_json::to_string(&report)?),
            Err(e) => {
                tracing::error!(error = %e, "lookup failed");
                failed = true;
            }
        }
    }

    if failed {
        anyhow::bail!("one or more lookups failed");
    }
    Ok(())
}
