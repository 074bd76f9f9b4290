//! Amelia CLI
//!
//! Local execution entry point. The Lambda functions live in
//! `conversation-loader`, `intent-classifier` and `intent-classifier-scoped`.

use std::path::PathBuf;

use amelia::{
    error::Result,
    models::Config,
    services::{build_prompt, parse_intents},
    transform::{read_rows, transform_rows},
    warehouse::insert_statement,
};
use clap::{Parser, Subcommand};

/// Amelia - conversation log loader and intent classifier
#[derive(Parser, Debug)]
#[command(
    name = "amelia",
    version,
    about = "Amelia conversation loader and intent classifier"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "amelia.toml")]
    config: PathBuf,

    /// Read objects from `{dir}/{bucket}/{key}` instead of S3
    #[cfg(feature = "aws")]
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a conversation export and print one JSON record per line
    Transform {
        /// Conversation export CSV
        input: PathBuf,
    },

    /// Print the INSERT statements a load would submit
    Sql {
        /// Conversation export CSV
        input: PathBuf,

        /// Target table (default: warehouse.table from config)
        #[arg(long)]
        table: Option<String>,
    },

    /// Print the classification prompt for an utterance
    Prompt {
        /// Intent reference CSV (`label,example` rows)
        #[arg(long)]
        intents: PathBuf,

        /// Restrict the prompt to these intents
        #[arg(long = "only")]
        only: Vec<String>,

        utterance: String,
    },

    /// Validate configuration
    Validate,

    /// Load a conversation export into Redshift
    #[cfg(feature = "aws")]
    Load {
        /// Source bucket (default: source.bucket from config)
        #[arg(long)]
        bucket: Option<String>,

        /// Source key (default: source.key from config)
        #[arg(long)]
        key: Option<String>,
    },

    /// Classify an utterance with the configured model
    #[cfg(feature = "aws")]
    Classify {
        /// Restrict classification to these intents
        #[arg(long = "only")]
        only: Vec<String>,

        utterance: String,
    },
}

/// Local directory store when `--storage-dir` is given, S3 otherwise.
#[cfg(feature = "aws")]
async fn object_store(
    storage_dir: Option<PathBuf>,
) -> std::sync::Arc<dyn amelia::storage::ObjectStore> {
    use std::sync::Arc;

    use amelia::storage::{LocalObjectStore, S3ObjectStore};

    match storage_dir {
        Some(dir) => {
            log::info!("Reading objects from {}", dir.display());
            Arc::new(LocalObjectStore::new(dir))
        }
        None => Arc::new(S3ObjectStore::from_env().await),
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env(|name| std::env::var(name).ok());
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Transform { input } => {
            let rows = read_rows(&std::fs::read(&input)?)?;
            for record in transform_rows(&rows) {
                println!("{}", serde_json::to_string(&record)?);
            }
            log::info!("Transformed {} rows from {}", rows.len(), input.display());
        }

        Command::Sql { input, table } => {
            let table = table.unwrap_or_else(|| config.warehouse.table.clone());
            let rows = read_rows(&std::fs::read(&input)?)?;
            for record in transform_rows(&rows) {
                println!("{}", insert_statement(&table, &record));
            }
        }

        Command::Prompt {
            intents,
            only,
            utterance,
        } => {
            let selected = (!only.is_empty()).then_some(only.as_slice());
            let catalog = parse_intents(&std::fs::read(&intents)?, selected)?;
            if catalog.is_empty() {
                log::warn!("No intents selected from {}", intents.display());
            }
            println!("{}", build_prompt(&utterance, &catalog));
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            match config.validate_loader() {
                Ok(()) => log::info!("✓ Loader config OK"),
                Err(e) => log::warn!("Loader config: {}", e),
            }
            match config.validate_classifier() {
                Ok(()) => log::info!("✓ Classifier config OK"),
                Err(e) => log::warn!("Classifier config: {}", e),
            }

            config.validate_loader()?;
            config.validate_classifier()?;
            log::info!("All validations passed!");
        }

        #[cfg(feature = "aws")]
        Command::Load { bucket, key } => {
            use amelia::handlers::{LoadRequest, run_load};
            use amelia::warehouse::RedshiftDataExecutor;

            config.validate_loader()?;
            let location = LoadRequest { bucket, key }.location(&config.source);

            let store = object_store(cli.storage_dir).await;
            let executor = RedshiftDataExecutor::from_env(&config.warehouse).await;
            let summary = run_load(store.as_ref(), &executor, &config, &location).await?;

            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        #[cfg(feature = "aws")]
        Command::Classify { only, utterance } => {
            use std::sync::Arc;

            use amelia::llm::BedrockTextGenerator;
            use amelia::services::IntentClassifier;

            config.validate_classifier()?;
            let classifier = IntentClassifier::new(
                object_store(cli.storage_dir).await,
                Arc::new(BedrockTextGenerator::from_env(&config.classifier.model_id).await),
                &config.classifier,
            );

            let selected = (!only.is_empty()).then_some(only.as_slice());
            let catalog = classifier.load_intents(selected).await?;
            let intent = classifier.label(&utterance, &catalog).await?;

            println!("{}", intent);
        }
    }

    Ok(())
}
