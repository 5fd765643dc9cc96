//! roster-link: command-line front end for name and ID linking.
//!
//! Reads identity records from a JSON or JSON-lines file, scans text for
//! mentions of those people, and prints the resulting link map as JSON.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_core::{defaults, IdentityRecord, RecordFilter, RecordSource};
use roster_db::{MemoryRecordStore, RecordCatalog};
use roster_link::{generate_aliases, Linker, LinkerConfig};

#[derive(Parser)]
#[command(name = "roster-link")]
#[command(author, version, about = "Link names and student IDs in text to image URLs")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a linker.toml (default: ~/.config/roster-link/linker.toml, then env)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve names and IDs mentioned in text
    Link {
        /// Identity records (JSON array or JSON lines)
        #[arg(short, long)]
        records: PathBuf,

        /// Text to scan (default: stdin)
        #[arg(short, long)]
        text: Option<PathBuf>,

        /// Base URL for image links
        #[arg(long)]
        base_url: Option<String>,

        /// Structured ID prefix
        #[arg(long)]
        id_prefix: Option<String>,

        /// Drop single first names or surnames shared by several people
        #[arg(long)]
        strict: bool,

        /// Record filter as JSON, e.g. '{"section": {"$in": ["A", "B"]}}'
        #[arg(short, long)]
        filter: Option<String>,

        /// Maximum records considered
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the name variants generated for a person
    Aliases {
        #[arg(long)]
        first: Option<String>,

        #[arg(long)]
        middle: Option<String>,

        #[arg(long)]
        surname: Option<String>,

        #[arg(long)]
        full: Option<String>,
    },

    /// Show a few records from a file
    Peek {
        /// Identity records (JSON array or JSON lines)
        #[arg(short, long)]
        records: PathBuf,

        /// Number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Count records in a file
    Count {
        /// Identity records (JSON array or JSON lines)
        #[arg(short, long)]
        records: PathBuf,
    },
}

/// Initialize tracing.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: roster crates at info)
///
/// Console output goes to stderr; stdout carries command output only.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| defaults::LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(ref path) = log_file {
        let file_dir = Path::new(path).parent().unwrap_or(Path::new("."));
        let file_name = Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("roster-link.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<LinkerConfig> {
    let config = match path {
        Some(path) => LinkerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => LinkerConfig::load().context("Failed to load config")?,
    };
    Ok(config)
}

fn read_text(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read text from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            Ok(text)
        }
    }
}

async fn open_store(path: &Path) -> anyhow::Result<MemoryRecordStore> {
    MemoryRecordStore::load_json_file(path)
        .await
        .with_context(|| format!("Failed to load records from {}", path.display()))
}

#[allow(clippy::too_many_arguments)]
async fn cmd_link(
    config: LinkerConfig,
    records: &Path,
    text: Option<&Path>,
    base_url: Option<String>,
    id_prefix: Option<String>,
    strict: bool,
    filter: Option<String>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let mut config = config;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    if let Some(id_prefix) = id_prefix {
        config.id_prefix = id_prefix.trim().to_uppercase();
    }
    if strict {
        config.allow_ambiguous_single_tokens = false;
    }
    if let Some(limit) = limit {
        config.query_limit = limit;
    }
    let linker = Linker::from_config(&config)?;

    let filter = filter
        .map(|raw| {
            let value: serde_json::Value =
                serde_json::from_str(&raw).context("Filter is not valid JSON")?;
            RecordFilter::from_json(&value).context("Invalid record filter")
        })
        .transpose()?;

    // The records file is served as the first configured collection.
    let collection = config
        .collections
        .first()
        .cloned()
        .unwrap_or_else(|| defaults::COLLECTION.to_string());
    let store: Arc<dyn RecordSource> = Arc::new(open_store(records).await?);
    let catalog = RecordCatalog::new()
        .with_source(collection.clone(), store)
        .allow_only([collection]);

    let identities = catalog
        .collect_identities(filter.as_ref(), config.query_limit)
        .await?;
    let text = read_text(text)?;

    let resolver = config.url_resolver();
    let result = linker.link(&text, &identities, &resolver);

    info!(
        record_count = identities.len(),
        id_matches = result.by_id.len(),
        name_matches = result.by_name.len(),
        "Link map built"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn cmd_aliases(
    first: Option<String>,
    middle: Option<String>,
    surname: Option<String>,
    full: Option<String>,
) -> anyhow::Result<()> {
    let mut record = IdentityRecord::new();
    if let Some(first) = first {
        record = record.with_first_name(first);
    }
    if let Some(middle) = middle {
        record = record.with_middle_name(middle);
    }
    if let Some(surname) = surname {
        record = record.with_surname(surname);
    }
    if let Some(full) = full {
        record = record.with_full_name(full);
    }

    let aliases = generate_aliases(&record);
    println!("{}", serde_json::to_string_pretty(&aliases)?);
    Ok(())
}

async fn cmd_peek(config: &LinkerConfig, records: &Path, limit: Option<usize>) -> anyhow::Result<()> {
    let store = open_store(records).await?;
    let sample = store.peek(limit.unwrap_or(config.peek_limit)).await?;
    println!("{}", serde_json::to_string_pretty(&sample)?);
    Ok(())
}

async fn cmd_count(records: &Path) -> anyhow::Result<()> {
    let store = open_store(records).await?;
    println!("{}", store.count().await?);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Aliases {
            first,
            middle,
            surname,
            full,
        } => cmd_aliases(first, middle, surname, full),
        Commands::Count { records } => cmd_count(&records).await,
        Commands::Peek { records, limit } => {
            let config = load_config(cli.config.as_deref())?;
            cmd_peek(&config, &records, limit).await
        }
        Commands::Link {
            records,
            text,
            base_url,
            id_prefix,
            strict,
            filter,
            limit,
        } => {
            let config = load_config(cli.config.as_deref())?;
            cmd_link(
                config,
                &records,
                text.as_deref(),
                base_url,
                id_prefix,
                strict,
                filter,
                limit,
            )
            .await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
