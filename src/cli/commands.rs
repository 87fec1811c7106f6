use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::{QueryRequest, SearchEngine, answer};
use crate::index_storage::{load_snapshot, save_snapshot};
use crate::models::{Record, RecordKind};
use crate::sources::{JsonFileSources, aggregate};
use crate::utils::{format_recency, get_data_dir};

#[derive(Parser)]
#[command(name = "browser-omnisearch")]
#[command(version)]
#[command(about = "Fuzzy search across browser tabs, history, and bookmarks", long_about = None)]
pub struct Cli {
    /// Directory holding tabs.json, history.json, bookmarks.json, and config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fuzzy search titles, URLs, and pinyin of all records
    Search {
        query: String,
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
        /// Rebuild the index even if a cached one is fresh
        #[arg(long, conflicts_with = "snapshot")]
        refresh: bool,
        /// Read a larger slice of history for this search
        #[arg(long, conflicts_with = "snapshot")]
        broad: bool,
        /// Answer from a saved snapshot instead of the export files
        #[arg(long, value_name = "FILE")]
        snapshot: Option<PathBuf>,
    },
    /// Show recently used tabs, topped up with recent history
    Recent {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Build the index and save it as a snapshot file
    Export {
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Show statistics about the export files
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => get_data_dir()?,
    };
    let mut config = EngineConfig::load_from_dir(&data_dir)?;
    debug!(data_dir = %data_dir.display(), "configuration loaded");

    match command {
        Commands::Search { query, limit, refresh, broad, snapshot } => {
            config.broad_history |= broad;
            let request = QueryRequest { text: query, max_results: limit, force_refresh: refresh };
            let records = match snapshot {
                Some(path) => {
                    let snapshot = load_snapshot(&path)?;
                    answer(&snapshot, &request, &config)
                }
                None => engine(&data_dir, config)?.search(&request)?.records,
            };
            print_records(&records);
        }
        Commands::Recent { limit } => {
            let request = QueryRequest { max_results: limit, ..QueryRequest::default() };
            let records = engine(&data_dir, config)?.search(&request)?.records;
            print_records(&records);
        }
        Commands::Export { output } => export(&data_dir, config, &output)?,
        Commands::Stats => show_stats(&data_dir, &config),
    }

    Ok(())
}

fn engine(data_dir: &Path, config: EngineConfig) -> Result<SearchEngine<JsonFileSources>> {
    Ok(SearchEngine::with_config(JsonFileSources::new(data_dir), config)?)
}

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No results");
        return;
    }

    for record in records {
        let title = if record.title.is_empty() { &record.url } else { &record.title };
        println!(
            "[{:<8}] {}  {}  ({})",
            record.kind.label(),
            title,
            record.url,
            format_recency(record.recency.as_ref())
        );
    }
}

fn export(data_dir: &Path, config: EngineConfig, output: &Path) -> Result<()> {
    let (snapshot, _) = engine(data_dir, config)?
        .snapshot(true)
        .context("Failed to build the search index")?;
    save_snapshot(output, &snapshot)?;
    println!("Saved {} records to {}", snapshot.len(), output.display());
    Ok(())
}

fn show_stats(data_dir: &Path, config: &EngineConfig) {
    let sources = JsonFileSources::new(data_dir);
    let aggregation = aggregate(&sources, &config.aggregate_options());
    let count = |kind: RecordKind| aggregation.records.iter().filter(|r| r.kind == kind).count();

    println!("Browser Omnisearch Statistics");
    println!("=============================");
    println!("Total records: {}", aggregation.records.len());
    println!("  Tabs: {}", count(RecordKind::Tab));
    println!("  History: {}", count(RecordKind::HistoryEntry));
    println!("  Bookmarks: {}", count(RecordKind::Bookmark));
    for failure in &aggregation.failures {
        println!("  Unavailable: {}", failure);
    }
    println!();
    println!("Data directory: {}", data_dir.display());

    let newest = aggregation.records.iter().filter_map(|r| r.recency).max();
    if let Some(newest) = newest {
        println!("Newest activity: {}", newest.format("%Y-%m-%d %H:%M:%S"));
    }
}
