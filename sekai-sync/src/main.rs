//! sekai-sync - archive listing to catalog database
//!
//! One run: load reference tables, metadata and manual aliases, page through
//! the season listing, consolidate every record into catalog entries and
//! write `database.json`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use sekai_sync::config::SyncConfig;
use sekai_sync::metadata::{JsonMetadataSource, MetadataMatcher};
use sekai_sync::sources::{self, ArchiveClient, JsonFileStore, MetadataSource, NoSigning, Store};
use sekai_sync::{AliasTable, Consolidator, ReferenceTables, TitleParser};
use tracing::{error, info, warn};

/// Command-line arguments for sekai-sync
#[derive(Parser, Debug)]
#[command(name = "sekai-sync")]
#[command(about = "Build the music-video catalog from the season archive listing")]
#[command(version)]
struct Args {
    /// Config file (TOML)
    #[arg(short, long, env = "SEKAI_SYNC_CONFIG")]
    config: Option<PathBuf>,

    /// Output catalog path, overrides [paths].output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Metadata table path, overrides [paths].metadata
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Manual alias file path, overrides [paths].overrides
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Consolidate but do not write the catalog
    #[arg(long)]
    dry_run: bool,

    /// Write whatever was consolidated when the listing fails mid-run
    #[arg(long)]
    keep_partial: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = SyncConfig::resolve_path(args.config.clone());
    let mut config = SyncConfig::load_from(config_path.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting sekai-sync v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config_path {
        Some(path) => info!(path = %path.display(), "Config file"),
        None => info!("No config file, using compiled defaults"),
    }

    if let Some(output) = args.output {
        config.paths.output = output;
    }
    if let Some(metadata) = args.metadata {
        config.paths.metadata = metadata;
    }
    if let Some(overrides) = args.overrides {
        config.paths.overrides = overrides;
    }

    let tables = ReferenceTables::load(config.paths.reference_tables.as_deref())
        .context("Failed to load reference tables")?;

    let table = JsonMetadataSource::new(&config.paths.metadata)
        .load_metadata_table()
        .context("Failed to load metadata table")?;
    let aliases = AliasTable::load(&config.paths.overrides)
        .context("Failed to load manual aliases")?;

    let mut consolidator = Consolidator::new(
        TitleParser::new(&tables),
        MetadataMatcher::new(aliases, table),
    );

    let client = ArchiveClient::new(config.source.clone(), &config.user_agent(), NoSigning)
        .context("Failed to build archive client")?;

    let started = Utc::now();
    info!(
        mid = %config.source.mid,
        season_id = %config.source.season_id,
        "Harvesting season archive"
    );

    match sources::harvest(&client, &mut consolidator).await {
        Ok(report) => {
            let elapsed = Utc::now() - started;
            info!(
                pages = report.pages,
                records = report.records,
                entries = report.entries,
                elapsed_ms = elapsed.num_milliseconds(),
                "Harvest complete"
            );
        }
        Err(e) if args.keep_partial => {
            warn!(
                error = %e,
                entries = consolidator.catalog().len(),
                "Harvest failed, keeping partial catalog"
            );
        }
        Err(e) => {
            error!(error = %e, "Harvest failed, catalog not written");
            return Err(e).context("Harvest failed");
        }
    }

    let catalog = consolidator.into_catalog();

    if args.dry_run {
        info!(
            entries = catalog.len(),
            renditions = catalog.rendition_count(),
            "Dry run, catalog not written"
        );
        return Ok(());
    }

    JsonFileStore::new(&config.paths.output)
        .write(catalog.entries())
        .context("Failed to write catalog")?;

    info!(
        entries = catalog.len(),
        renditions = catalog.rendition_count(),
        path = %config.paths.output.display(),
        "Sync complete"
    );

    Ok(())
}
