//! oxide-shard CLI
//!
//! Command-line tool for generating partition DDL for sharded tables.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_shard::load_catalog;
use oxide_shard_core::prelude::*;

/// Generates DDL for partitioned tables (expects argument in the form
/// `<app>.<table>`).
#[derive(Parser)]
#[command(name = "oxide-shard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Qualified table name (<app>.<table>).
    table: String,

    /// Path to the schema catalog (JSON).
    #[arg(short, long, default_value = "schema.json")]
    catalog: PathBuf,

    /// Number of partition tables to create.
    #[arg(short, long, env = "PARTITION_COUNT", default_value_t = 8)]
    num: u32,

    /// Physical shard number to generate DDL for (0-based).
    #[arg(long, default_value_t = 0)]
    shard: u32,

    /// Number of physical shards.
    #[arg(long, default_value_t = 1)]
    shards: u32,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging. SQL goes to stdout, so logs must stay on stderr to keep
    // the output pipeable into psql.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if !cli.table.contains('.') {
        bail!("expected argument <app>.<table>, got '{}'", cli.table);
    }

    let catalog = load_catalog(&cli.catalog)?;
    let table = catalog.lookup(&cli.table)?;
    let plan = PartitionPlan::strided(cli.num, cli.shard, cli.shards)?;

    info!(
        "generating DDL for {} ({} partitions, physical shard {} of {})",
        cli.table, cli.num, cli.shard, cli.shards
    );

    let sql = PartitionDdlGenerator::new().sql(table, &plan)?;
    print!("{sql}");

    Ok(())
}
