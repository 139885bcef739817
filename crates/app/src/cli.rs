use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "weide")]
#[command(about = "Cheese dairy bookkeeping: catalog, batches, stock and dispatches")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Critical warnings, latest activity and latest batches.
    Dashboard,
    /// List catalog products.
    Products {
        /// Case-insensitive filter on name or category.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List stock per batch.
    Inventory {
        /// Case-insensitive filter on product, category or batch code.
        #[arg(short, long)]
        search: Option<String>,
        /// Only rows below the configured minimum stock level.
        #[arg(long)]
        low: bool,
    },
    /// Current warning snapshot.
    Warnings,
    /// Most recent activity entries.
    Activity {
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Add one product per line of a text file.
    Import { file: PathBuf },
    /// Stock and sales reports.
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportKind {
    /// Remaining stock per product.
    Inventory,
    /// Dispatches within a date range (inclusive).
    Dispatches {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
}
