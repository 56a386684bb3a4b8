pub mod demo;
pub mod export;
pub mod init;
pub mod report;
pub mod status;

use std::path::PathBuf;

use chrono::Datelike;
use clap::{Parser, Subcommand};

use crate::error::{Result, TallyError};
use crate::loader;
use crate::models::Transaction;
use crate::settings::{default_transactions_path, shellexpand_path};

/// Resolve the transactions file (explicit --file or the configured
/// default), load it, and apply the optional year filter before any
/// computation.
pub(crate) fn load_transactions(
    file: &Option<String>,
    format: Option<&str>,
    year: Option<i32>,
) -> Result<Vec<Transaction>> {
    let path = match file {
        Some(f) => PathBuf::from(shellexpand_path(f)),
        None => default_transactions_path(),
    };
    if !path.exists() {
        return Err(TallyError::Other(format!(
            "No transactions file at {}\nRun `tally demo` to create sample data, or pass --file.",
            path.display()
        )));
    }
    let mut transactions = loader::load(&path, format)?;
    if let Some(y) = year {
        transactions.retain(|t| t.date.year() == y);
    }
    Ok(transactions)
}

#[derive(Parser)]
#[command(name = "tally", about = "Customer rewards reporting CLI for small retail programs.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up tally: choose a data directory.
    Init {
        /// Path for tally data (default: ~/Documents/tally)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Load sample transactions to explore tally.
    Demo,
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Export the rewards table to CSV.
    Export {
        /// Transactions file (default: <data_dir>/transactions.json)
        #[arg(long)]
        file: Option<String>,
        /// Input format override: json, csv
        #[arg(long)]
        format: Option<String>,
        /// Only include transactions from this year
        #[arg(long)]
        year: Option<i32>,
        /// Output file path (default: <data_dir>/exports/rewards-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show current data file and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Customer rewards table: points per month and total, one row per customer.
    Rewards {
        /// Transactions file (default: <data_dir>/transactions.json)
        #[arg(long)]
        file: Option<String>,
        /// Input format override: json, csv
        #[arg(long)]
        format: Option<String>,
        /// Only include transactions from this year
        #[arg(long)]
        year: Option<i32>,
    },
    /// Program-wide points per month with a running total.
    Monthly {
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        format: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
}
