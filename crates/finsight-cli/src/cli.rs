//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use finsight_server::settings::SETTINGS_FILE;

/// FinSight - Budget forecasting and savings planning
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Budget forecasting and savings planning backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Budget model file
    ///
    /// Falls back to `model_path` in the settings file, then
    /// FINSIGHT_MODEL_PATH, then the user data directory.
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Server settings file (TOML, optional)
    #[arg(long, default_value = SETTINGS_FILE, global = true)]
    pub settings: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve {
        /// Port to listen on (default 5000)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (default 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Extra CORS origins, comma-separated ("*" for any)
        #[arg(long)]
        allowed_origins: Option<String>,
    },

    /// Show budget model location and load state
    Status,

    /// Forecast a month's budget with an optional new EMI or savings goal
    Budget {
        /// Monthly income to allocate
        #[arg(short, long)]
        principal: f64,

        /// New fixed commitment (EMI or savings goal)
        #[arg(short, long, default_value_t = 0.0)]
        goal: f64,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Suggest discretionary cuts to reach a savings goal
    Savings {
        /// Total amount to save
        #[arg(short, long)]
        goal: f64,

        /// Months to reach the goal
        #[arg(short, long, default_value_t = 1)]
        months: i64,

        /// JSON file of average monthly spend per category
        #[arg(short, long)]
        spending: PathBuf,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Forecast the next 30 days of spending
    Forecast {
        /// Daily spend history (CSV with date,amount columns, or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Seed the daily variation for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Suggest initial category budgets from spend history
    InitialBudget {
        /// JSON file mapping each category to its monthly amounts
        #[arg(short, long)]
        file: PathBuf,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
}
