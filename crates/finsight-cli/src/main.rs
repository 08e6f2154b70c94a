//! FinSight CLI - Budget forecasting backend
//!
//! Usage:
//!   finsight serve --port 5000                  Start the API server
//!   finsight status                             Show budget model status
//!   finsight budget --principal 35000           Forecast a month's budget
//!   finsight savings --goal 80000 --months 6 --spending spend.json
//!   finsight forecast --file daily.csv          30-day daily spend forecast
//!   finsight initial-budget --file history.json Suggest starting budgets

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => {
            commands::cmd_serve(
                cli.model.as_deref(),
                &cli.settings,
                host.as_deref(),
                port,
                allowed_origins.as_deref(),
            )
            .await
        }
        Commands::Status => commands::cmd_status(cli.model.as_deref(), &cli.settings),
        Commands::Budget {
            principal,
            goal,
            json,
        } => commands::cmd_budget(cli.model.as_deref(), &cli.settings, principal, goal, json),
        Commands::Savings {
            goal,
            months,
            spending,
            json,
        } => commands::cmd_savings(&spending, goal, months, json),
        Commands::Forecast { file, seed, json } => commands::cmd_forecast(&file, seed, json),
        Commands::InitialBudget { file, json } => commands::cmd_initial_budget(&file, json),
    }
}
