//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budget` - Budget forecast and initial budget suggestions
//! - `forecast` - 30-day daily spend forecast
//! - `savings` - Savings plan recommendations
//! - `serve` - Web server command
//! - `status` - Budget model status

pub mod budget;
pub mod forecast;
pub mod savings;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use budget::*;
pub use forecast::*;
pub use savings::*;
pub use serve::*;
pub use status::*;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use finsight_core::money::format_amount;
use finsight_server::ServerSettings;
use serde::Serialize;
use serde_json::Value;

/// Model path from `--model`, else from the settings file
pub fn model_override(model: Option<&Path>, settings_path: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = model {
        return Ok(Some(path.to_path_buf()));
    }
    Ok(ServerSettings::load(settings_path)?.model_path)
}

/// Read a JSON input file
///
/// Files may hold the bare value or a full request body; when `key` is
/// present at the top level its value is used.
pub fn read_json_input(path: &Path, key: &str) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    Ok(match value {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    })
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print `name  amount` rows aligned on the widest name
pub fn print_amounts<'a>(rows: impl IntoIterator<Item = (&'a String, &'a f64)>) {
    let rows: Vec<_> = rows.into_iter().collect();
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, amount) in rows {
        println!("     {:<width$}  {:>14}", name, format_amount(*amount), width = width);
    }
}
