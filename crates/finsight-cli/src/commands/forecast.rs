//! Daily spend forecast command

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;

use super::{print_json, read_json_input};
use finsight_core::money::format_amount;
use finsight_core::{DailySpendRecord, SeededVariation, SpendForecaster};

/// Read daily spends from a `date,amount` CSV or a JSON list of records
///
/// JSON input may be wrapped in `daily_spends`. Extra CSV columns are ignored.
pub fn read_daily_spends(path: &Path) -> Result<Vec<DailySpendRecord>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        read_csv_spends(path)
    } else {
        let value = read_json_input(path, "daily_spends")?;
        serde_json::from_value(value)
            .with_context(|| format!("{} must hold a list of daily spends", path.display()))
    }
}

fn read_csv_spends(path: &Path) -> Result<Vec<DailySpendRecord>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let (Some(date_idx), Some(amount_idx)) = (column("date"), column("amount")) else {
        bail!("Missing required columns: date and amount");
    };

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();
        records.push(DailySpendRecord::new(field(date_idx), field(amount_idx)));
    }

    Ok(records)
}

pub fn cmd_forecast(file: &Path, seed: Option<u64>, json: bool) -> Result<()> {
    let records = read_daily_spends(file)?;

    let mut forecaster = SpendForecaster::new();
    if let Some(seed) = seed {
        forecaster = forecaster.with_variation(SeededVariation::new(seed));
    }
    let points = forecaster.forecast(&records)?;

    if json {
        return print_json(&serde_json::json!({ "forecasted_spends": points }));
    }

    let total: f64 = points.iter().map(|p| p.amount).sum();

    println!();
    println!("📈 {}-Day Spend Forecast ({} records)", points.len(), records.len());
    println!("   ─────────────────────────────────────────────────────────────");
    for point in &points {
        println!("   {}  {:>12}", point.date, format_amount(point.amount));
    }
    println!();
    println!("   Total: {}", format_amount(total));
    println!();
    Ok(())
}
