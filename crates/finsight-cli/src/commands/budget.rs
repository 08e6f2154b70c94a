//! Budget forecast and initial budget commands

use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use super::{model_override, print_amounts, print_json, read_json_input};
use finsight_core::money::format_amount;
use finsight_core::{estimate_initial_budget, forecast_budget, load_model, ForecastResult};

pub fn cmd_budget(
    model: Option<&Path>,
    settings_path: &Path,
    principal: f64,
    goal: f64,
    json: bool,
) -> Result<()> {
    let model_path = model_override(model, settings_path)?;
    let model = load_model(model_path.as_deref()).context("Failed to load budget model")?;
    let result = forecast_budget(principal, &model, goal)?;

    if json {
        return print_json(&result);
    }

    print_forecast(&result);
    Ok(())
}

fn print_forecast(result: &ForecastResult) {
    let summary = &result.summary;

    println!();
    println!("📊 Budget Forecast");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Principal:             {:>14}", format_amount(summary.total_principal));
    println!("   Historical fixed:      {:>14}", format_amount(summary.total_historical_fixed));
    println!("   New EMI / goal:        {:>14}", format_amount(summary.new_emi_or_goal_amount));
    println!("   Mandatory commitment:  {:>14}", format_amount(summary.total_mandatory_commitment));
    println!("   Variable remaining:    {:>14}", format_amount(summary.variable_budget_remaining));
    println!("   Forecasted spend:      {:>14}", format_amount(summary.total_forecasted_spend));

    println!();
    println!("   Fixed:");
    print_amounts(&result.allocation_breakdown.fixed_historical);

    if result.is_deficit() {
        println!();
        if let Some(warning) = &summary.warning {
            println!("   ⚠️  {}", warning);
        }
        println!("   Required cuts:");
        print_amounts(&result.required_cuts_to_meet_goal);
    } else {
        println!();
        println!("   Variable budget:");
        print_amounts(&result.allocation_breakdown.variable_budget);
    }
    println!();
}

/// Read `{"Category": [amount, ...]}`, optionally wrapped in `monthly_spending`
pub fn read_monthly_spending(path: &Path) -> Result<IndexMap<String, Vec<f64>>> {
    let value = read_json_input(path, "monthly_spending")?;
    serde_json::from_value(value).with_context(|| {
        format!(
            "{} must map each category to a list of amounts",
            path.display()
        )
    })
}

pub fn cmd_initial_budget(file: &Path, json: bool) -> Result<()> {
    let spending = read_monthly_spending(file)?;
    let suggested = estimate_initial_budget(&spending);

    if json {
        return print_json(&serde_json::json!({ "suggested_budget": suggested }));
    }

    println!();
    println!("💡 Suggested Initial Budget ({} categories)", suggested.len());
    println!("   ─────────────────────────────────────────────────────────────");
    print_amounts(&suggested);
    println!();
    Ok(())
}
