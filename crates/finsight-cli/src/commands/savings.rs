//! Savings plan command

use std::path::Path;

use anyhow::{Context, Result};

use super::{print_amounts, print_json, read_json_input};
use finsight_core::money::format_amount;
use finsight_core::{plan_savings, CategoryAmounts};

/// Read `{"Category": amount}`, optionally wrapped in `average_spending`
pub fn read_average_spending(path: &Path) -> Result<CategoryAmounts> {
    let value = read_json_input(path, "average_spending")?;
    serde_json::from_value(value)
        .with_context(|| format!("{} must map each category to an amount", path.display()))
}

pub fn cmd_savings(spending: &Path, goal: f64, months: i64, json: bool) -> Result<()> {
    let spending = read_average_spending(spending)?;
    let plan = plan_savings(goal, months, &spending)?;

    if json {
        return print_json(&plan);
    }

    println!();
    println!("🎯 Savings Plan: {} over {} month(s)", format_amount(goal), months);
    println!("   ─────────────────────────────────────────────────────────────");
    if plan.plan_possible {
        println!("   Suggested cuts:");
        print_amounts(&plan.suggested_cuts);
        println!();
        println!(
            "   Monthly savings achieved: {}",
            format_amount(plan.monthly_savings_achieved)
        );
    } else {
        println!("   ❌ Goal not reachable from discretionary spending alone");
    }
    println!();
    Ok(())
}
