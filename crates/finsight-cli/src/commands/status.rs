//! Status command implementation

use std::path::Path;

use anyhow::Result;

use super::model_override;
use finsight_core::money::format_amount;
use finsight_core::{resolve_model_path, BudgetModel, MODEL_PATH_ENV};

pub fn cmd_status(model: Option<&Path>, settings_path: &Path) -> Result<()> {
    println!();
    println!("📊 FinSight Status");
    println!("   ─────────────────────────────────────────────────────────────");

    if settings_path.exists() {
        println!("   Settings: {}", settings_path.display());
    } else {
        println!("   Settings: (none, {} not found)", settings_path.display());
    }

    let explicit = model_override(model, settings_path)?;
    let Some(path) = resolve_model_path(explicit.as_deref()) else {
        println!("   ❌ Budget model: no path (set --model or {})", MODEL_PATH_ENV);
        println!();
        return Ok(());
    };

    println!("   Budget model: {}", path.display());
    match BudgetModel::load(&path) {
        Ok(model) => {
            println!("   ✅ Status: loaded");
            println!();
            println!("   Fixed categories:    {}", model.fixed_budget().len());
            println!("   Variable categories: {}", model.variable_ratios().len());
            println!(
                "   Avg fixed total:     {}",
                format_amount(model.total_avg_fixed())
            );
            if model.ratio_sum() <= 0.0 {
                println!("   ⚠️  Variable ratios sum to zero; deficits cannot be split");
            }
        }
        Err(e) => {
            println!("   ❌ Status: not loaded ({})", e);
        }
    }
    println!();
    Ok(())
}
