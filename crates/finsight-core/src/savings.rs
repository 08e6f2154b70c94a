//! Savings plan
//!
//! Suggests cuts to discretionary categories that reach a monthly savings
//! target. Categories are ranked by spend, largest first; the cut
//! percentage depends on rank rather than amount:
//!
//! | Rank | Cut |
//! |------|-----|
//! | 0    | 40% |
//! | 1    | 30% |
//! | 2+   | 20% |
//!
//! Cuts stop as soon as the target is covered, so lower-ranked categories
//! can be left untouched even when they have spend. The last cut may
//! overshoot the target.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CategoryAmounts, SavingsPlanResult};
use crate::money::round2;

/// Categories eligible for savings cuts
pub const DISCRETIONARY_CATEGORIES: [&str; 4] =
    ["Shopping", "Entertainment", "Food & Dining", "Gifts"];

/// Cut percentages for the top-ranked categories
const RANKED_CUTS: [f64; 2] = [0.4, 0.3];

/// Cut percentage for every category ranked below `RANKED_CUTS`
const DEFAULT_CUT: f64 = 0.2;

pub fn is_discretionary(category: &str) -> bool {
    DISCRETIONARY_CATEGORIES.contains(&category)
}

fn cut_percentage(rank: usize) -> f64 {
    RANKED_CUTS.get(rank).copied().unwrap_or(DEFAULT_CUT)
}

/// Plan cuts that save `goal_amount` over `timeline_months`
pub fn plan_savings(
    goal_amount: f64,
    timeline_months: i64,
    average_spending: &CategoryAmounts,
) -> Result<SavingsPlanResult> {
    if !goal_amount.is_finite() || goal_amount <= 0.0 || timeline_months <= 0 {
        return Err(Error::InvalidInput(
            "Invalid goal amount or timeline".to_string(),
        ));
    }

    let required_monthly_savings = goal_amount / timeline_months as f64;

    let discretionary: Vec<(&str, f64)> = average_spending
        .iter()
        .filter(|(category, amount)| is_discretionary(category) && amount.is_finite())
        .map(|(category, amount)| (category.as_str(), *amount))
        .collect();

    let total_discretionary: f64 = discretionary.iter().map(|(_, amount)| amount).sum();
    let plan_possible = total_discretionary >= required_monthly_savings;

    debug!(
        required_monthly_savings,
        total_discretionary, plan_possible, "Savings plan evaluated"
    );

    let mut suggested_cuts = CategoryAmounts::new();
    let mut monthly_savings_achieved = 0.0;

    if plan_possible {
        let mut ranked: Vec<(&str, f64)> = discretionary
            .into_iter()
            .filter(|(_, amount)| *amount > 0.0)
            .collect();
        // Stable: equal amounts keep request order
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut remaining = required_monthly_savings;
        for (rank, (category, amount)) in ranked.into_iter().enumerate() {
            if remaining <= 0.0 {
                break;
            }

            let cut = amount * cut_percentage(rank);
            suggested_cuts.insert(category.to_string(), round2(cut));
            monthly_savings_achieved += cut;
            remaining -= cut;
        }
    }

    Ok(SavingsPlanResult {
        plan_possible,
        suggested_cuts,
        monthly_savings_achieved: round2(monthly_savings_achieved),
    })
}
