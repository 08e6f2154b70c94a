//! Budget allocation
//!
//! Splits a monthly principal into mandatory fixed commitments (historical
//! fixed averages plus an optional new EMI or savings goal) and
//! ratio-weighted variable categories.
//!
//! When commitments exceed the principal, every variable allocation drops
//! to zero and the shortfall is spread across variable categories as
//! required cuts, proportional to their ratios.

use tracing::debug;

use crate::budget_model::BudgetModel;
use crate::error::{Error, Result};
use crate::models::{AllocationBreakdown, CategoryAmounts, ForecastResult, ForecastSummary};
use crate::money::{format_amount, round2};

/// Allocation key for a new fixed commitment
pub const NEW_GOAL_KEY: &str = "NEW_EMI_OR_GOAL";

/// Forecast a budget for `principal` against the loaded model
///
/// `new_fixed_goal` is an additional fixed monthly commitment (a new EMI or
/// savings goal); pass `0.0` for none.
pub fn forecast_budget(
    principal: f64,
    model: &BudgetModel,
    new_fixed_goal: f64,
) -> Result<ForecastResult> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(Error::InvalidInput(
            "Principal amount must be greater than zero.".to_string(),
        ));
    }
    if !new_fixed_goal.is_finite() || new_fixed_goal < 0.0 {
        return Err(Error::InvalidInput(
            "Goal amount must be a non-negative number.".to_string(),
        ));
    }

    let total_avg_fixed = model.total_avg_fixed();
    let mandatory_commitment = total_avg_fixed + new_fixed_goal;

    let fixed_historical: CategoryAmounts = model
        .fixed_budget()
        .iter()
        .map(|(category, amount)| (category.clone(), round2(*amount)))
        .collect();

    let mut new_goal = CategoryAmounts::new();
    if new_fixed_goal > 0.0 {
        new_goal.insert(NEW_GOAL_KEY.to_string(), round2(new_fixed_goal));
    }

    let variable_remaining = principal - mandatory_commitment;

    let mut variable_budget = CategoryAmounts::with_capacity(model.variable_ratios().len());
    let mut required_cuts = CategoryAmounts::with_capacity(model.variable_ratios().len());
    let warning;

    if variable_remaining >= 0.0 {
        for (category, ratio) in model.variable_ratios() {
            variable_budget.insert(category.clone(), round2(variable_remaining * ratio));
            required_cuts.insert(category.clone(), 0.0);
        }
        warning = None;
    } else {
        let shortfall = -variable_remaining;
        let ratio_sum = model.ratio_sum();
        if ratio_sum <= 0.0 {
            return Err(Error::InvalidModel(
                "variable ratios sum to zero; cannot distribute a deficit".to_string(),
            ));
        }

        for (category, ratio) in model.variable_ratios() {
            variable_budget.insert(category.clone(), 0.0);
            required_cuts.insert(category.clone(), round2(shortfall * ratio / ratio_sum));
        }

        warning = Some(format!(
            "WARNING: Budget deficit of {} detected after mandatory allocations.",
            format_amount(shortfall)
        ));
    }

    // Sums the already-rounded allocations
    let forecasted_variable_spend: f64 = variable_budget.values().sum();

    debug!(
        principal,
        mandatory_commitment,
        variable_remaining,
        deficit = variable_remaining < 0.0,
        "Budget forecast computed"
    );

    let summary = ForecastSummary {
        total_principal: round2(principal),
        total_historical_fixed: round2(total_avg_fixed),
        new_emi_or_goal_amount: round2(new_fixed_goal),
        total_mandatory_commitment: round2(mandatory_commitment),
        variable_budget_remaining: round2(variable_remaining),
        total_forecasted_variable_spend: round2(forecasted_variable_spend),
        total_forecasted_spend: round2(mandatory_commitment + forecasted_variable_spend),
        warning,
    };

    Ok(ForecastResult {
        input_principal: summary.total_principal,
        new_fixed_goal: summary.new_emi_or_goal_amount,
        allocation_breakdown: AllocationBreakdown {
            fixed_historical,
            new_goal,
            variable_budget,
        },
        required_cuts_to_meet_goal: required_cuts,
        summary,
    })
}
