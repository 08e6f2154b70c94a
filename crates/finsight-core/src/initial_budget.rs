//! First-pass budget suggestion from historical per-category spend

use indexmap::IndexMap;

use crate::models::CategoryAmounts;
use crate::money::{mean, round2};

/// Headroom added on top of the historical mean
pub const BUDGET_BUFFER: f64 = 1.1;

/// Suggest a budget per category: mean of history plus 10%, or 0 with no history
pub fn estimate_initial_budget(monthly_spending: &IndexMap<String, Vec<f64>>) -> CategoryAmounts {
    monthly_spending
        .iter()
        .map(|(category, amounts)| {
            let suggested = mean(amounts)
                .map(|avg| round2(avg * BUDGET_BUFFER))
                .unwrap_or(0.0);
            (category.clone(), suggested)
        })
        .collect()
}
