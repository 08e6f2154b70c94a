//! Data models for FinSight
//!
//! Category maps are insertion-ordered (`IndexMap`) so results list
//! categories in the order the model or request supplied them.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Category -> historical average of a recurring mandatory expense
pub type FixedBudgetModel = IndexMap<String, f64>;

/// Category -> historical share of discretionary spend (need not sum to 1)
pub type VariableRatioModel = IndexMap<String, f64>;

/// Category -> amount, used for per-category allocations and cuts
pub type CategoryAmounts = IndexMap<String, f64>;

/// Result of splitting a principal across fixed and variable categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub input_principal: f64,
    pub new_fixed_goal: f64,
    pub allocation_breakdown: AllocationBreakdown,
    /// Per variable category; all zero when there is no deficit
    pub required_cuts_to_meet_goal: CategoryAmounts,
    pub summary: ForecastSummary,
}

/// Allocations grouped by where they came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    /// Historical fixed averages, copied verbatim
    pub fixed_historical: CategoryAmounts,
    /// Holds `NEW_EMI_OR_GOAL` when a new fixed goal was requested, else empty
    pub new_goal: CategoryAmounts,
    pub variable_budget: CategoryAmounts,
}

/// Summary block of a budget forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ForecastSummary {
    pub total_principal: f64,
    pub total_historical_fixed: f64,
    pub new_emi_or_goal_amount: f64,
    pub total_mandatory_commitment: f64,
    pub variable_budget_remaining: f64,
    pub total_forecasted_variable_spend: f64,
    pub total_forecasted_spend: f64,
    pub warning: Option<String>,
}

impl ForecastResult {
    /// Whether mandatory commitments exceed the principal
    pub fn is_deficit(&self) -> bool {
        self.summary.variable_budget_remaining < 0.0
    }
}

/// Result of a savings plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlanResult {
    pub plan_possible: bool,
    pub suggested_cuts: CategoryAmounts,
    pub monthly_savings_achieved: f64,
}

/// A daily spend record as received, before validation
///
/// Fields stay loosely typed so that a bad row can be dropped instead of
/// failing the whole request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySpendRecord {
    #[serde(default)]
    pub date: serde_json::Value,
    #[serde(default)]
    pub amount: serde_json::Value,
}

impl DailySpendRecord {
    pub fn new(date: impl Into<serde_json::Value>, amount: impl Into<serde_json::Value>) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
        }
    }
}

/// A daily spend record whose date and amount both parsed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidSpend {
    pub date: NaiveDate,
    pub amount: f64,
}

/// One day of a spend forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_uses_upper_case_keys() {
        let summary = ForecastSummary {
            total_principal: 1.0,
            total_historical_fixed: 0.0,
            new_emi_or_goal_amount: 0.0,
            total_mandatory_commitment: 0.0,
            variable_budget_remaining: 1.0,
            total_forecasted_variable_spend: 1.0,
            total_forecasted_spend: 1.0,
            warning: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["TOTAL_PRINCIPAL"], 1.0);
        assert_eq!(json["NEW_EMI_OR_GOAL_AMOUNT"], 0.0);
        assert!(json["WARNING"].is_null());
    }

    #[test]
    fn test_forecast_point_date_format() {
        let point = ForecastPoint {
            date: NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(),
            amount: 12.5,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2026-03-07");
    }

    #[test]
    fn test_daily_spend_record_missing_fields_are_null() {
        let record: DailySpendRecord = serde_json::from_str(r#"{"date": "2024-01-01"}"#).unwrap();
        assert_eq!(record.date, "2024-01-01");
        assert!(record.amount.is_null());
    }
}
