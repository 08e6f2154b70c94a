//! Integration tests for finsight-core
//!
//! These tests exercise the model file → forecast workflow and the
//! public API surface used by the server and CLI.

use std::io::Write;

use chrono::NaiveDate;
use finsight_core::{
    estimate_initial_budget, forecast_budget, load_model, plan_savings, BudgetModel,
    DailySpendRecord, Error, FixedClock, SeededVariation, SpendForecaster, FORECAST_DAYS,
};
use indexmap::IndexMap;

fn write_model(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write model");
    file
}

// =============================================================================
// Budget Model + Allocation
// =============================================================================

#[test]
fn test_model_file_to_forecast() {
    let file = write_model(
        r#"{
            "fixed_budget": {"Rent": 12000, "Car EMI": 6500, "Insurance": 1500},
            "variable_ratios": {"Food": 0.4, "Shopping": 0.3, "Other": 0.3}
        }"#,
    );

    let model = load_model(Some(file.path())).expect("Failed to load model");
    assert_eq!(model.total_avg_fixed(), 20000.0);

    let surplus = forecast_budget(35000.0, &model, 0.0).unwrap();
    assert_eq!(surplus.summary.variable_budget_remaining, 15000.0);
    assert_eq!(surplus.summary.total_forecasted_spend, 35000.0);

    let deficit = forecast_budget(10000.0, &model, 0.0).unwrap();
    let cuts: f64 = deficit.required_cuts_to_meet_goal.values().sum();
    assert!((cuts - 10000.0).abs() < 0.03);
    assert!(deficit.summary.warning.is_some());
}

#[test]
fn test_forecast_json_shape() {
    let model = BudgetModel::from_json_str(
        r#"{"fixed_budget": {"Rent": 20000}, "variable_ratios": {"Food": 1.0}}"#,
    )
    .unwrap();

    let result = forecast_budget(25000.0, &model, 1000.0).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["input_principal"], 25000.0);
    assert_eq!(json["new_fixed_goal"], 1000.0);
    assert_eq!(json["allocation_breakdown"]["fixed_historical"]["Rent"], 20000.0);
    assert_eq!(
        json["allocation_breakdown"]["new_goal"]["NEW_EMI_OR_GOAL"],
        1000.0
    );
    assert_eq!(json["allocation_breakdown"]["variable_budget"]["Food"], 4000.0);
    assert_eq!(json["required_cuts_to_meet_goal"]["Food"], 0.0);
    assert_eq!(json["summary"]["TOTAL_MANDATORY_COMMITMENT"], 21000.0);
    assert_eq!(json["summary"]["TOTAL_FORECASTED_SPEND"], 25000.0);
    assert!(json["summary"]["WARNING"].is_null());
}

#[test]
fn test_deficit_properties_hold_across_principals() {
    let model = BudgetModel::from_json_str(
        r#"{
            "fixed_budget": {"Rent": 18000.0, "EMI": 4321.99},
            "variable_ratios": {"A": 0.17, "B": 0.29, "C": 0.31, "D": 0.23}
        }"#,
    )
    .unwrap();

    for principal in [1.0, 999.99, 5000.0, 13579.24, 22321.98] {
        let result = forecast_budget(principal, &model, 0.0).unwrap();
        let shortfall = model.total_avg_fixed() - principal;

        assert!(result
            .allocation_breakdown
            .variable_budget
            .values()
            .all(|v| *v == 0.0));

        let cuts: f64 = result.required_cuts_to_meet_goal.values().sum();
        assert!((cuts - shortfall).abs() <= 0.01 * 4.0 + 1e-9);
    }
}

#[test]
fn test_model_missing_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_model(Some(&dir.path().join("budget_model.json"))).unwrap_err();
    assert!(matches!(err, Error::ModelUnavailable(_)));
}

// =============================================================================
// Savings, Forecast, Initial Budget
// =============================================================================

#[test]
fn test_savings_plan_from_json_request_order() {
    let spending: IndexMap<String, f64> = serde_json::from_str(
        r#"{"Food & Dining": 13000, "Transportation": 8000, "Shopping": 25000,
            "Entertainment": 12000, "Gifts": 3000}"#,
    )
    .unwrap();

    let plan = plan_savings(80000.0, 6, &spending).unwrap();
    assert!(plan.plan_possible);
    assert_eq!(plan.suggested_cuts["Shopping"], 10000.0);
    assert_eq!(plan.suggested_cuts["Food & Dining"], 3900.0);
    assert_eq!(plan.monthly_savings_achieved, 13900.0);
}

#[test]
fn test_spend_forecast_from_json_records() {
    let records: Vec<DailySpendRecord> = serde_json::from_str(
        r#"[
            {"date": "2026-09-01", "amount": 1000},
            {"date": "2026-09-02", "amount": "1400"},
            {"date": "garbage", "amount": 99999}
        ]"#,
    )
    .unwrap();

    let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
    let mut forecaster = SpendForecaster::new()
        .with_variation(SeededVariation::new(1))
        .with_clock(FixedClock(today));

    let points = forecaster.forecast(&records).unwrap();
    assert_eq!(points.len(), FORECAST_DAYS);
    assert_eq!(points[0].date, today);

    let mean: f64 = points.iter().map(|p| p.amount).sum::<f64>() / points.len() as f64;
    assert!((960.0..=1440.0).contains(&mean));
}

#[test]
fn test_initial_budget_from_json() {
    let spending: IndexMap<String, Vec<f64>> = serde_json::from_str(
        r#"{"Transportation": [8000, 7500, 8200], "Groceries": []}"#,
    )
    .unwrap();

    let budget = estimate_initial_budget(&spending);
    assert_eq!(budget["Transportation"], 8690.0);
    assert_eq!(budget["Groceries"], 0.0);
}
