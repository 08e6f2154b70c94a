//! Savings plan handlers

use axum::{body::Bytes, Json};
use serde_json::Value;
use tracing::info;

use super::{coerce_integer, coerce_number, parse_json_object};
use crate::AppError;
use finsight_core::{plan_savings, CategoryAmounts, SavingsPlanResult};

const INVALID_GOAL: &str = "Invalid goal amount or timeline";

/// POST /savings-plan - Suggest discretionary cuts to reach a savings goal
///
/// Body: `{"goal_amount": 80000, "timeline_months": 6, "average_spending": {...}}`.
/// Category order in `average_spending` breaks ties between equal amounts.
pub async fn savings_plan(body: Bytes) -> Result<Json<SavingsPlanResult>, AppError> {
    let body = parse_json_object(&body)?;

    let goal = match body.get("goal_amount") {
        None => Some(0.0),
        Some(value) => coerce_number(value),
    };
    let months = match body.get("timeline_months") {
        None => Some(1),
        Some(value) => coerce_integer(value),
    };
    let (Some(goal), Some(months)) = (goal, months) else {
        return Err(AppError::bad_request(INVALID_GOAL));
    };

    let spending = parse_average_spending(body.get("average_spending"))?;
    let plan = plan_savings(goal, months, &spending).map_err(AppError::from_core)?;

    info!(
        goal,
        months,
        plan_possible = plan.plan_possible,
        "Savings plan computed"
    );

    Ok(Json(plan))
}

/// Non-numeric amounts are skipped
fn parse_average_spending(value: Option<&Value>) -> Result<CategoryAmounts, AppError> {
    match value {
        None | Some(Value::Null) => Ok(CategoryAmounts::new()),
        Some(Value::Object(map)) => Ok(map
            .iter()
            .filter_map(|(category, amount)| {
                coerce_number(amount).map(|amount| (category.clone(), amount))
            })
            .collect()),
        Some(_) => Err(AppError::bad_request("average_spending must be an object")),
    }
}
