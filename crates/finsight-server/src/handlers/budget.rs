//! Budget handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::header,
    Form, Json,
};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{coerce_number, parse_json_object};
use crate::{AppError, AppState, MODEL_NOT_LOADED};
use finsight_core::{estimate_initial_budget, forecast_budget, CategoryAmounts, ForecastResult};

const INVALID_BUDGET_INPUT: &str =
    "Invalid input. 'principal_amount' and 'goal_amount' must be numbers.";

/// Response for initial budget suggestions
#[derive(Debug, Serialize)]
pub struct InitialBudgetResponse {
    pub suggested_budget: CategoryAmounts,
}

/// Parsed budget forecast inputs
#[derive(Debug, Clone, Copy, PartialEq)]
struct BudgetInput {
    principal: f64,
    goal: f64,
}

impl BudgetInput {
    /// Build from raw field values; a missing goal means no new commitment
    fn from_fields(principal: Option<&Value>, goal: Option<&Value>) -> Result<Self, AppError> {
        let principal = principal.and_then(coerce_number);
        let goal = match goal {
            None => Some(0.0),
            Some(value) => coerce_number(value),
        };

        match (principal, goal) {
            (Some(principal), Some(goal)) => Ok(Self { principal, goal }),
            _ => Err(AppError::bad_request(INVALID_BUDGET_INPUT)),
        }
    }
}

fn is_json_request(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.trim_start().starts_with("application/json"))
        .unwrap_or(false)
}

/// Read inputs from a JSON body or, failing that, a url-encoded form
async fn read_budget_input(request: Request) -> Result<BudgetInput, AppError> {
    if is_json_request(&request) {
        let Json(body) = Json::<Value>::from_request(request, &())
            .await
            .map_err(|_| AppError::bad_request(INVALID_BUDGET_INPUT))?;
        return BudgetInput::from_fields(body.get("principal_amount"), body.get("goal_amount"));
    }

    let Form(form) = Form::<HashMap<String, String>>::from_request(request, &())
        .await
        .map_err(|_| AppError::bad_request(INVALID_BUDGET_INPUT))?;
    let field = |name: &str| form.get(name).map(|s| Value::from(s.as_str()));
    BudgetInput::from_fields(
        field("principal_amount").as_ref(),
        field("goal_amount").as_ref(),
    )
}

/// POST /predict_budget_v2 - Forecast a month's budget with a new goal
///
/// Accepts `principal_amount` and optional `goal_amount` as JSON or form
/// fields. Fails with 500 when no budget model was loaded at startup.
pub async fn predict_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ForecastResult>, AppError> {
    let Some(model) = state.model.as_deref() else {
        return Err(AppError::internal(MODEL_NOT_LOADED));
    };

    let input = read_budget_input(request).await?;
    let result =
        forecast_budget(input.principal, model, input.goal).map_err(AppError::from_core)?;

    info!(
        principal = input.principal,
        goal = input.goal,
        deficit = result.is_deficit(),
        "Budget forecast computed"
    );

    Ok(Json(result))
}

/// POST /initial-budget - Suggest category budgets from spend history
///
/// Body: `{"monthly_spending": {"Category": [amount, ...], ...}}`. A body
/// that does not have this shape gets 400.
pub async fn initial_budget(body: Bytes) -> Result<Json<InitialBudgetResponse>, AppError> {
    let body = parse_json_object(&body)?;
    let spending = parse_monthly_spending(body.get("monthly_spending"))?;

    debug!(categories = spending.len(), "Estimating initial budget");

    Ok(Json(InitialBudgetResponse {
        suggested_budget: estimate_initial_budget(&spending),
    }))
}

fn parse_monthly_spending(value: Option<&Value>) -> Result<IndexMap<String, Vec<f64>>, AppError> {
    let map = match value {
        None | Some(Value::Null) => return Ok(IndexMap::new()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(AppError::bad_request("monthly_spending must be an object")),
    };

    let mut spending = IndexMap::with_capacity(map.len());
    for (category, amounts) in map {
        let amounts = match amounts {
            Value::Null => Vec::new(),
            Value::Array(items) => items
                .iter()
                .map(coerce_number)
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| {
                    AppError::bad_request(&format!(
                        "monthly_spending['{}'] must contain only numbers",
                        category
                    ))
                })?,
            _ => {
                return Err(AppError::bad_request(&format!(
                    "monthly_spending['{}'] must be a list",
                    category
                )))
            }
        };
        spending.insert(category.clone(), amounts);
    }

    Ok(spending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_budget_input_defaults_goal() {
        let principal = json!(50000);
        let input = BudgetInput::from_fields(Some(&principal), None).unwrap();
        assert_eq!(input, BudgetInput { principal: 50000.0, goal: 0.0 });
    }

    #[test]
    fn test_budget_input_rejects_bad_goal() {
        let principal = json!(50000);
        let goal = json!("lots");
        let err = BudgetInput::from_fields(Some(&principal), Some(&goal)).unwrap_err();
        assert_eq!(err.message(), INVALID_BUDGET_INPUT);
    }

    #[test]
    fn test_budget_input_requires_principal() {
        assert!(BudgetInput::from_fields(None, None).is_err());
    }

    #[test]
    fn test_parse_monthly_spending_keeps_order() {
        let value = json!({"Rent": [1000, "1100"], "Food": null});
        let spending = parse_monthly_spending(Some(&value)).unwrap();
        let keys: Vec<&str> = spending.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Rent", "Food"]);
        assert_eq!(spending["Rent"], vec![1000.0, 1100.0]);
        assert!(spending["Food"].is_empty());
    }

    #[test]
    fn test_parse_monthly_spending_rejects_non_numbers() {
        let value = json!({"Rent": [1000, "abc"]});
        assert!(parse_monthly_spending(Some(&value)).is_err());
        assert!(parse_monthly_spending(Some(&json!([1, 2]))).is_err());
    }
}
