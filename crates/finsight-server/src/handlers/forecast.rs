//! Daily spend forecast handlers

use axum::{body::Bytes, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::parse_json_object;
use crate::AppError;
use finsight_core::{DailySpendRecord, ForecastPoint, SpendForecaster};

/// Response for the daily spend forecast
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub forecasted_spends: Vec<ForecastPoint>,
}

/// POST /forecast - Project the next 30 days of spending
///
/// Body: `{"daily_spends": [{"date": "2024-01-01", "amount": 120.5}, ...]}`.
/// Rows with an unparseable date or amount are dropped before averaging.
pub async fn forecast_spending(body: Bytes) -> Result<Json<ForecastResponse>, AppError> {
    let body = parse_json_object(&body)?;
    let records = parse_daily_spends(body.get("daily_spends"))?;

    info!(records = records.len(), "Forecast request received");

    let forecasted_spends = SpendForecaster::new()
        .forecast(&records)
        .map_err(AppError::from_core)?;

    Ok(Json(ForecastResponse { forecasted_spends }))
}

fn parse_daily_spends(value: Option<&Value>) -> Result<Vec<DailySpendRecord>, AppError> {
    if value.map_or(true, is_empty_value) {
        return Err(AppError::bad_request("No spending data provided"));
    }
    let Some(Value::Array(items)) = value else {
        return Err(AppError::bad_request("daily_spends must be a list"));
    };

    let has_column = |key: &str| items.iter().any(|item| item.get(key).is_some());
    if !has_column("date") || !has_column("amount") {
        return Err(AppError::bad_request(
            "Missing required columns: date and amount",
        ));
    }

    Ok(items
        .iter()
        .map(|item| {
            DailySpendRecord::new(
                item.get("date").cloned().unwrap_or(Value::Null),
                item.get("amount").cloned().unwrap_or(Value::Null),
            )
        })
        .collect())
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
