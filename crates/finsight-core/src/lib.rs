//! FinSight Core Library
//!
//! Budget arithmetic for the FinSight personal finance backend:
//! - Budget model loading and validation
//! - Fixed/variable budget allocation with deficit handling
//! - Rank-based savings plans over discretionary categories
//! - 30-day daily spend forecasts with injectable variation
//! - Initial budget suggestions from spend history
//!
//! Every operation is a pure function of its inputs (the forecaster aside,
//! which draws from its variation source) and safe to call concurrently.

pub mod allocation;
pub mod budget_model;
pub mod error;
pub mod initial_budget;
pub mod models;
pub mod money;
pub mod savings;
pub mod spend_forecast;

pub use allocation::{forecast_budget, NEW_GOAL_KEY};
pub use budget_model::{load_model, resolve_model_path, BudgetModel, MODEL_PATH_ENV};
pub use error::{Error, Result};
pub use initial_budget::estimate_initial_budget;
pub use models::{
    AllocationBreakdown, CategoryAmounts, DailySpendRecord, FixedBudgetModel, ForecastPoint,
    ForecastResult, ForecastSummary, SavingsPlanResult, ValidSpend, VariableRatioModel,
};
pub use savings::{plan_savings, DISCRETIONARY_CATEGORIES};
pub use spend_forecast::{
    Clock, FixedClock, FixedVariation, SeededVariation, SpendForecaster, SystemClock,
    ThreadRngVariation, VariationSource, FORECAST_DAYS,
};
