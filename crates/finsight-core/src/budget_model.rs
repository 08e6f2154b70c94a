//! Budget model loading and validation
//!
//! The budget model holds historical fixed-category averages, variable
//! category ratios, and the total average fixed spend. It is produced
//! offline and loaded once at process start.
//!
//! ## Model Resolution
//!
//! 1. Explicit path (CLI `--model`, settings file)
//! 2. `FINSIGHT_MODEL_PATH` environment variable
//! 3. Data dir default (~/.local/share/finsight/budget_model.json)
//!
//! ## File Format
//!
//! ```json
//! {
//!   "fixed_budget": { "Rent": 15000.0, "Loan EMI": 5000.0 },
//!   "variable_ratios": { "Food": 0.4, "Shopping": 0.3, "Other": 0.3 },
//!   "total_avg_fixed": 20000.0
//! }
//! ```
//!
//! `total_avg_fixed` is optional and derived from `fixed_budget` when absent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::allocation::NEW_GOAL_KEY;
use crate::error::{Error, Result};
use crate::models::{FixedBudgetModel, VariableRatioModel};

/// Environment variable naming the budget model file
pub const MODEL_PATH_ENV: &str = "FINSIGHT_MODEL_PATH";

/// File name of the model in the data directory
pub const MODEL_FILE_NAME: &str = "budget_model.json";

/// On-disk shape of the model
#[derive(Debug, Deserialize)]
struct BudgetModelFile {
    fixed_budget: FixedBudgetModel,
    variable_ratios: VariableRatioModel,
    #[serde(default)]
    total_avg_fixed: Option<f64>,
}

/// Validated, read-only budget model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetModel {
    fixed_budget: FixedBudgetModel,
    variable_ratios: VariableRatioModel,
    total_avg_fixed: f64,
}

impl BudgetModel {
    /// Build and validate a model. `total_avg_fixed` is derived from the
    /// fixed categories when not given.
    pub fn new(
        fixed_budget: FixedBudgetModel,
        variable_ratios: VariableRatioModel,
        total_avg_fixed: Option<f64>,
    ) -> Result<Self> {
        for (category, amount) in &fixed_budget {
            check_non_negative("fixed_budget", category, *amount)?;
        }
        for (category, ratio) in &variable_ratios {
            check_non_negative("variable_ratios", category, *ratio)?;
        }

        // Fixed and variable categories share one output namespace
        if let Some(category) = fixed_budget
            .keys()
            .find(|k| variable_ratios.contains_key(k.as_str()))
        {
            return Err(Error::InvalidModel(format!(
                "category '{}' appears in both fixed_budget and variable_ratios",
                category
            )));
        }

        if fixed_budget.contains_key(NEW_GOAL_KEY) || variable_ratios.contains_key(NEW_GOAL_KEY) {
            return Err(Error::InvalidModel(format!(
                "'{}' is reserved for the new fixed goal",
                NEW_GOAL_KEY
            )));
        }

        let total_avg_fixed = match total_avg_fixed {
            Some(total) => {
                check_non_negative("total_avg_fixed", "total", total)?;
                total
            }
            None => fixed_budget.values().sum(),
        };

        let model = Self {
            fixed_budget,
            variable_ratios,
            total_avg_fixed,
        };

        if model.ratio_sum() == 0.0 {
            warn!("Budget model has no positive variable ratios; deficit forecasts will fail");
        }

        Ok(model)
    }

    /// Parse a model from its JSON representation
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: BudgetModelFile = serde_json::from_str(content)?;
        Self::new(file.fixed_budget, file.variable_ratios, file.total_avg_fixed)
    }

    /// Load a model from a JSON file
    ///
    /// A missing file is reported as `ModelUnavailable`; a file that exists
    /// but does not parse or validate is an error of its own kind.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ModelUnavailable(format!(
                "model file not found at {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let model = Self::from_json_str(&content)?;

        info!(
            path = %path.display(),
            fixed_categories = model.fixed_budget.len(),
            variable_categories = model.variable_ratios.len(),
            total_avg_fixed = model.total_avg_fixed,
            "Budget model loaded"
        );

        Ok(model)
    }

    pub fn fixed_budget(&self) -> &FixedBudgetModel {
        &self.fixed_budget
    }

    pub fn variable_ratios(&self) -> &VariableRatioModel {
        &self.variable_ratios
    }

    pub fn total_avg_fixed(&self) -> f64 {
        self.total_avg_fixed
    }

    /// Sum of all variable ratios
    pub fn ratio_sum(&self) -> f64 {
        self.variable_ratios.values().sum()
    }
}

fn check_non_negative(field: &str, category: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidModel(format!(
            "{} entry '{}' must be a non-negative number, got {}",
            field, category, value
        )));
    }
    Ok(())
}

/// Default model path in the platform data directory
pub fn default_model_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finsight").join(MODEL_FILE_NAME))
}

/// Resolve which model file to use (explicit, then env, then data dir)
pub fn resolve_model_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(MODEL_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path.trim()));
        }
    }

    default_model_path()
}

/// Resolve and load the budget model
pub fn load_model(explicit: Option<&Path>) -> Result<BudgetModel> {
    let path = resolve_model_path(explicit).ok_or_else(|| {
        Error::ModelUnavailable("no model path configured and no data directory".to_string())
    })?;
    debug!(path = %path.display(), "Resolving budget model");
    BudgetModel::load(&path)
}
