//! FinSight Web Server
//!
//! Axum-based REST API for the FinSight budget forecasting backend.
//!
//! Endpoints:
//! - `POST /predict_budget_v2` - Budget forecast with goal adjustment
//! - `POST /initial-budget` - Initial budget suggestions
//! - `POST /forecast` - 30-day daily spend forecast
//! - `POST /savings-plan` - Savings plan recommendations
//! - `GET /health` - Health check (reports budget model status)
//! - `GET /` - Test page
//!
//! The budget model is loaded once before the router is built. When it is
//! missing the server still starts; only the budget forecast endpoint fails.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use finsight_core::BudgetModel;

mod handlers;
pub mod settings;

pub use settings::{parse_origins, ServerSettings};

/// Message returned when the budget model is not loaded
pub const MODEL_NOT_LOADED: &str = "Budget model not loaded. Check server logs.";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only, "*" = any origin)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// Read-only budget model, `None` when it failed to load
    pub model: Option<Arc<BudgetModel>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }
}

/// Create the application router
pub fn create_router(model: Option<BudgetModel>, config: ServerConfig) -> Router {
    match &model {
        Some(m) => info!(
            fixed_categories = m.fixed_budget().len(),
            variable_categories = m.variable_ratios().len(),
            "Budget model available"
        ),
        None => warn!("⚠️  Budget model not loaded - /predict_budget_v2 will return errors"),
    }

    let state = Arc::new(AppState {
        model: model.map(Arc::new),
        config: config.clone(),
    });

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/predict_budget_v2", post(handlers::predict_budget))
        .route("/initial-budget", post(handlers::initial_budget))
        .route("/forecast", post(handlers::forecast_spending))
        .route("/savings-plan", post(handlers::savings_plan))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        base
    } else if config.allowed_origins.iter().any(|o| o == "*") {
        base.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        base.allow_origin(origins)
    }
}

/// Start the server
pub async fn serve(model: Option<BudgetModel>, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(model, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    model: Option<BudgetModel>,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(model, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error onto a response
    ///
    /// Input problems are the caller's fault (400); model problems are ours
    /// (500) and keep their detail out of the response body.
    pub fn from_core(err: finsight_core::Error) -> Self {
        use finsight_core::Error;

        match err {
            Error::InvalidInput(msg) | Error::InsufficientData(msg) => Self::bad_request(&msg),
            Error::ModelUnavailable(msg) => {
                warn!(reason = %msg, "Budget model unavailable");
                Self::internal(MODEL_NOT_LOADED)
            }
            Error::InvalidModel(msg) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Budget model is invalid".to_string(),
                internal: Some(anyhow::anyhow!(msg)),
            },
            other => Self::from(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
