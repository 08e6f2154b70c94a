//! Server command implementation

use std::path::Path;

use anyhow::Result;
use tracing::warn;

use finsight_core::load_model;
use finsight_server::ServerSettings;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/predict_budget_v2", "Budget forecast with goal adjustment"),
    ("POST", "/initial-budget", "Initial budget suggestions"),
    ("POST", "/forecast", "30-day spend forecast"),
    ("POST", "/savings-plan", "Savings plan recommendations"),
    ("GET", "/health", "Health check"),
    ("GET", "/", "Test page"),
];

/// Settings file values, then env origins, then CLI flags
pub fn resolve_settings(
    settings_path: &Path,
    model: Option<&Path>,
    host: Option<&str>,
    port: Option<u16>,
    allowed_origins: Option<&str>,
) -> Result<ServerSettings> {
    let mut settings = ServerSettings::load(settings_path)?;
    settings.merge_env();

    if let Some(origins) = allowed_origins {
        settings.merge_origins(origins);
    }
    if let Some(host) = host {
        settings.host = Some(host.to_string());
    }
    if let Some(port) = port {
        settings.port = Some(port);
    }
    if let Some(model) = model {
        settings.model_path = Some(model.to_path_buf());
    }

    Ok(settings)
}

pub async fn cmd_serve(
    model: Option<&Path>,
    settings_path: &Path,
    host: Option<&str>,
    port: Option<u16>,
    allowed_origins: Option<&str>,
) -> Result<()> {
    let settings = resolve_settings(settings_path, model, host, port, allowed_origins)?;
    let host = settings.host.as_deref().unwrap_or(DEFAULT_HOST);
    let port = settings.port.unwrap_or(DEFAULT_PORT);

    // A missing model is not fatal: only the budget endpoint depends on it
    let model = match load_model(settings.model_path.as_deref()) {
        Ok(model) => Some(model),
        Err(e) => {
            warn!(error = %e, "Budget model not loaded");
            None
        }
    };

    println!("🚀 Starting FinSight server...");
    println!("   Listening: http://{}:{}", host, port);
    if model.is_some() {
        println!("   ✅ Budget model: loaded");
    } else {
        println!("   ⚠️  Budget model: NOT loaded - /predict_budget_v2 will fail");
    }
    if settings.allowed_origins.is_empty() {
        println!("   🔒 CORS: same-origin only");
    } else {
        println!("   🌐 CORS: {}", settings.allowed_origins.join(", "));
    }
    println!();
    println!("   Endpoints:");
    for (method, path, description) in ENDPOINTS {
        println!("     {:<5} {:<20} {}", method, path, description);
    }
    println!();
    println!("   Press Ctrl+C to stop");

    finsight_server::serve_with_config(model, host, port, settings.server_config()).await?;

    Ok(())
}
