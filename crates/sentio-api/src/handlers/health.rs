//! Health check handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub components: HashMap<String, String>,
}

pub async fn health(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut components = HashMap::new();

    components.insert(
        "job_store".to_string(),
        probe("job_store", state.jobs.health_check().await),
    );
    components.insert(
        "cache".to_string(),
        probe("cache", state.cache.health_check().await),
    );

    let healthy = components.values().all(|s| s == "healthy");
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            components,
        }),
    )
}

fn probe(component: &str, outcome: sentio_core::Result<()>) -> String {
    match outcome {
        Ok(()) => "healthy".to_string(),
        Err(e) => {
            warn!(component, error = %e, "health check failed");
            "unhealthy".to_string()
        }
    }
}
