//! Synchronous analysis handler.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use sentio_core::analysis::{AnalysisResult, Sentiment};
use sentio_core::job::JobOptions;
use sentio_core::validate::{validate_language_code, validate_sync_text};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::handlers::request_id;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default)]
    pub options: JobOptions,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub sentiment: Sentiment,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pii_detected: Option<bool>,
    pub processing_time_ms: u64,
    pub cache_hit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl AnalyzeResponse {
    fn from_result(
        result: &AnalysisResult,
        processing_time_ms: u64,
        cache_hit: bool,
        request_id: Option<String>,
    ) -> Self {
        Self {
            sentiment: result.sentiment,
            score: result.score,
            language_code: result.language_code.clone(),
            confidence: result.confidence,
            pii_detected: result.pii_detected,
            processing_time_ms,
            cache_hit,
            request_id,
        }
    }
}

/// Cache lookup, then the external capability on a miss.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AnalyzeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let started = Utc::now();
    let request_id = request_id(&headers);

    validate_sync_text(&request.text)
        .map_err(|e| ApiError::from_core(e, request_id.clone()))?;
    if let Some(code) = &request.options.language_code {
        validate_language_code(code).map_err(|e| ApiError::from_core(e, request_id.clone()))?;
    }

    // Cache first. A hit skips the external calls entirely.
    if let Some(value) = state.cache.lookup(&request.text).await {
        if let Ok(result) = serde_json::from_value::<AnalysisResult>(value) {
            info!(request_id = ?request_id, "served analysis from cache");
            let elapsed = elapsed_ms(started);
            let body =
                AnalyzeResponse::from_result(&result, elapsed, true, request_id.clone());
            return Ok(([("x-cache-hit", "true")], Json(body)));
        }
        // An undecodable entry is treated as a miss and overwritten below.
        warn!(request_id = ?request_id, "discarding undecodable cache entry");
    }

    let language_code = request.options.language_code.as_deref().unwrap_or("en");

    let pii_detected = if request.options.include_pii_detection {
        match state.pii.detect(&request.text, language_code).await {
            Ok(outcome) => Some(outcome.pii_detected()),
            Err(e) => {
                // Detection is best-effort on the sync path.
                warn!(request_id = ?request_id, error = %e, "PII detection failed");
                Some(false)
            }
        }
    } else {
        None
    };

    let outcome = state
        .analyzer
        .analyze(&request.text, language_code)
        .await
        .map_err(|e| ApiError::from_core(e, request_id.clone()))?;

    let mut result = AnalysisResult::from_outcome(&outcome);
    if request.options.include_confidence {
        result.confidence = Some(result.score);
    }
    result.pii_detected = pii_detected;
    let elapsed = elapsed_ms(started);
    result.processing_time_ms = Some(elapsed);

    // Best-effort: a failed store never fails the request.
    match serde_json::to_value(&result) {
        Ok(value) => {
            state.cache.store(&request.text, value).await;
        }
        Err(e) => warn!(request_id = ?request_id, error = %e, "failed to serialize result for cache"),
    }

    let body = AnalyzeResponse::from_result(&result, elapsed, false, request_id);
    Ok(([("x-cache-hit", "false")], Json(body)))
}

fn elapsed_ms(started: chrono::DateTime<Utc>) -> u64 {
    (Utc::now() - started).num_milliseconds().max(0) as u64
}
