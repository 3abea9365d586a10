//! Cache maintenance handlers.

use axum::extract::State;
use axum::Json;
use sentio_core::cache::CacheStats;
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

pub async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

#[derive(Serialize)]
pub struct ClearCacheResponse {
    pub cleared: bool,
}

pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<ClearCacheResponse> {
    Json(ClearCacheResponse {
        cleared: state.cache.clear().await,
    })
}
