//! End-to-end router tests over in-memory adapters.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sentio_api::routes::create_router;
use sentio_api::state::AppState;
use sentio_cache::{MemoryCacheStore, ResultCache};
use sentio_core::analysis::{
    PiiEntity, PiiOutcome, Sentiment, SentimentOutcome, SentimentScores,
};
use sentio_core::ports::{PiiDetector, SentimentAnalyzer, WorkflowTrigger};
use sentio_core::Result;
use sentio_jobs::{JobService, MemoryJobRepository};
use sentio_store::MemoryDocumentStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct StubAnalyzer;

#[async_trait]
impl SentimentAnalyzer for StubAnalyzer {
    async fn analyze(&self, _text: &str, language_code: &str) -> Result<SentimentOutcome> {
        Ok(SentimentOutcome {
            sentiment: Sentiment::Positive,
            scores: SentimentScores {
                positive: 0.92,
                negative: 0.01,
                neutral: 0.05,
                mixed: 0.02,
            },
            language_code: language_code.to_string(),
        })
    }
}

struct StubPii {
    found: bool,
}

#[async_trait]
impl PiiDetector for StubPii {
    async fn detect(&self, _text: &str, _language_code: &str) -> Result<PiiOutcome> {
        let entities = if self.found {
            vec![PiiEntity {
                entity_type: "EMAIL".to_string(),
                begin_offset: 0,
                end_offset: 5,
                score: 0.99,
            }]
        } else {
            Vec::new()
        };
        Ok(PiiOutcome { entities })
    }
}

/// Records nothing and starts nothing, so jobs stay PROCESSING.
struct NoopTrigger;

#[async_trait]
impl WorkflowTrigger for NoopTrigger {
    async fn start(&self, _execution_name: &str, _input: Value) -> Result<()> {
        Ok(())
    }
}

fn test_app() -> Router {
    test_app_with_pii(false)
}

fn test_app_with_pii(pii_found: bool) -> Router {
    let cache = Arc::new(ResultCache::new(Arc::new(MemoryCacheStore::new())));
    let jobs = Arc::new(JobService::new(
        Arc::new(MemoryJobRepository::new()),
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(NoopTrigger),
    ));
    let state = AppState::new(
        cache,
        jobs,
        Arc::new(StubAnalyzer),
        Arc::new(StubPii { found: pii_found }),
    );
    create_router(Arc::new(state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_analyze_returns_sentiment() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/api/v1/analyze",
            json!({"text": "I love this product"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-cache-hit").unwrap(),
        "false"
    );
    let body = body_json(response).await;
    assert_eq!(body["sentiment"], "POSITIVE");
    assert_eq!(body["score"], 0.92);
    assert_eq!(body["cache_hit"], false);
    assert_eq!(body["confidence"], 0.92);
    assert_eq!(body["pii_detected"], false);
}

#[tokio::test]
async fn test_repeat_analyze_is_served_from_cache() {
    let app = test_app();

    let first = app
        .clone()
        .oneshot(post_json("/api/v1/analyze", json!({"text": "Same text"})))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // Normalization makes casing and spacing irrelevant to the key.
    let second = app
        .oneshot(post_json(
            "/api/v1/analyze",
            json!({"text": "  SAME   text "}),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers().get("x-cache-hit").unwrap(), "true");
    let body = body_json(second).await;
    assert_eq!(body["cache_hit"], true);
    assert_eq!(body["sentiment"], "POSITIVE");
}

#[tokio::test]
async fn test_analyze_detects_pii() {
    let app = test_app_with_pii(true);
    let response = app
        .oneshot(post_json(
            "/api/v1/analyze",
            json!({"text": "email me at bob@example.com"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["pii_detected"], true);
}

#[tokio::test]
async fn test_analyze_rejects_empty_text() {
    let app = test_app();
    let response = app
        .oneshot(post_json("/api/v1/analyze", json!({"text": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_analyze_rejects_oversized_text() {
    let app = test_app();
    let text = "a".repeat(5_001);
    let response = app
        .oneshot(post_json("/api/v1/analyze", json!({"text": text})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_rejects_unsupported_language() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/api/v1/analyze",
            json!({"text": "hello", "options": {"language_code": "xx"}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_async_submission_returns_202_and_is_pollable() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/analyze/async",
            json!({"text": "a longer document for background analysis", "source_id": "doc-1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "PROCESSING");
    assert!(body["estimated_completion"].is_string());
    let job_id = body["job_id"].as_str().unwrap().to_string();
    assert!(job_id.starts_with("job_"));

    let status = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/status/{}", job_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(status.status(), StatusCode::OK);
    let body = body_json(status).await;
    assert_eq!(body["job_id"], job_id);
    assert_eq!(body["status"], "PROCESSING");
    assert_eq!(body["source_id"], "doc-1");
    // Non-terminal jobs carry no completion data.
    assert!(body.get("completed_at").is_none());
    assert!(body.get("result").is_none());
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_status_rejects_malformed_job_id() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/status/not-a-job-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "Invalid job ID format");
}

#[tokio::test]
async fn test_status_unknown_job_is_404() {
    let app = test_app();
    let id = sentio_core::ids::JobId::new();
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/status/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_cache_stats_and_clear() {
    let app = test_app();

    app.clone()
        .oneshot(post_json("/api/v1/analyze", json!({"text": "populate"})))
        .await
        .unwrap();

    let stats = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(stats.status(), StatusCode::OK);
    let body = body_json(stats).await;
    assert_eq!(body["total_entries"], 1);
    assert_eq!(body["store_name"], "memory");

    let cleared = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(cleared.status(), StatusCode::OK);

    let stats = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(stats).await;
    assert_eq!(body["total_entries"], 0);
}

#[tokio::test]
async fn test_health_reports_components() {
    let app = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["components"]["job_store"], "healthy");
    assert_eq!(body["components"]["cache"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = test_app();
    let mut request = post_json("/api/v1/analyze", json!({"text": "hello"}));
    request
        .headers_mut()
        .insert("x-request-id", "req-abc-123".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "req-abc-123"
    );
    let body = body_json(response).await;
    assert_eq!(body["request_id"], "req-abc-123");
}
