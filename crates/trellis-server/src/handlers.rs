//! HTTP request handlers
//!
//! The four message kinds of the system: submit a capture, read the graph,
//! search, update settings. Every response carries a success flag plus a
//! payload or an error string; content-level rejections (skip list, short
//! pages) are successful responses with a "not captured" payload, because
//! they are expected outcomes, not failures.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::warn;
use trellis_analysis::{Analyst, QueryExpansion};
use trellis_capture::{capture_page, CaptureConfig};
use trellis_domain::traits::{GraphSnapshot, GraphStore, SearchHit};
use trellis_domain::Settings;
use trellis_pipeline::{IngestOutcome, Pipeline};
use trellis_store::{SqliteStore, SEARCH_RESULT_CAP};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The graph store, shared with the pipeline
    pub store: Arc<Mutex<SqliteStore>>,
    /// The ingestion pipeline
    pub pipeline: Arc<Pipeline<SqliteStore>>,
    /// The analysis client, for query expansion
    pub analyst: Arc<Analyst>,
    /// Base capture configuration; user skip-domains are merged in per request
    pub capture_config: Arc<CaptureConfig>,
}

/// Uniform response envelope: success flag plus payload-or-error.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request took effect
    pub success: bool,
    /// Payload, present on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error string, present on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    fn err(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: false,
            data: None,
            error: Some(message.into()),
        })
    }
}

/// A capture submission.
#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    /// Page URL
    pub url: String,
    /// Raw page HTML
    pub html: String,
}

/// Outcome payload of a capture submission.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CaptureData {
    /// The page was rejected before analysis; an expected outcome
    Rejected {
        /// Always "not_captured"
        outcome: &'static str,
        /// Human-readable rejection reason
        reason: String,
    },
    /// The pipeline ran; see the outcome
    Pipeline(IngestOutcome),
}

/// A search request.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Query text
    pub query: String,
    /// Widen the query through the analysis model first
    #[serde(default)]
    pub expand: bool,
}

/// Search results plus the expansion that produced them, if any.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    /// Matching archive records, newest first
    pub hits: Vec<SearchHit>,
    /// The query expansion used, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<QueryExpansion>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving
    pub status: &'static str,
}

/// POST /api/capture - run capture + ingestion for a submitted page.
async fn capture(
    State(state): State<AppState>,
    Json(request): Json<CaptureRequest>,
) -> Json<ApiResponse<CaptureData>> {
    // Merge the user's skip list into the base capture config.
    let config = {
        let store = match state.store.lock() {
            Ok(store) => store,
            Err(e) => return ApiResponse::err(format!("store unavailable: {}", e)),
        };
        let settings = match store.load_settings() {
            Ok(settings) => settings,
            Err(e) => return ApiResponse::err(format!("settings unavailable: {}", e)),
        };
        let mut config = (*state.capture_config).clone();
        config.skip_domains.extend(settings.skip_domains);
        config
    };

    let captured = match capture_page(&request.url, &request.html, &config) {
        Ok(captured) => captured,
        Err(rejection) => {
            return ApiResponse::ok(CaptureData::Rejected {
                outcome: "not_captured",
                reason: rejection.to_string(),
            })
        }
    };

    match state.pipeline.ingest(captured).await {
        Ok(IngestOutcome::AnalysisUnavailable) => ApiResponse::err("analysis unavailable"),
        Ok(outcome) => ApiResponse::ok(CaptureData::Pipeline(outcome)),
        Err(e) => {
            warn!("ingestion failed: {}", e);
            ApiResponse::err(e.to_string())
        }
    }
}

/// GET /api/graph - full graph snapshot.
async fn graph(State(state): State<AppState>) -> Json<ApiResponse<GraphSnapshot>> {
    let store = match state.store.lock() {
        Ok(store) => store,
        Err(e) => return ApiResponse::err(format!("store unavailable: {}", e)),
    };
    match store.graph_snapshot() {
        Ok(snapshot) => ApiResponse::ok(snapshot),
        Err(e) => ApiResponse::err(e.to_string()),
    }
}

/// POST /api/search - substring search, optionally widened by the model.
async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Json<ApiResponse<SearchResults>> {
    let expansion = if request.expand {
        Some(state.analyst.expand_query(&request.query).await)
    } else {
        None
    };

    let mut queries = vec![request.query.clone()];
    if let Some(expansion) = &expansion {
        queries.extend(expansion.variations.iter().cloned());
        queries.extend(expansion.related_concepts.iter().cloned());
    }

    let store = match state.store.lock() {
        Ok(store) => store,
        Err(e) => return ApiResponse::err(format!("store unavailable: {}", e)),
    };

    let mut seen = HashSet::new();
    let mut hits = Vec::new();
    for query in &queries {
        match store.search_content(query) {
            Ok(results) => {
                for hit in results {
                    if seen.insert(hit.id.clone()) {
                        hits.push(hit);
                    }
                }
            }
            Err(e) => return ApiResponse::err(e.to_string()),
        }
    }
    hits.sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
    hits.truncate(SEARCH_RESULT_CAP);

    ApiResponse::ok(SearchResults { hits, expansion })
}

/// PUT /api/settings - validated read-modify-write of the settings record.
async fn update_settings(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Json<ApiResponse<Settings>> {
    if let Err(e) = settings.validate() {
        return ApiResponse::err(e.to_string());
    }

    let mut store = match state.store.lock() {
        Ok(store) => store,
        Err(e) => return ApiResponse::err(format!("store unavailable: {}", e)),
    };
    match store.save_settings(&settings) {
        Ok(()) => ApiResponse::ok(settings),
        Err(e) => ApiResponse::err(e.to_string()),
    }
}

/// GET /health - liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create the axum router with all routes.
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/capture", post(capture))
        .route("/api/graph", get(graph))
        .route("/api/search", post(search))
        .route("/api/settings", put(update_settings))
        .route("/health", get(health))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt; // for oneshot
    use trellis_analysis::AnalysisConfig;
    use trellis_llm::MockModel;

    const ANALYSIS_JSON: &str = r#"{
        "concepts": ["Knowledge Graphs"],
        "summary": "A page about graphs.",
        "contentType": "article",
        "mainTopic": "graphs",
        "relatedTopics": [],
        "confidence": 0.9
    }"#;

    fn test_state(model: MockModel) -> AppState {
        let store = Arc::new(Mutex::new(SqliteStore::new(":memory:").unwrap()));
        let mut config = AnalysisConfig::default();
        config.min_call_interval_ms = 1;
        let analyst = Arc::new(Analyst::new(Arc::new(model), config));
        AppState {
            store: store.clone(),
            pipeline: Arc::new(Pipeline::new(store, analyst.clone())),
            analyst,
            capture_config: Arc::new(CaptureConfig::default()),
        }
    }

    fn article_html() -> String {
        let body = "The study of knowledge graphs has grown steadily, and the \
            tools for building them have matured with it. A graph that grows \
            as the reader browses is a different thing from one built in a \
            batch, and it rewards different design choices. "
            .repeat(3);
        format!(
            "<html><head><title>Graphs</title></head><body><article><p>{}</p></article></body></html>",
            body
        )
    }

    async fn send(app: AxumRouter, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(test_state(MockModel::default()));
        let (status, json) = send(
            app,
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_capture_then_graph() {
        let app = create_router(test_state(MockModel::new(ANALYSIS_JSON)));

        let (status, json) = send(
            app.clone(),
            json_request(
                "POST",
                "/api/capture",
                serde_json::json!({"url": "https://example.com/a", "html": article_html()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["outcome"], "ingested");

        let (_, json) = send(
            app,
            Request::builder()
                .uri("/api/graph")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(json["success"], true);
        // 1 page + 1 concept node.
        assert_eq!(json["data"]["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["edges"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_capture_skip_domain_is_not_an_error() {
        let app = create_router(test_state(MockModel::new(ANALYSIS_JSON)));
        let (status, json) = send(
            app,
            json_request(
                "POST",
                "/api/capture",
                serde_json::json!({"url": "https://youtube.com/watch?v=1", "html": article_html()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["outcome"], "not_captured");
    }

    #[tokio::test]
    async fn test_capture_analysis_failure_is_error_payload() {
        let model = MockModel::default();
        model.add_error("Text to analyze", "service down");
        let app = create_router(test_state(model));

        let (status, json) = send(
            app,
            json_request(
                "POST",
                "/api/capture",
                serde_json::json!({"url": "https://example.com/a", "html": article_html()}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "analysis unavailable");
    }

    #[tokio::test]
    async fn test_search_over_ingested_content() {
        let app = create_router(test_state(MockModel::new(ANALYSIS_JSON)));

        send(
            app.clone(),
            json_request(
                "POST",
                "/api/capture",
                serde_json::json!({"url": "https://example.com/a", "html": article_html()}),
            ),
        )
        .await;

        let (_, json) = send(
            app.clone(),
            json_request(
                "POST",
                "/api/search",
                serde_json::json!({"query": "knowledge graphs"}),
            ),
        )
        .await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["hits"].as_array().unwrap().len(), 1);

        let (_, json) = send(
            app,
            json_request(
                "POST",
                "/api/search",
                serde_json::json!({"query": "unrelated topic"}),
            ),
        )
        .await;
        assert_eq!(json["data"]["hits"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_settings_validation_rejected_at_save() {
        let app = create_router(test_state(MockModel::default()));

        let (status, json) = send(
            app.clone(),
            json_request(
                "PUT",
                "/api/settings",
                serde_json::json!({"api_key": "wrong-prefix-key-123456789"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("API key"));

        let (_, json) = send(
            app,
            json_request(
                "PUT",
                "/api/settings",
                serde_json::json!({"api_key": "AIzaValidKey1234567890abc", "min_content_words": 150}),
            ),
        )
        .await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["min_content_words"], 150);
    }

    #[tokio::test]
    async fn test_settings_skip_domains_respected_by_capture() {
        let app = create_router(test_state(MockModel::new(ANALYSIS_JSON)));

        send(
            app.clone(),
            json_request(
                "PUT",
                "/api/settings",
                serde_json::json!({"skip_domains": ["example.com"]}),
            ),
        )
        .await;

        let (_, json) = send(
            app,
            json_request(
                "POST",
                "/api/capture",
                serde_json::json!({"url": "https://example.com/a", "html": article_html()}),
            ),
        )
        .await;
        assert_eq!(json["data"]["outcome"], "not_captured");
    }
}
