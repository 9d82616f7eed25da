//! HTTP Server
//!
//! Serves the analysis endpoint plus the result schema and a health probe.
//!
//! ## Routes
//!
//! - `POST /api/analysis`: `{ action: "analyze", payload }` → analysis result
//! - `GET /api/schema`: the result JSON Schema
//! - `GET /health`: `{ "status": "ok" }`
//!
//! A missing provider credential does not prevent startup. The analysis
//! route answers 500 in that case without calling out.

mod error;
mod handlers;

pub use error::ApiError;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::ProviderConfig;
use crate::analysis::AnalysisService;
use crate::config::{Config, ServerConfig};
use crate::constants::server::{ANALYSIS_PATH, HEALTH_PATH, SCHEMA_PATH};
use crate::types::{AdvisorError, Result};

#[derive(Clone, Default)]
pub struct AppState {
    /// `None` when the provider credential is not configured
    pub service: Option<Arc<AnalysisService>>,
}

impl AppState {
    pub fn new(service: AnalysisService) -> Self {
        Self {
            service: Some(service.shared()),
        }
    }

    /// Build state from the `[llm]` section, tolerating a missing credential.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        match AnalysisService::from_config(config) {
            Ok(service) => Ok(Self::new(service)),
            Err(AdvisorError::Config(reason)) => {
                warn!("Analysis endpoint disabled: {}", reason);
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }
}

#[derive(Clone, Copy)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn parse_allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route(ANALYSIS_PATH, post(handlers::analysis))
        .route(SCHEMA_PATH, get(handlers::schema))
        .route(HEALTH_PATH, get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parse_allowed_origins(
                    &config.allowed_origins,
                )))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(3600)),
        )
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Bind and serve until Ctrl-C
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(&config.llm)?;
    let app = build_router(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::mock::ScriptedProvider;
    use crate::analysis::sample;
    use crate::types::result::fixtures;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state_with(provider: Arc<ScriptedProvider>) -> AppState {
        AppState::new(AnalysisService::new(provider).unwrap())
    }

    fn analysis_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(ANALYSIS_PATH)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn analyze_body() -> Value {
        json!({ "action": "analyze", "payload": sample::request() })
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(state, &ServerConfig::default())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_analysis_success() {
        let expected = fixtures::result();
        let provider = Arc::new(ScriptedProvider::content(
            serde_json::to_string(&expected).unwrap(),
        ));

        let (status, body) = send(state_with(provider.clone()), analysis_request(analyze_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::to_value(&expected).unwrap());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_result_embedded_in_prose() {
        let expected = fixtures::result();
        let provider = Arc::new(ScriptedProvider::content(format!(
            "Sure! {}\nLet me know if you need more.",
            serde_json::to_string(&expected).unwrap()
        )));

        let (status, body) = send(state_with(provider), analysis_request(analyze_body())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["options"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unsupported_action() {
        let provider = Arc::new(ScriptedProvider::content("{}"));
        let (status, body) = send(
            state_with(provider.clone()),
            analysis_request(json!({ "action": "summarize", "payload": {} })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("summarize"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_is_server_error() {
        let (status, body) = send(AppState::default(), analysis_request(analyze_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "server error" }));
    }

    #[tokio::test]
    async fn test_malformed_envelope_rejected_before_credential_check() {
        let request = Request::builder()
            .method("POST")
            .uri(ANALYSIS_PATH)
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let (status, body) = send(AppState::default(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("invalid request"));
    }

    #[tokio::test]
    async fn test_unparseable_completion() {
        let provider = Arc::new(ScriptedProvider::content("no json here"));
        let (status, body) = send(state_with(provider), analysis_request(analyze_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            crate::types::error::PARSE_PUBLIC_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_upstream_message_forwarded() {
        let provider = Arc::new(ScriptedProvider::upstream_error(
            401,
            Some("Incorrect API key provided"),
        ));
        let (status, body) = send(state_with(provider), analysis_request(analyze_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Incorrect API key provided" }));
    }

    #[tokio::test]
    async fn test_upstream_without_message_uses_fallback() {
        let provider = Arc::new(ScriptedProvider::upstream_error(503, None));
        let (status, body) = send(state_with(provider), analysis_request(analyze_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], crate::types::error::UPSTREAM_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn test_oversized_body_answers_json_error() {
        let provider = Arc::new(ScriptedProvider::content("{}"));
        let config = ServerConfig {
            body_limit_bytes: 64,
            ..ServerConfig::default()
        };
        let body = json!({ "action": "analyze", "payload": { "padding": "x".repeat(200) } });

        let response = build_router(state_with(provider.clone()), &config)
            .oneshot(analysis_request(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "request body too large" }));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let provider = Arc::new(ScriptedProvider::content("{}"));
        let (status, _) = send(
            state_with(provider.clone()),
            analysis_request(json!({ "action": "analyze", "payload": { "goal": 1 } })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_schema_and_health_routes() {
        let request = Request::builder()
            .uri(SCHEMA_PATH)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(AppState::default(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body, crate::ai::analysis_schema());

        let request = Request::builder()
            .uri(HEALTH_PATH)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(AppState::default(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn test_request_id_and_cors_headers() {
        let request = Request::builder()
            .uri(HEALTH_PATH)
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = build_router(AppState::default(), &ServerConfig::default())
            .oneshot(request)
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:3000"
        );
    }
}
