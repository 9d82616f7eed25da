//! Route handlers
//!
//! The analysis endpoint takes `{ "action": "analyze", "payload": <request> }`
//! and answers with the analysis result or `{ "error": message }`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::AppState;
use super::error::ApiError;
use crate::ai::analysis_schema;
use crate::constants::server::ANALYZE_ACTION;
use crate::types::{AdvisorError, AnalysisRequest, AnalysisResult};

#[derive(Debug, Deserialize)]
struct ActionEnvelope {
    action: String,
    #[serde(default)]
    payload: Value,
}

pub async fn analysis(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let body = body.map_err(body_rejection)?;
    let envelope: ActionEnvelope = serde_json::from_slice(&body)
        .map_err(|e| AdvisorError::InvalidRequest(format!("malformed body: {}", e)))?;

    // Credential absence is reported before any dispatch or external call.
    let service = state.service.as_ref().ok_or_else(|| {
        AdvisorError::Config("completion provider credential is not configured".to_string())
    })?;

    if envelope.action != ANALYZE_ACTION {
        return Err(AdvisorError::UnsupportedAction(envelope.action).into());
    }

    let request: AnalysisRequest = serde_json::from_value(envelope.payload)
        .map_err(|e| AdvisorError::InvalidRequest(format!("payload: {}", e)))?;

    debug!(step = request.goal.step.as_str(), "Dispatching analysis");
    let result = service.analyze(&request).await?;

    info!(
        options = result.options.len(),
        warnings = result.meta.warnings.len(),
        "Analysis completed"
    );
    Ok(Json(result))
}

fn body_rejection(rejection: BytesRejection) -> AdvisorError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AdvisorError::PayloadTooLarge(rejection.body_text())
    } else {
        AdvisorError::InvalidRequest(rejection.body_text())
    }
}

pub async fn schema() -> Json<Value> {
    Json(analysis_schema().clone())
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
