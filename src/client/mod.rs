//! Analysis Endpoint Client
//!
//! Posts a collected request to a running analysis endpoint and decodes the
//! answer. Each call is independent; nothing is cached.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::constants::server::{ANALYSIS_PATH, ANALYZE_ACTION};
use crate::types::{AdvisorError, AnalysisRequest, AnalysisResult, Result};

#[derive(Debug, Serialize)]
struct AnalyzeEnvelope<'a> {
    action: &'static str,
    payload: &'a AnalysisRequest,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl AnalysisClient {
    /// `base` is the server root, e.g. `http://127.0.0.1:8080`
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = Url::parse(base)
            .and_then(|u| u.join(ANALYSIS_PATH))
            .map_err(|e| AdvisorError::Config(format!("Invalid endpoint URL '{}': {}", base, e)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AdvisorError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        debug!(endpoint = %self.endpoint, "Posting analysis request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&AnalyzeEnvelope {
                action: ANALYZE_ACTION,
                payload: request,
            })
            .send()
            .await
            .map_err(|e| AdvisorError::ClientNetwork(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("analysis request failed ({})", status.as_u16()));
            warn!(status = status.as_u16(), "Analysis endpoint returned an error");
            return Err(AdvisorError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<AnalysisResult>()
            .await
            .map_err(|e| AdvisorError::ResponseParse(format!("endpoint result: {}", e)))
    }
}
