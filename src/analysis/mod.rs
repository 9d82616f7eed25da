//! Analysis Service
//!
//! One analysis = render prompt → single schema-constrained completion →
//! result pipeline. No retries and no caching; each call is independent.

use std::sync::Arc;
use tracing::{info, warn};

use crate::ai::{
    ProviderConfig, ResultPipeline, SharedProvider, analysis_schema, create_provider,
    render_analysis_prompt,
};
use crate::types::{AnalysisRequest, AnalysisResult, Result};

pub struct AnalysisService {
    provider: SharedProvider,
    pipeline: ResultPipeline,
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .finish()
    }
}

impl AnalysisService {
    pub fn new(provider: SharedProvider) -> Result<Self> {
        Ok(Self {
            provider,
            pipeline: ResultPipeline::new()?,
        })
    }

    /// Build a service around the configured provider.
    ///
    /// Fails with a config error when the provider credential is missing.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(create_provider(config)?)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let prompt = render_analysis_prompt(request);

        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            step = request.goal.step.as_str(),
            integrations = request.external_integrations.len(),
            "Requesting architecture options"
        );

        let response = self.provider.generate(&prompt, analysis_schema()).await?;

        info!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            elapsed_ms = response.timing.total_ms,
            "Completion received"
        );

        let result = self.pipeline.process(&response.content).inspect_err(|e| {
            warn!(error = %e, "Completion did not yield a valid analysis result");
        })?;

        if !result.meta.warnings.is_empty() {
            info!(warnings = result.meta.warnings.len(), "Result carries warnings");
        }

        Ok(result)
    }
}
