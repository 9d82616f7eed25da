//! Configuration Types
//!
//! All configuration structures with defaults matching the hosted service.

use serde::{Deserialize, Serialize};

use crate::ai::ProviderConfig;
use crate::constants::report::DEFAULT_OWNER;
use crate::constants::server::{
    DEFAULT_ALLOWED_ORIGIN, DEFAULT_BODY_LIMIT_BYTES, DEFAULT_HOST, DEFAULT_PORT,
};
use crate::report::{AdrStatus, ReportSourceKind};
use crate::types::{AdvisorError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// HTTP endpoint settings
    pub server: ServerConfig,

    /// Completion provider settings
    pub llm: ProviderConfig,

    /// ADR report defaults
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            server: ServerConfig::default(),
            llm: ProviderConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `AdvisorError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(AdvisorError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.max_completion_tokens == 0 {
            return Err(AdvisorError::Config(
                "LLM max_completion_tokens must be greater than 0".to_string(),
            ));
        }

        if self.llm.timeout_secs == Some(0) {
            return Err(AdvisorError::Config(
                "LLM timeout_secs must be greater than 0 when set".to_string(),
            ));
        }

        url::Url::parse(&self.llm.api_base).map_err(|e| {
            AdvisorError::Config(format!(
                "LLM api_base '{}' is not a valid URL: {}",
                self.llm.api_base, e
            ))
        })?;

        if self.server.port == 0 {
            return Err(AdvisorError::Config(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.body_limit_bytes == 0 {
            return Err(AdvisorError::Config(
                "Server body_limit_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed by CORS
    pub allowed_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub owner: String,
    pub status: AdrStatus,
    pub source: ReportSourceKind,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            status: AdrStatus::Proposed,
            source: ReportSourceKind::Fixture,
        }
    }
}
