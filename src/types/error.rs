//! Unified Error Type System
//!
//! Centralized error types for the service, the client and the CLI.
//!
//! ## Error Categories
//!
//! - **BadRequest**: the caller sent something we cannot act on (400)
//! - **Config**: server-side configuration is missing or invalid (500)
//! - **Upstream**: the completion provider rejected the call (500)
//! - **Parse**: the completion could not be turned into a valid result (500)
//! - **Network**: a transport failure on either side of the endpoint
//!
//! Every variant carries a client-safe message via [`AdvisorError::public_message`].
//! Provider payloads and credentials never leave the process through it.

use thiserror::Error;

/// Fallback shown when the provider returns a non-success status without a message
pub const UPSTREAM_FALLBACK_MESSAGE: &str = "upstream provider returned an error";

/// Message shown for configuration failures
pub const CONFIG_PUBLIC_MESSAGE: &str = "server error";

/// Message shown when the completion cannot be parsed
pub const PARSE_PUBLIC_MESSAGE: &str = "could not parse the provider response";

// =============================================================================
// Error Categories
// =============================================================================

/// Error categories used for status-code routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller error - fix the request
    BadRequest,
    /// Referenced item does not exist
    NotFound,
    /// Request body exceeds the configured limit
    PayloadTooLarge,
    /// Server configuration missing or invalid - fail fast
    Config,
    /// Provider answered with a non-success status
    Upstream,
    /// Provider or endpoint unreachable
    Network,
    /// Completion content was not a valid result
    ParseError,
    /// Local I/O and serialization
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::PayloadTooLarge => write!(f, "PAYLOAD_TOO_LARGE"),
            Self::Config => write!(f, "CONFIG"),
            Self::Upstream => write!(f, "UPSTREAM"),
            Self::Network => write!(f, "NETWORK"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl ErrorCategory {
    /// Whether the caller is at fault (4xx) rather than the server (5xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::BadRequest | Self::NotFound | Self::PayloadTooLarge)
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum AdvisorError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Endpoint Errors
    // -------------------------------------------------------------------------
    /// Provider credential or other server configuration missing
    #[error("Config error: {0}")]
    Config(String),

    /// The `action` field of an endpoint request is not recognized
    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// Request body or payload is not a well-formed analysis request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request body exceeds the server's body limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Completion provider returned a non-success status
    #[error("Upstream error ({status}): {}", .message.as_deref().unwrap_or(UPSTREAM_FALLBACK_MESSAGE))]
    Upstream { status: u16, message: Option<String> },

    /// Completion provider could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// Completion content could not be coerced into a valid result
    #[error("Response parse error: {0}")]
    ResponseParse(String),

    // -------------------------------------------------------------------------
    // Client Errors
    // -------------------------------------------------------------------------
    /// The request to the analysis endpoint itself failed
    #[error("Network error: {0}")]
    ClientNetwork(String),

    /// The analysis endpoint answered with an error body
    #[error("Endpoint error ({status}): {message}")]
    Endpoint { status: u16, message: String },

    // -------------------------------------------------------------------------
    // Results / Report Errors
    // -------------------------------------------------------------------------
    #[error("Option not found: {0}")]
    NotFound(String),

    #[error("No options selected for the report")]
    EmptySelection,
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedAction(_) | Self::InvalidRequest(_) | Self::EmptySelection => {
                ErrorCategory::BadRequest
            }
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::PayloadTooLarge(_) => ErrorCategory::PayloadTooLarge,
            Self::Config(_) => ErrorCategory::Config,
            Self::Upstream { .. } | Self::Endpoint { .. } => ErrorCategory::Upstream,
            Self::Transport(_) | Self::ClientNetwork(_) => ErrorCategory::Network,
            Self::ResponseParse(_) => ErrorCategory::ParseError,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    /// Message that is safe to hand to a client.
    ///
    /// Only the upstream provider's own error message and caller-facing
    /// validation messages pass through; everything else is a fixed string.
    pub fn public_message(&self) -> String {
        match self {
            Self::Upstream { message, .. } => match message {
                Some(msg) if !msg.trim().is_empty() => msg.clone(),
                _ => UPSTREAM_FALLBACK_MESSAGE.to_string(),
            },
            Self::Config(_) => CONFIG_PUBLIC_MESSAGE.to_string(),
            Self::ResponseParse(_) => PARSE_PUBLIC_MESSAGE.to_string(),
            Self::UnsupportedAction(action) => format!("unsupported action: {}", action),
            Self::InvalidRequest(msg) => format!("invalid request: {}", msg),
            Self::NotFound(id) => format!("option not found: {}", id),
            Self::PayloadTooLarge(_) => "request body too large".to_string(),
            Self::EmptySelection => "no options selected".to_string(),
            Self::Endpoint { message, .. } => message.clone(),
            Self::Transport(_) | Self::ClientNetwork(_) => {
                "analysis request failed".to_string()
            }
            Self::Io(_) | Self::Json(_) => "internal error".to_string(),
        }
    }

    pub fn upstream(status: u16, message: Option<String>) -> Self {
        Self::Upstream { status, message }
    }
}

// =============================================================================
// Tests
// =============================================================================
