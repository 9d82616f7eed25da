//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Completion provider constants
pub mod provider {
    /// Default Chat Completions API base
    pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

    /// Default completion model
    pub const DEFAULT_MODEL: &str = "gpt-5-mini";

    /// Sampling temperature sent with every analysis call
    pub const DEFAULT_TEMPERATURE: f32 = 1.0;

    /// Upper bound on completion tokens
    pub const DEFAULT_MAX_COMPLETION_TOKENS: u32 = 16_000;

    /// Environment variable holding the provider credential
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

    /// Name attached to the structured output schema
    pub const SCHEMA_NAME: &str = "analysis_result";
}

/// HTTP server constants
pub mod server {
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    pub const DEFAULT_PORT: u16 = 8080;

    /// Origin of the browser client in development
    pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

    /// Request bodies above this size are rejected (bytes)
    pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

    pub const ANALYSIS_PATH: &str = "/api/analysis";

    pub const SCHEMA_PATH: &str = "/api/schema";

    pub const HEALTH_PATH: &str = "/health";

    /// The only action the analysis endpoint understands
    pub const ANALYZE_ACTION: &str = "analyze";
}

/// Result schema bounds
pub mod schema {
    /// Exact number of options per result
    pub const OPTION_COUNT: usize = 3;

    /// Kebab-case option id
    pub const OPTION_ID_PATTERN: &str = "^[a-z0-9]+(?:-[a-z0-9]+)*$";

    /// Hashtag: `#` followed by at least two non-space, non-`#` characters
    pub const TAG_PATTERN: &str = "^#[^\\s#]{2,}$";

    pub const URL_PATTERN: &str = "^https?://";
}

/// ADR report constants
pub mod report {
    /// Default decision owner
    pub const DEFAULT_OWNER: &str = "개발팀";

    /// Shown in place of a missing fit score
    pub const MISSING_SCORE: &str = "-";

    /// File name prefix for downloaded reports
    pub const FILE_PREFIX: &str = "ADR-";
}
