//! AI Integration Layer
//!
//! Prompt rendering, the result schema, the completion provider and the
//! pipeline that validates completions.

pub mod prompt;
pub mod provider;
pub mod schema;
pub mod validation;

pub use prompt::{PromptBuilder, PromptSection, SYSTEM_INSTRUCTION, render_analysis_prompt};
pub use provider::{
    LlmProvider, LlmResponse, OpenAiProvider, ProviderConfig, ResponseMetadata, ResponseTiming,
    SharedProvider, TokenUsage, create_provider,
};
pub use schema::{SchemaValidator, analysis_schema};
pub use validation::{ResultPipeline, extract_json_object, extract_or_whole};
