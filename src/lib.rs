//! adr-advisor - Architecture Option Analysis and ADR Drafting
//!
//! Collects a structured description of a system and a change goal, asks an
//! LLM for exactly three schema-conformant architecture options, and turns
//! the options a user selects into an Architecture Decision Record.
//!
//! ## Core Features
//!
//! - **Analysis Endpoint**: `POST /api/analysis` with an action envelope
//! - **Strict Results**: JSON Schema enforcement plus prose-tolerant extraction
//! - **Results View**: comparison, detail and multi-select over three options
//! - **ADR Assembly**: fixed Markdown template with editable header fields
//!
//! ## Quick Start
//!
//! ```ignore
//! use adr_advisor::{AnalysisService, ProviderConfig};
//!
//! let service = AnalysisService::from_config(&ProviderConfig::default())?;
//! let result = service.analyze(&request).await?;
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: prompt rendering, provider abstraction, schema and extraction
//! - [`analysis`]: request to result orchestration
//! - [`server`]: HTTP endpoint and error mapping
//! - [`client`]: HTTP client for a running endpoint
//! - [`results`]: selection and detail state over a result
//! - [`report`]: ADR document assembly and Markdown rendering
//! - [`config`]: layered configuration

pub mod ai;
pub mod analysis;
pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod report;
pub mod results;
pub mod server;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ReportConfig, ServerConfig};

// Error Types
pub use types::error::{AdvisorError, ErrorCategory, Result};

// Domain Types
pub use types::{AnalysisRequest, AnalysisResult, ArchitectureOption, Evidence, ResultMeta};

// =============================================================================
// Service Re-exports
// =============================================================================

pub use analysis::AnalysisService;
pub use client::AnalysisClient;
pub use server::{AppState, build_router, serve};

pub use ai::{LlmProvider, LlmResponse, ProviderConfig, SharedProvider, create_provider};

// =============================================================================
// Results & Report Re-exports
// =============================================================================

pub use report::{AdrDocument, AdrStatus, ReportMeta, ReportSource, ReportSourceKind};
pub use results::{OptionSelection, ResultsView};
