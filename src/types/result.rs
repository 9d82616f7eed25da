//! Analysis Result
//!
//! Typed mirror of the result schema in [`crate::ai::schema`]. Unknown fields
//! are rejected at every level, matching `additionalProperties: false`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisResult {
    pub options: Vec<ArchitectureOption>,
    pub meta: ResultMeta,
}

impl AnalysisResult {
    pub fn option(&self, id: &str) -> Option<&ArchitectureOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// One proposed architecture approach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArchitectureOption {
    /// kebab-case id, e.g. `transactional-outbox`
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub expected_effect: String,
    pub side_effect: String,
    pub evidence_count: u8,
    pub benefits: Vec<String>,
    pub side_effects: Vec<String>,
    pub conditions: Vec<String>,
    pub steps: Vec<String>,
    pub evidence: Vec<Evidence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Evidence {
    pub title: String,
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResultMeta {
    pub input_summary: String,
    #[serde(default)]
    pub warnings: Vec<String>,
}
