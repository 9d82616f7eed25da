//! Analysis Result Schema
//!
//! The JSON Schema sent to the provider as a strict structured-output
//! constraint, and a validator that re-checks completions against it.
//! `additionalProperties: false` is set on every object.

use jsonschema::Validator;
use serde_json::{Value, json};
use std::sync::LazyLock;
use tracing::debug;

use crate::constants::schema::{OPTION_COUNT, OPTION_ID_PATTERN, TAG_PATTERN, URL_PATTERN};
use crate::types::{AdvisorError, Result};

static ANALYSIS_SCHEMA: LazyLock<Value> = LazyLock::new(build_schema);

/// The analysis result schema (draft 2020-12)
pub fn analysis_schema() -> &'static Value {
    &ANALYSIS_SCHEMA
}

fn string_list(min_items: usize, max_items: usize) -> Value {
    json!({
        "type": "array",
        "minItems": min_items,
        "maxItems": max_items,
        "items": { "type": "string", "minLength": 3 }
    })
}

fn bounded_string(min_length: usize, max_length: usize) -> Value {
    json!({ "type": "string", "minLength": min_length, "maxLength": max_length })
}

fn build_schema() -> Value {
    let evidence = json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["title", "url", "summary"],
        "properties": {
            "title": { "type": "string", "minLength": 3 },
            "url": { "type": "string", "pattern": URL_PATTERN },
            "summary": bounded_string(10, 240)
        }
    });

    let option = json!({
        "type": "object",
        "additionalProperties": false,
        "required": [
            "id", "name", "tags", "summary", "expectedEffect", "sideEffect",
            "evidenceCount", "benefits", "sideEffects", "conditions", "steps", "evidence"
        ],
        "properties": {
            "id": {
                "type": "string",
                "pattern": OPTION_ID_PATTERN,
                "description": "kebab-case unique id (e.g. transactional-outbox)"
            },
            "name": bounded_string(3, 120),
            "tags": {
                "type": "array",
                "minItems": 3,
                "maxItems": 5,
                "items": { "type": "string", "pattern": TAG_PATTERN }
            },
            "summary": bounded_string(10, 280),
            "expectedEffect": bounded_string(10, 280),
            "sideEffect": bounded_string(10, 280),
            "evidenceCount": { "type": "integer", "minimum": 3, "maximum": 5 },
            "benefits": string_list(3, 5),
            "sideEffects": string_list(3, 5),
            "conditions": string_list(3, 5),
            "steps": string_list(4, 7),
            "evidence": {
                "type": "array",
                "minItems": 3,
                "maxItems": 5,
                "items": evidence
            }
        }
    });

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "additionalProperties": false,
        "required": ["options", "meta"],
        "properties": {
            "options": {
                "type": "array",
                "minItems": OPTION_COUNT,
                "maxItems": OPTION_COUNT,
                "items": option
            },
            "meta": {
                "type": "object",
                "additionalProperties": false,
                "required": ["inputSummary", "warnings"],
                "properties": {
                    "inputSummary": bounded_string(10, 500),
                    "warnings": {
                        "type": "array",
                        "items": { "type": "string" },
                        "default": []
                    }
                }
            }
        }
    })
}

/// Compiled validator for [`analysis_schema`]
pub struct SchemaValidator {
    validator: Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    pub fn new() -> Result<Self> {
        let validator = jsonschema::validator_for(analysis_schema())
            .map_err(|e| AdvisorError::Config(format!("Invalid analysis schema: {}", e)))?;
        Ok(Self { validator })
    }

    /// All violations, each prefixed with its instance path
    pub fn violations(&self, instance: &Value) -> Vec<String> {
        self.validator
            .iter_errors(instance)
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect()
    }

    pub fn validate(&self, instance: &Value) -> Result<()> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            return Ok(());
        }

        debug!(count = violations.len(), "Result failed schema validation");
        Err(AdvisorError::ResponseParse(format!(
            "schema violations: {}",
            violations.join("; ")
        )))
    }
}
