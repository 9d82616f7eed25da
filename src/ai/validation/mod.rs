//! AI Response Validation
//!
//! Turns raw completion text into a typed [`AnalysisResult`]:
//! - Best-effort extraction of the embedded JSON object
//! - Parsing
//! - Schema validation (strict mode on the provider side is not trusted)
//! - Typed decoding
//!
//! Any failure is a [`AdvisorError::ResponseParse`]. Nothing is repaired.

mod extract;

pub use extract::{extract_json_object, extract_or_whole};

use serde_json::Value;
use tracing::debug;

use super::schema::SchemaValidator;
use crate::types::{AdvisorError, AnalysisResult, Result};

/// Extraction → parse → schema check → typed decode
#[derive(Debug)]
pub struct ResultPipeline {
    validator: SchemaValidator,
}

impl ResultPipeline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            validator: SchemaValidator::new()?,
        })
    }

    pub fn process(&self, raw: &str) -> Result<AnalysisResult> {
        let candidate = extract_or_whole(raw);
        if candidate.len() != raw.len() {
            debug!(
                stripped = raw.len() - candidate.len(),
                "Stripped text surrounding JSON object"
            );
        }

        let value: Value = serde_json::from_str(candidate)
            .map_err(|e| AdvisorError::ResponseParse(format!("invalid JSON: {}", e)))?;

        self.validator.validate(&value)?;

        serde_json::from_value(value)
            .map_err(|e| AdvisorError::ResponseParse(format!("unexpected result shape: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::result::fixtures;
    use proptest::prelude::*;

    #[test]
    fn test_process_embedded_result() {
        let pipeline = ResultPipeline::new().unwrap();
        let expected = fixtures::result();
        let raw = format!(
            "ok here: {} thanks",
            serde_json::to_string(&expected).unwrap()
        );

        assert_eq!(pipeline.process(&raw).unwrap(), expected);
    }

    #[test]
    fn test_process_rejects_non_json() {
        let pipeline = ResultPipeline::new().unwrap();
        let err = pipeline.process("Sorry, I can't produce that.").unwrap_err();
        assert!(matches!(err, AdvisorError::ResponseParse(_)));
    }

    #[test]
    fn test_process_rejects_schema_violation() {
        let pipeline = ResultPipeline::new().unwrap();
        let mut result = fixtures::result();
        result.options.truncate(2);
        let raw = serde_json::to_string(&result).unwrap();

        let err = pipeline.process(&raw).unwrap_err();
        assert!(matches!(err, AdvisorError::ResponseParse(ref m) if m.contains("schema")));
    }

    proptest! {
        #[test]
        fn prop_round_trip_through_prose(
            prefix in "[a-zA-Z0-9 .,:!?\n]{0,40}",
            suffix in "[a-zA-Z0-9 .,:!?\n]{0,40}",
            warnings in proptest::collection::vec("[a-z ]{0,20}", 0..3),
        ) {
            let pipeline = ResultPipeline::new().unwrap();
            let mut expected = fixtures::result();
            expected.meta.warnings = warnings;

            let raw = format!("{}{}{}", prefix, serde_json::to_string(&expected).unwrap(), suffix);
            prop_assert_eq!(pipeline.process(&raw).unwrap(), expected);
        }
    }
}
