//! Analysis Request
//!
//! The structured input a user fills in: project environment, change goal
//! and external integrations. Wire format is camelCase JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{AdvisorError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub environment: Environment,
    pub goal: Goal,
    #[serde(default)]
    pub external_integrations: Vec<ExternalIntegration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub framework: String,
    /// Framework version
    pub version: String,
    pub language: String,
    /// Runtime version
    pub runtime: String,
    pub architecture: ArchitectureStyle,
    pub cloud: String,
    #[serde(default)]
    pub databases: Vec<Database>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Engine name, e.g. `mysql`
    pub database: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureStyle {
    Monolithic,
    Modular,
    Microservices,
}

impl ArchitectureStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monolithic => "monolithic",
            Self::Modular => "modular",
            Self::Microservices => "microservices",
        }
    }
}

impl fmt::Display for ArchitectureStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Goal
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(flatten)]
    pub step: GoalStep,
    #[serde(default)]
    pub considerations: Vec<String>,
}

/// Change goal, discriminated by `stepType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stepType")]
pub enum GoalStep {
    #[serde(rename = "new")]
    New {
        #[serde(rename = "featureSummary", default)]
        feature_summary: String,
    },
    #[serde(rename = "refactoring")]
    Refactoring {
        #[serde(rename = "currentState", default)]
        current_state: String,
        #[serde(rename = "desiredState", default)]
        desired_state: String,
    },
}

impl GoalStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New { .. } => "new",
            Self::Refactoring { .. } => "refactoring",
        }
    }
}

// =============================================================================
// External Integrations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIntegration {
    pub name: String,
    pub criticality: Criticality,
    pub call_type: CallType,
    #[serde(default, alias = "apiDescription")]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criticality {
    Critical,
    NonCritical,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::NonCritical => "non-critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Sync,
    Async,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }
}

// =============================================================================
// Form Collection
// =============================================================================

impl AnalysisRequest {
    /// Names of required form fields that are blank.
    pub fn missing_fields(&self) -> Vec<String> {
        let env = &self.environment;
        let mut missing: Vec<String> = [
            ("environment.framework", &env.framework),
            ("environment.version", &env.version),
            ("environment.language", &env.language),
            ("environment.runtime", &env.runtime),
            ("environment.cloud", &env.cloud),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name.to_string())
        .collect();

        for (idx, db) in env.databases.iter().enumerate() {
            if is_blank(&db.database) {
                missing.push(format!("environment.databases[{}].database", idx));
            }
            if is_blank(&db.version) {
                missing.push(format!("environment.databases[{}].version", idx));
            }
        }

        match &self.goal.step {
            GoalStep::New { feature_summary } => {
                if is_blank(feature_summary) {
                    missing.push("goal.featureSummary".to_string());
                }
            }
            GoalStep::Refactoring {
                current_state,
                desired_state,
            } => {
                if is_blank(current_state) {
                    missing.push("goal.currentState".to_string());
                }
                if is_blank(desired_state) {
                    missing.push("goal.desiredState".to_string());
                }
            }
        }

        missing
    }

    /// Presence-check the form and drop empty repeatable rows.
    ///
    /// Blank considerations and integrations without a name are removed;
    /// any blank required field fails the whole request.
    pub fn collect(mut self) -> Result<Self> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(AdvisorError::InvalidRequest(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        self.goal.considerations.retain(|c| !is_blank(c));
        self.external_integrations.retain(|e| !is_blank(&e.name));

        Ok(self)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn refactoring_request() -> AnalysisRequest {
        serde_json::from_value(json!({
            "environment": {
                "framework": "spring-boot",
                "version": "2.7.x",
                "language": "java",
                "runtime": "11",
                "architecture": "monolithic",
                "cloud": "aws-ec2",
                "databases": [{ "database": "mysql", "version": "8.0" }]
            },
            "goal": {
                "stepType": "refactoring",
                "currentState": "SMS is sent synchronously",
                "desiredState": "SMS is sent asynchronously",
                "considerations": ["matching must succeed when SMS fails", "  "]
            },
            "externalIntegrations": [
                {
                    "name": "sms_provider",
                    "criticality": "non-critical",
                    "callType": "sync",
                    "description": "SMS gateway"
                },
                {
                    "name": "",
                    "criticality": "critical",
                    "callType": "async",
                    "description": ""
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_goal_is_tagged_union() {
        let request = refactoring_request();
        assert!(matches!(request.goal.step, GoalStep::Refactoring { .. }));

        let goal: Goal = serde_json::from_value(json!({
            "stepType": "new",
            "featureSummary": "Add SMS retry",
            "considerations": []
        }))
        .unwrap();
        assert_eq!(
            goal.step,
            GoalStep::New {
                feature_summary: "Add SMS retry".to_string()
            }
        );
    }

    #[test]
    fn test_goal_serializes_only_variant_fields() {
        let goal = Goal {
            step: GoalStep::New {
                feature_summary: "Add SMS retry".to_string(),
            },
            considerations: vec![],
        };
        let value = serde_json::to_value(&goal).unwrap();
        assert_eq!(value["stepType"], "new");
        assert_eq!(value["featureSummary"], "Add SMS retry");
        assert!(value.get("currentState").is_none());
        assert!(value.get("desiredState").is_none());
    }

    #[test]
    fn test_unknown_step_type_rejected() {
        let result: std::result::Result<Goal, _> = serde_json::from_value(json!({
            "stepType": "rewrite",
            "considerations": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_api_description_alias() {
        let integration: ExternalIntegration = serde_json::from_value(json!({
            "name": "recommendation_api",
            "criticality": "critical",
            "callType": "async",
            "apiDescription": "recommendations"
        }))
        .unwrap();
        assert_eq!(integration.description, "recommendations");
        assert_eq!(integration.criticality, Criticality::Critical);
        assert_eq!(integration.call_type, CallType::Async);
    }

    #[test]
    fn test_collect_filters_empty_rows() {
        let request = refactoring_request().collect().unwrap();
        assert_eq!(request.goal.considerations.len(), 1);
        assert_eq!(request.external_integrations.len(), 1);
        assert_eq!(request.external_integrations[0].name, "sms_provider");
    }

    #[test]
    fn test_collect_reports_missing_fields() {
        let mut request = refactoring_request();
        request.environment.framework = " ".to_string();
        request.goal.step = GoalStep::Refactoring {
            current_state: "as-is".to_string(),
            desired_state: String::new(),
        };

        let err = request.collect().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("environment.framework"));
        assert!(message.contains("goal.desiredState"));
        assert!(!message.contains("goal.currentState"));
    }
}
