//! CLI Common Utilities
//!
//! Shared input/output handling for command handlers.

use std::io::Read;
use std::path::Path;

use crate::ai::ResultPipeline;
use crate::types::{AdvisorError, AnalysisRequest, AnalysisResult, Result};

/// Path argument meaning standard input/output
pub const STDIO_PATH: &str = "-";

/// Read a file, or stdin when `path` is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIO_PATH {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|e| {
        AdvisorError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Parse and collect a request form
pub fn load_request(path: &Path) -> Result<AnalysisRequest> {
    let content = read_input(path)?;
    let request: AnalysisRequest = serde_json::from_str(&content)
        .map_err(|e| AdvisorError::InvalidRequest(format!("{}: {}", path.display(), e)))?;
    request.collect()
}

/// Load a saved result. Raw completion text is accepted as well.
pub fn load_result(path: &Path) -> Result<AnalysisResult> {
    let content = read_input(path)?;
    ResultPipeline::new()?.process(&content)
}

/// Write to a file, or stdout when `path` is absent or `-`
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(p) if p.as_os_str() != STDIO_PATH => {
            if let Some(parent) = p.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(p, content)?;
        }
        _ => println!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::result::fixtures;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_request_collects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            json!({
                "environment": {
                    "framework": "spring-boot", "version": "2.7.x", "language": "java",
                    "runtime": "11", "architecture": "monolithic", "cloud": "aws-ec2",
                    "databases": []
                },
                "goal": { "stepType": "new", "featureSummary": "Add SMS retry", "considerations": ["", "p95"] },
                "externalIntegrations": []
            })
            .to_string(),
        )
        .unwrap();

        let request = load_request(&path).unwrap();
        assert_eq!(request.goal.considerations, vec!["p95".to_string()]);
    }

    #[test]
    fn test_load_request_missing_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(
            &path,
            json!({
                "environment": {
                    "framework": "", "version": "2.7.x", "language": "java",
                    "runtime": "11", "architecture": "modular", "cloud": "aws"
                },
                "goal": { "stepType": "new", "featureSummary": "x" }
            })
            .to_string(),
        )
        .unwrap();

        let err = load_request(&path).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidRequest(ref m) if m.contains("environment.framework")));
    }

    #[test]
    fn test_load_result_accepts_prose() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("result.txt");
        let expected = fixtures::result();
        std::fs::write(
            &path,
            format!("result:\n{}\n", serde_json::to_string_pretty(&expected).unwrap()),
        )
        .unwrap();

        assert_eq!(load_result(&path).unwrap(), expected);
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out.json");
        write_output(Some(&path), "{}").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}");
    }
}
