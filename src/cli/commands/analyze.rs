//! Analyze Command
//!
//! Collects a request form and obtains architecture options, either from a
//! running endpoint (`--endpoint`) or by calling the provider directly.

use std::path::PathBuf;
use std::time::Duration;

use crate::analysis::AnalysisService;
use crate::cli::ui::Output;
use crate::cli::util::{load_request, write_output};
use crate::client::AnalysisClient;
use crate::config::Config;
use crate::types::Result;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Request JSON (`-` for stdin)
    pub input: PathBuf,
    /// Server root of a running endpoint
    pub endpoint: Option<String>,
    /// Where to write the result JSON (stdout when absent)
    pub output: Option<PathBuf>,
}

pub async fn run(config: &Config, options: AnalyzeOptions) -> Result<()> {
    let out = Output::new();
    let request = load_request(&options.input)?;

    let outcome = match &options.endpoint {
        Some(endpoint) => {
            out.info(&format!("Requesting analysis from {}", endpoint));
            let timeout = config.llm.timeout_secs.map(Duration::from_secs);
            AnalysisClient::new(endpoint, timeout)?
                .analyze(&request)
                .await
        }
        None => {
            out.info(&format!("Requesting analysis from {}", config.llm.model));
            AnalysisService::from_config(&config.llm)?
                .analyze(&request)
                .await
        }
    };

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            out.failure("분석 요청 중 오류가 발생했습니다", &e);
            return Err(e);
        }
    };

    write_output(
        options.output.as_deref(),
        &serde_json::to_string_pretty(&result)?,
    )?;

    out.success(&format!("{}개 옵션 분석 완료", result.options.len()));
    for warning in &result.meta.warnings {
        out.warning(warning);
    }
    if let Some(path) = &options.output {
        out.info(&format!("Saved to {}", path.display()));
    }

    Ok(())
}
