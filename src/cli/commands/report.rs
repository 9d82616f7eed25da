//! Report Command
//!
//! Builds an ADR Markdown document from a saved result and a selection.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::cli::ui::Output;
use crate::cli::util::load_result;
use crate::config::Config;
use crate::report::{AdrDocument, AdrStatus, ReportMeta, ReportSourceKind};
use crate::results::ResultsView;
use crate::types::{AnalysisResult, Result};

#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub input: PathBuf,
    /// Option ids to select, in order
    pub select: Vec<String>,
    pub status: Option<AdrStatus>,
    pub date: Option<NaiveDate>,
    pub owner: Option<String>,
    pub source: Option<ReportSourceKind>,
    /// Directory to save `ADR-<stem>.md` into (stdout when absent)
    pub output: Option<PathBuf>,
}

/// Apply the selection and header fields, falling back to configured defaults
pub fn build_document(
    config: &Config,
    options: &ReportOptions,
    result: AnalysisResult,
) -> Result<AdrDocument> {
    let mut view = ResultsView::new(result);
    for id in &options.select {
        if !view.selection().contains(id) {
            view.toggle(id)?;
        }
    }

    let meta = ReportMeta {
        status: options.status.unwrap_or(config.report.status),
        date: options.date.unwrap_or_else(|| Local::now().date_naive()),
        owner: options
            .owner
            .clone()
            .unwrap_or_else(|| config.report.owner.clone()),
    };
    let source = options.source.unwrap_or(config.report.source).source();

    AdrDocument::from_source(source.as_ref(), &view, meta)
}

pub fn run(config: &Config, options: ReportOptions) -> Result<()> {
    let out = Output::new();
    let result = load_result(&options.input)?;

    let document = match build_document(config, &options, result) {
        Ok(document) => document,
        Err(e) => {
            out.failure("ADR 생성 중 오류가 발생했습니다", &e);
            return Err(e);
        }
    };

    match &options.output {
        Some(dir) => {
            let path = document.save(dir)?;
            out.success(&format!(
                "Markdown 파일이 다운로드되었습니다: {}",
                path.display()
            ));
        }
        None => {
            print!("{}", document.render_markdown());
            out.success("Markdown이 복사되었습니다");
        }
    }

    Ok(())
}
