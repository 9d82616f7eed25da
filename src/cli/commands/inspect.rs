//! Inspect Command
//!
//! Shows the comparison table of a saved result, or the detail view of one
//! option with its steps and evidence.

use std::fmt::Write;
use std::path::PathBuf;

use crate::cli::ui::Output;
use crate::cli::util::load_result;
use crate::results::ResultsView;
use crate::types::{ArchitectureOption, Result};

#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    pub input: PathBuf,
    /// Option id for the detail view
    pub option: Option<String>,
    /// Print only the steps, newline-joined
    pub steps: bool,
    /// Directory to export the option as `<id>.json`
    pub export: Option<PathBuf>,
}

/// Comparison table: name, expected effect, side effect, evidence count
pub fn render_comparison(view: &ResultsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "옵션명 | 예상 효과 요약 | 부작용 요약 | 근거 수");
    for (idx, row) in view.comparison_rows().iter().enumerate() {
        let id = &view.result().options[idx].id;
        let _ = writeln!(
            out,
            "{} ({}) | {} | {} | {}",
            row.name, id, row.expected_effect, row.side_effect, row.evidence_count
        );
    }
    out
}

fn list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "\n{}", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

/// Detail view of one option
pub fn render_detail(option: &ArchitectureOption) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", option.name, option.id);
    let _ = writeln!(out, "{}", option.tags.join(" "));
    let _ = writeln!(out, "\n핵심 아이디어\n  {}", option.summary);
    list(&mut out, "기대 효과", &option.benefits);
    list(&mut out, "SIDE EFFECT", &option.side_effects);
    list(&mut out, "적용 조건/가정", &option.conditions);

    let _ = writeln!(out, "\n적용 단계");
    for (idx, step) in option.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", idx + 1, step);
    }

    let _ = writeln!(out, "\n근거 ({})", option.evidence_count);
    for evidence in &option.evidence {
        let _ = writeln!(out, "  - {} <{}>", evidence.title, evidence.url);
        let _ = writeln!(out, "    {}", evidence.summary);
    }
    out
}

pub fn run(options: InspectOptions) -> Result<()> {
    let out = Output::new();
    let mut view = ResultsView::new(load_result(&options.input)?);

    let Some(id) = options.option.as_deref() else {
        out.header("옵션 비교");
        print!("{}", render_comparison(&view));
        for warning in &view.result().meta.warnings {
            out.warning(warning);
        }
        return Ok(());
    };

    if !view.open_detail(id) {
        out.warning(&format!("Option '{}' not found, showing the first option", id));
    }
    let Some(option) = view.detail() else {
        out.warning("Result has no options");
        return Ok(());
    };

    if options.steps {
        println!("{}", option.steps.join("\n"));
        out.success("적용 단계가 복사되었습니다");
        return Ok(());
    }

    if let Some(dir) = &options.export {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.json", option.id));
        std::fs::write(&path, serde_json::to_string_pretty(option)?)?;
        out.success(&format!("JSON 파일이 다운로드되었습니다: {}", path.display()));
        return Ok(());
    }

    print!("{}", render_detail(option));
    Ok(())
}
