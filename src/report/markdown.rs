//! Markdown template for [`AdrDocument`]

use std::fmt::Write;

use super::AdrDocument;
use crate::constants::report::MISSING_SCORE;

/// Table cells cannot hold pipes or line breaks
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}

fn numbered(out: &mut String, items: &[String]) {
    for (idx, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", idx + 1, item);
    }
}

pub(super) fn render(doc: &AdrDocument) -> String {
    let draft = &doc.draft;
    let meta = &doc.meta;
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", draft.title);
    let _ = writeln!(out, "**상태:** {}", meta.status.label());
    let _ = writeln!(out, "**결정일:** {}", meta.date.format("%Y-%m-%d"));
    let _ = writeln!(out, "**책임자:** {}\n", meta.owner);

    let _ = writeln!(out, "## 문맥\n");
    let _ = writeln!(out, "{}\n", draft.context);
    if !draft.context_points.is_empty() {
        bullets(&mut out, &draft.context_points);
        out.push('\n');
    }

    let _ = writeln!(out, "## 고려한 옵션\n");
    out.push_str("| 옵션 | 적합도 | 예상 효과 | 부작용 |\n");
    out.push_str("|------|--------|-----------|--------|\n");
    for row in &draft.options {
        let score = row
            .score
            .map(|s| s.to_string())
            .unwrap_or_else(|| MISSING_SCORE.to_string());
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} |",
            cell(&row.label),
            score,
            cell(&row.expected_effect),
            cell(&row.side_effect)
        );
    }
    out.push('\n');

    let _ = writeln!(out, "## 선택\n");
    let _ = writeln!(out, "**{}**\n", draft.decision.option);
    let _ = writeln!(out, "{}", draft.decision.rationale);
    numbered(&mut out, &draft.decision.reasons);
    out.push('\n');

    let _ = writeln!(out, "## 트레이드오프\n");
    out.push_str("**장점:**\n");
    bullets(&mut out, &draft.pros);
    out.push_str("\n**단점:**\n");
    bullets(&mut out, &draft.cons);
    out.push('\n');

    let _ = writeln!(out, "## 마이그레이션 계획\n");
    out.push_str("**단계:**\n");
    numbered(&mut out, &draft.steps);
    if !draft.rollback.is_empty() {
        out.push_str("\n**롤백 시나리오:**\n");
        bullets(&mut out, &draft.rollback);
    }
    out.push('\n');

    let _ = writeln!(out, "## 근거 (출처)\n");
    for reference in &draft.references {
        let _ = write!(out, "- [{}]({})", reference.title, reference.url);
        if let Some(date) = &reference.date {
            let _ = write!(out, " ({})", date);
        }
        out.push('\n');
    }

    out
}
