//! Record built from the selected options
//!
//! The first selected option is the decision. The table lists every option
//! in the result; references are the evidence of all selected options.

use std::collections::HashSet;

use super::{AdrDraft, Decision, OptionRow, Reference, ReportSource};
use crate::results::ResultsView;
use crate::types::{AdvisorError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSource;

/// A, B, C, ... by position in the result
fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

impl ReportSource for SelectionSource {
    fn draft(&self, view: &ResultsView) -> Result<AdrDraft> {
        let result = view.result();
        let selected = view.selected_options();
        let decided = *selected.first().ok_or(AdvisorError::EmptySelection)?;

        let letter = result
            .options
            .iter()
            .position(|o| o.id == decided.id)
            .map(option_letter)
            .unwrap_or('A');

        let options = result
            .options
            .iter()
            .enumerate()
            .map(|(idx, o)| OptionRow {
                label: format!("{} - {}", option_letter(idx), o.name),
                score: None,
                expected_effect: o.expected_effect.clone(),
                side_effect: o.side_effect.clone(),
            })
            .collect();

        let mut seen = HashSet::new();
        let references = selected
            .iter()
            .flat_map(|o| o.evidence.iter())
            .filter(|e| seen.insert(e.url.clone()))
            .map(|e| Reference {
                title: e.title.clone(),
                url: e.url.clone(),
                date: None,
            })
            .collect();

        Ok(AdrDraft {
            file_stem: decided.id.clone(),
            title: format!("ADR: {}", decided.name),
            context: result.meta.input_summary.clone(),
            context_points: decided.conditions.clone(),
            options,
            decision: Decision {
                option: format!("옵션 {} - {}", letter, decided.name),
                rationale: format!("{} 선택 이유:", decided.name),
                reasons: decided.benefits.clone(),
            },
            pros: decided.benefits.clone(),
            cons: decided.side_effects.clone(),
            steps: decided.steps.clone(),
            rollback: Vec::new(),
            references,
        })
    }
}
