//! Results View
//!
//! Holds one validated [`AnalysisResult`] plus the user's interaction state:
//! which option's detail is open and which options are selected for the report.

use serde::{Deserialize, Serialize};

use crate::types::{AdvisorError, AnalysisResult, ArchitectureOption, Result};

// =============================================================================
// Selection
// =============================================================================

/// Option ids selected for the report, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSelection {
    ids: Vec<String>,
}

impl OptionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

// =============================================================================
// View State
// =============================================================================

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow<'a> {
    pub name: &'a str,
    pub expected_effect: &'a str,
    pub side_effect: &'a str,
    pub evidence_count: u8,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct ResultsView {
    result: AnalysisResult,
    selection: OptionSelection,
    open_detail: Option<String>,
}

impl ResultsView {
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            result,
            selection: OptionSelection::new(),
            open_detail: None,
        }
    }

    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    pub fn selection(&self) -> &OptionSelection {
        &self.selection
    }

    /// Toggle an option in or out of the report selection
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        if self.result.option(id).is_none() {
            return Err(AdvisorError::NotFound(id.to_string()));
        }
        Ok(self.selection.toggle(id))
    }

    /// Open the detail view for `id`.
    ///
    /// Returns `false` when `id` is unknown; the detail then shows the
    /// first option.
    pub fn open_detail(&mut self, id: &str) -> bool {
        self.open_detail = Some(id.to_string());
        self.result.option(id).is_some()
    }

    pub fn close_detail(&mut self) {
        self.open_detail = None;
    }

    pub fn is_detail_open(&self) -> bool {
        self.open_detail.is_some()
    }

    /// Option shown in the detail view, if open
    pub fn detail(&self) -> Option<&ArchitectureOption> {
        let id = self.open_detail.as_deref()?;
        self.result
            .option(id)
            .or_else(|| self.result.options.first())
    }

    pub fn comparison_rows(&self) -> Vec<ComparisonRow<'_>> {
        self.result
            .options
            .iter()
            .map(|o| ComparisonRow {
                name: &o.name,
                expected_effect: &o.expected_effect,
                side_effect: &o.side_effect,
                evidence_count: o.evidence_count,
                selected: self.selection.contains(&o.id),
            })
            .collect()
    }

    /// Selected options in selection order
    pub fn selected_options(&self) -> Vec<&ArchitectureOption> {
        self.selection
            .ids()
            .iter()
            .filter_map(|id| self.result.option(id))
            .collect()
    }
}
