//! ADR Report Assembly
//!
//! Turns the current results view into an Architecture Decision Record:
//! a fixed Markdown template filled from a [`ReportSource`] plus the
//! editable status, date and owner fields.
//!
//! Two sources exist:
//! - [`FixtureSource`]: the canned matching/SMS narrative
//! - [`SelectionSource`]: the options the user actually selected

mod fixture;
mod markdown;
mod selection;

pub use fixture::FixtureSource;
pub use selection::SelectionSource;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use crate::constants::report::{DEFAULT_OWNER, FILE_PREFIX};
use crate::results::ResultsView;
use crate::types::{AdvisorError, Result};

// =============================================================================
// Metadata
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdrStatus {
    #[default]
    Proposed,
    Approved,
    Deprecated,
}

impl AdrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Approved => "approved",
            Self::Deprecated => "deprecated",
        }
    }

    /// Label printed in the document
    pub fn label(&self) -> &'static str {
        match self {
            Self::Proposed => "제안",
            Self::Approved => "승인",
            Self::Deprecated => "폐기",
        }
    }
}

impl fmt::Display for AdrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdrStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proposed" => Ok(Self::Proposed),
            "approved" => Ok(Self::Approved),
            "deprecated" => Ok(Self::Deprecated),
            _ => Err(format!(
                "Invalid status '{}'. Valid values: proposed, approved, deprecated",
                s
            )),
        }
    }
}

/// Editable header fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMeta {
    pub status: AdrStatus,
    pub date: NaiveDate,
    pub owner: String,
}

impl ReportMeta {
    /// Dated today in local time
    pub fn today(status: AdrStatus, owner: impl Into<String>) -> Self {
        Self {
            status,
            date: Local::now().date_naive(),
            owner: owner.into(),
        }
    }
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self::today(AdrStatus::default(), DEFAULT_OWNER)
    }
}

// =============================================================================
// Draft Content
// =============================================================================

/// One row of the "options considered" table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub label: String,
    /// Fit score, when the source has one
    pub score: Option<u8>,
    pub expected_effect: String,
    pub side_effect: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub option: String,
    pub rationale: String,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub title: String,
    pub url: String,
    pub date: Option<String>,
}

/// Source-provided body of the record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdrDraft {
    /// File name without prefix and extension
    pub file_stem: String,
    pub title: String,
    pub context: String,
    pub context_points: Vec<String>,
    pub options: Vec<OptionRow>,
    pub decision: Decision,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub steps: Vec<String>,
    pub rollback: Vec<String>,
    pub references: Vec<Reference>,
}

/// Where report narrative comes from
pub trait ReportSource {
    fn draft(&self, view: &ResultsView) -> Result<AdrDraft>;
}

/// Configurable choice of [`ReportSource`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSourceKind {
    #[default]
    Fixture,
    Selection,
}

impl ReportSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixture => "fixture",
            Self::Selection => "selection",
        }
    }

    pub fn source(&self) -> Box<dyn ReportSource> {
        match self {
            Self::Fixture => Box::new(FixtureSource),
            Self::Selection => Box::new(SelectionSource),
        }
    }
}

impl FromStr for ReportSourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixture" => Ok(Self::Fixture),
            "selection" => Ok(Self::Selection),
            _ => Err(format!(
                "Invalid report source '{}'. Valid values: fixture, selection",
                s
            )),
        }
    }
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdrDocument {
    pub meta: ReportMeta,
    pub draft: AdrDraft,
}

impl AdrDocument {
    /// Assemble a record. Refused when nothing is selected.
    pub fn from_source(
        source: &dyn ReportSource,
        view: &ResultsView,
        meta: ReportMeta,
    ) -> Result<Self> {
        if view.selection().is_empty() {
            return Err(AdvisorError::EmptySelection);
        }
        Ok(Self {
            meta,
            draft: source.draft(view)?,
        })
    }

    pub fn render_markdown(&self) -> String {
        markdown::render(self)
    }

    pub fn file_name(&self) -> String {
        format!("{}{}.md", FILE_PREFIX, self.draft.file_stem)
    }

    /// Write the Markdown into `dir`, creating it if needed
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render_markdown())?;
        info!("Wrote ADR to {}", path.display());
        Ok(path)
    }
}
