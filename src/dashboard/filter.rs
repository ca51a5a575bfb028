//! Search, category and status filtering over evaluation records

use crate::error::Result;
use crate::types::{EvaluationRecord, EvaluationStatus};
use std::cmp::Reverse;
use std::str::FromStr;

/// Status predicate of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Matches every record
    #[default]
    All,

    /// Matches records with exactly this status
    Only(EvaluationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: EvaluationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::error::ToolEvalError;

    /// `""` and `"All"` select everything, anything else must name a status
    ///
    /// Command-line input is matched case-insensitively; the predicate built
    /// from it is still exact equality on the status.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse().map(StatusFilter::Only)
    }
}

/// Filter criteria; all three predicates must hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    /// Case-insensitive substring of tool name, key findings or evaluator
    pub search_term: String,

    /// Selected categories in selection order; empty selects everything
    categories: Vec<String>,

    pub status: StatusFilter,
}

impl FilterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Add the category when absent, remove it when present
    pub fn toggle_category(&mut self, category: &str) {
        match self.categories.iter().position(|c| c == category) {
            Some(index) => {
                self.categories.remove(index);
            }
            None => self.categories.push(category.to_string()),
        }
    }

    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    fn matches(&self, record: &EvaluationRecord, needle: &str) -> bool {
        self.matches_search(record, needle)
            && self.matches_categories(record)
            && self.status.matches(record.status)
    }

    fn matches_search(&self, record: &EvaluationRecord, needle: &str) -> bool {
        needle.is_empty()
            || [&record.tool_name, &record.key_findings, &record.evaluator]
                .iter()
                .any(|field| field.to_lowercase().contains(needle))
    }

    fn matches_categories(&self, record: &EvaluationRecord) -> bool {
        self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|selected| record.has_category(selected))
    }
}

/// Records matching `query`, most recently evaluated first
///
/// Records whose evaluation date is missing or unparsable sort last; ties
/// keep dataset order.
pub fn filter<'a>(records: &'a [EvaluationRecord], query: &FilterQuery) -> Vec<&'a EvaluationRecord> {
    let needle = query.search_term.to_lowercase();

    let mut matched: Vec<&EvaluationRecord> = records
        .iter()
        .filter(|record| query.matches(record, &needle))
        .collect();

    matched.sort_by_cached_key(|record| Reverse(record.evaluated_on()));
    matched
}
