//! In-memory evaluation dataset
//!
//! The store is loaded once, validated, and never mutated afterwards. Clones
//! share the same backing slice.

use crate::dashboard::presentation::KNOWN_CATEGORIES;
use crate::error::{Result, ToolEvalError};
use crate::types::{EvaluationRecord, RecordId};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

const MAX_SCORE: f64 = 5.0;

/// Immutable, ordered collection of evaluation records
#[derive(Debug, Clone)]
pub struct DataStore {
    records: Arc<[EvaluationRecord]>,
}

impl DataStore {
    /// Build a store, rejecting records that break dataset invariants
    pub fn from_records(records: Vec<EvaluationRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());

        for record in &records {
            validate_record(record)?;

            if !seen.insert(&record.id) {
                return Err(invalid(record, "duplicate id"));
            }

            for category in &record.category {
                if !KNOWN_CATEGORIES.contains(&category.as_str()) {
                    debug!(
                        "Record {} uses category outside the filter list: {}",
                        record.id, category
                    );
                }
            }
        }

        Ok(Self {
            records: records.into(),
        })
    }

    /// Parse a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<EvaluationRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Load a JSON dataset from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ToolEvalError::Dataset(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let store = Self::from_json_str(&contents)?;
        info!(
            "Loaded {} evaluations from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn records(&self) -> &[EvaluationRecord] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&EvaluationRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct categories in order of first appearance
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .flat_map(|record| record.category.iter())
            .filter(|category| seen.insert(category.as_str()))
            .map(String::as_str)
            .collect()
    }
}

fn validate_record(record: &EvaluationRecord) -> Result<()> {
    if record.category.is_empty() {
        return Err(invalid(record, "category must not be empty"));
    }

    if let Some(score) = record.overall_score {
        if !score_in_range(score) {
            return Err(invalid(
                record,
                &format!("overall score {} outside [0, 5]", score),
            ));
        }
    }

    if let Some(scores) = &record.detailed_scores {
        if let Some((criterion, score)) = scores.iter().find(|(_, score)| !score_in_range(*score)) {
            return Err(invalid(
                record,
                &format!("score for '{}' ({}) outside [0, 5]", criterion, score),
            ));
        }
    }

    Ok(())
}

fn score_in_range(score: f64) -> bool {
    (0.0..=MAX_SCORE).contains(&score)
}

fn invalid(record: &EvaluationRecord, reason: &str) -> ToolEvalError {
    ToolEvalError::InvalidRecord {
        id: record.id.to_string(),
        reason: reason.to_string(),
    }
}
