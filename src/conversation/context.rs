//! Dataset projection sent to the assistant

use crate::error::Result;
use crate::store::DataStore;
use crate::types::{EvaluationRecord, EvaluationStatus, ExampleOutput};
use serde::Serialize;

/// Reduced view of a record; ids, dates and detailed scores are left out
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordContext<'a> {
    pub tool_name: &'a str,
    pub category: &'a [String],
    pub status: EvaluationStatus,
    pub evaluator: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    pub cost: &'a str,
    pub key_findings: &'a str,
    pub recommendation: &'a str,
    pub pros: &'a [String],
    pub cons: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_cases: Option<&'a [String]>,
    pub business_impact: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_output: Option<&'a ExampleOutput>,
}

impl<'a> From<&'a EvaluationRecord> for RecordContext<'a> {
    fn from(record: &'a EvaluationRecord) -> Self {
        Self {
            tool_name: &record.tool_name,
            category: &record.category,
            status: record.status,
            evaluator: &record.evaluator,
            overall_score: record.overall_score,
            cost: &record.cost,
            key_findings: &record.key_findings,
            recommendation: &record.recommendation,
            pros: &record.pros,
            cons: &record.cons,
            use_cases: record.use_cases.as_deref(),
            business_impact: &record.business_impact,
            example_output: record.example_output.as_ref(),
        }
    }
}

/// Pretty-printed JSON of every record's projection, in dataset order
pub fn build_context(store: &DataStore) -> Result<String> {
    let projection: Vec<RecordContext<'_>> =
        store.records().iter().map(RecordContext::from).collect();
    Ok(serde_json::to_string_pretty(&projection)?)
}
