//! Core data types for the tool evaluation tracker
//!
//! This module defines the fundamental data structures used throughout tooleval:
//! evaluation records, their closed status enumeration, the heterogeneous
//! example-output field, and chat messages exchanged with the assistant.

use chrono::{DateTime, NaiveDate};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ToolEvalError;

/// Unique identifier for evaluation records
///
/// Datasets use either numeric or string ids, so both are accepted and kept
/// as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawRecordId")]
pub struct RecordId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Number(u64),
    Text(String),
}

impl From<RawRecordId> for RecordId {
    fn from(raw: RawRecordId) -> Self {
        match raw {
            RawRecordId::Number(n) => Self(n.to_string()),
            RawRecordId::Text(s) => Self(s),
        }
    }
}

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Evaluation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationStatus {
    #[serde(rename = "Not Started")]
    NotStarted,

    #[serde(rename = "In Progress")]
    InProgress,

    Piloting,

    Approved,

    Rejected,

    #[serde(rename = "Under Review")]
    UnderReview,
}

impl EvaluationStatus {
    /// Every status, in display order
    pub const ALL: [EvaluationStatus; 6] = [
        EvaluationStatus::NotStarted,
        EvaluationStatus::InProgress,
        EvaluationStatus::Piloting,
        EvaluationStatus::Approved,
        EvaluationStatus::Rejected,
        EvaluationStatus::UnderReview,
    ];

    /// Display text, identical to the dataset encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::NotStarted => "Not Started",
            EvaluationStatus::InProgress => "In Progress",
            EvaluationStatus::Piloting => "Piloting",
            EvaluationStatus::Approved => "Approved",
            EvaluationStatus::Rejected => "Rejected",
            EvaluationStatus::UnderReview => "Under Review",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses user-typed status text, ignoring ASCII case and surrounding
/// whitespace. Dataset deserialization stays exact.
impl FromStr for EvaluationStatus {
    type Err = ToolEvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EvaluationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ToolEvalError::InvalidStatus(s.to_string()))
    }
}

/// Per-criterion scores, kept in the order the dataset lists them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailedScores(Vec<(String, f64)>);

impl DetailedScores {
    pub fn new(scores: Vec<(String, f64)>) -> Self {
        Self(scores)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for DetailedScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, score) in &self.0 {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DetailedScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedScores;

        impl<'de> Visitor<'de> for OrderedScores {
            type Value = DetailedScores;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of criterion names to scores")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, score)) = access.next_entry::<String, f64>()? {
                    scores.push((name, score));
                }
                Ok(DetailedScores(scores))
            }
        }

        deserializer.deserialize_map(OrderedScores)
    }
}

/// Raw "example output" field
///
/// Datasets store either a list of URLs or a free-form string; absence is
/// modelled by wrapping this in `Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExampleOutput {
    Links(Vec<String>),
    Text(String),
}

/// One tool's evaluation entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub id: RecordId,
    pub tool_name: String,

    /// Category names, in display order
    pub category: Vec<String>,

    pub status: EvaluationStatus,
    pub evaluator: String,

    /// Source text of the evaluation date; see [`EvaluationRecord::evaluated_on`]
    #[serde(default)]
    pub evaluation_date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_date: Option<String>,

    #[serde(default)]
    pub cost: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_scores: Option<DetailedScores>,

    #[serde(default)]
    pub key_findings: String,

    #[serde(default)]
    pub recommendation: String,

    #[serde(default)]
    pub business_impact: String,

    #[serde(default)]
    pub pros: Vec<String>,

    #[serde(default)]
    pub cons: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cases: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_output: Option<ExampleOutput>,
}

impl EvaluationRecord {
    /// Parsed evaluation date, `None` when missing or unparsable
    pub fn evaluated_on(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.evaluation_date)
    }

    /// Parsed next review date, `None` when missing or unparsable
    pub fn next_review_on(&self) -> Option<NaiveDate> {
        self.next_review_date.as_deref().and_then(parse_calendar_date)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category.iter().any(|c| c == category)
    }
}

/// Parse the date formats that appear in evaluation datasets
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.date_naive());
    }

    ["%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single immutable entry of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": 3,
            "toolName": "Clueso",
            "category": ["AI Video Editing", "AI Productivity"],
            "status": "Under Review",
            "evaluator": "Dana",
            "evaluationDate": "2025-01-15",
            "cost": "$120/mo",
            "overallScore": 4.2,
            "detailedScores": {"Ease of Use": 4.5, "Accuracy": 3.0, "Value": 4.0},
            "keyFindings": "Fast turnaround",
            "recommendation": "Pilot",
            "businessImpact": "Saves editing time",
            "pros": ["Fast"],
            "cons": ["Pricey"],
            "exampleOutput": ["https://example.com/a"]
        }"#
    }

    #[test]
    fn test_record_deserialization() {
        let record: EvaluationRecord = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(record.id, RecordId::new("3"));
        assert_eq!(record.status, EvaluationStatus::UnderReview);
        assert_eq!(record.category.len(), 2);
        assert_eq!(record.overall_score, Some(4.2));
        assert_eq!(record.use_cases, None);
        assert_eq!(record.next_review_date, None);
        assert_eq!(
            record.example_output,
            Some(ExampleOutput::Links(vec!["https://example.com/a".to_string()]))
        );
    }

    #[test]
    fn test_detailed_scores_preserve_order() {
        let record: EvaluationRecord = serde_json::from_str(sample_json()).unwrap();
        let names: Vec<&str> = record
            .detailed_scores
            .as_ref()
            .unwrap()
            .iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["Ease of Use", "Accuracy", "Value"]);

        let json = serde_json::to_string(&record.detailed_scores).unwrap();
        assert_eq!(json, r#"{"Ease of Use":4.5,"Accuracy":3.0,"Value":4.0}"#);
    }

    #[test]
    fn test_example_output_shapes() {
        let text: ExampleOutput = serde_json::from_str(r#""N/A""#).unwrap();
        assert_eq!(text, ExampleOutput::Text("N/A".to_string()));

        let absent: Option<ExampleOutput> = serde_json::from_str("null").unwrap();
        assert_eq!(absent, None);
    }

    #[test]
    fn test_record_id_accepts_strings() {
        let id: RecordId = serde_json::from_str(r#""tool-9""#).unwrap();
        assert_eq!(id.as_str(), "tool-9");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""tool-9""#);
    }

    #[test]
    fn test_status_round_trips_display_text() {
        for status in EvaluationStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(status.as_str().parse::<EvaluationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!(
            "in progress".parse::<EvaluationStatus>().unwrap(),
            EvaluationStatus::InProgress
        );
        assert!(matches!(
            "Shelved".parse::<EvaluationStatus>(),
            Err(ToolEvalError::InvalidStatus(_))
        ));
        assert!(serde_json::from_str::<EvaluationStatus>(r#""Shelved""#).is_err());
        assert!(serde_json::from_str::<EvaluationStatus>(r#""in progress""#).is_err());
    }

    #[test]
    fn test_calendar_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_calendar_date("2024-03-09"), Some(expected));
        assert_eq!(parse_calendar_date("2024-03-09T10:00:00Z"), Some(expected));
        assert_eq!(parse_calendar_date("03/09/2024"), Some(expected));
        assert_eq!(parse_calendar_date("March 9, 2024"), Some(expected));
        assert_eq!(parse_calendar_date("soon"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn test_chat_message_wire_format() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
