//! Display metadata for statuses, scores and categories

use crate::types::EvaluationStatus;

/// Categories offered by the filter list
///
/// Records may use categories outside this list.
pub const KNOWN_CATEGORIES: [&str; 7] = [
    "AI Video Generation",
    "AI Video Editing",
    "AI Avatars",
    "AI Image Generation",
    "AI Audio Generation",
    "AI Development Tools",
    "AI Productivity",
];

/// Colour family used to render a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Positive,
    Active,
    Negative,
    Neutral,
    Caution,
}

/// How a status is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub icon: &'static str,
    pub tone: Tone,
}

impl StatusStyle {
    pub fn for_status(status: EvaluationStatus) -> Self {
        let (icon, tone) = match status {
            EvaluationStatus::Approved => ("✔", Tone::Positive),
            EvaluationStatus::Piloting => ("◷", Tone::Active),
            EvaluationStatus::InProgress => ("◷", Tone::Active),
            EvaluationStatus::Rejected => ("✖", Tone::Negative),
            EvaluationStatus::NotStarted => ("○", Tone::Neutral),
            EvaluationStatus::UnderReview => ("◎", Tone::Caution),
        };

        Self {
            label: status.as_str(),
            icon,
            tone,
        }
    }
}

/// Bucket for a score on the 0-5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            ScoreBand::High
        } else if score >= 3.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

/// Shorten to `max` characters, appending `...` when cut
pub fn truncate_label(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
