//! Summary counts over the whole dataset

use crate::types::{EvaluationRecord, EvaluationStatus};
use serde::Serialize;

/// Dashboard summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationStats {
    pub total: usize,
    pub approved: usize,
    pub piloting: usize,
    pub under_review: usize,
    pub rejected: usize,
    pub in_progress: usize,
    pub not_started: usize,

    /// Approved plus piloting as a percentage of the total, one decimal place
    pub approval_rate: String,
}

/// Count records by status and compute the approval rate
pub fn aggregate(records: &[EvaluationRecord]) -> EvaluationStats {
    let mut stats = EvaluationStats {
        total: records.len(),
        ..EvaluationStats::default()
    };

    for record in records {
        let counter = match record.status {
            EvaluationStatus::Approved => &mut stats.approved,
            EvaluationStatus::Piloting => &mut stats.piloting,
            EvaluationStatus::UnderReview => &mut stats.under_review,
            EvaluationStatus::Rejected => &mut stats.rejected,
            EvaluationStatus::InProgress => &mut stats.in_progress,
            EvaluationStatus::NotStarted => &mut stats.not_started,
        };
        *counter += 1;
    }

    stats.approval_rate = format_rate(stats.approved + stats.piloting, stats.total);
    stats
}

fn format_rate(numerator: usize, total: usize) -> String {
    let rate = if total > 0 {
        numerator as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    // Ties round away from zero: 6.25 is "6.3"
    format!("{:.1}", (rate * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.approved + stats.piloting + stats.rejected, 0);
        assert_eq!(stats.approval_rate, "0.0");
    }

    #[test]
    fn test_rate_formatting() {
        assert_eq!(format_rate(1, 3), "33.3");
        assert_eq!(format_rate(2, 3), "66.7");
        assert_eq!(format_rate(4, 4), "100.0");
        assert_eq!(format_rate(0, 7), "0.0");
    }

    #[test]
    fn test_rate_ties_round_up() {
        assert_eq!(format_rate(1, 16), "6.3");
        assert_eq!(format_rate(5, 16), "31.3");
        assert_eq!(format_rate(1, 8), "12.5");
    }

    #[test]
    fn test_aggregate_rate_on_tie() {
        let records: Vec<EvaluationRecord> = (0..16)
            .map(|i| {
                let status = if i == 0 {
                    EvaluationStatus::Approved
                } else {
                    EvaluationStatus::Rejected
                };
                serde_json::from_value(serde_json::json!({
                    "id": i,
                    "toolName": format!("Tool {}", i),
                    "category": ["AI Avatars"],
                    "status": status,
                    "evaluator": "Sam",
                }))
                .unwrap()
            })
            .collect();

        let stats = aggregate(&records);
        assert_eq!(stats.approved, 1);
        assert_eq!(stats.approval_rate, "6.3");
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(aggregate(&[])).unwrap();
        assert_eq!(json["approvalRate"], "0.0");
        assert_eq!(json["underReview"], 0);
        assert_eq!(json["inProgress"], 0);
    }
}
