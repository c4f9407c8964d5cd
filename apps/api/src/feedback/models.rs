use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_SCORE: u32 = 100;
pub const CATEGORY_MIN: u8 = 1;
pub const CATEGORY_MAX: u8 = 10;

/// Hiring decision. Serialized with the exact labels the grader is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Hire")]
    Hire,
    #[serde(rename = "No Hire")]
    NoHire,
    #[serde(rename = "Strong Hire")]
    StrongHire,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Hire => "Hire",
            Verdict::NoHire => "No Hire",
            Verdict::StrongHire => "Strong Hire",
        }
    }
}

/// The four fixed grading categories, each scored 1-10. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryScores {
    #[serde(rename = "Technical Skills")]
    pub technical_skills: u8,
    #[serde(rename = "Communication")]
    pub communication: u8,
    #[serde(rename = "Problem Solving")]
    pub problem_solving: u8,
    #[serde(rename = "Experience Match")]
    pub experience_match: u8,
}

impl CategoryScores {
    pub fn entries(&self) -> [(&'static str, u8); 4] {
        [
            ("Technical Skills", self.technical_skills),
            ("Communication", self.communication),
            ("Problem Solving", self.problem_solving),
            ("Experience Match", self.experience_match),
        ]
    }
}

/// Final graded report for one interview. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub score: u32,
    pub verdict: Verdict,
    pub feedback_summary: String,
    pub weak_areas: Vec<String>,
    pub strong_areas: Vec<String>,
    pub category_scores: CategoryScores,
}

impl FeedbackReport {
    /// Range checks serde cannot express.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        if self.score > MAX_SCORE {
            return Err(FeedbackError::Schema(format!(
                "score {} is outside 0-{MAX_SCORE}",
                self.score
            )));
        }
        for (name, value) in self.category_scores.entries() {
            if !(CATEGORY_MIN..=CATEGORY_MAX).contains(&value) {
                return Err(FeedbackError::Schema(format!(
                    "category '{name}' score {value} is outside {CATEGORY_MIN}-{CATEGORY_MAX}"
                )));
            }
        }
        Ok(())
    }
}

/// In-band result when the grading call itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

/// What the grader hands back: a report, or a degraded error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeedbackOutcome {
    Report(FeedbackReport),
    Error(ErrorReport),
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Feedback schema violation: {0}")]
    Schema(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testing::VALID_REPORT;

    #[test]
    fn test_valid_report_round_trips_without_loss() {
        let report: FeedbackReport = serde_json::from_str(VALID_REPORT).unwrap();
        report.validate().unwrap();
        assert_eq!(report.verdict, Verdict::Hire);
        assert_eq!(report.weak_areas.len(), 2);
        assert_eq!(report.category_scores.experience_match, 9);

        let original: serde_json::Value = serde_json::from_str(VALID_REPORT).unwrap();
        assert_eq!(serde_json::to_value(&report).unwrap(), original);
    }

    #[test]
    fn test_verdict_labels() {
        for (label, verdict) in [
            ("\"Hire\"", Verdict::Hire),
            ("\"No Hire\"", Verdict::NoHire),
            ("\"Strong Hire\"", Verdict::StrongHire),
        ] {
            assert_eq!(serde_json::from_str::<Verdict>(label).unwrap(), verdict);
            assert_eq!(format!("\"{}\"", verdict.as_str()), label);
        }
        assert!(serde_json::from_str::<Verdict>("\"Maybe\"").is_err());
    }

    #[test]
    fn test_missing_category_is_rejected() {
        let json = VALID_REPORT.replace(r#""Experience Match": 9"#, r#""Culture": 9"#);
        assert!(serde_json::from_str::<FeedbackReport>(&json).is_err());
    }

    #[test]
    fn test_score_above_range_fails_validation() {
        let json = VALID_REPORT.replace("\"score\": 72", "\"score\": 140");
        let report: FeedbackReport = serde_json::from_str(&json).unwrap();
        assert!(matches!(report.validate(), Err(FeedbackError::Schema(_))));
    }

    #[test]
    fn test_category_zero_fails_validation() {
        let json = VALID_REPORT.replace("\"Communication\": 6", "\"Communication\": 0");
        let report: FeedbackReport = serde_json::from_str(&json).unwrap();
        let err = report.validate().unwrap_err();
        assert!(err.to_string().contains("Communication"));
    }

    #[test]
    fn test_error_outcome_serializes_flat() {
        let outcome = FeedbackOutcome::Error(ErrorReport {
            error: "Failed to generate feedback".to_string(),
        });
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"error":"Failed to generate feedback"}"#
        );
    }
}
