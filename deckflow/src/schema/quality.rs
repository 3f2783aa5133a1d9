//! Quality-assurance payload: the assessment of the integrated artifact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Severity (for issues) and priority (for recommendations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    /// Must be addressed.
    High,
    /// Should be addressed.
    #[default]
    Medium,
    /// Nice to address.
    Low,
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "high" | "critical" => Self::High,
            "low" | "minor" => Self::Low,
            _ => Self::Medium,
        }
    }
}

/// A problem found in the integrated artifact.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityIssue {
    /// How serious the issue is.
    #[serde(default)]
    pub severity: Severity,
    /// What is wrong.
    #[serde(default)]
    pub description: String,
    /// The unit index affected, when the issue is localized.
    #[serde(default)]
    pub location_index: Option<u32>,
}

/// A suggested improvement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendation {
    /// How urgent the recommendation is.
    #[serde(default)]
    pub priority: Severity,
    /// The suggestion itself.
    #[serde(default)]
    pub text: String,
}

/// The quality-assurance stage's payload.
///
/// Scores live on a 0-10 scale, deliberately separate from the [0,1]
/// confidence scale the stages report on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityAssessment {
    /// Overall score in `[0, 10]`.
    #[serde(default)]
    pub overall_score: f64,
    /// Scores per dimension ("content", "design", ...).
    #[serde(default)]
    pub per_dimension_scores: BTreeMap<String, f64>,
    /// Problems found, ordered by the stage.
    #[serde(default)]
    pub issues: Vec<QualityIssue>,
    /// Improvements suggested, ordered by the stage.
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl QualityAssessment {
    /// Returns recommendations at a given priority.
    #[must_use]
    pub fn recommendations_at(&self, priority: Severity) -> Vec<&Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.priority == priority)
            .collect()
    }

    /// Clamps the overall score into `[0, 10]`.
    pub fn clamp_scores(&mut self) {
        self.overall_score = self.overall_score.clamp(0.0, 10.0);
        for score in self.per_dimension_scores.values_mut() {
            *score = score.clamp(0.0, 10.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_leniency() {
        let severity: Severity = serde_json::from_str("\"critical\"").unwrap();
        assert_eq!(severity, Severity::High);

        let severity: Severity = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(severity, Severity::Medium);
    }

    #[test]
    fn test_clamp_scores() {
        let mut assessment = QualityAssessment {
            overall_score: 14.0,
            ..QualityAssessment::default()
        };
        assessment
            .per_dimension_scores
            .insert("content".to_string(), -2.0);

        assessment.clamp_scores();
        assert!((assessment.overall_score - 10.0).abs() < f64::EPSILON);
        assert!((assessment.per_dimension_scores["content"]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_recommendations_at() {
        let assessment = QualityAssessment {
            recommendations: vec![
                Recommendation {
                    priority: Severity::High,
                    text: "fix contrast".to_string(),
                },
                Recommendation {
                    priority: Severity::Low,
                    text: "polish wording".to_string(),
                },
            ],
            ..QualityAssessment::default()
        };

        assert_eq!(assessment.recommendations_at(Severity::High).len(), 1);
        assert_eq!(assessment.recommendations_at(Severity::Medium).len(), 0);
    }
}
