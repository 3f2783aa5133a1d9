//! Quality-assurance stage.
//!
//! Unlike the other stages this one consumes the fully integrated
//! structure, not raw stage outputs, and its scores live on a 0-10
//! scale separate from the [0,1] confidence scale.

use serde_json::Value;

use super::confidence::{self, FALLBACK_SIMPLE};
use super::{GenerationStage, StageRole};
use crate::artifact::DeckDraft;
use crate::context::RunContext;
use crate::errors::DeckflowError;
use crate::schema::{QualityAssessment, Recommendation, Severity};

/// Assesses the integrated artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAssuranceStage;

impl QualityAssuranceStage {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GenerationStage for QualityAssuranceStage {
    type Input = DeckDraft;
    type Payload = QualityAssessment;

    fn role(&self) -> StageRole {
        StageRole::QualityAssurance
    }

    fn render_prompt(&self, ctx: &RunContext, input: &Self::Input) -> String {
        let draft_json =
            serde_json::to_string_pretty(input).unwrap_or_else(|_| "{}".to_string());
        let criteria = &ctx.config.quality_criteria;
        format!(
            r#"You are a quality-assurance reviewer for presentations.

PRESENTATION TO REVIEW:
{draft_json}

QUALITY CRITERIA:
- Minimum content score: {min_content}
- Minimum design score: {min_design}
- Accessibility issues must be flagged: {accessibility}

Score every dimension on a 0-10 scale and respond with a single JSON object, no surrounding prose:
{{
  "overall_score": 8.5,
  "per_dimension_scores": {{
    "content": 9.0,
    "design": 8.0,
    "narrative": 8.5,
    "visual": 8.0,
    "accessibility": 9.0
  }},
  "issues": [
    {{
      "severity": "high|medium|low",
      "description": "what is wrong",
      "location_index": 2
    }}
  ],
  "recommendations": [
    {{
      "priority": "high|medium|low",
      "text": "specific improvement"
    }}
  ]
}}"#,
            min_content = criteria.min_content_score,
            min_design = criteria.min_design_score,
            accessibility = criteria.accessibility_required,
        )
    }

    fn extract(&self, _ctx: &RunContext, value: Value) -> Option<Self::Payload> {
        if value.get("overall_score").is_none() {
            return None;
        }
        let mut assessment: QualityAssessment = serde_json::from_value(value).ok()?;
        assessment.clamp_scores();
        Some(assessment)
    }

    fn confidence(&self, _ctx: &RunContext, payload: &Self::Payload) -> f64 {
        confidence::structural(
            !payload.per_dimension_scores.is_empty(),
            payload.issues.len() + payload.recommendations.len(),
            3,
        )
    }

    fn fallback_confidence(&self) -> f64 {
        FALLBACK_SIMPLE
    }

    fn fallback(
        &self,
        _ctx: &RunContext,
        _input: &Self::Input,
    ) -> Result<Self::Payload, DeckflowError> {
        let mut per_dimension_scores = std::collections::BTreeMap::new();
        per_dimension_scores.insert("content".to_string(), 8.0);
        per_dimension_scores.insert("design".to_string(), 7.0);
        per_dimension_scores.insert("narrative".to_string(), 7.5);
        per_dimension_scores.insert("visual".to_string(), 7.0);
        per_dimension_scores.insert("accessibility".to_string(), 8.0);

        Ok(QualityAssessment {
            overall_score: 7.5,
            per_dimension_scores,
            issues: Vec::new(),
            recommendations: vec![Recommendation {
                priority: Severity::Medium,
                text: "Review content for accuracy and relevance".to_string(),
            }],
        })
    }

    fn suggestions(&self, used_fallback: bool) -> Vec<String> {
        if used_fallback {
            vec!["Basic QA completed - consider detailed review".to_string()]
        } else {
            vec![
                "Implement high-priority recommendations first".to_string(),
                "Test the presentation with the target audience".to_string(),
            ]
        }
    }
}
