//! Narrative-architecture stage.

use serde_json::Value;

use super::confidence::{self, FALLBACK_STANDARD};
use super::{GenerationStage, StageRole};
use crate::context::RunContext;
use crate::errors::DeckflowError;
use crate::schema::{ContentOutline, NarrativePlan, NarrativeStructure, NarrativeUnit};

/// Produces storytelling overlays on top of the content outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NarrativeArchitectureStage;

impl NarrativeArchitectureStage {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GenerationStage for NarrativeArchitectureStage {
    type Input = ContentOutline;
    type Payload = NarrativePlan;

    fn role(&self) -> StageRole {
        StageRole::NarrativeArchitecture
    }

    fn render_prompt(&self, ctx: &RunContext, input: &Self::Input) -> String {
        let outline_json =
            serde_json::to_string_pretty(input).unwrap_or_else(|_| "{}".to_string());
        format!(
            r#"You are a narrative architect shaping the story of a presentation.

CONTENT TO ENHANCE:
{outline_json}

NARRATIVE REQUIREMENTS:
- Target audience: {audience}
- Build a compelling arc with smooth transitions between units
- Only override a title or talking points when your version is clearly stronger

Respond with a single JSON object, no surrounding prose:
{{
  "arc": "one paragraph describing the overall progression",
  "structure": {{
    "story_arc": "...",
    "emotional_journey": "...",
    "key_moments": ["..."],
    "engagement_peaks": ["..."]
  }},
  "per_unit": [
    {{
      "index": 1,
      "narrative_purpose": "role in the overall story",
      "emotional_tone": "specific emotional approach",
      "enhanced_title": "optional refined title, omit to keep the original",
      "enhanced_talking_points": ["optional refined points, omit to keep the originals"],
      "opening_statement": "compelling opening line",
      "closing_statement": "memorable closing line"
    }}
  ]
}}

Cover all {units} units."#,
            audience = ctx.request.audience,
            units = ctx.content_unit_count(),
        )
    }

    fn extract(&self, _ctx: &RunContext, value: Value) -> Option<Self::Payload> {
        let plan: NarrativePlan = serde_json::from_value(value).ok()?;
        if plan.per_unit.is_empty() {
            return None;
        }
        Some(plan)
    }

    fn confidence(&self, ctx: &RunContext, payload: &Self::Payload) -> f64 {
        let has_envelope = payload.structure.is_some() || !payload.arc.trim().is_empty();
        confidence::structural(has_envelope, payload.per_unit.len(), ctx.content_unit_count())
    }

    fn fallback_confidence(&self) -> f64 {
        FALLBACK_STANDARD
    }

    fn fallback(
        &self,
        _ctx: &RunContext,
        input: &Self::Input,
    ) -> Result<Self::Payload, DeckflowError> {
        // The fallback deliberately leaves the override fields empty:
        // it has nothing better than the content outline to offer, and
        // the integrator keeps populated content fields over empty
        // narrative ones.
        let per_unit: Vec<NarrativeUnit> = input
            .units
            .iter()
            .map(|unit| NarrativeUnit {
                index: unit.index,
                narrative_purpose: format!(
                    "Build understanding of key concept {}",
                    unit.index
                ),
                emotional_tone: "professional and engaging".to_string(),
                enhanced_title: None,
                enhanced_talking_points: None,
                opening_statement: "Let's explore this important aspect...".to_string(),
                closing_statement: "This insight leads us to our next consideration..."
                    .to_string(),
            })
            .collect();

        Ok(NarrativePlan {
            arc: "Curiosity builds into understanding, then confidence, then action".to_string(),
            per_unit,
            structure: Some(NarrativeStructure {
                story_arc: "Problem, analysis, solution, implementation, success".to_string(),
                emotional_journey: "Curiosity, understanding, confidence, action".to_string(),
                key_moments: vec![
                    "Opening hook".to_string(),
                    "Problem revelation".to_string(),
                    "Solution presentation".to_string(),
                    "Call to action".to_string(),
                ],
                engagement_peaks: vec![
                    "Opening question".to_string(),
                    "Key insight".to_string(),
                    "Final challenge".to_string(),
                ],
            }),
        })
    }

    fn suggestions(&self, used_fallback: bool) -> Vec<String> {
        if used_fallback {
            vec!["Fallback narrative created - consider enhancement".to_string()]
        } else {
            vec![
                "Practice transitions between units for smooth flow".to_string(),
                "Consider adding personal anecdotes for connection".to_string(),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::request::GenerationRequest;
    use crate::schema::{ContentType, ContentUnit};

    fn ctx() -> RunContext {
        RunContext::new(
            GenerationRequest::new("Topic", 4).with_audience("students"),
            PipelineConfig::default(),
        )
    }

    fn outline(units: usize) -> ContentOutline {
        ContentOutline {
            title: "T".to_string(),
            subtitle: String::new(),
            units: (1..=units)
                .map(|i| ContentUnit {
                    index: i as u32,
                    title: format!("Unit {i}"),
                    key_message: String::new(),
                    talking_points: vec!["p".to_string()],
                    content_type: ContentType::Analysis,
                })
                .collect(),
            strategy: None,
        }
    }

    #[test]
    fn test_fallback_leaves_overrides_empty() {
        let stage = NarrativeArchitectureStage::new();
        let plan = stage.fallback(&ctx(), &outline(3)).unwrap();

        assert_eq!(plan.per_unit.len(), 3);
        for unit in &plan.per_unit {
            assert!(unit.enhanced_title.is_none());
            assert!(unit.enhanced_talking_points.is_none());
            assert!(!unit.opening_statement.is_empty());
        }
    }

    #[test]
    fn test_extract_requires_per_unit_entries() {
        let stage = NarrativeArchitectureStage::new();
        let empty = serde_json::json!({"arc": "a", "per_unit": []});
        assert!(stage.extract(&ctx(), empty).is_none());
    }

    #[test]
    fn test_prompt_carries_audience() {
        let stage = NarrativeArchitectureStage::new();
        let prompt = stage.render_prompt(&ctx(), &outline(2));
        assert!(prompt.contains("students"));
    }
}
