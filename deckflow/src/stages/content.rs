//! Content-strategy stage: the root of the pipeline.

use serde_json::Value;

use super::confidence::{self, FALLBACK_STANDARD};
use super::{GenerationStage, StageRole};
use crate::context::RunContext;
use crate::errors::DeckflowError;
use crate::schema::{ContentOutline, ContentType, ContentUnit, PresentationStrategy};

/// Produces the content outline every downstream stage consumes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentStrategyStage;

impl ContentStrategyStage {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GenerationStage for ContentStrategyStage {
    type Input = ();
    type Payload = ContentOutline;

    fn role(&self) -> StageRole {
        StageRole::ContentStrategy
    }

    fn render_prompt(&self, ctx: &RunContext, _input: &Self::Input) -> String {
        let request = &ctx.request;
        let units = ctx.content_unit_count();
        format!(
            r#"You are a content strategist planning a high-impact presentation about "{topic}".

REQUIREMENTS:
- {units} content units (a title unit is handled separately)
- Tone: {tone}
- Target audience: {audience}
- Each unit needs a clear purpose and a strong flow from one to the next

Respond with a single JSON object, no surrounding prose:
{{
  "title": "presentation title",
  "subtitle": "supporting subtitle",
  "strategy": {{
    "core_message": "the one thing the audience should remember",
    "narrative_arc": "how the story unfolds",
    "engagement_hooks": ["..."],
    "key_differentiators": ["..."]
  }},
  "units": [
    {{
      "index": 1,
      "title": "unit title",
      "key_message": "main takeaway",
      "content_type": "introduction|analysis|evidence|conclusion",
      "talking_points": ["four specific, detailed points"]
    }}
  ]
}}

Provide exactly {units} units with indices 1 through {units}."#,
            topic = request.topic,
            units = units,
            tone = request.tone,
            audience = request.audience,
        )
    }

    fn extract(&self, _ctx: &RunContext, value: Value) -> Option<Self::Payload> {
        let outline: ContentOutline = serde_json::from_value(value).ok()?;
        if outline.units.is_empty() {
            return None;
        }
        Some(outline)
    }

    fn confidence(&self, ctx: &RunContext, payload: &Self::Payload) -> f64 {
        confidence::structural(
            payload.strategy.is_some(),
            payload.units.len(),
            ctx.content_unit_count(),
        )
    }

    fn fallback_confidence(&self) -> f64 {
        FALLBACK_STANDARD
    }

    fn fallback(&self, ctx: &RunContext, _input: &Self::Input) -> Result<Self::Payload, DeckflowError> {
        let topic = &ctx.request.topic;
        let expected = ctx.content_unit_count();

        let units: Vec<ContentUnit> = (1..=expected)
            .map(|position| {
                let content_type = if position == 1 {
                    ContentType::Introduction
                } else if position == expected {
                    ContentType::Conclusion
                } else {
                    ContentType::Analysis
                };
                ContentUnit {
                    index: position as u32,
                    title: format!("{topic} - Key Aspect {position}"),
                    key_message: format!("Important insight about {topic}"),
                    talking_points: vec![
                        format!("Key point about {topic}"),
                        "Important consideration for implementation".to_string(),
                        "Best practice recommendation".to_string(),
                        "Future implications and trends".to_string(),
                    ],
                    content_type,
                }
            })
            .collect();

        if units.is_empty() {
            return Err(DeckflowError::synthesis_bug(
                self.role(),
                "fallback produced an empty outline",
            ));
        }

        Ok(ContentOutline {
            title: format!("Mastering {topic}: A Strategic Approach"),
            subtitle: "Practical insights for immediate implementation".to_string(),
            units,
            strategy: Some(PresentationStrategy {
                core_message: format!("Understanding and implementing {topic} effectively"),
                narrative_arc: "Introduction, analysis, solutions, implementation, conclusion"
                    .to_string(),
                engagement_hooks: vec![
                    "Opening question".to_string(),
                    "Relevant statistics".to_string(),
                    "Real-world examples".to_string(),
                ],
                key_differentiators: vec![
                    "Actionable insights".to_string(),
                    "Practical approach".to_string(),
                    "Clear next steps".to_string(),
                ],
            }),
        })
    }

    fn suggestions(&self, used_fallback: bool) -> Vec<String> {
        if used_fallback {
            vec!["Fallback content generated - consider manual review".to_string()]
        } else {
            vec![
                "Consider adding more specific data points for credibility".to_string(),
                "Ensure each unit has a clear call-to-action".to_string(),
                "Add storytelling elements to increase engagement".to_string(),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::request::GenerationRequest;

    fn ctx(unit_count: usize) -> RunContext {
        RunContext::new(
            GenerationRequest::new("Photosynthesis", unit_count),
            PipelineConfig::default(),
        )
    }

    #[test]
    fn test_prompt_mentions_topic_and_count() {
        let stage = ContentStrategyStage::new();
        let prompt = stage.render_prompt(&ctx(4), &());
        assert!(prompt.contains("Photosynthesis"));
        assert!(prompt.contains("3 content units"));
    }

    #[test]
    fn test_extract_rejects_empty_units() {
        let stage = ContentStrategyStage::new();
        let value = serde_json::json!({"title": "T", "units": []});
        assert!(stage.extract(&ctx(4), value).is_none());
    }

    #[test]
    fn test_fallback_is_dense_and_non_empty() {
        let stage = ContentStrategyStage::new();
        let outline = stage.fallback(&ctx(4), &()).unwrap();

        assert_eq!(outline.units.len(), 3);
        let indices: Vec<u32> = outline.units.iter().map(|u| u.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        for unit in &outline.units {
            assert!(!unit.title.is_empty());
            assert!(!unit.talking_points.is_empty());
        }
        assert_eq!(outline.units[0].content_type, ContentType::Introduction);
        assert_eq!(outline.units[2].content_type, ContentType::Conclusion);
    }

    #[test]
    fn test_confidence_rewards_strategy_envelope() {
        let stage = ContentStrategyStage::new();
        let ctx = ctx(4);
        let with_envelope = stage.fallback(&ctx, &()).unwrap();
        let mut without_envelope = with_envelope.clone();
        without_envelope.strategy = None;

        assert!(
            stage.confidence(&ctx, &with_envelope) > stage.confidence(&ctx, &without_envelope)
        );
    }
}
