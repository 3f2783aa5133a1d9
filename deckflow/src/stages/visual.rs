//! Visual-curation stage.

use serde_json::Value;

use super::confidence::{self, FALLBACK_STANDARD};
use super::{GenerationStage, StageRole};
use crate::context::RunContext;
use crate::errors::DeckflowError;
use crate::schema::{ContentOutline, VisualPlan, VisualUnit};

/// Produces per-unit image prompts and the overall aesthetic.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisualCurationStage;

impl VisualCurationStage {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl GenerationStage for VisualCurationStage {
    type Input = ContentOutline;
    type Payload = VisualPlan;

    fn role(&self) -> StageRole {
        StageRole::VisualCuration
    }

    fn render_prompt(&self, ctx: &RunContext, input: &Self::Input) -> String {
        let units_json =
            serde_json::to_string_pretty(&input.units).unwrap_or_else(|_| "[]".to_string());
        format!(
            r#"You are a visual curator creating image direction for a presentation.

UNITS TO ENHANCE:
{units_json}

VISUAL REQUIREMENTS:
- Theme: {theme}
- Visual consistency across all units
- Each prompt must be specific enough to hand to an image generator

Respond with a single JSON object, no surrounding prose:
{{
  "strategy": "one paragraph describing the overall aesthetic",
  "per_unit": [
    {{
      "index": 1,
      "primary_image_prompt": "detailed, professional image prompt",
      "style": "photography|illustration|diagram|infographic",
      "mood": "professional|energetic|calm|inspiring",
      "secondary_image_prompt": "optional, omit when one image suffices"
    }}
  ]
}}

Cover all {units} units."#,
            theme = ctx.request.theme,
            units = ctx.content_unit_count(),
        )
    }

    fn extract(&self, _ctx: &RunContext, value: Value) -> Option<Self::Payload> {
        let plan: VisualPlan = serde_json::from_value(value).ok()?;
        if plan.per_unit.is_empty() {
            return None;
        }
        Some(plan)
    }

    fn confidence(&self, ctx: &RunContext, payload: &Self::Payload) -> f64 {
        confidence::structural(
            !payload.strategy.trim().is_empty(),
            payload.per_unit.len(),
            ctx.content_unit_count(),
        )
    }

    fn fallback_confidence(&self) -> f64 {
        FALLBACK_STANDARD
    }

    fn fallback(
        &self,
        ctx: &RunContext,
        input: &Self::Input,
    ) -> Result<Self::Payload, DeckflowError> {
        let theme = &ctx.request.theme;

        let per_unit: Vec<VisualUnit> = input
            .units
            .iter()
            .map(|unit| VisualUnit {
                index: unit.index,
                primary_image_prompt: format!(
                    "Professional {theme} style image representing \"{}\"",
                    unit.title
                ),
                style: "photography".to_string(),
                mood: "professional".to_string(),
                secondary_image_prompt: None,
            })
            .collect();

        Ok(VisualPlan {
            strategy: format!("Professional {theme} aesthetic with high-quality visuals"),
            per_unit,
        })
    }

    fn suggestions(&self, used_fallback: bool) -> Vec<String> {
        if used_fallback {
            vec!["Fallback visuals generated - consider customization".to_string()]
        } else {
            vec![
                "Check image visibility at presentation size".to_string(),
                "Ensure images support rather than distract from content".to_string(),
            ]
        }
    }
}
