//! Design-specification stage.

use serde_json::Value;

use super::confidence::{self, FALLBACK_SIMPLE};
use super::{GenerationStage, StageRole};
use crate::context::RunContext;
use crate::errors::DeckflowError;
use crate::schema::{
    Color, ColorPalette, ContentOutline, DesignSystem, LayoutType, Region, Typography, UnitLayout,
};

/// Produces the palette, typography, and per-unit layouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DesignSpecStage;

impl DesignSpecStage {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Theme-keyed fallback palettes. Unknown themes resolve to modern.
fn theme_palette(theme: &str) -> (Color, Color) {
    match theme.to_ascii_lowercase().as_str() {
        "corporate" => (Color::rgb(20, 46, 107), Color::rgb(10, 20, 46)),
        "creative" => (Color::rgb(217, 38, 89), Color::rgb(242, 89, 20)),
        "minimal" => (Color::rgb(250, 250, 250), Color::rgb(235, 235, 235)),
        "dark" => (Color::rgb(20, 20, 20), Color::rgb(46, 46, 46)),
        _ => (Color::rgb(38, 64, 217), Color::rgb(20, 31, 64)),
    }
}

impl GenerationStage for DesignSpecStage {
    type Input = ContentOutline;
    type Payload = DesignSystem;

    fn role(&self) -> StageRole {
        StageRole::DesignSpec
    }

    fn render_prompt(&self, ctx: &RunContext, input: &Self::Input) -> String {
        let outline_json =
            serde_json::to_string_pretty(input).unwrap_or_else(|_| "{}".to_string());
        format!(
            r#"You are a presentation design specialist.

CONTENT TO DESIGN:
{outline_json}

DESIGN REQUIREMENTS:
- Theme: {theme}
- Clear visual hierarchy and readability
- Accessible contrast between text and background

Respond with a single JSON object, no surrounding prose:
{{
  "color_palette": {{
    "primary": {{"r": 0, "g": 0, "b": 0}},
    "secondary": {{"r": 0, "g": 0, "b": 0}},
    "accent": {{"r": 0, "g": 0, "b": 0}},
    "text": {{"r": 0, "g": 0, "b": 0}},
    "background": {{"r": 0, "g": 0, "b": 0}}
  }},
  "typography": {{
    "heading_font": "font name",
    "body_font": "font name",
    "sizes": {{"h1": 36, "h2": 28, "body": 18}}
  }},
  "layouts": [
    {{
      "index": 1,
      "layout_type": "content_left|content_right|visual_heavy|text_focus|dual_image",
      "regions": {{
        "text": {{"x": 80, "y": 120, "width": 480, "height": 320}},
        "image": {{"x": 580, "y": 120, "width": 360, "height": 320}}
      }}
    }}
  ],
  "principles": "one paragraph on how the design supports the content"
}}

Provide one layout per unit ({units} units) or a single exemplar layout to apply everywhere."#,
            theme = ctx.request.theme,
            units = ctx.content_unit_count(),
        )
    }

    fn extract(&self, _ctx: &RunContext, value: Value) -> Option<Self::Payload> {
        // Required-field checklist: a payload without its palette and
        // typography is not a design system, even if it decodes.
        if value.get("color_palette").is_none() || value.get("typography").is_none() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    fn confidence(&self, ctx: &RunContext, payload: &Self::Payload) -> f64 {
        confidence::structural(
            payload.principles.is_some(),
            payload.layouts.len(),
            ctx.content_unit_count(),
        )
    }

    fn fallback_confidence(&self) -> f64 {
        FALLBACK_SIMPLE
    }

    fn fallback(
        &self,
        ctx: &RunContext,
        _input: &Self::Input,
    ) -> Result<Self::Payload, DeckflowError> {
        let theme = &ctx.request.theme;
        let (primary, secondary) = theme_palette(theme);

        let mut regions = std::collections::BTreeMap::new();
        regions.insert(
            "text".to_string(),
            Region {
                x: 80.0,
                y: 120.0,
                width: 480.0,
                height: 320.0,
            },
        );
        regions.insert(
            "image".to_string(),
            Region {
                x: 580.0,
                y: 120.0,
                width: 360.0,
                height: 320.0,
            },
        );

        Ok(DesignSystem {
            color_palette: ColorPalette {
                primary,
                secondary,
                accent: Color::rgb(89, 217, 89),
                text: Color::rgb(255, 255, 255),
                background: primary,
            },
            typography: Typography::default(),
            // One exemplar layout; the integrator broadcasts it.
            layouts: vec![UnitLayout {
                index: 1,
                layout_type: LayoutType::ContentLeft,
                regions,
            }],
            principles: Some(format!(
                "Consistent {theme} styling with strong hierarchy and readable contrast"
            )),
        })
    }

    fn suggestions(&self, used_fallback: bool) -> Vec<String> {
        if used_fallback {
            vec!["Fallback design applied - consider customization".to_string()]
        } else {
            vec![
                "Ensure all text meets WCAG AA contrast requirements".to_string(),
                "Test layouts at different screen sizes".to_string(),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::request::GenerationRequest;

    fn ctx(theme: &str) -> RunContext {
        RunContext::new(
            GenerationRequest::new("Topic", 5).with_theme(theme),
            PipelineConfig::default(),
        )
    }

    fn outline() -> ContentOutline {
        ContentOutline {
            title: "T".to_string(),
            subtitle: String::new(),
            units: Vec::new(),
            strategy: None,
        }
    }

    #[test]
    fn test_extract_requires_palette_and_typography() {
        let stage = DesignSpecStage::new();
        let missing = serde_json::json!({"layouts": []});
        assert!(stage.extract(&ctx("modern"), missing).is_none());

        let present = serde_json::json!({
            "color_palette": {},
            "typography": {},
        });
        assert!(stage.extract(&ctx("modern"), present).is_some());
    }

    #[test]
    fn test_fallback_palette_follows_theme() {
        let stage = DesignSpecStage::new();
        let dark = stage.fallback(&ctx("dark"), &outline()).unwrap();
        let modern = stage.fallback(&ctx("modern"), &outline()).unwrap();
        assert_ne!(dark.color_palette.primary, modern.color_palette.primary);

        // Unknown themes resolve to the modern palette.
        let unknown = stage.fallback(&ctx("vaporwave"), &outline()).unwrap();
        assert_eq!(unknown.color_palette.primary, modern.color_palette.primary);
    }

    #[test]
    fn test_fallback_emits_single_exemplar_layout() {
        let stage = DesignSpecStage::new();
        let system = stage.fallback(&ctx("minimal"), &outline()).unwrap();
        assert_eq!(system.layouts.len(), 1);
        assert!(system.layouts[0].regions.contains_key("text"));
    }
}
