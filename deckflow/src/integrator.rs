//! Cross-stage integration.
//!
//! Joins the independently-produced per-unit outputs of the content,
//! design, visual, and narrative stages into one ordered sequence of
//! fully-populated units, keyed by 1-based unit index. The content
//! outline is authoritative for which indices exist: an index present
//! in content is never dropped, no matter how sparse the other stages
//! were.

use std::collections::BTreeMap;

use crate::artifact::{DeckDraft, IntegratedUnit};
use crate::schema::{
    ContentOutline, DesignSystem, LayoutType, NarrativePlan, Region, UnitLayout, VisualPlan,
};

/// Merges the four per-unit outputs into integrated units.
///
/// Per index: content supplies the base fields; design supplies the
/// layout (broadcasting its first entry when it declared fewer layouts
/// than units, which design stages are permitted to do); a missing
/// visual entry leaves the unit text-focused; a missing narrative
/// entry leaves content's raw fields untouched.
#[must_use]
pub fn integrate(
    content: &ContentOutline,
    design: &DesignSystem,
    visual: &VisualPlan,
    narrative: &NarrativePlan,
) -> Vec<IntegratedUnit> {
    content
        .units
        .iter()
        .map(|unit| {
            let layout = design
                .layout(unit.index)
                .or_else(|| design.layouts.first());
            let visual_unit = visual.unit(unit.index);
            let narrative_unit = narrative.unit(unit.index);

            let (layout_type, regions): (LayoutType, BTreeMap<String, Region>) = layout
                .map_or_else(
                    || (LayoutType::default(), BTreeMap::new()),
                    |l: &UnitLayout| (l.layout_type, l.regions.clone()),
                );

            IntegratedUnit {
                index: unit.index,
                title: override_text(&unit.title, narrative_unit.and_then(|n| n.enhanced_title.as_deref())),
                key_message: unit.key_message.clone(),
                talking_points: override_points(
                    &unit.talking_points,
                    narrative_unit.and_then(|n| n.enhanced_talking_points.as_deref()),
                ),
                content_type: unit.content_type,
                opening_statement: narrative_unit
                    .map(|n| n.opening_statement.clone())
                    .filter(|s| !s.trim().is_empty()),
                closing_statement: narrative_unit
                    .map(|n| n.closing_statement.clone())
                    .filter(|s| !s.trim().is_empty()),
                narrative_purpose: narrative_unit
                    .map(|n| n.narrative_purpose.clone())
                    .filter(|s| !s.trim().is_empty()),
                emotional_tone: narrative_unit
                    .map(|n| n.emotional_tone.clone())
                    .filter(|s| !s.trim().is_empty()),
                primary_image_prompt: visual_unit
                    .map(|v| v.primary_image_prompt.clone())
                    .filter(|s| !s.trim().is_empty()),
                secondary_image_prompt: visual_unit
                    .and_then(|v| v.secondary_image_prompt.clone())
                    .filter(|s| !s.trim().is_empty()),
                image_style: visual_unit
                    .map(|v| v.style.clone())
                    .filter(|s| !s.trim().is_empty()),
                image_mood: visual_unit
                    .map(|v| v.mood.clone())
                    .filter(|s| !s.trim().is_empty()),
                layout_type,
                regions,
            }
        })
        .collect()
}

/// Builds the pre-QA draft from the four stage payloads.
#[must_use]
pub fn build_draft(
    content: &ContentOutline,
    design: &DesignSystem,
    visual: &VisualPlan,
    narrative: &NarrativePlan,
) -> DeckDraft {
    let mut design = design.clone();
    design.color_palette = design.color_palette.normalized();

    DeckDraft {
        title: content.title.clone(),
        subtitle: content.subtitle.clone(),
        units: integrate(content, &design, visual, narrative),
        design,
        strategy: content.strategy.clone(),
    }
}

/// The narrative override rule for a single text field: narrative
/// wins only when non-empty. An empty or missing narrative value must
/// never blank a populated content value.
fn override_text(content_value: &str, narrative_value: Option<&str>) -> String {
    match narrative_value {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => content_value.to_string(),
    }
}

/// The narrative override rule for talking points: same policy,
/// applied to the collection as a whole.
fn override_points(content_points: &[String], narrative_points: Option<&[String]>) -> Vec<String> {
    match narrative_points {
        Some(points) if !points.is_empty() => points.to_vec(),
        _ => content_points.to_vec(),
    }
}
