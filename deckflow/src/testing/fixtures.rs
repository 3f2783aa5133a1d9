//! Canned requests and well-formed stage responses for tests.

use crate::request::{GenerationRequest, Tone};

/// A small, valid request.
#[must_use]
pub fn sample_request() -> GenerationRequest {
    GenerationRequest::new("Photosynthesis", 4)
        .with_tone(Tone::Academic)
        .with_theme("minimal")
        .with_audience("students")
}

/// A well-formed content-strategy response with `units` content units.
#[must_use]
pub fn content_json(units: usize) -> String {
    let units: Vec<serde_json::Value> = (1..=units)
        .map(|i| {
            serde_json::json!({
                "index": i,
                "title": format!("Scripted unit {i}"),
                "key_message": format!("Message {i}"),
                "content_type": "analysis",
                "talking_points": [
                    format!("Point {i}.1"),
                    format!("Point {i}.2"),
                    format!("Point {i}.3"),
                ],
            })
        })
        .collect();

    serde_json::json!({
        "title": "Scripted Deck",
        "subtitle": "A scripted subtitle",
        "strategy": {
            "core_message": "The scripted core message",
            "narrative_arc": "Beginning to end",
            "engagement_hooks": ["hook"],
            "key_differentiators": ["diff"],
        },
        "units": units,
    })
    .to_string()
}

/// A well-formed design-specification response with one layout per unit.
#[must_use]
pub fn design_json(units: usize) -> String {
    let layouts: Vec<serde_json::Value> = (1..=units)
        .map(|i| {
            serde_json::json!({
                "index": i,
                "layout_type": if i % 2 == 0 { "content_right" } else { "content_left" },
                "regions": {
                    "text": {"x": 80, "y": 120, "width": 480, "height": 320},
                    "image": {"x": 580, "y": 120, "width": 360, "height": 320},
                },
            })
        })
        .collect();

    serde_json::json!({
        "color_palette": {
            "primary": {"r": 38, "g": 64, "b": 217},
            "secondary": {"r": 20, "g": 31, "b": 64},
            "accent": {"r": 89, "g": 217, "b": 89},
            "text": {"r": 255, "g": 255, "b": 255},
            "background": {"r": 38, "g": 64, "b": 217},
        },
        "typography": {
            "heading_font": "Inter",
            "body_font": "Inter",
            "sizes": {"h1": 36, "h2": 28, "body": 18},
        },
        "layouts": layouts,
        "principles": "Scripted design principles",
    })
    .to_string()
}

/// A well-formed visual-curation response covering every unit.
#[must_use]
pub fn visual_json(units: usize) -> String {
    let per_unit: Vec<serde_json::Value> = (1..=units)
        .map(|i| {
            serde_json::json!({
                "index": i,
                "primary_image_prompt": format!("Scripted image prompt {i}"),
                "style": "photography",
                "mood": "professional",
            })
        })
        .collect();

    serde_json::json!({
        "strategy": "Scripted visual strategy",
        "per_unit": per_unit,
    })
    .to_string()
}

/// A well-formed narrative-architecture response with title overrides.
#[must_use]
pub fn narrative_json(units: usize) -> String {
    let per_unit: Vec<serde_json::Value> = (1..=units)
        .map(|i| {
            serde_json::json!({
                "index": i,
                "narrative_purpose": format!("Purpose {i}"),
                "emotional_tone": "confident",
                "enhanced_title": format!("Enhanced title {i}"),
                "opening_statement": format!("Opening {i}"),
                "closing_statement": format!("Closing {i}"),
            })
        })
        .collect();

    serde_json::json!({
        "arc": "Scripted narrative arc",
        "structure": {
            "story_arc": "Scripted story arc",
            "emotional_journey": "Scripted journey",
            "key_moments": ["moment"],
            "engagement_peaks": ["peak"],
        },
        "per_unit": per_unit,
    })
    .to_string()
}

/// A well-formed quality-assurance response.
#[must_use]
pub fn quality_json() -> String {
    serde_json::json!({
        "overall_score": 8.5,
        "per_dimension_scores": {
            "content": 9.0,
            "design": 8.0,
            "narrative": 8.5,
            "visual": 8.0,
            "accessibility": 9.0,
        },
        "issues": [
            {"severity": "low", "description": "Scripted issue", "location_index": 1},
        ],
        "recommendations": [
            {"priority": "high", "text": "Scripted recommendation"},
            {"priority": "medium", "text": "Another scripted recommendation"},
        ],
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ContentOutline, DesignSystem, NarrativePlan, QualityAssessment, VisualPlan};

    #[test]
    fn test_fixtures_decode_into_schemas() {
        let content: ContentOutline = serde_json::from_str(&content_json(3)).unwrap();
        assert_eq!(content.units.len(), 3);

        let design: DesignSystem = serde_json::from_str(&design_json(3)).unwrap();
        assert_eq!(design.layouts.len(), 3);

        let visual: VisualPlan = serde_json::from_str(&visual_json(3)).unwrap();
        assert_eq!(visual.per_unit.len(), 3);

        let narrative: NarrativePlan = serde_json::from_str(&narrative_json(3)).unwrap();
        assert_eq!(narrative.per_unit.len(), 3);

        let quality: QualityAssessment = serde_json::from_str(&quality_json()).unwrap();
        assert!((quality.overall_score - 8.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sample_request_is_valid() {
        assert!(sample_request().validate().is_ok());
    }
}
