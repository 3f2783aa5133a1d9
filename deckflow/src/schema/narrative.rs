//! Narrative-architecture payload: storytelling overlays per unit.

use serde::{Deserialize, Serialize};

/// Narrative overlay for one unit.
///
/// `enhanced_title` and `enhanced_talking_points` are overrides of the
/// content outline's fields; the integrator applies them only when
/// non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeUnit {
    /// 1-based unit index.
    #[serde(default)]
    pub index: u32,
    /// The unit's role in the overall story.
    #[serde(default)]
    pub narrative_purpose: String,
    /// Emotional register for delivery.
    #[serde(default)]
    pub emotional_tone: String,
    /// Optional title override.
    #[serde(default)]
    pub enhanced_title: Option<String>,
    /// Optional talking-point overrides.
    #[serde(default)]
    pub enhanced_talking_points: Option<Vec<String>>,
    /// How the unit opens.
    #[serde(default)]
    pub opening_statement: String,
    /// How the unit closes.
    #[serde(default)]
    pub closing_statement: String,
}

/// Story-level structure notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeStructure {
    /// Overall progression.
    #[serde(default)]
    pub story_arc: String,
    /// How audience emotion should evolve.
    #[serde(default)]
    pub emotional_journey: String,
    /// Critical beats.
    #[serde(default)]
    pub key_moments: Vec<String>,
    /// Peaks of engagement.
    #[serde(default)]
    pub engagement_peaks: Vec<String>,
}

/// The narrative-architecture stage's payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativePlan {
    /// Free-form guidance on the narrative arc.
    #[serde(default)]
    pub arc: String,
    /// Per-unit overlays; may be sparse.
    #[serde(default)]
    pub per_unit: Vec<NarrativeUnit>,
    /// Optional structure envelope.
    #[serde(default)]
    pub structure: Option<NarrativeStructure>,
}

impl NarrativePlan {
    /// Looks up the overlay for a unit index.
    #[must_use]
    pub fn unit(&self, index: u32) -> Option<&NarrativeUnit> {
        self.per_unit.iter().find(|u| u.index == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_decode_as_present_but_empty() {
        let unit: NarrativeUnit = serde_json::from_str(
            r#"{"index": 1, "enhanced_title": "", "enhanced_talking_points": []}"#,
        )
        .unwrap();
        assert_eq!(unit.enhanced_title.as_deref(), Some(""));
        assert_eq!(unit.enhanced_talking_points.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_missing_overrides_decode_as_none() {
        let unit: NarrativeUnit = serde_json::from_str(r#"{"index": 1}"#).unwrap();
        assert!(unit.enhanced_title.is_none());
        assert!(unit.enhanced_talking_points.is_none());
    }
}
