//! Visual-curation payload: per-unit image prompts.

use serde::{Deserialize, Serialize};

/// Visual direction for one unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualUnit {
    /// 1-based unit index.
    #[serde(default)]
    pub index: u32,
    /// Prompt for the unit's primary image.
    #[serde(default)]
    pub primary_image_prompt: String,
    /// Rendering style ("photography", "illustration", ...).
    #[serde(default)]
    pub style: String,
    /// Intended mood.
    #[serde(default)]
    pub mood: String,
    /// Optional prompt for a secondary image.
    #[serde(default)]
    pub secondary_image_prompt: Option<String>,
}

/// The visual-curation stage's payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualPlan {
    /// Free-form guidance on the overall aesthetic.
    #[serde(default)]
    pub strategy: String,
    /// Per-unit visual directions; may be sparse.
    #[serde(default)]
    pub per_unit: Vec<VisualUnit>,
}

impl VisualPlan {
    /// Looks up the visual direction for a unit index.
    #[must_use]
    pub fn unit(&self, index: u32) -> Option<&VisualUnit> {
        self.per_unit.iter().find(|u| u.index == index)
    }
}
