//! Integrated and final artifact types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::schema::{
    ContentType, DesignSystem, LayoutType, PresentationStrategy, QualityAssessment, Region,
};
use crate::stages::{StageResult, StageRole};

/// One fully-populated unit: the per-index join of content, design,
/// visual, and narrative data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedUnit {
    /// 1-based unit index.
    pub index: u32,
    /// Title, after the narrative override rule.
    pub title: String,
    /// Main takeaway.
    pub key_message: String,
    /// Talking points, after the narrative override rule.
    pub talking_points: Vec<String>,
    /// Role in the flow.
    pub content_type: ContentType,
    /// How the unit opens; absent when narrative had nothing for it.
    #[serde(default)]
    pub opening_statement: Option<String>,
    /// How the unit closes.
    #[serde(default)]
    pub closing_statement: Option<String>,
    /// The unit's role in the overall story.
    #[serde(default)]
    pub narrative_purpose: Option<String>,
    /// Emotional register for delivery.
    #[serde(default)]
    pub emotional_tone: Option<String>,
    /// Primary image prompt; absent means a text-focused unit.
    #[serde(default)]
    pub primary_image_prompt: Option<String>,
    /// Optional secondary image prompt.
    #[serde(default)]
    pub secondary_image_prompt: Option<String>,
    /// Rendering style for the unit's imagery.
    #[serde(default)]
    pub image_style: Option<String>,
    /// Mood for the unit's imagery.
    #[serde(default)]
    pub image_mood: Option<String>,
    /// Layout archetype.
    pub layout_type: LayoutType,
    /// Named layout regions.
    #[serde(default)]
    pub regions: BTreeMap<String, Region>,
}

/// The integrated structure before quality assurance has seen it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckDraft {
    /// Presentation title.
    pub title: String,
    /// Supporting subtitle.
    pub subtitle: String,
    /// The design system, palette normalized.
    pub design: DesignSystem,
    /// Integrated units, dense over `1..=n`.
    pub units: Vec<IntegratedUnit>,
    /// Strategy envelope carried over from content strategy.
    #[serde(default)]
    pub strategy: Option<PresentationStrategy>,
}

/// Provenance for one stage's contribution to a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    /// Which stage.
    pub role: StageRole,
    /// Structural-completeness estimate in `[0, 1]`.
    pub confidence_score: f64,
    /// Wall-clock time the stage took.
    pub processing_time_ms: f64,
    /// Whether the deterministic fallback produced the payload.
    pub used_fallback: bool,
    /// Follow-up suggestions from the stage.
    pub suggestions: Vec<String>,
}

impl<T> From<&StageResult<T>> for StageReport {
    fn from(result: &StageResult<T>) -> Self {
        Self {
            role: result.role,
            confidence_score: result.confidence_score,
            processing_time_ms: result.processing_time_ms,
            used_fallback: result.used_fallback,
            suggestions: result.suggestions.clone(),
        }
    }
}

/// The sole externally visible output of a run. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalArtifact {
    /// Identity of the run that produced this artifact.
    pub run_id: Uuid,
    /// Presentation title.
    pub title: String,
    /// Supporting subtitle.
    pub subtitle: String,
    /// The design system.
    pub design: DesignSystem,
    /// Integrated units.
    pub units: Vec<IntegratedUnit>,
    /// Strategy envelope, when content strategy supplied one.
    #[serde(default)]
    pub strategy: Option<PresentationStrategy>,
    /// The quality-assurance stage's assessment, on its own 0-10 scale.
    pub quality_assessment: QualityAssessment,
    /// Per-stage provenance.
    pub stage_reports: Vec<StageReport>,
    /// Unweighted mean of the five stage confidence scores.
    pub overall_confidence: f64,
    /// When the artifact was assembled.
    pub created_at: DateTime<Utc>,
}

impl FinalArtifact {
    /// Returns true if any stage fell back to deterministic content.
    #[must_use]
    pub fn degraded(&self) -> bool {
        self.stage_reports.iter().any(|r| r.used_fallback)
    }
}
