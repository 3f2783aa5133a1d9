//! Pipeline configuration: per-stage sampling profiles and timeouts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::stages::StageRole;

/// Sampling parameters for one completion call.
///
/// Each stage carries its own profile: quality assurance runs cold for
/// consistency, visual curation runs hot for variety.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Nucleus-sampling threshold.
    pub top_p: f32,
    /// Maximum output size in provider tokens.
    pub max_output_tokens: u32,
}

impl GenerationParams {
    /// Creates a new parameter set.
    #[must_use]
    pub const fn new(temperature: f32, top_p: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            top_p,
            max_output_tokens,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new(0.7, 0.9, 2000)
    }
}

/// Score thresholds handed to the quality-assurance stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityCriteria {
    /// Minimum acceptable content score, on the 0-10 scale.
    pub min_content_score: f64,
    /// Minimum acceptable design score, on the 0-10 scale.
    pub min_design_score: f64,
    /// Whether accessibility issues must be flagged.
    pub accessibility_required: bool,
}

impl Default for QualityCriteria {
    fn default() -> Self {
        Self {
            min_content_score: 8.0,
            min_design_score: 7.5,
            accessibility_required: true,
        }
    }
}

/// Configuration for one pipeline instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Sampling profile for the content-strategy stage.
    #[serde(default = "defaults::content")]
    pub content: GenerationParams,
    /// Sampling profile for the design-specification stage.
    #[serde(default = "defaults::design")]
    pub design: GenerationParams,
    /// Sampling profile for the visual-curation stage.
    #[serde(default = "defaults::visual")]
    pub visual: GenerationParams,
    /// Sampling profile for the narrative-architecture stage.
    #[serde(default = "defaults::narrative")]
    pub narrative: GenerationParams,
    /// Sampling profile for the quality-assurance stage.
    #[serde(default = "defaults::quality")]
    pub quality: GenerationParams,
    /// Per-call timeout in seconds. A timeout is recovered exactly
    /// like a provider failure: the stage falls back.
    #[serde(default = "defaults::timeout_seconds")]
    pub call_timeout_seconds: f64,
    /// Thresholds handed to the quality-assurance prompt.
    #[serde(default)]
    pub quality_criteria: QualityCriteria,
}

mod defaults {
    use super::GenerationParams;

    pub(super) fn content() -> GenerationParams {
        GenerationParams::new(0.8, 0.9, 3000)
    }

    pub(super) fn design() -> GenerationParams {
        GenerationParams::new(0.7, 0.8, 2000)
    }

    pub(super) fn visual() -> GenerationParams {
        GenerationParams::new(0.9, 0.95, 1500)
    }

    pub(super) fn narrative() -> GenerationParams {
        GenerationParams::new(0.6, 0.85, 2500)
    }

    pub(super) fn quality() -> GenerationParams {
        GenerationParams::new(0.3, 0.7, 2000)
    }

    pub(super) fn timeout_seconds() -> f64 {
        90.0
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            content: defaults::content(),
            design: defaults::design(),
            visual: defaults::visual(),
            narrative: defaults::narrative(),
            quality: defaults::quality(),
            call_timeout_seconds: defaults::timeout_seconds(),
            quality_criteria: QualityCriteria::default(),
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration with default stage profiles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub fn with_call_timeout(mut self, seconds: f64) -> Self {
        self.call_timeout_seconds = seconds;
        self
    }

    /// Overrides the sampling profile for one stage.
    #[must_use]
    pub fn with_params(mut self, role: StageRole, params: GenerationParams) -> Self {
        match role {
            StageRole::ContentStrategy => self.content = params,
            StageRole::DesignSpec => self.design = params,
            StageRole::VisualCuration => self.visual = params,
            StageRole::NarrativeArchitecture => self.narrative = params,
            StageRole::QualityAssurance => self.quality = params,
        }
        self
    }

    /// Returns the sampling profile for a stage.
    #[must_use]
    pub fn params_for(&self, role: StageRole) -> GenerationParams {
        match role {
            StageRole::ContentStrategy => self.content,
            StageRole::DesignSpec => self.design,
            StageRole::VisualCuration => self.visual,
            StageRole::NarrativeArchitecture => self.narrative,
            StageRole::QualityAssurance => self.quality,
        }
    }

    /// The per-call timeout as a [`Duration`].
    #[must_use]
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.call_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles_differ_per_stage() {
        let config = PipelineConfig::default();
        // QA runs cold, visual runs hot.
        assert!(
            config.params_for(StageRole::QualityAssurance).temperature
                < config.params_for(StageRole::VisualCuration).temperature
        );
    }

    #[test]
    fn test_params_override() {
        let custom = GenerationParams::new(0.1, 0.5, 100);
        let config = PipelineConfig::new().with_params(StageRole::ContentStrategy, custom);
        assert_eq!(config.params_for(StageRole::ContentStrategy), custom);
    }

    #[test]
    fn test_timeout_duration() {
        let config = PipelineConfig::new().with_call_timeout(0.5);
        assert_eq!(config.call_timeout(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert!((config.call_timeout_seconds - 90.0).abs() < f64::EPSILON);
    }
}
