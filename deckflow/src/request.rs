//! Generation request types and validation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::InvalidRequestError;

/// The voice a generated presentation should speak in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Business-appropriate, measured.
    #[default]
    Professional,
    /// Playful, idea-forward.
    Creative,
    /// Precise, citation-minded.
    Academic,
    /// Warm and approachable.
    Friendly,
    /// Conversational.
    Casual,
}

impl Tone {
    /// Returns the lowercase wire name of the tone.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Creative => "creative",
            Self::Academic => "academic",
            Self::Friendly => "friendly",
            Self::Casual => "casual",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request to generate an artifact. Immutable for the lifetime of
/// a run; every entity the pipeline creates derives from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// What the presentation is about.
    pub topic: String,
    /// Total unit count including the title unit. Must be at least 2;
    /// the pipeline produces `unit_count - 1` content units.
    pub unit_count: usize,
    /// The requested voice.
    #[serde(default)]
    pub tone: Tone,
    /// Visual theme keyword (e.g. "modern", "minimal", "dark").
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Who the artifact is for.
    #[serde(default = "default_audience")]
    pub audience: String,
}

fn default_theme() -> String {
    "modern".to_string()
}

fn default_audience() -> String {
    "general business".to_string()
}

impl GenerationRequest {
    /// Creates a request with default tone, theme, and audience.
    #[must_use]
    pub fn new(topic: impl Into<String>, unit_count: usize) -> Self {
        Self {
            topic: topic.into(),
            unit_count,
            tone: Tone::default(),
            theme: default_theme(),
            audience: default_audience(),
        }
    }

    /// Sets the tone.
    #[must_use]
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }

    /// Sets the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Sets the audience.
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Number of content units the pipeline will produce (the title
    /// unit occupies index 0 conceptually and is not generated per-unit).
    #[must_use]
    pub fn content_unit_count(&self) -> usize {
        self.unit_count.saturating_sub(1)
    }

    /// Validates the request. Rejection happens before any stage runs.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty topic or a unit count below 2.
    pub fn validate(&self) -> Result<(), InvalidRequestError> {
        if self.topic.trim().is_empty() {
            return Err(InvalidRequestError::new("topic must not be empty"));
        }
        if self.unit_count < 2 {
            return Err(InvalidRequestError::new(format!(
                "unit_count must be at least 2, got {}",
                self.unit_count
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let request = GenerationRequest::new("Rust ownership", 6);
        assert!(request.validate().is_ok());
        assert_eq!(request.content_unit_count(), 5);
    }

    #[test]
    fn test_empty_topic_rejected() {
        let request = GenerationRequest::new("   ", 6);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_small_unit_count_rejected() {
        let request = GenerationRequest::new("Rust ownership", 1);
        let err = request.validate().unwrap_err();
        assert!(err.message.contains("unit_count"));
    }

    #[test]
    fn test_builder_methods() {
        let request = GenerationRequest::new("Photosynthesis", 4)
            .with_tone(Tone::Academic)
            .with_theme("minimal")
            .with_audience("students");

        assert_eq!(request.tone, Tone::Academic);
        assert_eq!(request.theme, "minimal");
        assert_eq!(request.audience, "students");
    }

    #[test]
    fn test_tone_serde_roundtrip() {
        let json = serde_json::to_string(&Tone::Academic).unwrap();
        assert_eq!(json, "\"academic\"");
        let tone: Tone = serde_json::from_str("\"casual\"").unwrap();
        assert_eq!(tone, Tone::Casual);
    }
}
