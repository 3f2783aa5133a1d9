//! Stage contract and the five concrete generation stages.
//!
//! A stage renders a deterministic prompt, calls the completion
//! provider with its own sampling profile, decodes the response into
//! its typed payload, and scores the result. Provider failures,
//! timeouts, and unparseable output all collapse into one recovery
//! path: a deterministic fallback payload synthesized from the run
//! context alone. The recovery policy lives in [`run_stage`], defined
//! once for every stage.

mod confidence;
mod content;
mod design;
mod narrative;
mod quality;
mod visual;

pub use confidence::{FALLBACK_SIMPLE, FALLBACK_STANDARD};
pub use content::ContentStrategyStage;
pub use design::DesignSpecStage;
pub use narrative::NarrativeArchitectureStage;
pub use quality::QualityAssuranceStage;
pub use visual::VisualCurationStage;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::completion::CompletionClient;
use crate::context::RunContext;
use crate::errors::{CompletionUnavailable, DeckflowError};
use crate::parser::ResponseParser;

/// The five stage specializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageRole {
    /// Produces the content outline everything else keys off.
    ContentStrategy,
    /// Produces palette, typography, and layouts.
    DesignSpec,
    /// Produces per-unit image prompts.
    VisualCuration,
    /// Produces storytelling overlays.
    NarrativeArchitecture,
    /// Assesses the integrated artifact.
    QualityAssurance,
}

impl StageRole {
    /// Returns the snake_case wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContentStrategy => "content_strategy",
            Self::DesignSpec => "design_spec",
            Self::VisualCuration => "visual_curation",
            Self::NarrativeArchitecture => "narrative_architecture",
            Self::QualityAssurance => "quality_assurance",
        }
    }
}

impl fmt::Display for StageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one stage run.
#[derive(Debug, Clone)]
pub struct StageResult<T> {
    /// Which stage produced this.
    pub role: StageRole,
    /// The typed payload.
    pub payload: T,
    /// Structural-completeness estimate in `[0, 1]`.
    pub confidence_score: f64,
    /// Wall-clock time the stage took.
    pub processing_time_ms: f64,
    /// Whether the payload came from the deterministic fallback.
    pub used_fallback: bool,
    /// Follow-up suggestions attached by the stage.
    pub suggestions: Vec<String>,
}

/// One specialized generation step.
///
/// Implementations are pure templates: prompt rendering, payload
/// extraction, confidence policy, and fallback synthesis. The async
/// work and the recovery policy belong to [`run_stage`].
pub trait GenerationStage: Send + Sync {
    /// Upstream payload the stage consumes.
    type Input: Send + Sync;
    /// Typed payload the stage produces.
    type Payload: Send;

    /// The stage's role.
    fn role(&self) -> StageRole;

    /// Renders the deterministic prompt for this input.
    fn render_prompt(&self, ctx: &RunContext, input: &Self::Input) -> String;

    /// Decodes a parsed JSON object into the payload, returning `None`
    /// when the stage's required-field checklist is not satisfied.
    fn extract(&self, ctx: &RunContext, value: serde_json::Value) -> Option<Self::Payload>;

    /// Scores the structural completeness of a payload. Clamped to
    /// `[0, 1]` by the caller.
    fn confidence(&self, ctx: &RunContext, payload: &Self::Payload) -> f64;

    /// The fixed confidence assigned to fallback payloads.
    fn fallback_confidence(&self) -> f64;

    /// Synthesizes the deterministic fallback payload from the run
    /// context alone. No model call happens here.
    ///
    /// # Errors
    ///
    /// May only fail with [`DeckflowError::SynthesisBug`]; such a
    /// failure aborts the run.
    fn fallback(&self, ctx: &RunContext, input: &Self::Input)
        -> Result<Self::Payload, DeckflowError>;

    /// Follow-up suggestions to attach to the result.
    fn suggestions(&self, used_fallback: bool) -> Vec<String>;
}

/// Runs one stage end to end: prompt, completion, parse, checklist,
/// confidence; fallback on any recoverable failure.
///
/// # Errors
///
/// Fails only when the stage's fallback generator itself fails.
pub async fn run_stage<S: GenerationStage>(
    stage: &S,
    ctx: &RunContext,
    client: &dyn CompletionClient,
    parser: &ResponseParser,
    input: &S::Input,
) -> Result<StageResult<S::Payload>, DeckflowError> {
    let start = Instant::now();
    let role = stage.role();
    let params = ctx.config.params_for(role);
    let prompt = stage.render_prompt(ctx, input);

    debug!(run_id = %ctx.run_id, stage = %role, "stage started");

    let completion = match timeout(ctx.config.call_timeout(), client.complete(&prompt, &params))
        .await
    {
        Ok(Ok(text)) => Some(text),
        Ok(Err(err)) => {
            warn!(run_id = %ctx.run_id, stage = %role, error = %err, "provider call failed");
            None
        }
        Err(_) => {
            let err = CompletionUnavailable::timed_out(ctx.config.call_timeout_seconds);
            warn!(run_id = %ctx.run_id, stage = %role, error = %err, "provider call timed out");
            None
        }
    };

    let payload = completion.and_then(|text| match parser.parse(&text) {
        Ok(value) => {
            let extracted = stage.extract(ctx, value);
            if extracted.is_none() {
                warn!(run_id = %ctx.run_id, stage = %role, "output missing required fields");
            }
            extracted
        }
        Err(err) => {
            warn!(run_id = %ctx.run_id, stage = %role, error = %err, "output unparseable");
            None
        }
    });

    let result = match payload {
        Some(payload) => {
            let confidence_score = stage.confidence(ctx, &payload).clamp(0.0, 1.0);
            StageResult {
                role,
                payload,
                confidence_score,
                processing_time_ms: elapsed_ms(start),
                used_fallback: false,
                suggestions: stage.suggestions(false),
            }
        }
        None => {
            let payload = stage.fallback(ctx, input)?;
            StageResult {
                role,
                payload,
                confidence_score: stage.fallback_confidence(),
                processing_time_ms: elapsed_ms(start),
                used_fallback: true,
                suggestions: stage.suggestions(true),
            }
        }
    };

    debug!(
        run_id = %ctx.run_id,
        stage = %role,
        confidence = result.confidence_score,
        used_fallback = result.used_fallback,
        duration_ms = result.processing_time_ms,
        "stage completed"
    );

    Ok(result)
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::request::GenerationRequest;
    use crate::testing::{FailingCompletionClient, ScriptedCompletionClient, SlowCompletionClient};

    fn ctx() -> RunContext {
        RunContext::new(
            GenerationRequest::new("Rust ownership", 5),
            PipelineConfig::default(),
        )
    }

    #[test]
    fn test_role_names() {
        assert_eq!(StageRole::ContentStrategy.as_str(), "content_strategy");
        assert_eq!(
            serde_json::to_string(&StageRole::QualityAssurance).unwrap(),
            "\"quality_assurance\""
        );
    }

    #[tokio::test]
    async fn test_run_stage_happy_path() {
        let ctx = ctx();
        let client = ScriptedCompletionClient::always(
            r#"{"title": "T", "subtitle": "S",
                "strategy": {"core_message": "m"},
                "units": [
                    {"index": 1, "title": "a", "talking_points": ["p"]},
                    {"index": 2, "title": "b", "talking_points": ["p"]},
                    {"index": 3, "title": "c", "talking_points": ["p"]},
                    {"index": 4, "title": "d", "talking_points": ["p"]}
                ]}"#,
        );
        let parser = ResponseParser::new();
        let stage = ContentStrategyStage::new();

        let result = run_stage(&stage, &ctx, &client, &parser, &())
            .await
            .unwrap();

        assert!(!result.used_fallback);
        assert!((0.0..=1.0).contains(&result.confidence_score));
        assert_eq!(result.payload.units.len(), 4);
        assert!(result.processing_time_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_run_stage_falls_back_on_refusal_text() {
        let ctx = ctx();
        let client = ScriptedCompletionClient::always("I cannot comply.");
        let parser = ResponseParser::new();
        let stage = ContentStrategyStage::new();

        let result = run_stage(&stage, &ctx, &client, &parser, &())
            .await
            .unwrap();

        assert!(result.used_fallback);
        assert!(!result.payload.units.is_empty());
        assert!((result.confidence_score - FALLBACK_STANDARD).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_run_stage_falls_back_on_provider_failure() {
        let ctx = ctx();
        let client = FailingCompletionClient::new("connection refused");
        let parser = ResponseParser::new();
        let stage = ContentStrategyStage::new();

        let result = run_stage(&stage, &ctx, &client, &parser, &())
            .await
            .unwrap();

        assert!(result.used_fallback);
    }

    #[tokio::test]
    async fn test_run_stage_falls_back_on_timeout() {
        let mut ctx = ctx();
        ctx.config.call_timeout_seconds = 0.02;
        let inner = ScriptedCompletionClient::always("{}");
        let client = SlowCompletionClient::new(inner, 200);
        let parser = ResponseParser::new();
        let stage = ContentStrategyStage::new();

        let result = run_stage(&stage, &ctx, &client, &parser, &())
            .await
            .unwrap();

        assert!(result.used_fallback);
    }

    #[tokio::test]
    async fn test_run_stage_checklist_violation_falls_back() {
        let ctx = ctx();
        // Valid JSON, but no units.
        let client = ScriptedCompletionClient::always(r#"{"title": "T", "units": []}"#);
        let parser = ResponseParser::new();
        let stage = ContentStrategyStage::new();

        let result = run_stage(&stage, &ctx, &client, &parser, &())
            .await
            .unwrap();

        assert!(result.used_fallback);
    }
}
