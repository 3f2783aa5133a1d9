//! Error types for the deckflow pipeline.
//!
//! The taxonomy splits cleanly into recoverable and fatal classes.
//! Provider failures and malformed model output are recovered inside
//! the owning stage via its fallback payload and never cross the stage
//! boundary. Only a broken fallback generator (a defect, not an
//! external condition) or an invalid request may abort a run.

use thiserror::Error;
use uuid::Uuid;

use crate::stages::StageRole;

/// The main error type for deckflow operations.
#[derive(Debug, Error)]
pub enum DeckflowError {
    /// The request was rejected before any stage ran.
    #[error("{0}")]
    InvalidRequest(#[from] InvalidRequestError),

    /// The completion provider was unreachable or rejected the call.
    ///
    /// Handled inside the owning stage; callers of the orchestrator
    /// never observe this variant.
    #[error("{0}")]
    CompletionUnavailable(#[from] CompletionUnavailable),

    /// Model output could not be parsed into the stage's schema.
    ///
    /// Handled inside the owning stage, identically to
    /// [`DeckflowError::CompletionUnavailable`].
    #[error("{0}")]
    MalformedOutput(#[from] ParseFailure),

    /// A fallback generator itself failed.
    ///
    /// This is the one class that aborts a run: it indicates the
    /// deterministic templates are broken, not that an external
    /// collaborator misbehaved.
    #[error("synthesis bug in {stage} stage: {message}")]
    SynthesisBug {
        /// The stage whose fallback failed.
        stage: StageRole,
        /// What went wrong.
        message: String,
    },
}

impl DeckflowError {
    /// Creates a synthesis-bug error for a stage.
    #[must_use]
    pub fn synthesis_bug(stage: StageRole, message: impl Into<String>) -> Self {
        Self::SynthesisBug {
            stage,
            message: message.into(),
        }
    }

    /// Returns true if the error is recovered locally by stage fallback.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::CompletionUnavailable(_) | Self::MalformedOutput(_)
        )
    }
}

/// Error raised when the completion provider is down or rejects a call.
///
/// A per-call timeout elapsing is reported through this same type, so
/// timeouts and provider outages follow one recovery path.
#[derive(Debug, Clone, Error)]
#[error("completion unavailable: {reason}")]
pub struct CompletionUnavailable {
    /// Why the provider call did not produce text.
    pub reason: String,
}

impl CompletionUnavailable {
    /// Creates a new provider-unavailable error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Creates the timeout flavor of the error.
    #[must_use]
    pub fn timed_out(seconds: f64) -> Self {
        Self::new(format!("call exceeded {seconds}s timeout"))
    }
}

/// Error returned when no JSON object could be extracted from model text.
#[derive(Debug, Clone, Error)]
#[error("no JSON object found in model output ({length} chars)")]
pub struct ParseFailure {
    /// Length of the text that failed to parse.
    pub length: usize,
}

impl ParseFailure {
    /// Creates a parse failure for the given raw text.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        Self {
            length: text.len(),
        }
    }
}

/// Error raised when a request fails validation.
#[derive(Debug, Clone, Error)]
#[error("invalid request: {message}")]
pub struct InvalidRequestError {
    /// The validation message.
    pub message: String,
}

impl InvalidRequestError {
    /// Creates a new invalid-request error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Report returned to callers when a run aborts.
///
/// Emitted only for the non-recoverable classes: every provider or
/// parsing failure is absorbed into fallback content instead.
#[derive(Debug, Error)]
#[error("run {run_id} failed during {phase}: {error}")]
pub struct FailureReport {
    /// The run that failed.
    pub run_id: Uuid,
    /// Label of the phase that was executing.
    pub phase: String,
    /// The underlying error.
    #[source]
    pub error: DeckflowError,
}

impl FailureReport {
    /// Creates a new failure report.
    #[must_use]
    pub fn new(run_id: Uuid, phase: impl Into<String>, error: DeckflowError) -> Self {
        Self {
            run_id,
            phase: phase.into(),
            error,
        }
    }
}
