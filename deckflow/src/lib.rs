//! # Deckflow
//!
//! A staged generation pipeline that turns a single request ("build a
//! presentation about X") into a structured, multi-part artifact by
//! composing the outputs of five specialized completion stages.
//!
//! Deckflow provides:
//!
//! - **Stage contracts**: each stage renders a deterministic prompt,
//!   calls the completion provider with its own sampling profile, and
//!   decodes the response into a typed payload
//! - **Confidence scoring**: every stage scores the structural
//!   completeness of its own output
//! - **Deterministic fallbacks**: provider failures, timeouts, and
//!   malformed output all degrade to templated content instead of
//!   failing the run
//! - **Cross-stage integration**: independently-produced per-unit data
//!   is joined by unit index into one coherent structure
//! - **Progress reporting**: fire-and-forget notifications with
//!   non-decreasing percentages
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use deckflow::prelude::*;
//! use std::sync::Arc;
//!
//! let client: Arc<dyn CompletionClient> = Arc::new(my_client);
//! let orchestrator = Orchestrator::new(client)
//!     .with_reporter(Arc::new(TracingProgressReporter));
//!
//! let artifact = orchestrator
//!     .create_artifact(GenerationRequest::new("Rust ownership", 6))
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation
)]

pub mod artifact;
pub mod completion;
pub mod config;
pub mod context;
pub mod errors;
pub mod finalizer;
pub mod integrator;
pub mod observability;
pub mod orchestrator;
pub mod parser;
pub mod progress;
pub mod request;
pub mod schema;
pub mod stages;
pub mod testing;


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::artifact::{DeckDraft, FinalArtifact, IntegratedUnit, StageReport};
    pub use crate::completion::CompletionClient;
    pub use crate::config::{GenerationParams, PipelineConfig, QualityCriteria};
    pub use crate::context::RunContext;
    pub use crate::errors::{
        CompletionUnavailable, DeckflowError, FailureReport, InvalidRequestError, ParseFailure,
    };
    pub use crate::orchestrator::Orchestrator;
    pub use crate::parser::ResponseParser;
    pub use crate::progress::{
        CollectingProgressReporter, NoOpProgressReporter, ProgressReporter, ProgressUpdate,
        TracingProgressReporter,
    };
    pub use crate::request::{GenerationRequest, Tone};
    pub use crate::schema::{
        ContentOutline, DesignSystem, NarrativePlan, QualityAssessment, VisualPlan,
    };
    pub use crate::stages::{GenerationStage, StageResult, StageRole};
}
