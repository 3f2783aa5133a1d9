//! Test doubles and fixtures.
//!
//! Public so downstream crates can exercise the pipeline without a
//! live provider.

mod fixtures;
mod mocks;

pub use fixtures::{
    content_json, design_json, narrative_json, quality_json, sample_request, visual_json,
};
pub use mocks::{FailingCompletionClient, ScriptedCompletionClient, SlowCompletionClient};
