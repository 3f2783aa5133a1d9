//! The completion-provider boundary.
//!
//! Everything beyond [`CompletionClient::complete`] is an external
//! collaborator: the pipeline only requires raw text back and treats
//! any provider failure as a recoverable condition.

mod client;

#[cfg(feature = "providers")]
mod gemini;

pub use client::CompletionClient;

#[cfg(feature = "providers")]
pub use gemini::{GeminiCompletionClient, GeminiConfig};
