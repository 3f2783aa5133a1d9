//! Completion client trait.

use async_trait::async_trait;

use crate::config::GenerationParams;
use crate::errors::CompletionUnavailable;

/// A text-completion provider.
///
/// Implementations make no structural guarantees about the returned
/// text: it may be malformed, fenced, or wrapped in prose. The stage
/// layer owns parsing and recovery; clients only move bytes.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Requests a completion for the prompt with the given sampling
    /// parameters.
    ///
    /// # Errors
    ///
    /// Fails with [`CompletionUnavailable`] when the provider is
    /// unreachable or rejects the request. Callers must treat this
    /// identically to unparseable output.
    async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, CompletionUnavailable>;
}
