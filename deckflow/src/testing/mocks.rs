//! Mock completion clients.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

use crate::completion::CompletionClient;
use crate::config::GenerationParams;
use crate::errors::CompletionUnavailable;

/// A completion client that replays scripted responses.
///
/// Responses queued with [`push_ok`](Self::push_ok) /
/// [`push_err`](Self::push_err) are consumed in order; once the queue
/// drains, the default response (set by [`always`](Self::always))
/// answers every further call. Prompts are recorded for inspection.
#[derive(Debug, Default)]
pub struct ScriptedCompletionClient {
    queue: Mutex<VecDeque<Result<String, CompletionUnavailable>>>,
    default_response: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletionClient {
    /// Creates a client with an empty script. Calls past the script
    /// fail as unavailable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client that answers every call with the same text.
    #[must_use]
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            default_response: Some(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queues a successful response.
    pub fn push_ok(&self, text: impl Into<String>) {
        self.queue.lock().push_back(Ok(text.into()));
    }

    /// Queues a provider failure.
    pub fn push_err(&self, reason: impl Into<String>) {
        self.queue
            .lock()
            .push_back(Err(CompletionUnavailable::new(reason)));
    }

    /// Returns every prompt received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Returns how many calls have been made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, CompletionUnavailable> {
        self.prompts.lock().push(prompt.to_string());

        if let Some(response) = self.queue.lock().pop_front() {
            return response;
        }
        match &self.default_response {
            Some(text) => Ok(text.clone()),
            None => Err(CompletionUnavailable::new("script exhausted")),
        }
    }
}

/// A completion client that always fails.
#[derive(Debug, Clone)]
pub struct FailingCompletionClient {
    reason: String,
}

impl FailingCompletionClient {
    /// Creates a client failing with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for FailingCompletionClient {
    async fn complete(
        &self,
        _prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, CompletionUnavailable> {
        Err(CompletionUnavailable::new(self.reason.clone()))
    }
}

/// Wraps another client and delays every call.
#[derive(Debug)]
pub struct SlowCompletionClient<C> {
    inner: C,
    delay: Duration,
}

impl<C> SlowCompletionClient<C> {
    /// Creates a client that sleeps `delay_ms` before delegating.
    #[must_use]
    pub fn new(inner: C, delay_ms: u64) -> Self {
        Self {
            inner,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for SlowCompletionClient<C> {
    async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, CompletionUnavailable> {
        tokio::time::sleep(self.delay).await;
        self.inner.complete(prompt, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GenerationParams {
        GenerationParams::default()
    }

    #[tokio::test]
    async fn test_scripted_queue_then_default() {
        let client = ScriptedCompletionClient::always("default");
        client.push_ok("first");
        client.push_err("down");

        assert_eq!(client.complete("a", &params()).await.unwrap(), "first");
        assert!(client.complete("b", &params()).await.is_err());
        assert_eq!(client.complete("c", &params()).await.unwrap(), "default");
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_script_fails() {
        let client = ScriptedCompletionClient::new();
        assert!(client.complete("a", &params()).await.is_err());
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = FailingCompletionClient::new("offline");
        let err = client.complete("a", &params()).await.unwrap_err();
        assert!(err.reason.contains("offline"));
    }

    #[tokio::test]
    async fn test_slow_client_delays() {
        let client = SlowCompletionClient::new(ScriptedCompletionClient::always("ok"), 20);
        let start = std::time::Instant::now();
        client.complete("a", &params()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
