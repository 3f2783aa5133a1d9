//! Per-run context.
//!
//! One `RunContext` is constructed per orchestration run and passed by
//! reference through orchestrator, stages, and integrator. Nothing in
//! the pipeline is process-global, so concurrent runs never share
//! mutable state.

use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::request::GenerationRequest;

/// Immutable context for one orchestration run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Unique identity of this run.
    pub run_id: Uuid,
    /// The request that started the run.
    pub request: GenerationRequest,
    /// Pipeline configuration in effect.
    pub config: PipelineConfig,
}

impl RunContext {
    /// Creates a context with a fresh run id.
    #[must_use]
    pub fn new(request: GenerationRequest, config: PipelineConfig) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            request,
            config,
        }
    }

    /// Number of content units this run will produce.
    #[must_use]
    pub fn content_unit_count(&self) -> usize {
        self.request.content_unit_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_run_gets_a_fresh_id() {
        let request = GenerationRequest::new("Topic", 4);
        let a = RunContext::new(request.clone(), PipelineConfig::default());
        let b = RunContext::new(request, PipelineConfig::default());
        assert_ne!(a.run_id, b.run_id);
        assert_eq!(a.content_unit_count(), 3);
    }
}
