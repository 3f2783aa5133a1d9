//! Progress reporting boundary.
//!
//! Reporters receive percentage/phase/message notifications as the
//! pipeline advances. Delivery is fire-and-forget: the orchestrator
//! spawns each notification so a slow or disconnected reporter can
//! never stall a stage, and reporter failures are swallowed.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::info;

/// One progress notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Percent complete, `0..=100`; non-decreasing within one run.
    pub percent: u8,
    /// Machine-readable phase label.
    pub phase: String,
    /// Human-readable message.
    pub message: String,
}

impl ProgressUpdate {
    /// Creates a new update.
    #[must_use]
    pub fn new(percent: u8, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            percent,
            phase: phase.into(),
            message: message.into(),
        }
    }
}

/// Receives progress notifications for a run.
///
/// Implementations must not assume every notification arrives;
/// delivery is best-effort by contract.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// Delivers one notification.
    async fn notify(&self, update: ProgressUpdate);
}

/// Discards all notifications. The default when no reporter is wired.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgressReporter;

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn notify(&self, _update: ProgressUpdate) {}
}

/// Logs notifications through the tracing framework.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressReporter;

#[async_trait]
impl ProgressReporter for TracingProgressReporter {
    async fn notify(&self, update: ProgressUpdate) {
        info!(
            percent = update.percent,
            phase = %update.phase,
            "{}", update.message
        );
    }
}

/// Collects notifications for inspection in tests.
#[derive(Debug, Default)]
pub struct CollectingProgressReporter {
    updates: RwLock<Vec<ProgressUpdate>>,
}

impl CollectingProgressReporter {
    /// Creates a new collecting reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected updates in arrival order.
    #[must_use]
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.read().clone()
    }

    /// Returns just the percentages, in arrival order.
    #[must_use]
    pub fn percents(&self) -> Vec<u8> {
        self.updates.read().iter().map(|u| u.percent).collect()
    }

    /// Returns true if nothing has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.updates.read().is_empty()
    }
}

#[async_trait]
impl ProgressReporter for CollectingProgressReporter {
    async fn notify(&self, update: ProgressUpdate) {
        self.updates.write().push(update);
    }
}
