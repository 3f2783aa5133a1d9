//! Orchestration of the staged pipeline.
//!
//! Phase order is a strict partial order: content strategy first, then
//! design, visual, and narrative concurrently (they depend only on the
//! outline and not on each other), then integration, quality
//! assurance, and final assembly. A run fails only on a synthesis bug;
//! every provider or parsing problem has already been absorbed by the
//! stage fallbacks, so a run with a dead provider still completes,
//! degraded.

use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::artifact::{FinalArtifact, StageReport};
use crate::completion::CompletionClient;
use crate::config::PipelineConfig;
use crate::context::RunContext;
use crate::errors::{DeckflowError, FailureReport};
use crate::finalizer::finalize;
use crate::integrator::build_draft;
use crate::parser::ResponseParser;
use crate::progress::{NoOpProgressReporter, ProgressReporter, ProgressUpdate};
use crate::request::GenerationRequest;
use crate::schema::{ContentOutline, DesignSystem, NarrativePlan, VisualPlan};
use crate::stages::{
    run_stage, ContentStrategyStage, DesignSpecStage, GenerationStage,
    NarrativeArchitectureStage, QualityAssuranceStage, StageResult, StageRole,
    VisualCurationStage,
};

/// Pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Init,
    ContentStrategy,
    Integration,
    QualityAssurance,
    Completed,
}

impl Phase {
    fn label(self) -> &'static str {
        match self {
            Self::Init => "initialization",
            Self::ContentStrategy => "content_strategy",
            Self::Integration => "integration",
            Self::QualityAssurance => "quality_assurance",
            Self::Completed => "completed",
        }
    }
}

/// Checkpoints for the three concurrent enrichment stages, emitted in
/// completion order so the percentage stays non-decreasing no matter
/// which stage finishes first.
const ENRICHMENT_CHECKPOINTS: [u8; 3] = [30, 45, 60];

/// Output of one enrichment task, tagged by stage.
enum Enrichment {
    Design(StageResult<DesignSystem>),
    Visual(StageResult<VisualPlan>),
    Narrative(StageResult<NarrativePlan>),
}

impl Enrichment {
    fn label(&self) -> &'static str {
        match self {
            Self::Design(r) => r.role.as_str(),
            Self::Visual(r) => r.role.as_str(),
            Self::Narrative(r) => r.role.as_str(),
        }
    }
}

/// Orders notifications through one forwarder task so percentages
/// reach the reporter in send order while the pipeline never waits on
/// a slow reporter.
struct ProgressHandle {
    tx: mpsc::UnboundedSender<ProgressUpdate>,
    forwarder: tokio::task::JoinHandle<()>,
}

impl ProgressHandle {
    fn spawn(reporter: Arc<dyn ProgressReporter>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<ProgressUpdate>();
        let forwarder = tokio::spawn(async move {
            while let Some(update) = rx.recv().await {
                reporter.notify(update).await;
            }
        });
        Self { tx, forwarder }
    }

    /// Best-effort send; a dead forwarder (e.g. a reporter that
    /// panicked) is ignored.
    fn send(&self, percent: u8, phase: &str, message: &str) {
        let _ = self.tx.send(ProgressUpdate::new(percent, phase, message));
    }

    /// Gives in-flight notifications a bounded window to drain.
    async fn finish(self) {
        drop(self.tx);
        if tokio::time::timeout(Duration::from_millis(250), self.forwarder)
            .await
            .is_err()
        {
            warn!("progress reporter did not drain in time");
        }
    }
}

/// Drives a request through the five stages to a final artifact.
pub struct Orchestrator {
    client: Arc<dyn CompletionClient>,
    reporter: Arc<dyn ProgressReporter>,
    config: PipelineConfig,
    parser: ResponseParser,
}

impl Orchestrator {
    /// Creates an orchestrator with the default configuration and no
    /// progress reporting.
    #[must_use]
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            reporter: Arc::new(NoOpProgressReporter),
            config: PipelineConfig::default(),
            parser: ResponseParser::new(),
        }
    }

    /// Sets the progress reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Sets the pipeline configuration.
    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the full pipeline for one request.
    ///
    /// Every well-formed request yields a complete artifact: provider
    /// and parsing failures degrade quality (lower confidence,
    /// `used_fallback` markers in the stage reports) instead of
    /// failing the run.
    ///
    /// # Errors
    ///
    /// Returns a [`FailureReport`] for an invalid request or a
    /// synthesis bug; nothing else aborts.
    pub async fn create_artifact(
        &self,
        request: GenerationRequest,
    ) -> Result<FinalArtifact, FailureReport> {
        if let Err(err) = request.validate() {
            return Err(FailureReport::new(
                Uuid::nil(),
                Phase::Init.label(),
                err.into(),
            ));
        }

        let ctx = RunContext::new(request, self.config.clone());
        let run_id = ctx.run_id;
        info!(run_id = %run_id, topic = %ctx.request.topic, "run started");

        let progress = ProgressHandle::spawn(self.reporter.clone());
        let outcome = self.run_pipeline(&ctx, &progress).await;
        progress.finish().await;

        match outcome {
            Ok(artifact) => {
                info!(
                    run_id = %run_id,
                    confidence = artifact.overall_confidence,
                    degraded = artifact.degraded(),
                    "run completed"
                );
                Ok(artifact)
            }
            Err((phase, error)) => {
                warn!(run_id = %run_id, phase, error = %error, "run failed");
                Err(FailureReport::new(run_id, phase, error))
            }
        }
    }

    async fn run_pipeline(
        &self,
        ctx: &RunContext,
        progress: &ProgressHandle,
    ) -> Result<FinalArtifact, (String, DeckflowError)> {
        progress.send(5, Phase::Init.label(), "Initializing generation stages");

        // Content strategy gates everything else.
        progress.send(
            15,
            Phase::ContentStrategy.label(),
            "Creating content strategy",
        );
        let mut content = run_stage(
            &ContentStrategyStage::new(),
            ctx,
            &*self.client,
            &self.parser,
            &(),
        )
        .await
        .map_err(|e| (Phase::ContentStrategy.label().to_string(), e))?;
        content.payload.normalize(ctx.content_unit_count());

        let (design, visual, narrative) = self.run_enrichment(ctx, progress, &content).await?;

        progress.send(75, Phase::Integration.label(), "Integrating stage outputs");
        let draft = build_draft(
            &content.payload,
            &design.payload,
            &visual.payload,
            &narrative.payload,
        );

        progress.send(
            90,
            Phase::QualityAssurance.label(),
            "Performing quality checks",
        );
        let quality = run_stage(
            &QualityAssuranceStage::new(),
            ctx,
            &*self.client,
            &self.parser,
            &draft,
        )
        .await
        .map_err(|e| (Phase::QualityAssurance.label().to_string(), e))?;

        let stage_reports: Vec<StageReport> = vec![
            StageReport::from(&content),
            StageReport::from(&design),
            StageReport::from(&visual),
            StageReport::from(&narrative),
            StageReport::from(&quality),
        ];

        let artifact = finalize(ctx.run_id, draft, quality.payload, stage_reports);
        progress.send(100, Phase::Completed.label(), "Artifact creation completed");

        Ok(artifact)
    }

    /// Runs design, visual, and narrative concurrently. All three
    /// depend only on the content outline; at most three provider
    /// calls are outstanding at once.
    async fn run_enrichment(
        &self,
        ctx: &RunContext,
        progress: &ProgressHandle,
        content: &StageResult<ContentOutline>,
    ) -> Result<
        (
            StageResult<DesignSystem>,
            StageResult<VisualPlan>,
            StageResult<NarrativePlan>,
        ),
        (String, DeckflowError),
    > {
        let outline = Arc::new(content.payload.clone());

        let mut tasks: FuturesUnordered<
            tokio::task::JoinHandle<Result<Enrichment, (String, DeckflowError)>>,
        > = FuturesUnordered::new();

        {
            let client = Arc::clone(&self.client);
            let parser = self.parser.clone();
            let ctx = ctx.clone();
            let outline = Arc::clone(&outline);
            tasks.push(tokio::spawn(async move {
                let stage = DesignSpecStage::new();
                run_stage(&stage, &ctx, &*client, &parser, outline.as_ref())
                    .await
                    .map(Enrichment::Design)
                    .map_err(|e| (stage.role().as_str().to_string(), e))
            }));
        }
        {
            let client = Arc::clone(&self.client);
            let parser = self.parser.clone();
            let ctx = ctx.clone();
            let outline = Arc::clone(&outline);
            tasks.push(tokio::spawn(async move {
                let stage = VisualCurationStage::new();
                run_stage(&stage, &ctx, &*client, &parser, outline.as_ref())
                    .await
                    .map(Enrichment::Visual)
                    .map_err(|e| (stage.role().as_str().to_string(), e))
            }));
        }
        {
            let client = Arc::clone(&self.client);
            let parser = self.parser.clone();
            let ctx = ctx.clone();
            let outline = Arc::clone(&outline);
            tasks.push(tokio::spawn(async move {
                let stage = NarrativeArchitectureStage::new();
                run_stage(&stage, &ctx, &*client, &parser, outline.as_ref())
                    .await
                    .map(Enrichment::Narrative)
                    .map_err(|e| (stage.role().as_str().to_string(), e))
            }));
        }

        let mut design = None;
        let mut visual = None;
        let mut narrative = None;
        let mut completed = 0usize;

        while let Some(joined) = tasks.next().await {
            let outcome = joined.map_err(|e| {
                (
                    "enrichment".to_string(),
                    DeckflowError::synthesis_bug(
                        StageRole::DesignSpec,
                        format!("enrichment task panicked: {e}"),
                    ),
                )
            })??;

            if let Some(&percent) = ENRICHMENT_CHECKPOINTS.get(completed) {
                progress.send(
                    percent,
                    outcome.label(),
                    &format!("{} completed", outcome.label()),
                );
            }
            completed += 1;

            match outcome {
                Enrichment::Design(r) => design = Some(r),
                Enrichment::Visual(r) => visual = Some(r),
                Enrichment::Narrative(r) => narrative = Some(r),
            }
        }

        match (design, visual, narrative) {
            (Some(d), Some(v), Some(n)) => Ok((d, v, n)),
            _ => Err((
                "enrichment".to_string(),
                DeckflowError::synthesis_bug(
                    StageRole::DesignSpec,
                    "an enrichment stage produced no result",
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::CollectingProgressReporter;
    use crate::testing::{sample_request, FailingCompletionClient, ScriptedCompletionClient};

    #[tokio::test]
    async fn test_invalid_request_rejected_before_any_stage() {
        let client = Arc::new(ScriptedCompletionClient::new());
        let orchestrator = Orchestrator::new(Arc::clone(&client) as Arc<dyn CompletionClient>);

        let result = orchestrator
            .create_artifact(GenerationRequest::new("", 4))
            .await;

        assert!(result.is_err());
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fallback_only_run_completes() {
        let client = Arc::new(FailingCompletionClient::new("provider down"));
        let orchestrator = Orchestrator::new(client);

        let artifact = orchestrator.create_artifact(sample_request()).await.unwrap();

        assert_eq!(artifact.units.len(), 3);
        assert!(artifact.degraded());
        assert!(artifact.overall_confidence >= 0.5);
        for report in &artifact.stage_reports {
            assert!(report.used_fallback);
        }
    }

    #[tokio::test]
    async fn test_progress_is_monotone_and_ends_at_100() {
        let client = Arc::new(FailingCompletionClient::new("down"));
        let reporter = Arc::new(CollectingProgressReporter::new());
        let orchestrator = Orchestrator::new(client)
            .with_reporter(Arc::clone(&reporter) as Arc<dyn ProgressReporter>);

        orchestrator.create_artifact(sample_request()).await.unwrap();

        let percents = reporter.percents();
        assert!(!percents.is_empty());
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(percents.last().copied(), Some(100));
    }
}
