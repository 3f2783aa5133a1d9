//! Final assembly.
//!
//! Pure aggregation: folds the quality assessment into the integrated
//! draft and computes the overall confidence. No stage is re-invoked
//! here.

use chrono::Utc;
use uuid::Uuid;

use crate::artifact::{DeckDraft, FinalArtifact, StageReport};
use crate::schema::QualityAssessment;

/// Assembles the final artifact from the integrated draft, the quality
/// assessment, and the five stage reports.
///
/// `overall_confidence` is the unweighted arithmetic mean of the stage
/// confidence scores. The quality assessment's own 0-10 score lives on
/// a different scale and is reported separately, never mixed in.
#[must_use]
pub fn finalize(
    run_id: Uuid,
    draft: DeckDraft,
    quality_assessment: QualityAssessment,
    stage_reports: Vec<StageReport>,
) -> FinalArtifact {
    let overall_confidence = mean_confidence(&stage_reports);

    FinalArtifact {
        run_id,
        title: draft.title,
        subtitle: draft.subtitle,
        design: draft.design,
        units: draft.units,
        strategy: draft.strategy,
        quality_assessment,
        stage_reports,
        overall_confidence,
        created_at: Utc::now(),
    }
}

fn mean_confidence(reports: &[StageReport]) -> f64 {
    if reports.is_empty() {
        return 0.0;
    }
    let total: f64 = reports.iter().map(|r| r.confidence_score).sum();
    total / reports.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DesignSystem;
    use crate::stages::StageRole;

    fn report(role: StageRole, confidence: f64) -> StageReport {
        StageReport {
            role,
            confidence_score: confidence,
            processing_time_ms: 1.0,
            used_fallback: false,
            suggestions: Vec::new(),
        }
    }

    fn draft() -> DeckDraft {
        DeckDraft {
            title: "T".to_string(),
            subtitle: "S".to_string(),
            design: DesignSystem::default(),
            units: Vec::new(),
            strategy: None,
        }
    }

    #[test]
    fn test_overall_confidence_is_the_mean() {
        let reports = vec![
            report(StageRole::ContentStrategy, 0.9),
            report(StageRole::DesignSpec, 0.7),
            report(StageRole::VisualCuration, 0.8),
            report(StageRole::NarrativeArchitecture, 0.6),
            report(StageRole::QualityAssurance, 1.0),
        ];

        let artifact = finalize(
            Uuid::new_v4(),
            draft(),
            QualityAssessment::default(),
            reports,
        );

        assert!((artifact.overall_confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_qa_scale_is_not_mixed_into_confidence() {
        let reports = vec![report(StageRole::ContentStrategy, 0.5)];
        let assessment = QualityAssessment {
            overall_score: 10.0,
            ..QualityAssessment::default()
        };

        let artifact = finalize(Uuid::new_v4(), draft(), assessment, reports);

        // Confidence stays on the [0,1] scale regardless of QA's score.
        assert!((artifact.overall_confidence - 0.5).abs() < 1e-9);
        assert!((artifact.quality_assessment.overall_score - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_reports_means_zero_confidence() {
        let artifact = finalize(
            Uuid::new_v4(),
            draft(),
            QualityAssessment::default(),
            Vec::new(),
        );
        assert!(artifact.overall_confidence.abs() < f64::EPSILON);
    }
}
