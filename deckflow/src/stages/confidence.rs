//! Confidence scoring policy.
//!
//! The weights are heuristic, preserved as the existing contract:
//! they estimate structural completeness, not semantic correctness.
//! Treat them as replaceable policy. Tests should assert that a score
//! is drawn from this policy and lies in `[0, 1]`, not that any
//! particular number is correct.

/// Base score for any payload that passed the required-field checklist.
pub(crate) const BASE: f64 = 0.5;

/// Bonus when the payload carries its top-level strategy/summary field.
pub(crate) const ENVELOPE_BONUS: f64 = 0.2;

/// Bonus when the per-unit collection is present and non-empty.
pub(crate) const COLLECTION_BONUS: f64 = 0.2;

/// Bonus when the per-unit collection is deep enough.
pub(crate) const DEPTH_BONUS: f64 = 0.1;

/// Fixed confidence for content, visual, and narrative fallbacks.
pub const FALLBACK_STANDARD: f64 = 0.6;

/// Fixed confidence for design and quality-assurance fallbacks; their
/// schemas are simpler and more reliably synthesizable.
pub const FALLBACK_SIMPLE: f64 = 0.7;

/// Scores a payload from its structural shape.
///
/// `expected` is the number of per-unit entries a complete payload
/// would carry; the depth bonus threshold is 3, relaxed to `expected`
/// for short runs.
pub(crate) fn structural(has_envelope: bool, collection_len: usize, expected: usize) -> f64 {
    let mut score = BASE;
    if has_envelope {
        score += ENVELOPE_BONUS;
    }
    if collection_len > 0 {
        score += COLLECTION_BONUS;
        if collection_len >= expected.min(3) {
            score += DEPTH_BONUS;
        }
    }
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_range() {
        for envelope in [false, true] {
            for len in 0..6 {
                let score = structural(envelope, len, 4);
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn test_bare_checklist_pass_scores_base() {
        assert!((structural(false, 0, 4) - BASE).abs() < 1e-9);
    }

    #[test]
    fn test_full_shape_scores_highest() {
        let full = structural(true, 5, 4);
        let partial = structural(true, 1, 4);
        assert!(full > partial);
        assert!((full - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_run_relaxes_depth_threshold() {
        // Two expected units: a two-entry collection earns the depth bonus.
        let short = structural(false, 2, 2);
        assert!((short - (BASE + COLLECTION_BONUS + DEPTH_BONUS)).abs() < 1e-9);
        // Four expected units: two entries miss the threshold.
        let long = structural(false, 2, 4);
        assert!((long - (BASE + COLLECTION_BONUS)).abs() < 1e-9);
    }
}
