//! Multi-metric pronunciation scoring.
//!
//! Combines the weighted similarity of the [`crate::similarity`] engine
//! with word-overlap, length-ratio, and hesitation heuristics into the
//! sub-scores of a [`PronunciationAnalysis`]: accuracy, fluency, clarity,
//! pacing, and stress pattern.
//!
//! Two weighting variants exist in the product surface and both are
//! implemented here, selected by [`ScoringMode`]:
//!
//! - [`ScoringMode::General`] — everyday spoken-practice exercises, where
//!   whole-utterance similarity dominates
//! - [`ScoringMode::Focused`] — sound-challenge drills, where per-word
//!   accuracy and delivery metrics dominate
//!
//! Scoring is a pure function of its inputs: no state is shared between
//! calls and the same input pair always produces the same analysis.

use crate::feedback;
use crate::normalize::{char_len, normalize, tokenize};
use crate::similarity::phoneme::phoneme_scan;
use crate::similarity::{similarity, SoundAccuracy, ENGLISH_TABLE};

/// Hesitation fillers that discount the fluency score.
pub const HESITATION_MARKERS: &[&str] = &["um", "uh", "er", "ah"];

/// Fluency discount per detected hesitation marker.
pub const HESITATION_PENALTY: f64 = 0.1;

/// Pacing band constants.
///
/// Length ratios inside `[PACING_TIGHT_LOW, PACING_TIGHT_HIGH]` score 1.0,
/// inside `[PACING_LOOSE_LOW, PACING_LOOSE_HIGH]` score 0.8, anything else
/// scores 0.6. The thresholds are empirical product values, kept as
/// constants rather than re-derived.
pub const PACING_TIGHT_LOW: f64 = 0.8;
/// Upper bound of the full-score pacing band.
pub const PACING_TIGHT_HIGH: f64 = 1.2;
/// Lower bound of the reduced-score pacing band.
pub const PACING_LOOSE_LOW: f64 = 0.6;
/// Upper bound of the reduced-score pacing band.
pub const PACING_LOOSE_HIGH: f64 = 1.5;

/// Word length above which a token counts as "long" for stress comparison.
const LONG_WORD_LEN: usize = 5;

/// Which weighting variant to score with.
///
/// Both variants compute the same sub-metrics; they differ only in how
/// the overall score is assembled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum ScoringMode {
    /// Spoken-practice weighting:
    /// `similarity×0.4 + accuracy×0.3 + fluency×0.15 + completeness×0.15`.
    General,
    /// Sound-challenge weighting:
    /// `accuracy×0.3 + fluency×0.25 + clarity×0.2 + pacing×0.15 + stress×0.1`.
    Focused,
}

/// Which completeness definition to use.
///
/// The speak exercise and the conversation exercise measure completeness
/// differently; both definitions are first-class.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompletenessVariant {
    /// Fraction of actual tokens that are alphabetic and longer than two
    /// characters (a proxy for recognizable words).
    Alphabetic,
    /// Fraction of target tokens found anywhere in the actual tokens.
    TokenCoverage,
}

/// Terminal output of the pronunciation path.
///
/// All scores are integers in `[0, 100]`. Created fresh per analysis call
/// and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PronunciationAnalysis {
    /// Mode-weighted combination of the sub-scores.
    pub overall_score: u8,
    /// Word-presence accuracy (or whole-string similarity fallback).
    pub accuracy: u8,
    /// Length-ratio fluency, discounted per hesitation marker.
    pub fluency: u8,
    /// Recognizable-word clarity ([`CompletenessVariant::Alphabetic`]).
    pub clarity: u8,
    /// Triangular length-ratio pacing score.
    pub pacing: u8,
    /// Long/short word stress agreement ratio.
    pub stress_pattern: u8,
    /// Per-occurrence difficult-sound records.
    pub sound_accuracies: Vec<SoundAccuracy>,
    /// Coaching recommendations (capped, templated).
    pub recommendations: Vec<String>,
    /// Observed strengths (capped, templated).
    pub strengths: Vec<String>,
    /// Improvement areas (capped, templated).
    pub improvements: Vec<String>,
}

/// Mean set-membership presence of target tokens among actual tokens.
///
/// Membership, not position: a word counts as present wherever it appears
/// in the transcript. An empty target yields 1.0.
fn presence_ratio(target_tokens: &[String], actual_tokens: &[String]) -> f64 {
    if target_tokens.is_empty() {
        return 1.0;
    }
    let present = target_tokens
        .iter()
        .filter(|w| actual_tokens.contains(w))
        .count();
    present as f64 / target_tokens.len() as f64
}

/// Length-ratio fluency discounted by hesitation markers, floored at 0.
fn fluency_score(target_wc: usize, actual_tokens: &[String]) -> f64 {
    let ratio = if target_wc == 0 {
        1.0
    } else {
        (actual_tokens.len() as f64 / target_wc as f64).min(1.0)
    };
    let hesitations = actual_tokens
        .iter()
        .filter(|w| HESITATION_MARKERS.contains(&w.as_str()))
        .count();
    (ratio - HESITATION_PENALTY * hesitations as f64).max(0.0)
}

/// Completeness under the requested variant.
pub fn completeness(
    target_tokens: &[String],
    actual_tokens: &[String],
    variant: CompletenessVariant,
) -> f64 {
    match variant {
        CompletenessVariant::Alphabetic => {
            if actual_tokens.is_empty() {
                return 0.0;
            }
            let recognizable = actual_tokens
                .iter()
                .filter(|w| w.len() > 2 && w.chars().all(|c| c.is_alphabetic()))
                .count();
            recognizable as f64 / actual_tokens.len() as f64
        }
        CompletenessVariant::TokenCoverage => presence_ratio(target_tokens, actual_tokens),
    }
}

/// Triangular pacing score from the normalized length ratio.
fn pacing_score(target_len: usize, actual_len: usize) -> f64 {
    if target_len == 0 {
        return 0.6;
    }
    let ratio = actual_len as f64 / target_len as f64;
    if (PACING_TIGHT_LOW..=PACING_TIGHT_HIGH).contains(&ratio) {
        1.0
    } else if (PACING_LOOSE_LOW..=PACING_LOOSE_HIGH).contains(&ratio) {
        0.8
    } else {
        0.6
    }
}

/// Agreement ratio of long/short word classification over aligned pairs.
///
/// Compares word pairs at the same index up to the shorter token list;
/// 1.0 when there is nothing to compare.
fn stress_agreement(target_tokens: &[String], actual_tokens: &[String]) -> f64 {
    let compared = target_tokens.len().min(actual_tokens.len());
    if compared == 0 {
        return 1.0;
    }
    let agreements = target_tokens
        .iter()
        .zip(actual_tokens.iter())
        .filter(|(t, a)| (char_len(t) > LONG_WORD_LEN) == (char_len(a) > LONG_WORD_LEN))
        .count();
    agreements as f64 / compared as f64
}

/// Scale a `[0, 1]` ratio to an integer score in `[0, 100]`.
#[inline]
fn to_score(ratio: f64) -> u8 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Score a spoken transcript against a target utterance.
///
/// Both strings are normalized before comparison. An empty transcript
/// yields all-zero scores and a "no speech detected" recommendation —
/// never a panic or a NaN.
///
/// # Example
///
/// ```rust
/// use libfluency::pronunciation::{analyze, ScoringMode};
///
/// let analysis = analyze("Cat, bat, hat", "Cat bat hat", ScoringMode::General);
/// assert_eq!(analysis.accuracy, 100);
/// assert!(analysis.overall_score >= 85);
/// ```
pub fn analyze(target: &str, actual: &str, mode: ScoringMode) -> PronunciationAnalysis {
    let norm_target = normalize(target);
    let norm_actual = normalize(actual);

    if norm_actual.is_empty() {
        let fb = feedback::no_speech_feedback();
        return PronunciationAnalysis {
            overall_score: 0,
            accuracy: 0,
            fluency: 0,
            clarity: 0,
            pacing: 0,
            stress_pattern: 0,
            sound_accuracies: Vec::new(),
            recommendations: fb.recommendations,
            strengths: fb.strengths,
            improvements: fb.improvements,
        };
    }

    let target_tokens = tokenize(target);
    let actual_tokens = tokenize(actual);

    let table = &*ENGLISH_TABLE;
    let sim = similarity(table, &norm_target, &norm_actual);
    let sound_accuracies = phoneme_scan(table, target, actual);

    // With difficult-sound anchors present, accuracy is word-presence;
    // otherwise the whole-string similarity stands in for it.
    let accuracy = if sound_accuracies.is_empty() {
        sim
    } else {
        presence_ratio(&target_tokens, &actual_tokens)
    };

    let fluency = fluency_score(target_tokens.len(), &actual_tokens);
    let clarity = completeness(&target_tokens, &actual_tokens, CompletenessVariant::Alphabetic);
    let coverage = completeness(
        &target_tokens,
        &actual_tokens,
        CompletenessVariant::TokenCoverage,
    );
    let pacing = pacing_score(char_len(&norm_target), char_len(&norm_actual));
    let stress = stress_agreement(&target_tokens, &actual_tokens);

    let overall = match mode {
        ScoringMode::General => sim * 0.4 + accuracy * 0.3 + fluency * 0.15 + coverage * 0.15,
        ScoringMode::Focused => {
            accuracy * 0.3 + fluency * 0.25 + clarity * 0.2 + pacing * 0.15 + stress * 0.1
        }
    };

    let fb = feedback::pronunciation_feedback(
        to_score(accuracy),
        to_score(fluency),
        to_score(pacing),
        &sound_accuracies,
    );

    PronunciationAnalysis {
        overall_score: to_score(overall),
        accuracy: to_score(accuracy),
        fluency: to_score(fluency),
        clarity: to_score(clarity),
        pacing: to_score(pacing),
        stress_pattern: to_score(stress),
        sound_accuracies,
        recommendations: fb.recommendations,
        strengths: fb.strengths,
        improvements: fb.improvements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_utterance_scores_high() {
        let a = analyze("Cat, bat, hat", "Cat bat hat", ScoringMode::General);
        assert_eq!(a.accuracy, 100);
        assert_eq!(a.overall_score, 100);
        assert!(a.sound_accuracies.is_empty());
    }

    #[test]
    fn test_empty_actual_is_all_zero() {
        for mode in [ScoringMode::General, ScoringMode::Focused] {
            let a = analyze("Say something", "", mode);
            assert_eq!(a.overall_score, 0);
            assert_eq!(a.accuracy, 0);
            assert_eq!(a.fluency, 0);
            assert_eq!(a.clarity, 0);
            assert_eq!(a.pacing, 0);
            assert_eq!(a.stress_pattern, 0);
            assert!(!a.recommendations.is_empty());
        }
    }

    #[test]
    fn test_empty_punctuation_only_actual_is_all_zero() {
        let a = analyze("Say something", "?!...", ScoringMode::General);
        assert_eq!(a.overall_score, 0);
    }

    #[test]
    fn test_th_drill_scores_low_accuracy() {
        let a = analyze(
            "Think about three things",
            "Tink about tree tings",
            ScoringMode::Focused,
        );
        assert!(!a.sound_accuracies.is_empty());
        assert!(a.accuracy <= 50);
        assert!(!a.recommendations.is_empty());
    }

    #[test]
    fn test_hesitations_discount_fluency() {
        let clean = analyze("I like green tea", "I like green tea", ScoringMode::General);
        let hesitant = analyze("I like green tea", "I um like uh green tea", ScoringMode::General);
        assert!(hesitant.fluency < clean.fluency);
    }

    #[test]
    fn test_fluency_floor_at_zero() {
        // Every token is a hesitation marker: ratio fully discounted.
        let a = analyze("one two", "um uh er ah um uh er ah um uh er ah", ScoringMode::General);
        assert_eq!(a.fluency, 0);
    }

    #[test]
    fn test_pacing_bands() {
        assert_eq!(pacing_score(10, 10), 1.0);
        assert_eq!(pacing_score(10, 8), 1.0);
        assert_eq!(pacing_score(10, 12), 1.0);
        assert_eq!(pacing_score(10, 7), 0.8);
        assert_eq!(pacing_score(10, 15), 0.8);
        assert_eq!(pacing_score(10, 3), 0.6);
        assert_eq!(pacing_score(10, 30), 0.6);
        assert_eq!(pacing_score(0, 5), 0.6);
    }

    #[test]
    fn test_stress_agreement() {
        let t = vec!["wonderful".to_string(), "day".to_string()];
        let a = vec!["wonderful".to_string(), "day".to_string()];
        assert_eq!(stress_agreement(&t, &a), 1.0);

        let mismatched = vec!["day".to_string(), "wonderful".to_string()];
        assert_eq!(stress_agreement(&t, &mismatched), 0.0);

        assert_eq!(stress_agreement(&[], &[]), 1.0);
    }

    #[test]
    fn test_completeness_variants() {
        let target = vec!["hello".to_string(), "there".to_string()];
        let actual = vec!["hello".to_string(), "x1".to_string()];
        assert_eq!(
            completeness(&target, &actual, CompletenessVariant::Alphabetic),
            0.5
        );
        assert_eq!(
            completeness(&target, &actual, CompletenessVariant::TokenCoverage),
            0.5
        );
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let cases = [
            ("", ""),
            ("a", "completely different utterance with many words"),
            ("short", "a"),
            ("um uh er", "um uh er"),
        ];
        for (t, s) in cases {
            for mode in [ScoringMode::General, ScoringMode::Focused] {
                let a = analyze(t, s, mode);
                assert!(a.overall_score <= 100);
                assert!(a.accuracy <= 100);
                assert!(a.fluency <= 100);
                assert!(a.clarity <= 100);
                assert!(a.pacing <= 100);
                assert!(a.stress_pattern <= 100);
            }
        }
    }
}
