//! Correction aggregation and scoring.
//!
//! The aggregator merges the local rule engine's findings with an optional
//! externally supplied correction (typically from a remote AI service),
//! rewrites the text by position-indexed splicing, and computes the
//! severity-weighted category scores of a [`CorrectionResult`].
//!
//! The external correction is an explicit, already-structured input: any
//! parsing of a collaborator's free-text response happens at the
//! collaborator boundary, never here. Its absence or failure is a normal
//! state — the aggregator degrades to local-only results and never blocks,
//! retries, or errors on the collaborator's behalf.
//!
//! # Splicing order
//!
//! `corrected` is produced by applying every surviving error to the
//! original text in **descending** start order. Descending order is
//! mandatory: each splice changes the length of the tail, so ascending
//! application would corrupt the offsets of every error after the first.

use crate::feedback;
use crate::normalize::word_count;
use crate::rules::types::DetectedError;

/// Optional category-score overrides supplied by an external corrector.
///
/// Each field overrides the locally computed score independently; `None`
/// falls back to the local value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ScoreHints {
    /// Grammar score override in `[0, 100]`.
    pub grammar: Option<u8>,
    /// Vocabulary score override in `[0, 100]`.
    pub vocabulary: Option<u8>,
    /// Style score override in `[0, 100]`.
    pub style: Option<u8>,
    /// Overall score override in `[0, 100]`.
    pub overall: Option<u8>,
}

/// A correction payload from a collaborator outside the core.
///
/// Every field is optional; an entirely empty value behaves exactly like
/// passing no external correction at all.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ExternalCorrection {
    /// Full corrected text; when present and non-empty it takes precedence
    /// over the locally spliced text.
    pub corrected_text: Option<String>,
    /// Category-score overrides.
    pub score_hints: ScoreHints,
    /// Externally detected errors, spans indexing the original text.
    pub errors: Vec<DetectedError>,
}

impl ExternalCorrection {
    /// A correction carrying only a corrected text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            corrected_text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Severity-to-score weighting constants.
///
/// These are empirical product values with no documented derivation;
/// they are preserved as configuration rather than re-derived, since
/// changing them would be a behavior change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreWeights {
    /// Multiplier on the grammar-bucket error rate.
    pub grammar: f64,
    /// Multiplier on the vocabulary-bucket error rate.
    pub vocabulary: f64,
    /// Multiplier on the style-bucket error rate.
    pub style: f64,
    /// Multiplier on the severity-weighted overall error rate.
    pub overall: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            grammar: 150.0,
            vocabulary: 100.0,
            style: 80.0,
            overall: 50.0,
        }
    }
}

/// Terminal output of the correction path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CorrectionResult {
    /// The input text, unchanged.
    pub original: String,
    /// The corrected text.
    pub corrected: String,
    /// Surviving errors, sorted by start offset, non-overlapping.
    pub errors: Vec<DetectedError>,
    /// Severity-weighted overall score in `[0, 100]`.
    pub overall_score: u8,
    /// Grammar-bucket score in `[0, 100]`.
    pub grammar_score: u8,
    /// Vocabulary-bucket score in `[0, 100]`.
    pub vocabulary_score: u8,
    /// Style-bucket score in `[0, 100]`.
    pub style_score: u8,
    /// Capped, templated suggestion list.
    pub suggestions: Vec<String>,
    /// One-sentence summary of the error counts.
    pub explanation: String,
}

/// Apply a set of corrections to `original` by descending-order splicing.
///
/// Errors are sorted by descending start offset and spliced one at a time;
/// spans are codepoint offsets into `original`. Errors whose span falls
/// outside the text (a collaborator bug) are skipped rather than panicking.
///
/// Callers uphold that the spans are mutually non-overlapping; the rule
/// engine and [`aggregate`] both guarantee this for their outputs.
pub fn splice(original: &str, errors: &[DetectedError]) -> String {
    let mut chars: Vec<char> = original.chars().collect();
    let len = chars.len();

    let mut ordered: Vec<&DetectedError> = errors
        .iter()
        .filter(|e| e.span.start < e.span.end && e.span.end <= len)
        .collect();
    ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    for error in ordered {
        chars.splice(error.span.start..error.span.end, error.corrected.chars());
    }

    chars.into_iter().collect()
}

/// Merge local and external error lists.
///
/// Identical spans deduplicate to the higher-confidence error, external
/// winning ties. External errors with invalid spans, or overlapping a
/// surviving error at a different anchor, are dropped so the merged list
/// stays spliceable.
fn merge_errors(
    text_len: usize,
    local: Vec<DetectedError>,
    external: &[DetectedError],
) -> Vec<DetectedError> {
    let mut merged = local;

    for ext in external {
        if ext.span.start >= ext.span.end || ext.span.end > text_len {
            continue;
        }
        if let Some(existing) = merged.iter_mut().find(|e| e.span == ext.span) {
            if ext.confidence >= existing.confidence {
                *existing = ext.clone();
            }
            continue;
        }
        if merged.iter().any(|e| e.span.overlaps(&ext.span)) {
            continue;
        }
        merged.push(ext.clone());
    }

    merged.sort_by_key(|e| e.span.start);
    merged
}

/// Round a score formula result into `[0, 100]`.
#[inline]
fn clamp_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

/// Compute `(grammar, vocabulary, style, overall)` category scores.
fn category_scores(errors: &[DetectedError], words: usize, weights: &ScoreWeights) -> (u8, u8, u8, u8) {
    let words = words.max(1) as f64;

    let grammar_errors = errors.iter().filter(|e| e.category.is_grammar()).count() as f64;
    let vocabulary_errors = errors.iter().filter(|e| e.category.is_vocabulary()).count() as f64;
    let style_errors = errors.iter().filter(|e| e.category.is_style()).count() as f64;
    let severity_weight: u32 = errors.iter().map(|e| e.severity.weight()).sum();

    (
        clamp_score(100.0 - (grammar_errors / words) * weights.grammar),
        clamp_score(100.0 - (vocabulary_errors / words) * weights.vocabulary),
        clamp_score(100.0 - (style_errors / words) * weights.style),
        clamp_score(100.0 - (f64::from(severity_weight) / words) * weights.overall),
    )
}

/// Merge local errors with an optional external correction into a
/// [`CorrectionResult`].
///
/// Field-by-field precedence: the external corrected text and each
/// supplied score hint override the locally derived value independently;
/// anything the external source omits falls back to the local computation.
pub fn aggregate(
    original: &str,
    local_errors: Vec<DetectedError>,
    external: Option<&ExternalCorrection>,
) -> CorrectionResult {
    let text_len = original.chars().count();
    let errors = match external {
        Some(ext) => merge_errors(text_len, local_errors, &ext.errors),
        None => local_errors,
    };

    let corrected = external
        .and_then(|ext| ext.corrected_text.clone())
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| splice(original, &errors));

    let weights = ScoreWeights::default();
    let (mut grammar, mut vocabulary, mut style, mut overall) =
        category_scores(&errors, word_count(original), &weights);

    if let Some(hints) = external.map(|ext| ext.score_hints) {
        if let Some(h) = hints.grammar {
            grammar = h.min(100);
        }
        if let Some(h) = hints.vocabulary {
            vocabulary = h.min(100);
        }
        if let Some(h) = hints.style {
            style = h.min(100);
        }
        if let Some(h) = hints.overall {
            overall = h.min(100);
        }
    }

    let fb = feedback::correction_feedback(&errors, grammar, vocabulary, style);

    CorrectionResult {
        original: original.to_string(),
        corrected,
        errors,
        overall_score: overall,
        grammar_score: grammar,
        vocabulary_score: vocabulary,
        style_score: style,
        suggestions: fb.suggestions,
        explanation: fb.explanation,
    }
}
