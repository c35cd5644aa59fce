//! # libfluency
//!
//! Deterministic text analysis for language learning: pronunciation
//! scoring and rule-based grammar/spelling correction.
//!
//! The crate is the pure core behind a learning product's speaking and
//! writing exercises. It has two entry points:
//!
//! - [`analyze_pronunciation`] scores a spoken transcript against a target
//!   utterance with a phoneme-aware weighted edit distance, decomposed
//!   into accuracy, fluency, clarity, pacing, and stress sub-scores.
//! - [`correct_text`] scans text against an ordered table of declarative
//!   correction rules, merges in an optional externally supplied
//!   correction, rewrites the text, and produces severity-weighted
//!   category scores.
//!
//! Both paths are synchronous, side-effect-free, and deterministic: the
//! only shared state is a pair of read-only tables (the phonetic
//! substitution table and the correction rule table) built once per
//! process, so any number of analyses may run concurrently without
//! locking. Speech capture, transcription, and the remote correction
//! service are collaborators outside this crate; their output arrives
//! here as plain strings and optional structured payloads.
//!
//! ## Example
//!
//! ```rust
//! use libfluency::prelude::*;
//!
//! let analysis = analyze_pronunciation("Cat, bat, hat", "Cat bat hat", ScoringMode::General);
//! assert!(analysis.overall_score >= 85);
//!
//! let result = correct_text("Im going to the store", None);
//! assert_eq!(result.corrected, "I'm going to the store");
//! ```
//!
//! ## Offsets
//!
//! All spans are codepoint offsets into the original input text, never
//! byte offsets. Callers must not mix the two.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod feedback;
pub mod normalize;
pub mod pronunciation;
pub mod rules;
pub mod similarity;

pub use aggregate::{CorrectionResult, ExternalCorrection, ScoreHints};
pub use pronunciation::{PronunciationAnalysis, ScoringMode};
pub use rules::{DetectedError, ErrorCategory, Severity, Span};
pub use similarity::SoundAccuracy;

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::aggregate::{CorrectionResult, ExternalCorrection, ScoreHints};
    pub use crate::feedback::SessionContext;
    pub use crate::pronunciation::{PronunciationAnalysis, ScoringMode};
    pub use crate::rules::{DetectedError, ErrorCategory, RuleTable, Severity, Span};
    pub use crate::similarity::{SoundAccuracy, SubstitutionTable};
    pub use crate::{analyze_pronunciation, correct_text};
}

/// Score a spoken transcript against a target utterance.
///
/// `mode` selects the weighting variant: [`ScoringMode::General`] for
/// everyday spoken practice, [`ScoringMode::Focused`] for sound-challenge
/// drills. Empty or unrecognizable speech yields an all-zero analysis
/// with a "no speech detected" recommendation; the function never panics.
pub fn analyze_pronunciation(
    target: &str,
    spoken: &str,
    mode: ScoringMode,
) -> PronunciationAnalysis {
    pronunciation::analyze(target, spoken, mode)
}

/// Correct a text against the built-in rule table, optionally merging an
/// externally supplied correction.
///
/// The external correction is merged field by field: its corrected text
/// and any supplied score hints take precedence, everything else falls
/// back to the locally computed values. Passing `None` (the external
/// service being absent, failed, or timed out) is a normal state and
/// yields the local-only result.
pub fn correct_text(text: &str, external: Option<&ExternalCorrection>) -> CorrectionResult {
    let local_errors = rules::default_table().apply(text);
    aggregate::aggregate(text, local_errors, external)
}
