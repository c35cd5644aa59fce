//! Type definitions for declarative correction rules.
//!
//! A correction rule couples a matcher (a regular-expression source), a
//! corrector (how matched text is rewritten), and reporting metadata
//! (category, severity, explanation, example corrections). Rules are plain
//! data declared at process start; the engine in
//! [`crate::rules::engine`] is independent of any specific rule content.

use std::fmt;

/// Category of a correction rule and of the errors it detects.
///
/// Categories group rules for reporting and drive the score buckets of the
/// aggregator: grammar (subject-verb, tense, article, preposition),
/// vocabulary (spelling), and style (punctuation, contraction, word order).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum ErrorCategory {
    /// Missing or malformed contraction ("Im" for "I'm").
    Contraction,
    /// Common misspelling ("recieve" for "receive").
    Spelling,
    /// Subject-verb agreement ("I has" for "I have").
    SubjectVerb,
    /// Incorrect tense form ("goed" for "went").
    Tense,
    /// Article usage ("a apple" for "an apple").
    Article,
    /// Preposition choice ("married with" for "married to").
    Preposition,
    /// Word order ("always I" for "I always").
    WordOrder,
    /// Punctuation and capitalization mechanics.
    Punctuation,
}

impl ErrorCategory {
    /// Stable lowercase label, used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Contraction => "contraction",
            ErrorCategory::Spelling => "spelling",
            ErrorCategory::SubjectVerb => "subject-verb agreement",
            ErrorCategory::Tense => "tense",
            ErrorCategory::Article => "article",
            ErrorCategory::Preposition => "preposition",
            ErrorCategory::WordOrder => "word order",
            ErrorCategory::Punctuation => "punctuation",
        }
    }

    /// Whether errors of this category count toward the grammar score.
    #[inline]
    pub fn is_grammar(&self) -> bool {
        matches!(
            self,
            ErrorCategory::SubjectVerb
                | ErrorCategory::Tense
                | ErrorCategory::Article
                | ErrorCategory::Preposition
        )
    }

    /// Whether errors of this category count toward the vocabulary score.
    #[inline]
    pub fn is_vocabulary(&self) -> bool {
        matches!(self, ErrorCategory::Spelling)
    }

    /// Whether errors of this category count toward the style score.
    #[inline]
    pub fn is_style(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Punctuation | ErrorCategory::Contraction | ErrorCategory::WordOrder
        )
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a detected error, used to weight the overall score.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Severity {
    /// Cosmetic; the sentence is fully understandable.
    Minor,
    /// Noticeable; meaning survives but reads wrong.
    Moderate,
    /// Meaning-impairing or a hallmark learner error.
    Major,
}

impl Severity {
    /// Weight used by the overall-score formula (1/2/3).
    #[inline]
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Minor => 1,
            Severity::Moderate => 2,
            Severity::Major => 3,
        }
    }

    /// Stable lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Minor => "minor",
            Severity::Moderate => "moderate",
            Severity::Major => "major",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A codepoint-offset span into the original input text.
///
/// Invariant: `0 <= start < end <= len(text)` in codepoints. Spans always
/// index the *original* text, never any intermediate corrected form.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Create a span. Callers uphold `start < end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether two spans share at least one position.
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Span length in codepoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is degenerate.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// How matched text is rewritten.
///
/// Most rules replace the match with a fixed string; a handful need to
/// inspect the matched text (case preservation over a lookup table,
/// whitespace surgery), which is what the function variant is for.
#[derive(Clone, Copy)]
pub enum Corrector {
    /// Replace the whole match with a fixed string, preserving an
    /// upper-case first letter of the matched text.
    Replace(&'static str),
    /// Compute the replacement from the matched text.
    Fn(fn(&str) -> String),
}

impl Corrector {
    /// Rewrite `matched` according to this corrector.
    pub fn apply(&self, matched: &str) -> String {
        match self {
            Corrector::Replace(replacement) => {
                let starts_upper = matched.chars().next().is_some_and(|c| c.is_uppercase());
                if starts_upper {
                    capitalize_first(replacement)
                } else {
                    (*replacement).to_string()
                }
            }
            Corrector::Fn(f) => f(matched),
        }
    }
}

impl fmt::Debug for Corrector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corrector::Replace(r) => f.debug_tuple("Replace").field(r).finish(),
            Corrector::Fn(_) => f.write_str("Fn(..)"),
        }
    }
}

/// Upper-case the first character of `s`.
pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A declarative correction rule.
///
/// Rules are declared once, in table order; when two rules' matches
/// overlap, the rule earlier in the table wins. The `pattern` is a regex
/// source compiled by the engine at table-build time.
#[derive(Clone, Debug)]
pub struct CorrectionRule {
    /// Stable rule identifier, e.g. `"contraction-im"`.
    pub name: &'static str,
    /// Reporting and scoring category.
    pub category: ErrorCategory,
    /// Weighting severity.
    pub severity: Severity,
    /// Regex source for the matcher.
    pub pattern: &'static str,
    /// How matched text is rewritten.
    pub corrector: Corrector,
    /// One-sentence explanation shown to the learner.
    pub explanation: &'static str,
    /// Example corrections, `"wrong → right"`.
    pub examples: &'static [&'static str],
}

/// One detected error, anchored to the original text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct DetectedError {
    /// Category of the rule (or external detector) that found it.
    pub category: ErrorCategory,
    /// The matched text as it appeared in the input.
    pub original: String,
    /// The corrected replacement text.
    pub corrected: String,
    /// Learner-facing explanation.
    pub explanation: String,
    /// Name of the originating rule or detector.
    pub rule: String,
    /// Weighting severity.
    pub severity: Severity,
    /// Codepoint span into the original text.
    pub span: Span,
    /// Example corrections for the underlying rule.
    pub examples: Vec<String>,
    /// Detector confidence in `(0, 1]`; local rule hits carry 1.0.
    pub confidence: f64,
}
