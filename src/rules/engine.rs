//! Rule compilation and ordered application.
//!
//! A [`RuleTable`] compiles the matchers of a rule list once, at table
//! build time, and applies them in table order. Overlap resolution is
//! deterministic: the first rule in table order claims the positions of
//! each match it corrects, and a later rule's match that touches a claimed
//! position is dropped entirely. Ties are therefore resolved by table
//! order alone, never by evaluation order or confidence.
//!
//! A rule whose pattern fails to compile is skipped at build time (and
//! recorded), so one bad rule can never abort an engine run. Callers who
//! prefer a hard failure use [`RuleTable::try_new`].
//!
//! All spans produced here are codepoint offsets into the input text; the
//! byte offsets reported by the regex engine are converted at this
//! boundary and never escape.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::table::default_rules;
use super::types::{CorrectionRule, DetectedError, Span};

/// Errors from strict rule-table construction.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A rule's pattern is not a valid regular expression.
    #[error("rule `{name}` has an invalid pattern: {source}")]
    InvalidPattern {
        /// Name of the offending rule.
        name: &'static str,
        /// The underlying regex compile error.
        source: regex::Error,
    },
}

/// A rule with its compiled matcher.
#[derive(Clone, Debug)]
struct CompiledRule {
    rule: CorrectionRule,
    matcher: Regex,
}

/// An ordered, compiled correction rule table.
///
/// Build once at process start and share read-only; [`RuleTable::apply`]
/// is a pure function and is safe to call from any number of threads.
#[derive(Clone, Debug)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
    skipped: Vec<&'static str>,
}

impl RuleTable {
    /// Compile a rule list, skipping rules whose patterns do not compile.
    ///
    /// Skipped rule names are available via [`RuleTable::skipped`].
    pub fn new(rules: Vec<CorrectionRule>) -> Self {
        let mut compiled = Vec::with_capacity(rules.len());
        let mut skipped = Vec::new();
        for rule in rules {
            match Regex::new(rule.pattern) {
                Ok(matcher) => compiled.push(CompiledRule { rule, matcher }),
                Err(_) => skipped.push(rule.name),
            }
        }
        Self {
            rules: compiled,
            skipped,
        }
    }

    /// Compile a rule list, failing on the first invalid pattern.
    pub fn try_new(rules: Vec<CorrectionRule>) -> Result<Self, RuleError> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let matcher = Regex::new(rule.pattern).map_err(|source| RuleError::InvalidPattern {
                name: rule.name,
                source,
            })?;
            compiled.push(CompiledRule { rule, matcher });
        }
        Ok(Self {
            rules: compiled,
            skipped: Vec::new(),
        })
    }

    /// Number of successfully compiled rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table holds no compiled rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of rules dropped at build time for invalid patterns.
    pub fn skipped(&self) -> &[&'static str] {
        &self.skipped
    }

    /// Scan `text` and return every surviving detected error.
    ///
    /// Rules run in table order. For each match, the rule's corrector is
    /// applied; a match whose correction leaves the text unchanged is
    /// ignored and claims nothing. Matches overlapping an already-claimed
    /// span are dropped entirely. The returned errors are sorted by start
    /// offset and are guaranteed non-overlapping, with codepoint spans
    /// satisfying `start < end <= len(text)`.
    pub fn apply(&self, text: &str) -> Vec<DetectedError> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every codepoint, for byte -> codepoint conversion.
        let byte_offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        let to_char = |byte: usize| byte_offsets.partition_point(|&b| b < byte);

        let mut claimed: Vec<Span> = Vec::new();
        let mut errors: Vec<DetectedError> = Vec::new();

        for compiled in &self.rules {
            for m in compiled.matcher.find_iter(text) {
                let span = Span::new(to_char(m.start()), to_char(m.end()));
                if span.is_empty() {
                    continue;
                }
                if claimed.iter().any(|c| c.overlaps(&span)) {
                    continue;
                }

                let corrected = compiled.rule.corrector.apply(m.as_str());
                if corrected == m.as_str() {
                    continue;
                }

                claimed.push(span);
                errors.push(DetectedError {
                    category: compiled.rule.category,
                    original: m.as_str().to_string(),
                    corrected,
                    explanation: compiled.rule.explanation.to_string(),
                    rule: compiled.rule.name.to_string(),
                    severity: compiled.rule.severity,
                    span,
                    examples: compiled
                        .rule
                        .examples
                        .iter()
                        .map(|e| (*e).to_string())
                        .collect(),
                    confidence: 1.0,
                });
            }
        }

        errors.sort_by_key(|e| e.span.start);
        errors
    }
}

/// The process-wide table built from [`default_rules`].
pub fn default_table() -> &'static RuleTable {
    static TABLE: Lazy<RuleTable> = Lazy::new(|| RuleTable::new(default_rules()));
    &TABLE
}
