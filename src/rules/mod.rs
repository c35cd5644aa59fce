//! Rule-based grammar and spelling correction.
//!
//! The correction engine scans text against an ordered table of
//! declarative rules. Each rule pairs a matcher with a corrector and
//! reporting metadata; the engine extracts non-overlapping matches,
//! resolving collisions by table order (the earlier rule wins, and a later
//! overlapping match is dropped entirely, never partially applied).
//!
//! The split mirrors the data/algorithm separation used throughout the
//! crate:
//!
//! - [`types`] — rule and error records, categories, severities, spans
//! - [`table`] — the built-in English rule set, organized by category
//! - [`engine`] — rule compilation and ordered application
//!
//! # Example
//!
//! ```rust
//! use libfluency::rules::default_table;
//!
//! let errors = default_table().apply("Im going to the store");
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].corrected, "I'm");
//! ```

pub mod engine;
pub mod table;
pub mod types;

pub use engine::{default_table, RuleError, RuleTable};
pub use table::default_rules;
pub use types::{CorrectionRule, Corrector, DetectedError, ErrorCategory, Severity, Span};
