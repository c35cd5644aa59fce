//! Phoneme-aware approximate string matching.
//!
//! This module computes a weighted Levenshtein distance between a target
//! utterance and a spoken transcript, where substituting two characters
//! that belong to a known pronunciation confusion pair (r↔l, v↔w, ...)
//! costs less than an arbitrary substitution. The discount table is
//! declarative data, loaded once per process and shared read-only.
//!
//! Two implementation notes carried over from direct distance computation:
//!
//! - **Iterative DP**: space-optimized dynamic programming (two rows)
//! - **Codepoint-level**: all offsets and lengths count `char`s, never bytes
//!
//! # Example
//!
//! ```rust
//! use libfluency::similarity::{similarity, SubstitutionTable};
//!
//! let table = SubstitutionTable::english();
//! // "lice" vs "rice" differ only by a confusable pair, so the score is
//! // higher than for an arbitrary one-letter substitution.
//! assert!(similarity(&table, "rice", "lice") > similarity(&table, "rice", "dice"));
//! ```

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub mod phoneme;

pub use phoneme::{phoneme_scan, SoundAccuracy};

/// Default discount weight for a confusable pair.
///
/// Substituting one member of a confusion pair for the other costs half an
/// ordinary substitution. The value is empirical and shared by every pair
/// in the built-in table.
pub const CONFUSION_DISCOUNT: f64 = 0.5;

/// Process-wide English confusion table used by the crate entry points.
pub(crate) static ENGLISH_TABLE: Lazy<SubstitutionTable> = Lazy::new(SubstitutionTable::english);

/// Symmetric lookup from character pairs to substitution discounts.
///
/// A `SubstitutionTable` maps pairs of commonly confused sounds, rendered
/// as single characters in a transcript, to a reduced substitution cost in
/// `(0, 1)`. Lookups are symmetric: `discount('r', 'l')` and
/// `discount('l', 'r')` return the same weight.
///
/// The table is configuration data: build it once at process start and
/// treat it as immutable. [`SubstitutionTable::english`] provides the
/// built-in inventory of English learner confusions.
#[derive(Clone, Debug, Default)]
pub struct SubstitutionTable {
    discounts: FxHashMap<(char, char), f64>,
}

impl SubstitutionTable {
    /// Create an empty table (every substitution costs 1.0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from explicit `(a, b, weight)` triples.
    ///
    /// Each pair is registered symmetrically. Weights outside `(0, 1)` are
    /// clamped into the open interval so a misconfigured entry can never
    /// make a substitution free or more expensive than the default.
    pub fn with_pairs(pairs: &[(char, char, f64)]) -> Self {
        let mut table = Self::new();
        for &(a, b, w) in pairs {
            table.insert(a, b, w);
        }
        table
    }

    /// The built-in English confusion inventory.
    ///
    /// Covers the substitutions most frequently produced by learners and
    /// by speech-to-text mishearings: liquid swaps (r↔l), labial swaps
    /// (v↔w, b↔v, f↔p), th-stopping (θ rendered as t or d, ð as d or z),
    /// and voicing confusion (s↔z).
    pub fn english() -> Self {
        Self::with_pairs(&[
            ('r', 'l', CONFUSION_DISCOUNT),
            ('v', 'w', CONFUSION_DISCOUNT),
            ('b', 'v', CONFUSION_DISCOUNT),
            ('f', 'p', CONFUSION_DISCOUNT),
            // th-stopping: "think" heard as "tink", "this" as "dis"/"zis"
            ('t', 'd', CONFUSION_DISCOUNT),
            ('d', 'z', CONFUSION_DISCOUNT),
            ('s', 'z', CONFUSION_DISCOUNT),
            // "th" dropped to f: "three" -> "free"
            ('t', 'f', CONFUSION_DISCOUNT),
        ])
    }

    /// Register a confusable pair with the given discount weight.
    ///
    /// The pair is stored symmetrically. `w` is clamped into `(0, 1)`.
    pub fn insert(&mut self, a: char, b: char, w: f64) {
        let w = w.clamp(f64::EPSILON, 1.0 - f64::EPSILON);
        self.discounts.insert((a, b), w);
        self.discounts.insert((b, a), w);
    }

    /// Discount weight for substituting `a` with `b`, if the pair is listed.
    #[inline]
    pub fn discount(&self, a: char, b: char) -> Option<f64> {
        self.discounts.get(&(a, b)).copied()
    }

    /// Number of registered pairs (counting each direction once).
    pub fn len(&self) -> usize {
        self.discounts.len() / 2
    }

    /// Whether the table has no registered pairs.
    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}

/// Substitution cost between two characters under a table.
#[inline]
fn substitution_cost(table: &SubstitutionTable, a: char, b: char) -> f64 {
    if a == b {
        0.0
    } else {
        table.discount(a, b).unwrap_or(1.0)
    }
}

/// Compute the weighted Levenshtein distance between two strings.
///
/// Uses dynamic programming over codepoints to compute the minimum total
/// cost of single-character edits transforming `source` into `target`.
/// Insertions and deletions cost 1.0; a substitution costs 1.0 unless the
/// character pair appears in `table`, in which case the pair's discount
/// applies.
///
/// With an empty table this is exactly the standard Levenshtein distance.
///
/// # Example
///
/// ```rust
/// use libfluency::similarity::{weighted_distance, SubstitutionTable};
///
/// let empty = SubstitutionTable::new();
/// assert_eq!(weighted_distance(&empty, "kitten", "sitting"), 3.0);
///
/// let english = SubstitutionTable::english();
/// // r -> l is a confusion pair: half cost
/// assert_eq!(weighted_distance(&english, "rice", "lice"), 0.5);
/// ```
pub fn weighted_distance(table: &SubstitutionTable, source: &str, target: &str) -> f64 {
    let source_chars: SmallVec<[char; 32]> = source.chars().collect();
    let target_chars: SmallVec<[char; 32]> = target.chars().collect();

    let m = source_chars.len();
    let n = target_chars.len();

    if m == 0 {
        return n as f64;
    }
    if n == 0 {
        return m as f64;
    }

    // Space-optimized: two rows instead of the full matrix
    let mut prev_row = vec![0.0_f64; n + 1];
    let mut curr_row = vec![0.0_f64; n + 1];

    for (j, item) in prev_row.iter_mut().enumerate().take(n + 1) {
        *item = j as f64;
    }

    for i in 1..=m {
        curr_row[0] = i as f64;

        for j in 1..=n {
            let cost = substitution_cost(table, source_chars[i - 1], target_chars[j - 1]);

            curr_row[j] = (prev_row[j] + 1.0) // deletion
                .min(curr_row[j - 1] + 1.0) // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Similarity score in `[0, 1]` between a target and an actual string.
///
/// Defined as `(max_len - distance) / max_len` over codepoint lengths,
/// with the weighted distance of [`weighted_distance`]. Identical strings
/// score 1.0; two empty strings score 1.0 by convention; an empty string
/// against a non-empty one scores 0.0.
pub fn similarity(table: &SubstitutionTable, target: &str, actual: &str) -> f64 {
    let max_len = target.chars().count().max(actual.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = weighted_distance(table, target, actual);
    ((max_len as f64 - distance) / max_len as f64).clamp(0.0, 1.0)
}
