//! Difficult-sound inventory and per-word phoneme scanning.
//!
//! English learners reliably struggle with a small set of sounds (the
//! dental fricatives, liquids, and labials). This module keeps a
//! declarative inventory of those sounds: for each one, example words that
//! contain it, the mishearings a transcript typically shows when the sound
//! is mispronounced, and a coaching sentence.
//!
//! [`phoneme_scan`] walks the target utterance word by word, and for every
//! word that belongs to a difficult-sound inventory entry, scores the
//! aligned word of the transcript against it. The resulting
//! [`SoundAccuracy`] records are reporting data: they are consumed by the
//! feedback generator and never re-scored.

use super::{similarity, SubstitutionTable};
use crate::normalize::tokenize;

/// Penalty applied when the transcript shows a listed mishearing.
///
/// A transcript word that exactly matches a known mistake for the sound
/// (e.g. "tink" for "think") is stronger evidence of mispronunciation than
/// an arbitrary mismatch, so its similarity score is scaled down by this
/// factor before reporting.
const MISTAKE_PENALTY: f64 = 0.5;

/// A difficult English sound with its evidence vocabulary.
///
/// Entries are static configuration data, shared read-only for the process
/// lifetime. `example_words` anchor the scan to target words containing
/// the sound; `common_mistakes` list the transcript renderings that signal
/// the classic mispronunciation.
#[derive(Clone, Copy, Debug)]
pub struct DifficultSound {
    /// Phoneme label, e.g. `"th"` or `"r"`.
    pub phoneme: &'static str,
    /// Target words containing the sound.
    pub example_words: &'static [&'static str],
    /// Transcript renderings that indicate the sound was missed.
    pub common_mistakes: &'static [&'static str],
    /// Coaching sentence surfaced when the sound scores low.
    pub feedback: &'static str,
}

/// Per-occurrence accuracy record for one difficult sound.
///
/// Produced by [`phoneme_scan`]; `position` is the word index into the
/// normalized target. `accuracy` lies in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SoundAccuracy {
    /// Phoneme label from the inventory entry.
    pub phoneme: String,
    /// The target word the sound occurred in.
    pub target_sound: String,
    /// The aligned transcript word (empty when the transcript was shorter).
    pub actual_sound: String,
    /// Word-level similarity, discounted for listed mishearings.
    pub accuracy: f64,
    /// Word index of the occurrence in the normalized target.
    pub position: usize,
    /// Coaching sentence for the sound.
    pub feedback: String,
}

/// The built-in difficult-sound inventory.
///
/// Ordered roughly by how often each sound trips up learners; the order
/// has no semantic weight, every entry is always scanned.
pub const DIFFICULT_SOUNDS: &[DifficultSound] = &[
    DifficultSound {
        phoneme: "th",
        example_words: &[
            "think", "thing", "things", "three", "thank", "thanks", "thirty", "thursday",
            "mouth", "month", "birthday", "nothing", "something",
        ],
        common_mistakes: &[
            "tink", "ting", "tings", "tree", "tank", "tanks", "dirty", "fink", "fing",
            "free", "mouf", "nuting", "someting",
        ],
        feedback: "Place the tip of your tongue between your teeth and blow air for the 'th' sound.",
    },
    DifficultSound {
        phoneme: "th",
        example_words: &[
            "this", "that", "they", "them", "there", "then", "these", "those", "the",
            "mother", "father", "brother", "weather", "together",
        ],
        common_mistakes: &[
            "dis", "dat", "dey", "dem", "dere", "den", "dese", "dose", "da", "zis", "zat",
            "muder", "fader", "bruder",
        ],
        feedback: "Keep your tongue between your teeth and add voice for the soft 'th' sound.",
    },
    DifficultSound {
        phoneme: "r",
        example_words: &["red", "right", "road", "rice", "room", "really", "correct", "sorry"],
        common_mistakes: &["led", "light", "load", "lice", "loom", "leally", "collect", "solly"],
        feedback: "Curl your tongue back without touching the roof of your mouth for the 'r' sound.",
    },
    DifficultSound {
        phoneme: "l",
        example_words: &["light", "like", "long", "late", "glass", "play", "fly"],
        common_mistakes: &["right", "rike", "rong", "rate", "grass", "pray", "fry"],
        feedback: "Touch the tip of your tongue to the ridge behind your upper teeth for the 'l' sound.",
    },
    DifficultSound {
        phoneme: "v",
        example_words: &["very", "voice", "video", "seven", "ever", "never", "love"],
        common_mistakes: &["wery", "berry", "woice", "bideo", "sewen", "ewer", "newer", "lub"],
        feedback: "Rest your upper teeth on your lower lip and add voice for the 'v' sound.",
    },
    DifficultSound {
        phoneme: "w",
        example_words: &["water", "would", "west", "away", "work", "world"],
        common_mistakes: &["vater", "vould", "vest", "avay", "vork", "vorld"],
        feedback: "Round your lips without letting your teeth touch your lip for the 'w' sound.",
    },
];

/// Scan a target/transcript pair for difficult-sound occurrences.
///
/// Both strings are normalized and tokenized. For every target word that
/// appears in a [`DIFFICULT_SOUNDS`] entry, the transcript word at the
/// same index is scored with the weighted word-level similarity; a
/// transcript word listed as a common mistake for that sound has its score
/// scaled down further. A target word with no aligned transcript word
/// scores 0.0.
///
/// Returns one [`SoundAccuracy`] per detected occurrence, in target word
/// order. Targets without difficult-sound vocabulary yield an empty list.
///
/// # Example
///
/// ```rust
/// use libfluency::similarity::{phoneme_scan, SubstitutionTable};
///
/// let table = SubstitutionTable::english();
/// let sounds = phoneme_scan(&table, "Think about three things", "Tink about tree tings");
/// assert_eq!(sounds.len(), 3);
/// assert!(sounds.iter().all(|s| s.accuracy < 0.8));
/// ```
pub fn phoneme_scan(
    table: &SubstitutionTable,
    target: &str,
    actual: &str,
) -> Vec<SoundAccuracy> {
    let target_words = tokenize(target);
    let actual_words = tokenize(actual);

    let mut results = Vec::new();

    for (position, word) in target_words.iter().enumerate() {
        for sound in DIFFICULT_SOUNDS {
            if !sound.example_words.contains(&word.as_str()) {
                continue;
            }

            let aligned = actual_words.get(position).map(String::as_str).unwrap_or("");
            let mut accuracy = if aligned.is_empty() {
                0.0
            } else {
                similarity(table, word, aligned)
            };
            if sound.common_mistakes.contains(&aligned) {
                accuracy *= 1.0 - MISTAKE_PENALTY;
            }

            results.push(SoundAccuracy {
                phoneme: sound.phoneme.to_string(),
                target_sound: word.clone(),
                actual_sound: aligned.to_string(),
                accuracy: accuracy.clamp(0.0, 1.0),
                position,
                feedback: sound.feedback.to_string(),
            });

            // One inventory entry per target word; earlier entries win.
            break;
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_empty_when_no_difficult_words() {
        let table = SubstitutionTable::english();
        assert!(phoneme_scan(&table, "cat bat hat", "cat bat hat").is_empty());
        assert!(phoneme_scan(&table, "", "").is_empty());
    }

    #[test]
    fn test_scan_perfect_match_scores_high() {
        let table = SubstitutionTable::english();
        let sounds = phoneme_scan(&table, "I think so", "I think so");
        assert_eq!(sounds.len(), 1);
        assert_eq!(sounds[0].phoneme, "th");
        assert_eq!(sounds[0].accuracy, 1.0);
        assert_eq!(sounds[0].position, 1);
    }

    #[test]
    fn test_scan_discounts_listed_mistakes() {
        let table = SubstitutionTable::english();
        let sounds = phoneme_scan(&table, "think", "tink");
        assert_eq!(sounds.len(), 1);
        // "tink" is a listed mishearing: similarity 0.8 halves to 0.4
        assert!(sounds[0].accuracy < 0.5);
        assert_eq!(sounds[0].actual_sound, "tink");
    }

    #[test]
    fn test_scan_missing_aligned_word_scores_zero() {
        let table = SubstitutionTable::english();
        let sounds = phoneme_scan(&table, "I see three things", "I see");
        assert_eq!(sounds.len(), 2);
        assert!(sounds.iter().all(|s| s.accuracy == 0.0));
    }

    #[test]
    fn test_scan_positions_are_word_indices() {
        let table = SubstitutionTable::english();
        let sounds = phoneme_scan(&table, "Think about three things", "Tink about tree tings");
        let positions: Vec<usize> = sounds.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 2, 3]);
    }

    #[test]
    fn test_inventory_mistakes_are_not_example_words() {
        for sound in DIFFICULT_SOUNDS {
            for mistake in sound.common_mistakes {
                assert!(
                    !sound.example_words.contains(mistake),
                    "'{}' listed as both example and mistake for '{}'",
                    mistake,
                    sound.phoneme
                );
            }
        }
    }
}
