//! Templated feedback generation.
//!
//! Turns scores and error lists into short, capped lists of suggestions,
//! strengths, and improvements, plus a one-sentence summary. Everything is
//! templated from counts and thresholds: the same input always yields the
//! same feedback.
//!
//! Response variety across a conversation is handled by [`SessionContext`],
//! an explicit per-session object. It replaces any notion of process-wide
//! "last used response" state: each session owns its own rotation indices
//! and drops them when the session ends.

use rustc_hash::FxHashMap;

use crate::rules::types::{DetectedError, Severity};
use crate::similarity::SoundAccuracy;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;
/// Maximum number of strengths returned.
pub const MAX_STRENGTHS: usize = 3;
/// Maximum number of improvements returned.
pub const MAX_IMPROVEMENTS: usize = 4;

/// Sub-score threshold below which a sound is flagged in feedback.
const SOUND_ATTENTION_THRESHOLD: f64 = 0.8;

/// Feedback block for the correction path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct CorrectionFeedback {
    /// Per-error rewrite suggestions, at most [`MAX_SUGGESTIONS`].
    pub suggestions: Vec<String>,
    /// Observed strengths, at most [`MAX_STRENGTHS`].
    pub strengths: Vec<String>,
    /// Improvement areas, at most [`MAX_IMPROVEMENTS`].
    pub improvements: Vec<String>,
    /// One-sentence summary of the error counts.
    pub explanation: String,
}

/// Feedback block for the pronunciation path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PronunciationFeedback {
    /// Coaching recommendations, at most [`MAX_SUGGESTIONS`].
    pub recommendations: Vec<String>,
    /// Observed strengths, at most [`MAX_STRENGTHS`].
    pub strengths: Vec<String>,
    /// Improvement areas, at most [`MAX_IMPROVEMENTS`].
    pub improvements: Vec<String>,
}

/// Summarize error counts into one sentence.
fn summarize_errors(errors: &[DetectedError]) -> String {
    if errors.is_empty() {
        return "Great work! No corrections needed.".to_string();
    }
    let major = errors.iter().filter(|e| e.severity == Severity::Major).count();
    let moderate = errors
        .iter()
        .filter(|e| e.severity == Severity::Moderate)
        .count();
    let minor = errors.iter().filter(|e| e.severity == Severity::Minor).count();
    format!(
        "Found {} issue{}: {} major, {} moderate, {} minor.",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" },
        major,
        moderate,
        minor
    )
}

/// Build the feedback block for a correction result.
///
/// `grammar`, `vocabulary`, and `style` are the already-computed category
/// scores; they drive the strengths list, while the error list drives the
/// suggestions and improvements.
pub fn correction_feedback(
    errors: &[DetectedError],
    grammar: u8,
    vocabulary: u8,
    style: u8,
) -> CorrectionFeedback {
    let suggestions: Vec<String> = errors
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|e| {
            format!(
                "Replace \"{}\" with \"{}\": {}",
                e.original, e.corrected, e.explanation
            )
        })
        .collect();

    let mut strengths = Vec::new();
    if errors.is_empty() {
        strengths.push("Clear and correct writing.".to_string());
    }
    if grammar >= 90 {
        strengths.push("Solid grammar.".to_string());
    }
    if vocabulary >= 90 {
        strengths.push("Good vocabulary and spelling.".to_string());
    }
    if style >= 90 {
        strengths.push("Clean style and punctuation.".to_string());
    }
    strengths.truncate(MAX_STRENGTHS);

    let mut improvements = Vec::new();
    for error in errors {
        let advice = format!("Review {} usage.", error.category);
        if !improvements.contains(&advice) {
            improvements.push(advice);
        }
        if improvements.len() == MAX_IMPROVEMENTS {
            break;
        }
    }

    CorrectionFeedback {
        suggestions,
        strengths,
        improvements,
        explanation: summarize_errors(errors),
    }
}

/// Build the feedback block for a pronunciation analysis.
///
/// Scores arrive already scaled to `[0, 100]`; sound records below the
/// attention threshold surface their coaching sentences.
pub fn pronunciation_feedback(
    accuracy: u8,
    fluency: u8,
    pacing: u8,
    sounds: &[SoundAccuracy],
) -> PronunciationFeedback {
    let mut recommendations = Vec::new();

    for sound in sounds {
        if sound.accuracy >= SOUND_ATTENTION_THRESHOLD {
            continue;
        }
        if !recommendations.contains(&sound.feedback) {
            recommendations.push(sound.feedback.clone());
        }
    }
    if fluency < 70 {
        recommendations.push("Practice speaking without filler sounds like um and uh.".to_string());
    }
    if pacing < 80 {
        recommendations.push("Aim to match the length and rhythm of the target sentence.".to_string());
    }
    if accuracy < 60 {
        recommendations.push("Listen to the target sentence again and repeat it slowly.".to_string());
    }
    recommendations.truncate(MAX_SUGGESTIONS);

    let mut strengths = Vec::new();
    if accuracy >= 90 {
        strengths.push("Accurate word pronunciation.".to_string());
    }
    if fluency >= 90 {
        strengths.push("Smooth delivery without hesitation.".to_string());
    }
    if pacing >= 90 {
        strengths.push("Natural pacing.".to_string());
    }
    strengths.truncate(MAX_STRENGTHS);

    let mut improvements = Vec::new();
    for sound in sounds {
        if sound.accuracy >= SOUND_ATTENTION_THRESHOLD {
            continue;
        }
        let advice = format!(
            "Work on the '{}' sound in words like \"{}\".",
            sound.phoneme, sound.target_sound
        );
        if !improvements.contains(&advice) {
            improvements.push(advice);
        }
        if improvements.len() == MAX_IMPROVEMENTS {
            break;
        }
    }

    PronunciationFeedback {
        recommendations,
        strengths,
        improvements,
    }
}

/// Feedback for the no-speech edge case.
pub(crate) fn no_speech_feedback() -> PronunciationFeedback {
    PronunciationFeedback {
        recommendations: vec![
            "No speech was detected. Try speaking closer to the microphone.".to_string(),
        ],
        strengths: Vec::new(),
        improvements: Vec::new(),
    }
}

/// Per-session response rotation state.
///
/// Conversation surfaces keep a small pool of canned encouragements per
/// topic and want to avoid repeating the one they just used. This context
/// carries that state explicitly: create one per conversation session,
/// pass it to each selection call, and drop it when the session ends.
/// Nothing about it is shared between sessions or threads.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    next_index: FxHashMap<String, usize>,
}

impl SessionContext {
    /// Fresh context with no rotation history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministically pick the next response for `topic`.
    ///
    /// Cycles through `options` in order, per topic, so the same option is
    /// never returned twice in a row when more than one is available.
    /// Returns `None` when `options` is empty.
    pub fn next_response<'a>(&mut self, topic: &str, options: &[&'a str]) -> Option<&'a str> {
        if options.is_empty() {
            return None;
        }
        let index = self.next_index.entry(topic.to_string()).or_insert(0);
        let choice = options[*index % options.len()];
        *index = (*index + 1) % options.len();
        Some(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::types::{ErrorCategory, Severity, Span};

    fn sample_error(severity: Severity, category: ErrorCategory) -> DetectedError {
        DetectedError {
            category,
            original: "Im".to_string(),
            corrected: "I'm".to_string(),
            explanation: "Contractions need an apostrophe.".to_string(),
            rule: "contraction-missing-apostrophe".to_string(),
            severity,
            span: Span::new(0, 2),
            examples: Vec::new(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_clean_text_gets_congratulations() {
        let fb = correction_feedback(&[], 100, 100, 100);
        assert_eq!(fb.explanation, "Great work! No corrections needed.");
        assert!(fb.suggestions.is_empty());
        assert!(!fb.strengths.is_empty());
        assert!(fb.improvements.is_empty());
    }

    #[test]
    fn test_explanation_counts_severities() {
        let errors = vec![
            sample_error(Severity::Major, ErrorCategory::Contraction),
            sample_error(Severity::Minor, ErrorCategory::Punctuation),
        ];
        let fb = correction_feedback(&errors, 80, 80, 80);
        assert_eq!(fb.explanation, "Found 2 issues: 1 major, 0 moderate, 1 minor.");
    }

    #[test]
    fn test_caps_are_enforced() {
        let errors: Vec<DetectedError> = (0..10)
            .map(|_| sample_error(Severity::Moderate, ErrorCategory::Spelling))
            .collect();
        let fb = correction_feedback(&errors, 95, 95, 95);
        assert!(fb.suggestions.len() <= MAX_SUGGESTIONS);
        assert!(fb.strengths.len() <= MAX_STRENGTHS);
        assert!(fb.improvements.len() <= MAX_IMPROVEMENTS);
    }

    #[test]
    fn test_improvements_deduplicate_by_category() {
        let errors = vec![
            sample_error(Severity::Moderate, ErrorCategory::Spelling),
            sample_error(Severity::Moderate, ErrorCategory::Spelling),
        ];
        let fb = correction_feedback(&errors, 80, 80, 80);
        assert_eq!(fb.improvements.len(), 1);
    }

    #[test]
    fn test_deterministic_output() {
        let errors = vec![sample_error(Severity::Major, ErrorCategory::Contraction)];
        let a = correction_feedback(&errors, 70, 80, 90);
        let b = correction_feedback(&errors, 70, 80, 90);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pronunciation_feedback_flags_low_sounds() {
        let sounds = vec![SoundAccuracy {
            phoneme: "th".to_string(),
            target_sound: "think".to_string(),
            actual_sound: "tink".to_string(),
            accuracy: 0.4,
            position: 0,
            feedback: "Tongue between teeth.".to_string(),
        }];
        let fb = pronunciation_feedback(40, 95, 100, &sounds);
        assert!(fb.recommendations.iter().any(|r| r.contains("Tongue")));
        assert!(fb.improvements.iter().any(|i| i.contains("'th'")));
    }

    #[test]
    fn test_pronunciation_feedback_strengths() {
        let fb = pronunciation_feedback(95, 95, 95, &[]);
        assert_eq!(fb.strengths.len(), 3);
        assert!(fb.recommendations.is_empty());
    }

    #[test]
    fn test_session_context_cycles_without_repeats() {
        let mut ctx = SessionContext::new();
        let options = ["nice", "great", "well done"];
        let first = ctx.next_response("greeting", &options).unwrap();
        let second = ctx.next_response("greeting", &options).unwrap();
        let third = ctx.next_response("greeting", &options).unwrap();
        let fourth = ctx.next_response("greeting", &options).unwrap();
        assert_ne!(first, second);
        assert_ne!(second, third);
        assert_eq!(first, fourth);
    }

    #[test]
    fn test_session_context_topics_are_independent() {
        let mut ctx = SessionContext::new();
        let options = ["a", "b"];
        assert_eq!(ctx.next_response("x", &options), Some("a"));
        assert_eq!(ctx.next_response("y", &options), Some("a"));
        assert_eq!(ctx.next_response("x", &options), Some("b"));
    }

    #[test]
    fn test_session_context_empty_options() {
        let mut ctx = SessionContext::new();
        assert_eq!(ctx.next_response("x", &[]), None);
    }
}
