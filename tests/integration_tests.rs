//! End-to-end tests over the two crate entry points.

use libfluency::prelude::*;

// ============================================================================
// Pronunciation path
// ============================================================================

#[test]
fn general_mode_perfect_recitation_scores_high() {
    let analysis = analyze_pronunciation("Cat, bat, hat", "Cat bat hat", ScoringMode::General);
    assert_eq!(analysis.accuracy, 100);
    assert!(analysis.overall_score >= 85);
    assert!(analysis.sound_accuracies.is_empty());
}

#[test]
fn focused_mode_flags_th_substitutions() {
    let analysis = analyze_pronunciation(
        "Think about three things",
        "Tink about tree tings",
        ScoringMode::Focused,
    );
    assert!(!analysis.sound_accuracies.is_empty());
    // Every flagged occurrence is a /th/ word rendered without the sound.
    assert!(analysis.sound_accuracies.iter().all(|s| s.phoneme == "th"));
    assert!(analysis.sound_accuracies.iter().all(|s| s.accuracy < 0.8));
    assert!(analysis.accuracy <= 50);
    assert!(!analysis.recommendations.is_empty());
}

#[test]
fn empty_speech_never_panics_and_scores_zero() {
    for spoken in ["", "   ", "?!...", "\t\n"] {
        for mode in [ScoringMode::General, ScoringMode::Focused] {
            let analysis = analyze_pronunciation("Say anything", spoken, mode);
            assert_eq!(analysis.overall_score, 0);
            assert_eq!(analysis.accuracy, 0);
            assert!(!analysis.recommendations.is_empty());
        }
    }
}

#[test]
fn modes_weight_the_same_submetrics_differently() {
    let general = analyze_pronunciation("Think clearly", "Tink clearly", ScoringMode::General);
    let focused = analyze_pronunciation("Think clearly", "Tink clearly", ScoringMode::Focused);
    // Sub-metrics agree; only the overall weighting differs.
    assert_eq!(general.accuracy, focused.accuracy);
    assert_eq!(general.fluency, focused.fluency);
    assert_eq!(general.pacing, focused.pacing);
}

// ============================================================================
// Correction path
// ============================================================================

#[test]
fn missing_apostrophe_contraction() {
    let result = correct_text("Im going to the store", None);
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.original, "Im");
    assert_eq!(error.corrected, "I'm");
    assert_eq!(error.category, ErrorCategory::Contraction);
    assert_eq!(error.severity, Severity::Major);
    assert_eq!(result.corrected, "I'm going to the store");
}

#[test]
fn subject_verb_agreement_lowers_grammar_score() {
    let result = correct_text("I has 25 years old", None);
    assert!(result
        .errors
        .iter()
        .any(|e| e.category == ErrorCategory::SubjectVerb));
    assert!(result.corrected.starts_with("I have"));
    assert!(result.grammar_score < 100);
}

#[test]
fn article_rule_fires_exactly_once() {
    let result = correct_text("a apple is an apple", None);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].rule, "article-a-before-vowel");
    assert_eq!(result.errors[0].original, "a apple");
    assert_eq!(result.errors[0].corrected, "an apple");
    assert_eq!(result.corrected, "an apple is an apple");
}

#[test]
fn clean_sentence_yields_no_errors() {
    let result = correct_text("The weather is nice today", None);
    assert!(result.errors.is_empty());
    assert_eq!(result.corrected, "The weather is nice today");
    assert_eq!(result.overall_score, 100);
    assert_eq!(result.explanation, "Great work! No corrections needed.");
}

#[test]
fn correcting_corrected_output_converges() {
    let inputs = [
        "Im going to the store",
        "I has 25 years old",
        "a apple is an apple",
        "i goed home becuase im tired",
        "she dont like it",
    ];
    for input in inputs {
        let first = correct_text(input, None);
        let second = correct_text(&first.corrected, None);
        assert!(
            second.errors.len() <= first.errors.len(),
            "error count grew on second pass for {input:?}: {} -> {}",
            first.errors.len(),
            second.errors.len()
        );
        let third = correct_text(&second.corrected, None);
        assert!(third.errors.len() <= second.errors.len());
    }
}

#[test]
fn garbage_input_never_panics() {
    for text in ["", "???", "    ", "\u{0}\u{1}", "émoji 🎉 text", "a"] {
        let result = correct_text(text, None);
        assert!(result.overall_score <= 100);
        assert!(result.grammar_score <= 100);
        assert!(result.vocabulary_score <= 100);
        assert!(result.style_score <= 100);
    }
}

// ============================================================================
// External correction merging
// ============================================================================

#[test]
fn external_corrected_text_takes_precedence() {
    let external = ExternalCorrection::with_text("I'm going to the store.");
    let result = correct_text("Im going to the store", Some(&external));
    assert_eq!(result.corrected, "I'm going to the store.");
    // Local detection still reported.
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn external_score_hints_override_individually() {
    let external = ExternalCorrection {
        score_hints: ScoreHints {
            grammar: Some(42),
            ..ScoreHints::default()
        },
        ..ExternalCorrection::default()
    };
    let result = correct_text("The weather is nice today", Some(&external));
    assert_eq!(result.grammar_score, 42);
    assert_eq!(result.vocabulary_score, 100);
    assert_eq!(result.style_score, 100);
}

#[test]
fn absent_external_correction_degrades_to_local() {
    let with_none = correct_text("Im late", None);
    let with_empty = correct_text("Im late", Some(&ExternalCorrection::default()));
    assert_eq!(with_none.corrected, with_empty.corrected);
    assert_eq!(with_none.errors, with_empty.errors);
    assert_eq!(with_none.overall_score, with_empty.overall_score);
}

#[test]
fn external_duplicate_span_wins_tie() {
    let local_probe = correct_text("Im late", None);
    let span = local_probe.errors[0].span;

    let mut external_error = local_probe.errors[0].clone();
    external_error.corrected = "I am".to_string();
    external_error.rule = "remote-detector".to_string();

    let external = ExternalCorrection {
        errors: vec![external_error],
        ..ExternalCorrection::default()
    };
    let result = correct_text("Im late", Some(&external));
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].span, span);
    assert_eq!(result.errors[0].rule, "remote-detector");
    assert_eq!(result.corrected, "I am late");
}

#[test]
fn low_confidence_external_duplicate_loses() {
    let local_probe = correct_text("Im late", None);
    let mut external_error = local_probe.errors[0].clone();
    external_error.corrected = "I am".to_string();
    external_error.confidence = 0.3;

    let external = ExternalCorrection {
        errors: vec![external_error],
        ..ExternalCorrection::default()
    };
    let result = correct_text("Im late", Some(&external));
    assert_eq!(result.errors[0].corrected, "I'm");
    assert_eq!(result.corrected, "I'm late");
}

// ============================================================================
// Session feedback rotation
// ============================================================================

#[test]
fn session_context_is_per_session() {
    let options = ["Keep it up!", "Nice progress!", "Well done!"];

    let mut first_session = SessionContext::new();
    let mut second_session = SessionContext::new();
    let a = first_session.next_response("encouragement", &options);
    let b = second_session.next_response("encouragement", &options);
    // Separate sessions do not share rotation state.
    assert_eq!(a, b);
}
