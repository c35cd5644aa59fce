//! The built-in English correction rule set.
//!
//! Rules are organized by category and assembled into a single ordered
//! table by [`default_rules`]. Table order is the overlap tie-break:
//! grammar rules come first so that a phrase-level fix ("he dont" →
//! "he doesn't") beats the word-level contraction fix inside it, and the
//! whitespace rules come last so they never steal positions from word
//! rules.
//!
//! Every rule is declared by its own constructor function so the set can
//! be extended, reordered, or subset without touching the engine.

use super::types::{capitalize_first, CorrectionRule, Corrector, ErrorCategory, Severity};

// ============================================================================
// Lookup vocabularies
// ============================================================================

/// Apostrophe-less renderings and their contracted forms.
///
/// Ambiguous candidates ("were", "ill", "id", "lets") are deliberately
/// absent: they are real words and cannot be corrected without context.
const CONTRACTION_FORMS: &[(&str, &str)] = &[
    ("im", "I'm"),
    ("dont", "don't"),
    ("cant", "can't"),
    ("wont", "won't"),
    ("didnt", "didn't"),
    ("doesnt", "doesn't"),
    ("isnt", "isn't"),
    ("arent", "aren't"),
    ("wasnt", "wasn't"),
    ("werent", "weren't"),
    ("havent", "haven't"),
    ("hasnt", "hasn't"),
    ("wouldnt", "wouldn't"),
    ("couldnt", "couldn't"),
    ("shouldnt", "shouldn't"),
    ("youre", "you're"),
    ("theyre", "they're"),
    ("ive", "I've"),
];

/// Over-regularized past forms and the irregular verb they should be.
const IRREGULAR_PAST: &[(&str, &str)] = &[
    ("goed", "went"),
    ("comed", "came"),
    ("eated", "ate"),
    ("drinked", "drank"),
    ("buyed", "bought"),
    ("catched", "caught"),
    ("teached", "taught"),
    ("thinked", "thought"),
    ("runned", "ran"),
    ("swimmed", "swam"),
    ("falled", "fell"),
    ("maked", "made"),
    ("taked", "took"),
    ("writed", "wrote"),
    ("breaked", "broke"),
    ("speaked", "spoke"),
    ("finded", "found"),
    ("telled", "told"),
    ("getted", "got"),
    ("gived", "gave"),
];

/// High-frequency misspellings and their corrections.
const MISSPELLINGS: &[(&str, &str)] = &[
    ("teh", "the"),
    ("wich", "which"),
    ("recieve", "receive"),
    ("recieved", "received"),
    ("becuase", "because"),
    ("becasue", "because"),
    ("definately", "definitely"),
    ("seperate", "separate"),
    ("untill", "until"),
    ("alot", "a lot"),
    ("freind", "friend"),
    ("beleive", "believe"),
    ("truely", "truly"),
    ("realy", "really"),
    ("tommorow", "tomorrow"),
    ("tomorow", "tomorrow"),
    ("occured", "occurred"),
    ("wierd", "weird"),
    ("neccessary", "necessary"),
    ("accomodate", "accommodate"),
];

// ============================================================================
// Corrector functions
// ============================================================================

/// Rewrite the match through a lookup table, preserving a leading capital.
fn lookup_rewrite(table: &[(&str, &str)], matched: &str) -> String {
    let lower = matched.to_lowercase();
    for (wrong, right) in table {
        if *wrong == lower {
            let starts_upper = matched.chars().next().is_some_and(|c| c.is_uppercase());
            return if starts_upper && !right.starts_with(|c: char| c.is_uppercase()) {
                capitalize_first(right)
            } else {
                (*right).to_string()
            };
        }
    }
    matched.to_string()
}

fn fix_contraction(matched: &str) -> String {
    lookup_rewrite(CONTRACTION_FORMS, matched)
}

fn fix_irregular_past(matched: &str) -> String {
    lookup_rewrite(IRREGULAR_PAST, matched)
}

fn fix_misspelling(matched: &str) -> String {
    lookup_rewrite(MISSPELLINGS, matched)
}

/// `"he have"` → `"he has"`, preserving the subject as matched.
fn fix_have_to_has(matched: &str) -> String {
    matched.replacen(" have", " has", 1)
}

/// `"they has"` → `"they have"`, preserving the subject as matched.
fn fix_has_to_have(matched: &str) -> String {
    matched.replacen(" has", " have", 1)
}

/// `"he dont"` / `"he don't"` → `"he doesn't"`.
fn fix_dont_to_doesnt(matched: &str) -> String {
    if matched.contains("don't") {
        matched.replacen("don't", "doesn't", 1)
    } else {
        matched.replacen("dont", "doesn't", 1)
    }
}

/// `"a apple"` → `"an apple"`, preserving the article's case.
fn fix_a_to_an(matched: &str) -> String {
    match matched.split_once(' ') {
        Some(("A", rest)) => format!("An {rest}"),
        Some((_, rest)) => format!("an {rest}"),
        None => matched.to_string(),
    }
}

/// `"an book"` → `"a book"`, preserving the article's case.
fn fix_an_to_a(matched: &str) -> String {
    match matched.split_once(' ') {
        Some(("An", rest)) => format!("A {rest}"),
        Some((_, rest)) => format!("a {rest}"),
        None => matched.to_string(),
    }
}

/// `"listen music"` → `"listen to music"` (any inflection of listen).
fn insert_to_after_listen(matched: &str) -> String {
    matched.replacen(' ', " to ", 1)
}

/// `"always I"` → `"I always"`.
fn swap_adverb_after_subject(matched: &str) -> String {
    match matched.split_once(' ') {
        Some((adverb, _)) => format!("I {}", adverb.to_lowercase()),
        None => matched.to_string(),
    }
}

/// Drop the space(s) before a punctuation mark.
fn trim_leading_space(matched: &str) -> String {
    matched.trim_start().to_string()
}

/// Collapse a whitespace run to a single space.
fn collapse_spaces(_matched: &str) -> String {
    " ".to_string()
}

// ============================================================================
// Subject-verb agreement
// ============================================================================

/// "I has" → "I have".
fn rule_i_has() -> CorrectionRule {
    CorrectionRule {
        name: "subject-verb-i-has",
        category: ErrorCategory::SubjectVerb,
        severity: Severity::Major,
        pattern: r"\b[Ii] has\b",
        corrector: Corrector::Replace("I have"),
        explanation: "The subject 'I' takes 'have', not 'has'.",
        examples: &["I has a car → I have a car"],
    }
}

/// "I is" / "I are" → "I am".
fn rule_i_is() -> CorrectionRule {
    CorrectionRule {
        name: "subject-verb-i-am",
        category: ErrorCategory::SubjectVerb,
        severity: Severity::Major,
        pattern: r"\b[Ii] (?:is|are)\b",
        corrector: Corrector::Replace("I am"),
        explanation: "The subject 'I' takes 'am'.",
        examples: &["I is happy → I am happy"],
    }
}

/// Third person singular with "have".
fn rule_third_singular_have() -> CorrectionRule {
    CorrectionRule {
        name: "subject-verb-third-singular-have",
        category: ErrorCategory::SubjectVerb,
        severity: Severity::Major,
        pattern: r"\b(?:[Hh]e|[Ss]he|[Ii]t) have\b",
        corrector: Corrector::Fn(fix_have_to_has),
        explanation: "Third person singular subjects take 'has'.",
        examples: &["he have a dog → he has a dog"],
    }
}

/// Plural subject with "has".
fn rule_plural_has() -> CorrectionRule {
    CorrectionRule {
        name: "subject-verb-plural-has",
        category: ErrorCategory::SubjectVerb,
        severity: Severity::Major,
        pattern: r"\b(?:[Tt]hey|[Ww]e|[Yy]ou) has\b",
        corrector: Corrector::Fn(fix_has_to_have),
        explanation: "Plural subjects take 'have', not 'has'.",
        examples: &["they has tickets → they have tickets"],
    }
}

/// Third person singular with "don't".
fn rule_third_singular_dont() -> CorrectionRule {
    CorrectionRule {
        name: "subject-verb-third-singular-dont",
        category: ErrorCategory::SubjectVerb,
        severity: Severity::Major,
        pattern: r"\b(?:[Hh]e|[Ss]he|[Ii]t) don'?t\b",
        corrector: Corrector::Fn(fix_dont_to_doesnt),
        explanation: "Third person singular subjects take 'doesn't'.",
        examples: &["she don't know → she doesn't know"],
    }
}

/// All subject-verb agreement rules, in priority order.
pub fn subject_verb_rules() -> Vec<CorrectionRule> {
    vec![
        rule_i_has(),
        rule_i_is(),
        rule_third_singular_have(),
        rule_plural_has(),
        rule_third_singular_dont(),
    ]
}

// ============================================================================
// Tense
// ============================================================================

/// Over-regularized past forms of irregular verbs.
fn rule_irregular_past() -> CorrectionRule {
    CorrectionRule {
        name: "tense-irregular-past",
        category: ErrorCategory::Tense,
        severity: Severity::Moderate,
        pattern: r"\b(?i:goed|comed|eated|drinked|buyed|catched|teached|thinked|runned|swimmed|falled|maked|taked|writed|breaked|speaked|finded|telled|getted|gived)\b",
        corrector: Corrector::Fn(fix_irregular_past),
        explanation: "This verb has an irregular past form.",
        examples: &["I goed home → I went home", "she catched it → she caught it"],
    }
}

/// All tense rules.
pub fn tense_rules() -> Vec<CorrectionRule> {
    vec![rule_irregular_past()]
}

// ============================================================================
// Articles
// ============================================================================

/// "a" before a vowel letter → "an".
fn rule_a_before_vowel() -> CorrectionRule {
    CorrectionRule {
        name: "article-a-before-vowel",
        category: ErrorCategory::Article,
        severity: Severity::Moderate,
        pattern: r"\b[Aa] [aeiouAEIOU][a-zA-Z]*",
        corrector: Corrector::Fn(fix_a_to_an),
        explanation: "Use 'an' before a word starting with a vowel sound.",
        examples: &["a apple → an apple"],
    }
}

/// "an" before a consonant letter (other than h) → "a".
fn rule_an_before_consonant() -> CorrectionRule {
    CorrectionRule {
        name: "article-an-before-consonant",
        category: ErrorCategory::Article,
        severity: Severity::Moderate,
        pattern: r"\b[Aa]n [b-df-gj-np-tv-zB-DF-GJ-NP-TV-Z][a-zA-Z]*",
        corrector: Corrector::Fn(fix_an_to_a),
        explanation: "Use 'a' before a word starting with a consonant sound.",
        examples: &["an book → a book"],
    }
}

/// All article rules.
pub fn article_rules() -> Vec<CorrectionRule> {
    vec![rule_a_before_vowel(), rule_an_before_consonant()]
}

// ============================================================================
// Prepositions
// ============================================================================

/// "married with" → "married to".
fn rule_married_with() -> CorrectionRule {
    CorrectionRule {
        name: "preposition-married-to",
        category: ErrorCategory::Preposition,
        severity: Severity::Moderate,
        pattern: r"\b[Mm]arried with\b",
        corrector: Corrector::Fn(|m: &str| m.replacen("with", "to", 1)),
        explanation: "In English you are married to someone.",
        examples: &["married with a doctor → married to a doctor"],
    }
}

/// "depend of" → "depend on".
fn rule_depend_of() -> CorrectionRule {
    CorrectionRule {
        name: "preposition-depend-on",
        category: ErrorCategory::Preposition,
        severity: Severity::Moderate,
        pattern: r"\b[Dd]epends? of\b",
        corrector: Corrector::Fn(|m: &str| m.replacen(" of", " on", 1)),
        explanation: "The verb 'depend' takes 'on'.",
        examples: &["it depends of you → it depends on you"],
    }
}

/// "arrive to" → "arrive at".
fn rule_arrive_to() -> CorrectionRule {
    CorrectionRule {
        name: "preposition-arrive-at",
        category: ErrorCategory::Preposition,
        severity: Severity::Moderate,
        pattern: r"\b[Aa]rrived? to\b",
        corrector: Corrector::Fn(|m: &str| m.replacen(" to", " at", 1)),
        explanation: "The verb 'arrive' takes 'at' or 'in', not 'to'.",
        examples: &["arrived to the airport → arrived at the airport"],
    }
}

/// "afraid from" → "afraid of".
fn rule_afraid_from() -> CorrectionRule {
    CorrectionRule {
        name: "preposition-afraid-of",
        category: ErrorCategory::Preposition,
        severity: Severity::Moderate,
        pattern: r"\b[Aa]fraid from\b",
        corrector: Corrector::Fn(|m: &str| m.replacen("from", "of", 1)),
        explanation: "The adjective 'afraid' takes 'of'.",
        examples: &["afraid from dogs → afraid of dogs"],
    }
}

/// "interested on" → "interested in".
fn rule_interested_on() -> CorrectionRule {
    CorrectionRule {
        name: "preposition-interested-in",
        category: ErrorCategory::Preposition,
        severity: Severity::Moderate,
        pattern: r"\b[Ii]nterested on\b",
        corrector: Corrector::Fn(|m: &str| m.replacen("on", "in", 1)),
        explanation: "The adjective 'interested' takes 'in'.",
        examples: &["interested on music → interested in music"],
    }
}

/// "listen music" → "listen to music".
fn rule_listen_to() -> CorrectionRule {
    CorrectionRule {
        name: "preposition-listen-to",
        category: ErrorCategory::Preposition,
        severity: Severity::Moderate,
        pattern: r"\b[Ll]isten(?:s|ed|ing)? (?:music|radio|songs|podcasts)\b",
        corrector: Corrector::Fn(insert_to_after_listen),
        explanation: "The verb 'listen' takes 'to'.",
        examples: &["listen music → listen to music"],
    }
}

/// All preposition rules.
pub fn preposition_rules() -> Vec<CorrectionRule> {
    vec![
        rule_married_with(),
        rule_depend_of(),
        rule_arrive_to(),
        rule_afraid_from(),
        rule_interested_on(),
        rule_listen_to(),
    ]
}

// ============================================================================
// Word order
// ============================================================================

/// Frequency adverb fronted before "I".
fn rule_adverb_before_subject() -> CorrectionRule {
    CorrectionRule {
        name: "word-order-adverb-subject",
        category: ErrorCategory::WordOrder,
        severity: Severity::Moderate,
        pattern: r"\b(?:[Aa]lways|[Nn]ever|[Uu]sually|[Oo]ften|[Ss]ometimes) I\b",
        corrector: Corrector::Fn(swap_adverb_after_subject),
        explanation: "Frequency adverbs go after the subject.",
        examples: &["always I wake up early → I always wake up early"],
    }
}

/// All word-order rules.
pub fn word_order_rules() -> Vec<CorrectionRule> {
    vec![rule_adverb_before_subject()]
}

// ============================================================================
// Contractions
// ============================================================================

/// Missing apostrophe in a contraction.
fn rule_missing_apostrophe() -> CorrectionRule {
    CorrectionRule {
        name: "contraction-missing-apostrophe",
        category: ErrorCategory::Contraction,
        severity: Severity::Major,
        pattern: r"\b(?i:im|dont|cant|wont|didnt|doesnt|isnt|arent|wasnt|werent|havent|hasnt|wouldnt|couldnt|shouldnt|youre|theyre|ive)\b",
        corrector: Corrector::Fn(fix_contraction),
        explanation: "Contractions need an apostrophe.",
        examples: &["Im late → I'm late", "dont worry → don't worry"],
    }
}

/// All contraction rules.
pub fn contraction_rules() -> Vec<CorrectionRule> {
    vec![rule_missing_apostrophe()]
}

// ============================================================================
// Spelling
// ============================================================================

/// High-frequency misspellings.
fn rule_common_misspellings() -> CorrectionRule {
    CorrectionRule {
        name: "spelling-common-misspellings",
        category: ErrorCategory::Spelling,
        severity: Severity::Moderate,
        pattern: r"\b(?i:teh|wich|recieved|recieve|becuase|becasue|definately|seperate|untill|alot|freind|beleive|truely|realy|tommorow|tomorow|occured|wierd|neccessary|accomodate)\b",
        corrector: Corrector::Fn(fix_misspelling),
        explanation: "This word is misspelled.",
        examples: &["teh → the", "recieve → receive"],
    }
}

/// All spelling rules.
pub fn spelling_rules() -> Vec<CorrectionRule> {
    vec![rule_common_misspellings()]
}

// ============================================================================
// Punctuation and capitalization mechanics
// ============================================================================

/// Standalone lowercase "i".
fn rule_lowercase_i() -> CorrectionRule {
    CorrectionRule {
        name: "punctuation-capital-i",
        category: ErrorCategory::Punctuation,
        severity: Severity::Minor,
        pattern: r"\bi\b",
        corrector: Corrector::Replace("I"),
        explanation: "The pronoun 'I' is always capitalized.",
        examples: &["i think so → I think so"],
    }
}

/// Space before a punctuation mark.
fn rule_space_before_punctuation() -> CorrectionRule {
    CorrectionRule {
        name: "punctuation-space-before",
        category: ErrorCategory::Punctuation,
        severity: Severity::Minor,
        pattern: r" +[,.!?;:]",
        corrector: Corrector::Fn(trim_leading_space),
        explanation: "Punctuation attaches directly to the word before it.",
        examples: &["hello , there → hello, there"],
    }
}

/// Run of two or more spaces.
fn rule_double_space() -> CorrectionRule {
    CorrectionRule {
        name: "punctuation-double-space",
        category: ErrorCategory::Punctuation,
        severity: Severity::Minor,
        pattern: r"  +",
        corrector: Corrector::Fn(collapse_spaces),
        explanation: "Use a single space between words.",
        examples: &["hello  there → hello there"],
    }
}

/// All punctuation rules.
pub fn punctuation_rules() -> Vec<CorrectionRule> {
    vec![
        rule_lowercase_i(),
        rule_space_before_punctuation(),
        rule_double_space(),
    ]
}

// ============================================================================
// Combined table
// ============================================================================

/// The complete built-in rule table, in overlap-priority order.
///
/// Grammar categories come first so phrase-level grammar fixes win over
/// word-level mechanics inside the same span; whitespace rules come last.
pub fn default_rules() -> Vec<CorrectionRule> {
    let mut rules = Vec::new();
    rules.extend(subject_verb_rules());
    rules.extend(tense_rules());
    rules.extend(article_rules());
    rules.extend(preposition_rules());
    rules.extend(word_order_rules());
    rules.extend(contraction_rules());
    rules.extend(spelling_rules());
    rules.extend(punctuation_rules());
    rules
}
