//! Text normalization before citation matching.
//!
//! Citation phrases are heavily inflected ("пункта", "статьей", "частью"), so
//! text goes through two passes before any pattern runs:
//! - Abbreviation folding: long citation words become their canonical short
//!   forms (`пункт*` → `п.`, `стать*` → `ст.`, ...)
//! - Lemmatization: every word token is replaced by its normal form while
//!   separators (spaces, punctuation, line breaks) are copied verbatim
//!
//! Alias names go through the same lemmatizer, so law names in the text and
//! in the alias index meet in the same normal form.

use std::sync::LazyLock;

use regex::Regex;

use crate::lemmatizer::Lemmatizer;

/// Ordered folding rules. Each rule is a single replace-all pass; `подпп.`
/// goes first so later rules never see a partially folded prefix.
static FOLDING_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\bподпп\.", "пп."),
        (r"(?i)\bпункт\w*\b", "п."),
        // common misspelling
        (r"(?i)\bпунт\w*\b", "п."),
        (r"(?i)\bподпункт\w*\b", "пп."),
        (r"(?i)\bстать\w+\b", "ст."),
        (r"(?i)\bчасть\w*\b", "ч."),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Maximal run of word characters.
static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Replace long and inflected citation words by their canonical abbreviations.
pub fn fold_abbreviations(text: &str) -> String {
    let mut folded = text.to_string();
    for (regex, replacement) in FOLDING_RULES.iter() {
        folded = regex.replace_all(&folded, *replacement).into_owned();
    }
    folded
}

/// Replace every word token by its lemma, keeping separators byte for byte.
pub fn lemmatize_text(text: &str, lemmatizer: &dyn Lemmatizer) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for word in WORD_RE.find_iter(text) {
        result.push_str(&text[last_end..word.start()]);
        result.push_str(&lemmatizer.normal_form(word.as_str()));
        last_end = word.end();
    }
    result.push_str(&text[last_end..]);

    result
}

/// Fold citation abbreviations, then lemmatize the whole text.
pub fn normalize_text(text: &str, lemmatizer: &dyn Lemmatizer) -> String {
    let folded = fold_abbreviations(text);
    lemmatize_text(&folded, lemmatizer)
}

/// Normalize a law name: lowercase, lemmatize each word, join with single spaces.
///
/// Punctuation is dropped, so "Гражданский кодекс (часть первая)" and
/// "гражданский кодекс часть первая" normalize identically.
pub fn normalize_law_name(name: &str, lemmatizer: &dyn Lemmatizer) -> String {
    let lower = name.trim().to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|word| lemmatizer.normal_form(word.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove C0 and C1 control characters (including line breaks and tabs).
pub fn strip_control_chars(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}
