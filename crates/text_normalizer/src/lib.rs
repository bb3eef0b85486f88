//! Text cleanup for noisy technical failure descriptions.
//!
//! Assembly-line defect reports arrive with inconsistent accenting, casing,
//! typos and duplicated words. [`normalize`] applies a fixed cleanup pass so
//! that the same failure is always described by the same string, which is
//! what the classifier and the deduplicating log both depend on.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Known misspelling -> canonical technical term, matched on whole words
/// only. Keys are already lower-case and accent-free because substitution
/// runs after the accent-stripping and lower-casing steps.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("qeimado", "queimado"),
    ("qseimado", "queimado"),
    ("queimdo", "queimado"),
    ("qeimdo", "queimado"),
    ("queimmado", "queimado"),
    ("blutooth", "bluetooth"),
    ("bluetooh", "bluetooth"),
    ("bluetoth", "bluetooth"),
    ("tweter", "tweeter"),
    ("tweteer", "tweeter"),
    ("sem som", "sem áudio"),
    ("audio", "áudio"),
    ("autonaticamente", "automaticamente"),
    ("defeito", "defeito"),
    ("reincidencia", "reincidência"),
    ("vibracao", "vibração"),
    ("mancha escura", "mancha"),
];

static WORD_SUBSTITUTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SUBSTITUTIONS
        .iter()
        .map(|(wrong, right)| {
            let pattern = format!(r"\b{}\b", regex::escape(wrong));
            // Patterns are built from a fixed table of plain words.
            let re = Regex::new(&pattern).expect("substitution pattern must compile");
            (re, *right)
        })
        .collect()
});

/// Cleans a single free-text value.
///
/// Steps, in order: strip diacritics via canonical decomposition, lower-case
/// and trim, fix known misspellings on whole-word boundaries, collapse
/// consecutive duplicate words, strip trailing punctuation, and collapse
/// whitespace runs. The middle steps can expose fresh matches for one
/// another ("mancha escura escura" only reduces fully on a second look), so
/// they are repeated until the text is stable.
///
/// Pure and idempotent: `normalize(normalize(x)) == normalize(x)`.
#[must_use]
pub fn normalize(text: &str) -> String {
    // Canonical decomposition, combining marks discarded
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .collect();

    let lowered = stripped.to_lowercase();
    let mut text = join_words(lowered.trim());

    loop {
        let next = cleanup_pass(&text);
        if next == text {
            break;
        }
        text = next;
    }

    join_words(&text)
}

/// One round of misspelling substitution, duplicate-word collapse and
/// trailing-punctuation stripping.
fn cleanup_pass(text: &str) -> String {
    let mut text = text.to_string();

    for (pattern, replacement) in WORD_SUBSTITUTIONS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }

    let text = collapse_duplicate_words(&text);
    text.trim_end_matches([';', '.', ',']).to_string()
}

/// Collapses a word immediately followed by itself, one or more times, into
/// a single occurrence ("ruido ruido ruido" -> "ruido").
fn collapse_duplicate_words(text: &str) -> String {
    let mut result: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        if result.last() != Some(&word) {
            result.push(word);
        }
    }

    result.join(" ")
}

/// Collapses whitespace runs into single spaces and trims.
fn join_words(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_lowercases() {
        assert_eq!(normalize("  Ruído EXCESSIVO  "), "ruido excessivo");
    }

    #[test]
    fn fixes_known_misspellings_on_whole_words() {
        assert_eq!(normalize("alto falante qeimado"), "alto falante queimado");
        assert_eq!(normalize("blutooth nao pareia"), "bluetooth nao pareia");
    }

    #[test]
    fn leaves_misspellings_inside_longer_words_untouched() {
        assert_eq!(normalize("desqeimadox"), "desqeimadox");
    }

    #[test]
    fn substitutes_multi_word_phrases() {
        assert_eq!(normalize("aparelho sem som"), "aparelho sem áudio");
        assert_eq!(normalize("mancha escura no painel"), "mancha no painel");
    }

    #[test]
    fn restores_canonical_accents() {
        // The accent-stripping step turns "vibração" into "vibracao"; the
        // substitution table maps it back to the canonical spelling.
        assert_eq!(normalize("Vibração"), "vibração");
        assert_eq!(normalize("sem audio"), "sem áudio");
    }

    #[test]
    fn collapses_consecutive_duplicate_words() {
        assert_eq!(normalize("ruido ruido ruido no tweeter"), "ruido no tweeter");
        assert_eq!(normalize("tela tela manchada"), "tela manchada");
    }

    #[test]
    fn strips_trailing_punctuation() {
        assert_eq!(normalize("nao liga;"), "nao liga");
        assert_eq!(normalize("nao liga..."), "nao liga");
        assert_eq!(normalize("nao liga,;."), "nao liga");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize("tela   manchada \t na borda"), "tela manchada na borda");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "Alto-falante QEIMADO;",
            "sem som som",
            "sem  som",
            "ruido ruido.",
            "  Reincidência de vibracao  ",
            "mancha escura escura no painel...",
            "",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }
}
