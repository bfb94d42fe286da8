//! Natural-language signal detection
//!
//! Guards against capturing pure navigation or UI chrome: real prose carries
//! function words, sentence punctuation, and inflected verb forms, while a
//! wall of menu labels carries none of them.

use regex::Regex;
use std::collections::HashSet;

const FUNCTION_WORDS: &[&str] = &[
    "the", "and", "of", "to", "in", "is", "that", "with", "for", "was", "are", "this",
];

// How many words from the front of the text to inspect.
const SAMPLE_WORDS: usize = 500;

/// Whether `text` looks like natural language.
///
/// Any one signal is enough: two distinct function words, sentence-ending
/// punctuation followed by a capital letter, or inflected verb forms.
pub fn looks_natural(text: &str) -> bool {
    let lower = text.to_lowercase();
    let tokens: HashSet<&str> = lower
        .split_whitespace()
        .take(SAMPLE_WORDS)
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .collect();

    let function_hits = FUNCTION_WORDS
        .iter()
        .filter(|w| tokens.contains(**w))
        .count();
    if function_hits >= 2 {
        return true;
    }

    let sentence = Regex::new(r"[.!?]\s+[A-Z]").unwrap();
    if sentence.is_match(text) {
        return true;
    }

    let inflected = Regex::new(r"\b[a-z]{3,}(ing|ed)\b").unwrap();
    inflected.is_match(&lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prose_passes() {
        assert!(looks_natural(
            "The model was trained on a large corpus. It performed well."
        ));
    }

    #[test]
    fn test_navigation_chrome_fails() {
        assert!(!looks_natural("Home | Products | About | Contact | Login"));
    }

    #[test]
    fn test_sentence_punctuation_alone_passes() {
        assert!(looks_natural("Short intro. Then more text follows here"));
    }

    #[test]
    fn test_inflected_verbs_alone_pass() {
        assert!(looks_natural("building testing shipping deploying"));
    }

    #[test]
    fn test_symbol_soup_fails() {
        assert!(!looks_natural("v1.2.3 x86_64 400kb 300ms 99% ???"));
    }
}
