//! Word tokenizer
//!
//! Splits text into maximal runs of word characters (letters, digits and
//! underscore). Case is preserved and no stemming is applied.

use regex::Regex;
use std::sync::LazyLock;

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Iterate over the word tokens of `text`
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    WORD_REGEX.find_iter(text).map(|m| m.as_str())
}

/// Tokenize an optional text
///
/// Absent text produces no tokens.
pub fn tokenize(text: Option<&str>) -> Vec<&str> {
    match text {
        Some(text) => words(text).collect(),
        None => Vec::new(),
    }
}
