//! Word-frequency dictionary
//!
//! Counts how many times each token appears in the training tweets of one
//! sentiment class.

use super::tokenizer::words;
use crate::data::LabeledSample;
use std::collections::HashMap;

/// Token occurrence counts for one class
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyDictionary {
    counts: HashMap<String, usize>,
    /// Sum of all counts
    total: usize,
}

impl FrequencyDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every token of every sample
    pub fn build(samples: &[LabeledSample]) -> Self {
        let mut dictionary = Self::new();
        for sample in samples {
            dictionary.add_text(sample.text());
        }
        dictionary
    }

    /// Count whole samples until the running total exceeds `capacity`
    ///
    /// The cap is checked before each sample, so the last sample counted may
    /// push the total past `capacity`. Once the total is over the cap, the
    /// remaining samples are skipped entirely.
    pub fn build_sized(samples: &[LabeledSample], capacity: usize) -> Self {
        let mut dictionary = Self::new();
        for sample in samples {
            if dictionary.total > capacity {
                break;
            }
            dictionary.add_text(sample.text());
        }
        dictionary
    }

    /// Add the tokens of one text, returning how many were counted
    pub fn add_text(&mut self, text: Option<&str>) -> usize {
        let Some(text) = text else {
            return 0;
        };

        let mut added = 0;
        for word in words(text) {
            *self.counts.entry(word.to_string()).or_insert(0) += 1;
            added += 1;
        }
        self.total += added;
        added
    }

    /// Occurrences of `token`, 0 if unseen
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total token occurrences
    pub fn cardinality(&self) -> usize {
        self.total
    }

    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// Most frequent tokens, ties broken alphabetically
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Label;

    fn samples(texts: &[&str]) -> Vec<LabeledSample> {
        texts
            .iter()
            .map(|t| LabeledSample::new(*t, Label::Positive))
            .collect()
    }

    #[test]
    fn test_build_counts_all_tokens() {
        let data = samples(&["good day", "good good night", "day"]);
        let dict = FrequencyDictionary::build(&data);

        assert_eq!(dict.count("good"), 3);
        assert_eq!(dict.count("day"), 2);
        assert_eq!(dict.count("night"), 1);
        assert_eq!(dict.count("missing"), 0);
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.cardinality(), 6);
        assert_eq!(dict.cardinality(), dict.iter().map(|(_, c)| c).sum::<usize>());
    }

    #[test]
    fn test_missing_text_contributes_nothing() {
        let data = vec![
            LabeledSample::without_text(Label::Negative),
            LabeledSample::new("bad", Label::Negative),
        ];
        let dict = FrequencyDictionary::build(&data);

        assert_eq!(dict.len(), 1);
        assert_eq!(dict.cardinality(), 1);
    }

    #[test]
    fn test_sized_zero_capacity_counts_first_sample() {
        let data = samples(&["one two three", "four five"]);
        let dict = FrequencyDictionary::build_sized(&data, 0);

        assert_eq!(dict.cardinality(), 3);
        assert!(!dict.contains("four"));
    }

    #[test]
    fn test_sized_stops_after_cap_exceeded() {
        let data = samples(&["a b", "c d", "e f", "g h"]);

        // 0 -> 2 -> 4 (still <= 4) -> 6, then stop
        let dict = FrequencyDictionary::build_sized(&data, 4);
        assert_eq!(dict.cardinality(), 6);
        assert!(dict.contains("e"));
        assert!(!dict.contains("g"));

        // Overshoot is bounded by one sample
        let dict = FrequencyDictionary::build_sized(&data, 3);
        assert_eq!(dict.cardinality(), 4);
    }

    #[test]
    fn test_sized_empty_samples_do_not_consume_capacity() {
        let data = vec![
            LabeledSample::without_text(Label::Positive),
            LabeledSample::new("", Label::Positive),
            LabeledSample::new("x y", Label::Positive),
            LabeledSample::new("z", Label::Positive),
        ];
        let dict = FrequencyDictionary::build_sized(&data, 0);

        assert_eq!(dict.cardinality(), 2);
        assert!(!dict.contains("z"));
    }

    #[test]
    fn test_sized_large_capacity_matches_build() {
        let data = samples(&["a b", "b c", "c d"]);
        assert_eq!(
            FrequencyDictionary::build_sized(&data, 1_000),
            FrequencyDictionary::build(&data)
        );
    }

    #[test]
    fn test_most_common() {
        let data = samples(&["b a a c b a"]);
        let dict = FrequencyDictionary::build(&data);

        assert_eq!(dict.most_common(2), vec![("a", 3), ("b", 2)]);
    }
}
