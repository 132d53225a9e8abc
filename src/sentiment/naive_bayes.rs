//! Naive Bayes sentiment classifier
//!
//! Multinomial Naive Bayes over two word-frequency dictionaries. Word
//! probabilities are estimated either with Laplace smoothing:
//!
//! ```text
//! P(word | class) = (count(word) + 1) / (length(dict) + cardinality(dict))
//! ```
//!
//! or without smoothing:
//!
//! ```text
//! P(word | class) = count(word) / cardinality(dict)
//! ```
//!
//! Without smoothing, a single word unseen in a class drives that class's
//! score to zero for the rest of the tweet.

use crate::data::LabeledSample;
use crate::error::{Error, Result};
use crate::nlp::{words, FrequencyDictionary};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Predicted sentiment for one tweet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prediction {
    Negative = 0,
    Positive = 1,
    /// Both class scores were equal
    Undetermined = 2,
}

impl Prediction {
    /// Only `Positive` counts as a positive call; an abstention does not
    pub fn is_positive(self) -> bool {
        self == Prediction::Positive
    }
}

/// Word probability estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Smoothing {
    /// Maximum likelihood estimate, unseen words have probability 0
    #[default]
    None,
    /// Add-one smoothing
    Laplace,
}

impl From<bool> for Smoothing {
    fn from(laplace: bool) -> Self {
        if laplace {
            Smoothing::Laplace
        } else {
            Smoothing::None
        }
    }
}

/// How per-word probabilities are chained into a class score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSpace {
    /// Plain product of probabilities; long tweets may underflow to 0
    #[default]
    Linear,
    /// Sum of natural logarithms; a zero probability gives negative infinity
    Log,
}

impl ScoreSpace {
    /// Score before any word is seen
    pub fn initial(self, prior: f64) -> f64 {
        match self {
            ScoreSpace::Linear => prior,
            ScoreSpace::Log => prior.ln(),
        }
    }

    /// Fold one word probability into a running score
    pub fn combine(self, score: f64, probability: f64) -> f64 {
        match self {
            ScoreSpace::Linear => score * probability,
            ScoreSpace::Log => score + probability.ln(),
        }
    }
}

/// Class-conditional scores of one text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub positive: f64,
    pub negative: f64,
}

impl Scores {
    /// Strictly larger score wins, equality is undetermined
    pub fn decide(&self) -> Prediction {
        match self.negative.partial_cmp(&self.positive) {
            Some(Ordering::Less) => Prediction::Positive,
            Some(Ordering::Greater) => Prediction::Negative,
            _ => Prediction::Undetermined,
        }
    }
}

/// Predictions for a test set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// One prediction per test sample, in test-set order
    pub predictions: Vec<Prediction>,
    pub undetermined: usize,
}

/// Per-class probability model derived from one dictionary
#[derive(Debug, Clone, Copy)]
struct ClassModel<'a> {
    dictionary: &'a FrequencyDictionary,
    prior: f64,
}

impl ClassModel<'_> {
    fn word_probability(&self, word: &str, smoothing: Smoothing) -> f64 {
        let count = self.dictionary.count(word) as f64;
        match smoothing {
            Smoothing::Laplace => {
                (count + 1.0) / (self.dictionary.len() + self.dictionary.cardinality()) as f64
            }
            Smoothing::None => count / self.dictionary.cardinality() as f64,
        }
    }

    fn score(&self, text: Option<&str>, smoothing: Smoothing, space: ScoreSpace) -> f64 {
        let mut score = space.initial(self.prior);
        if let Some(text) = text {
            for word in words(text) {
                score = space.combine(score, self.word_probability(word, smoothing));
            }
        }
        score
    }
}

/// Naive Bayes classifier over a positive and a negative dictionary
#[derive(Debug, Clone)]
pub struct BayesClassifier {
    positive: FrequencyDictionary,
    negative: FrequencyDictionary,
    /// P(positive)
    positive_prior: f64,
    /// P(negative)
    negative_prior: f64,
    space: ScoreSpace,
}

impl BayesClassifier {
    /// Create a classifier from class dictionaries and training sizes
    ///
    /// Fails with `InvalidState` if either dictionary holds no tokens or if
    /// both training sizes are zero.
    pub fn new(
        positive: FrequencyDictionary,
        negative: FrequencyDictionary,
        positive_count: usize,
        negative_count: usize,
    ) -> Result<Self> {
        if positive.cardinality() == 0 {
            return Err(Error::invalid_state("positive dictionary is empty"));
        }
        if negative.cardinality() == 0 {
            return Err(Error::invalid_state("negative dictionary is empty"));
        }

        let total = positive_count + negative_count;
        if total == 0 {
            return Err(Error::invalid_state("no training samples for class priors"));
        }

        Ok(Self {
            positive,
            negative,
            positive_prior: positive_count as f64 / total as f64,
            negative_prior: negative_count as f64 / total as f64,
            space: ScoreSpace::default(),
        })
    }

    /// Use a different score space
    pub fn with_score_space(mut self, space: ScoreSpace) -> Self {
        self.space = space;
        self
    }

    pub fn positive_prior(&self) -> f64 {
        self.positive_prior
    }

    pub fn negative_prior(&self) -> f64 {
        self.negative_prior
    }

    pub fn positive_dictionary(&self) -> &FrequencyDictionary {
        &self.positive
    }

    pub fn negative_dictionary(&self) -> &FrequencyDictionary {
        &self.negative
    }

    /// Class scores of a single text
    pub fn scores(&self, text: Option<&str>, smoothing: Smoothing) -> Scores {
        let positive = ClassModel {
            dictionary: &self.positive,
            prior: self.positive_prior,
        };
        let negative = ClassModel {
            dictionary: &self.negative,
            prior: self.negative_prior,
        };

        Scores {
            positive: positive.score(text, smoothing, self.space),
            negative: negative.score(text, smoothing, self.space),
        }
    }

    /// Predict the sentiment of a single text
    pub fn predict(&self, text: Option<&str>, smoothing: Smoothing) -> Prediction {
        self.scores(text, smoothing).decide()
    }

    /// Predict every sample of a test set
    pub fn classify(&self, test_set: &[LabeledSample], smoothing: Smoothing) -> Classification {
        let predictions: Vec<Prediction> = test_set
            .iter()
            .map(|sample| self.predict(sample.text(), smoothing))
            .collect();

        let undetermined = predictions
            .iter()
            .filter(|&&p| p == Prediction::Undetermined)
            .count();

        Classification {
            predictions,
            undetermined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Label;
    use approx::assert_relative_eq;

    fn dictionary(texts: &[&str]) -> FrequencyDictionary {
        let samples: Vec<LabeledSample> = texts
            .iter()
            .map(|t| LabeledSample::new(*t, Label::Positive))
            .collect();
        FrequencyDictionary::build(&samples)
    }

    fn classifier(pos_count: usize, neg_count: usize) -> BayesClassifier {
        BayesClassifier::new(
            dictionary(&["good great", "good fun"]),
            dictionary(&["bad awful", "bad sad"]),
            pos_count,
            neg_count,
        )
        .unwrap()
    }

    #[test]
    fn test_priors() {
        let clf = classifier(3, 1);
        assert_relative_eq!(clf.positive_prior(), 0.75);
        assert_relative_eq!(clf.negative_prior(), 0.25);
    }

    #[test]
    fn test_class_dictionaries_are_kept() {
        let clf = classifier(1, 1);

        assert_eq!(clf.positive_dictionary().most_common(1), vec![("good", 2)]);
        assert_eq!(clf.negative_dictionary().most_common(1), vec![("bad", 2)]);
        assert_eq!(clf.negative_dictionary().cardinality(), 4);
    }

    #[test]
    fn test_laplace_scores() {
        let clf = classifier(1, 1);
        let scores = clf.scores(Some("good"), Smoothing::Laplace);

        // positive: len 3, card 4 -> (2 + 1) / 7
        assert_relative_eq!(scores.positive, 0.5 * (3.0 / 7.0));
        // negative: len 3, card 4 -> (0 + 1) / 7
        assert_relative_eq!(scores.negative, 0.5 * (1.0 / 7.0));
        assert_eq!(scores.decide(), Prediction::Positive);
    }

    #[test]
    fn test_laplace_unknown_words_with_equal_priors_is_undetermined() {
        let clf = classifier(2, 2);
        assert_eq!(
            clf.predict(Some("completely unseen"), Smoothing::Laplace),
            Prediction::Undetermined
        );
    }

    #[test]
    fn test_empty_text_falls_back_to_priors() {
        assert_eq!(classifier(2, 2).predict(None, Smoothing::Laplace), Prediction::Undetermined);
        assert_eq!(classifier(3, 2).predict(None, Smoothing::None), Prediction::Positive);
        assert_eq!(classifier(2, 3).predict(Some("!!"), Smoothing::None), Prediction::Negative);
    }

    #[test]
    fn test_unsmoothed_unknown_word_collapses_to_zero() {
        let clf = classifier(1, 1);

        let scores = clf.scores(Some("bad good"), Smoothing::None);
        assert_eq!(scores.positive, 0.0);
        assert_eq!(scores.negative, 0.0);
        assert_eq!(scores.decide(), Prediction::Undetermined);

        let scores = clf.scores(Some("bad"), Smoothing::None);
        assert_eq!(scores.positive, 0.0);
        assert!(scores.negative > 0.0);
        assert_eq!(scores.decide(), Prediction::Negative);
    }

    #[test]
    fn test_log_space_agrees_with_linear() {
        let linear = classifier(3, 2);
        let log = classifier(3, 2).with_score_space(ScoreSpace::Log);

        for text in ["good fun", "bad sad day", "good bad", "nothing", "bad"] {
            for smoothing in [Smoothing::Laplace, Smoothing::None] {
                assert_eq!(
                    linear.predict(Some(text), smoothing),
                    log.predict(Some(text), smoothing),
                    "text {:?} with {:?}",
                    text,
                    smoothing
                );
            }
        }
    }

    #[test]
    fn test_log_space_survives_long_texts() {
        let text = vec!["good"; 2000].join(" ");
        let linear = classifier(1, 1);
        let log = classifier(1, 1).with_score_space(ScoreSpace::Log);

        // the product underflows to 0 for both classes
        assert_eq!(linear.predict(Some(&text), Smoothing::Laplace), Prediction::Undetermined);
        assert_eq!(log.predict(Some(&text), Smoothing::Laplace), Prediction::Positive);
    }

    #[test]
    fn test_classify_counts_undetermined() {
        let clf = classifier(1, 1);
        let test_set = vec![
            LabeledSample::new("good great", Label::Positive),
            LabeledSample::new("bad sad", Label::Negative),
            LabeledSample::new("unknown", Label::Positive),
            LabeledSample::without_text(Label::Negative),
        ];

        let result = clf.classify(&test_set, Smoothing::Laplace);

        assert_eq!(
            result.predictions,
            vec![
                Prediction::Positive,
                Prediction::Negative,
                Prediction::Undetermined,
                Prediction::Undetermined
            ]
        );
        assert_eq!(result.undetermined, 2);
    }

    #[test]
    fn test_empty_dictionary_is_invalid_state() {
        let err = BayesClassifier::new(FrequencyDictionary::new(), dictionary(&["bad"]), 0, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));

        let err = BayesClassifier::new(dictionary(&["good"]), dictionary(&["bad"]), 0, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn test_smoothing_from_bool() {
        assert_eq!(Smoothing::from(true), Smoothing::Laplace);
        assert_eq!(Smoothing::from(false), Smoothing::None);
    }
}
