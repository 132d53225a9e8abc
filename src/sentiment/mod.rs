//! Sentiment classification
//!
//! Multinomial Naive Bayes over per-class word-frequency dictionaries.

pub mod naive_bayes;

pub use naive_bayes::{
    BayesClassifier, Classification, Prediction, ScoreSpace, Scores, Smoothing,
};
