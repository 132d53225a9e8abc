//! # Bayes Sentiment
//!
//! Multinomial Naive Bayes sentiment classification of labeled tweets.
//!
//! - `nlp` - Tokenization and per-class word-frequency dictionaries
//! - `data` - Labeled samples, file loading, holdout and k-fold partitioning
//! - `sentiment` - Naive Bayes classifier with optional Laplace smoothing
//! - `ml` - Confusion matrix and evaluation metrics
//! - `pipeline` - Train/evaluate orchestration over one split or k folds
//! - `config` - Pipeline configuration
//!
//! ```rust,ignore
//! use bayes_sentiment::{DataLoader, Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let samples = DataLoader::load_samples(&config.data.path, &config.data)?;
//! let report = Pipeline::new(config).run(samples)?;
//! println!("{}", report);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod ml;
pub mod nlp;
pub mod pipeline;
pub mod report;
pub mod sentiment;

pub use config::{PipelineConfig, ValidationStrategy};
pub use data::{DataLoader, Dataset, FoldRemainder, Label, LabeledSample, TrainingSplit};
pub use error::{Error, Result};
pub use ml::{ConfusionMatrix, Evaluation, Evaluator, MetricsReport};
pub use nlp::{tokenize, FrequencyDictionary};
pub use pipeline::{CrossValidationSummary, EvaluationReport, Pipeline, RunOutcome};
pub use sentiment::{BayesClassifier, Prediction, ScoreSpace, Smoothing};
