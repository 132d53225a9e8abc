//! Train/evaluate pipeline
//!
//! Wires the partitioner, the class dictionaries, the classifier and the
//! evaluator together for one holdout run or a full k-fold cross-validation.

use crate::config::{PipelineConfig, ValidationStrategy};
use crate::data::{Dataset, LabeledSample, TrainingSplit};
use crate::error::{Error, Result};
use crate::ml::{ConfusionMatrix, Evaluator, MetricsReport};
use crate::nlp::FrequencyDictionary;
use crate::sentiment::{BayesClassifier, ScoreSpace, Smoothing};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of one holdout or fold run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub positive_training: usize,
    pub negative_training: usize,
    pub test_size: usize,
    pub undetermined: usize,
    pub confusion_matrix: ConfusionMatrix,
    pub metrics: MetricsReport,
}

/// Confusion matrix cells averaged over folds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanConfusionMatrix {
    pub tp: f64,
    #[serde(rename = "fn")]
    pub fn_: f64,
    pub fp: f64,
    pub tn: f64,
}

/// Per-fold outcomes and their arithmetic means
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationSummary {
    pub folds: Vec<RunOutcome>,
    pub mean_metrics: MetricsReport,
    pub mean_confusion_matrix: MeanConfusionMatrix,
    pub total_undetermined: usize,
}

impl CrossValidationSummary {
    /// Average fold outcomes, each one weighted `1 / k`
    pub fn from_folds(folds: Vec<RunOutcome>) -> Self {
        let k = folds.len() as f64;
        let mut mean_metrics = MetricsReport::default();
        let mut mean_confusion_matrix = MeanConfusionMatrix::default();

        for fold in &folds {
            mean_metrics.accuracy += fold.metrics.accuracy / k;
            mean_metrics.precision += fold.metrics.precision / k;
            mean_metrics.recall += fold.metrics.recall / k;
            mean_metrics.specificity += fold.metrics.specificity / k;

            mean_confusion_matrix.tp += fold.confusion_matrix.tp as f64 / k;
            mean_confusion_matrix.fn_ += fold.confusion_matrix.fn_ as f64 / k;
            mean_confusion_matrix.fp += fold.confusion_matrix.fp as f64 / k;
            mean_confusion_matrix.tn += fold.confusion_matrix.tn as f64 / k;
        }

        let total_undetermined = folds.iter().map(|f| f.undetermined).sum();

        Self {
            folds,
            mean_metrics,
            mean_confusion_matrix,
            total_undetermined,
        }
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "validation", rename_all = "snake_case")]
pub enum EvaluationReport {
    Holdout(RunOutcome),
    CrossValidation(CrossValidationSummary),
}

/// Runs the configured validation over a set of labeled samples
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Build the dataset and run holdout or cross-validation
    pub fn run(&self, samples: Vec<LabeledSample>) -> Result<EvaluationReport> {
        let mut dataset = match self.config.seed {
            Some(seed) => Dataset::with_seed(samples, seed),
            None => Dataset::new(samples),
        };
        info!(
            "Dataset created: {} positive, {} negative samples",
            dataset.positive_len(),
            dataset.negative_len()
        );

        match self.config.validation.strategy {
            ValidationStrategy::Holdout => self.run_holdout(&mut dataset).map(EvaluationReport::Holdout),
            ValidationStrategy::CrossValidation => self
                .run_cross_validation(&mut dataset)
                .map(EvaluationReport::CrossValidation),
        }
    }

    /// Single holdout run
    pub fn run_holdout(&self, dataset: &mut Dataset) -> Result<RunOutcome> {
        info!("Creating training and testing sets...");
        let split = dataset.holdout_split(self.config.validation.holdout_fraction)?;
        debug!("Dataset split:\n{}", split);

        self.evaluate_split(&split)
    }

    /// K-Fold cross-validation, aborting on the first failing fold
    pub fn run_cross_validation(&self, dataset: &mut Dataset) -> Result<CrossValidationSummary> {
        let k = self.config.validation.folds;
        if k < 2 {
            return Err(Error::invalid_argument(format!(
                "cross-validation needs at least 2 folds, got {}",
                k
            )));
        }
        info!("Proceeding with {}-fold cross-validation", k);

        let mut folds = Vec::with_capacity(k);
        for fold_index in 1..=k {
            let split = dataset.cross_validation_split_with(
                fold_index,
                k,
                self.config.validation.fold_remainder,
            )?;
            debug!("Fold {} split:\n{}", fold_index, split);

            let outcome = self.evaluate_split(&split)?;
            info!(
                "Fold {}/{}: accuracy {:.4}, {} undetermined",
                fold_index, k, outcome.metrics.accuracy, outcome.undetermined
            );
            folds.push(outcome);
        }

        Ok(CrossValidationSummary::from_folds(folds))
    }

    /// Train on a split and evaluate on its test set
    pub fn evaluate_split(&self, split: &TrainingSplit) -> Result<RunOutcome> {
        let classifier = self.train(split)?;
        let smoothing = self.smoothing();

        info!("Predicting sentiments for {} test tweets...", split.test_len());
        let classification = classifier.classify(&split.test, smoothing);
        info!(
            "Number of tweets with undetermined sentiments: {}",
            classification.undetermined
        );

        let evaluation = Evaluator::compare(&split.test, &classification.predictions)?;

        Ok(RunOutcome {
            positive_training: split.positive_count,
            negative_training: split.negative_count,
            test_size: split.test_len(),
            undetermined: classification.undetermined,
            confusion_matrix: evaluation.confusion_matrix,
            metrics: evaluation.metrics,
        })
    }

    /// Build both class dictionaries and the classifier for a split
    pub fn train(&self, split: &TrainingSplit) -> Result<BayesClassifier> {
        let positive = self.build_dictionary(&split.positive);
        let negative = self.build_dictionary(&split.negative);
        debug!(
            "Positive dictionary: {} words, {} tokens; negative dictionary: {} words, {} tokens",
            positive.len(),
            positive.cardinality(),
            negative.len(),
            negative.cardinality()
        );

        let classifier = BayesClassifier::new(positive, negative, split.positive_count, split.negative_count)?;
        Ok(classifier.with_score_space(self.score_space()))
    }

    fn build_dictionary(&self, samples: &[LabeledSample]) -> FrequencyDictionary {
        match self.config.dictionary.cap() {
            Some(capacity) => FrequencyDictionary::build_sized(samples, capacity),
            None => FrequencyDictionary::build(samples),
        }
    }

    fn score_space(&self) -> ScoreSpace {
        self.config.classifier.score_space
    }

    pub fn smoothing(&self) -> Smoothing {
        self.config.classifier.smoothing()
    }
}
