//! Evaluation metrics for the sentiment classifier
//!
//! Includes:
//! - Binary confusion matrix (TP, FN, FP, TN)
//! - Accuracy, precision, recall and specificity
//!
//! An undetermined prediction is counted as "not positive".

use crate::data::LabeledSample;
use crate::error::{Error, Result};
use crate::sentiment::Prediction;
use serde::{Deserialize, Serialize};

/// Binary confusion matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
    pub fp: usize,
    pub tn: usize,
}

impl ConfusionMatrix {
    pub fn new(tp: usize, fn_: usize, fp: usize, tn: usize) -> Self {
        Self { tp, fn_, fp, tn }
    }

    /// Tally one (truth, prediction) pair
    pub fn record(&mut self, truth_positive: bool, predicted_positive: bool) {
        match (truth_positive, predicted_positive) {
            (true, true) => self.tp += 1,
            (true, false) => self.fn_ += 1,
            (false, true) => self.fp += 1,
            (false, false) => self.tn += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.tp + self.fn_ + self.fp + self.tn
    }

    /// Cells in (TP, FN, FP, TN) order
    pub fn as_array(&self) -> [usize; 4] {
        [self.tp, self.fn_, self.fp, self.tn]
    }

    pub fn accuracy(&self) -> Result<f64> {
        ratio("accuracy", self.tp + self.tn, self.total())
    }

    pub fn precision(&self) -> Result<f64> {
        ratio("precision", self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> Result<f64> {
        ratio("recall", self.tp, self.tp + self.fn_)
    }

    pub fn specificity(&self) -> Result<f64> {
        ratio("specificity", self.tn, self.tn + self.fp)
    }

    /// All four metrics, failing on the first undefined one
    pub fn metrics(&self) -> Result<MetricsReport> {
        Ok(MetricsReport {
            accuracy: self.accuracy()?,
            precision: self.precision()?,
            recall: self.recall()?,
            specificity: self.specificity()?,
        })
    }
}

fn ratio(metric: &'static str, numerator: usize, denominator: usize) -> Result<f64> {
    if denominator == 0 {
        return Err(Error::UndefinedMetric { metric });
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Metrics derived from one confusion matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub specificity: f64,
}

impl MetricsReport {
    /// Metrics in (accuracy, precision, recall, specificity) order
    pub fn as_array(&self) -> [f64; 4] {
        [self.accuracy, self.precision, self.recall, self.specificity]
    }
}

/// Result of comparing predictions against ground truth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub confusion_matrix: ConfusionMatrix,
    pub metrics: MetricsReport,
}

/// Compares predictions with the labels of a test set
pub struct Evaluator;

impl Evaluator {
    /// Build the confusion matrix of a test set
    pub fn confusion_matrix(
        test_set: &[LabeledSample],
        predictions: &[Prediction],
    ) -> Result<ConfusionMatrix> {
        if test_set.len() != predictions.len() {
            return Err(Error::LengthMismatch {
                expected: test_set.len(),
                actual: predictions.len(),
            });
        }

        let mut matrix = ConfusionMatrix::default();
        for (sample, prediction) in test_set.iter().zip(predictions) {
            matrix.record(sample.label.is_positive(), prediction.is_positive());
        }
        Ok(matrix)
    }

    /// Confusion matrix and metrics of a test set
    pub fn compare(test_set: &[LabeledSample], predictions: &[Prediction]) -> Result<Evaluation> {
        let confusion_matrix = Self::confusion_matrix(test_set, predictions)?;
        let metrics = confusion_matrix.metrics()?;

        Ok(Evaluation {
            confusion_matrix,
            metrics,
        })
    }
}
