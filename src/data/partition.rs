//! Dataset partitioning
//!
//! Splits a label-partitioned, shuffled dataset into class-specific training
//! subsets and a combined, shuffled testing subset:
//! - Holdout: one split by fixed proportion
//! - K-Fold cross-validation: rotating test fold per class

use super::types::{Label, LabeledSample};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// What happens to the samples left over when a class does not divide
/// evenly into `k` folds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldRemainder {
    /// Leftover samples stay in training for every fold and are never tested
    #[default]
    TrainOnly,
    /// The last fold's test range runs to the end of the class
    LastFold,
}

/// Training subsets and test set for one holdout or fold run
#[derive(Debug, Clone)]
pub struct TrainingSplit {
    pub positive: Vec<LabeledSample>,
    pub negative: Vec<LabeledSample>,
    pub test: Vec<LabeledSample>,
    /// Positive training size used for the class prior
    pub positive_count: usize,
    /// Negative training size used for the class prior
    pub negative_count: usize,
}

impl TrainingSplit {
    pub fn test_len(&self) -> usize {
        self.test.len()
    }
}

impl fmt::Display for TrainingSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Positive samples in training set: {}", self.positive_count)?;
        writeln!(f, "Negative samples in training set: {}", self.negative_count)?;
        write!(f, "Samples in testing set:           {}", self.test.len())
    }
}

/// Labeled tweets split by class
///
/// Each class is shuffled once at construction. The RNG is kept so that
/// every split can reshuffle its test set reproducibly.
#[derive(Debug, Clone)]
pub struct Dataset {
    positive: Vec<LabeledSample>,
    negative: Vec<LabeledSample>,
    rng: StdRng,
}

impl Dataset {
    /// Build a dataset shuffled from OS entropy
    pub fn new(samples: Vec<LabeledSample>) -> Self {
        Self::with_rng(samples, StdRng::from_entropy())
    }

    /// Build a dataset with a reproducible shuffle
    pub fn with_seed(samples: Vec<LabeledSample>, seed: u64) -> Self {
        Self::with_rng(samples, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(samples: Vec<LabeledSample>, mut rng: StdRng) -> Self {
        let (mut positive, mut negative): (Vec<_>, Vec<_>) = samples
            .into_iter()
            .partition(|sample| sample.label == Label::Positive);

        positive.shuffle(&mut rng);
        negative.shuffle(&mut rng);

        Self {
            positive,
            negative,
            rng,
        }
    }

    pub fn positive(&self) -> &[LabeledSample] {
        &self.positive
    }

    pub fn negative(&self) -> &[LabeledSample] {
        &self.negative
    }

    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Holdout split
    ///
    /// The first `floor(train_fraction * |class|)` samples of each class go to
    /// training, the rest of both classes form the shuffled test set.
    pub fn holdout_split(&mut self, train_fraction: f64) -> Result<TrainingSplit> {
        if !(train_fraction > 0.0 && train_fraction <= 1.0) {
            return Err(Error::invalid_argument(format!(
                "holdout fraction must be in (0, 1], got {}",
                train_fraction
            )));
        }

        let split_pos = (self.positive.len() as f64 * train_fraction) as usize;
        let split_neg = (self.negative.len() as f64 * train_fraction) as usize;

        let mut test: Vec<LabeledSample> = self.positive[split_pos..]
            .iter()
            .chain(self.negative[split_neg..].iter())
            .cloned()
            .collect();
        test.shuffle(&mut self.rng);

        Ok(TrainingSplit {
            positive: self.positive[..split_pos].to_vec(),
            negative: self.negative[..split_neg].to_vec(),
            test,
            positive_count: split_pos,
            negative_count: split_neg,
        })
    }

    /// K-Fold split using fold `fold_index` (1-based) as the test set
    pub fn cross_validation_split(&mut self, fold_index: usize, k: usize) -> Result<TrainingSplit> {
        self.cross_validation_split_with(fold_index, k, FoldRemainder::TrainOnly)
    }

    /// K-Fold split with an explicit remainder policy
    pub fn cross_validation_split_with(
        &mut self,
        fold_index: usize,
        k: usize,
        remainder: FoldRemainder,
    ) -> Result<TrainingSplit> {
        if fold_index < 1 || fold_index > k {
            return Err(Error::invalid_argument(format!(
                "fold index must be in 1..={}, got {}",
                k, fold_index
            )));
        }

        let pos_fold = fold_range(self.positive.len(), fold_index, k, remainder);
        let neg_fold = fold_range(self.negative.len(), fold_index, k, remainder);

        let (positive, positive_count) = training_outside(&self.positive, &pos_fold, remainder);
        let (negative, negative_count) = training_outside(&self.negative, &neg_fold, remainder);

        let mut test: Vec<LabeledSample> = self.positive[pos_fold]
            .iter()
            .chain(self.negative[neg_fold].iter())
            .cloned()
            .collect();
        test.shuffle(&mut self.rng);

        Ok(TrainingSplit {
            positive,
            negative,
            test,
            positive_count,
            negative_count,
        })
    }

    /// Multi-line description of the class sizes
    pub fn summary(&self) -> String {
        format!(
            "Positive samples in the database: {}\nNegative samples in the database: {}",
            self.positive.len(),
            self.negative.len()
        )
    }
}

/// Test index range of a fold within one class of `len` samples
fn fold_range(len: usize, fold_index: usize, k: usize, remainder: FoldRemainder) -> Range<usize> {
    let fold_size = len / k;
    let start = (fold_index - 1) * fold_size;
    let end = match remainder {
        FoldRemainder::LastFold if fold_index == k => len,
        _ => fold_index * fold_size,
    };
    start..end
}

/// Samples outside the test fold, and the count reported as the class prior
fn training_outside(
    samples: &[LabeledSample],
    fold: &Range<usize>,
    remainder: FoldRemainder,
) -> (Vec<LabeledSample>, usize) {
    let training: Vec<LabeledSample> = samples[..fold.start]
        .iter()
        .chain(samples[fold.end..].iter())
        .cloned()
        .collect();

    let count = match remainder {
        // |class| - floor(|class| / k)
        FoldRemainder::TrainOnly => samples.len() - fold.len(),
        FoldRemainder::LastFold => training.len(),
    };
    (training, count)
}
