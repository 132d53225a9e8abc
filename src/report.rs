//! Text rendering of evaluation results

use crate::ml::{ConfusionMatrix, MetricsReport};
use crate::pipeline::{CrossValidationSummary, EvaluationReport, MeanConfusionMatrix, RunOutcome};
use std::fmt::{self, Display};

impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- CONFUSION MATRIX ------------------------------------------")?;
        writeln!(f, "TP:{} | FN:{}", self.tp, self.fn_)?;
        write!(f, "FP:{} | TN:{}", self.fp, self.tn)
    }
}

impl Display for MeanConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- CONFUSION MATRIX ------------------------------------------")?;
        writeln!(f, "TP:{:.2} | FN:{:.2}", self.tp, self.fn_)?;
        write!(f, "FP:{:.2} | TN:{:.2}", self.fp, self.tn)
    }
}

impl Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- METRICS ---------------------------------------------------")?;
        writeln!(f, "Accuracy:    {:.4}", self.accuracy)?;
        writeln!(f, "Precision:   {:.4}", self.precision)?;
        writeln!(f, "Recall:      {:.4}", self.recall)?;
        write!(f, "Specificity: {:.4}", self.specificity)
    }
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Training: {} positive, {} negative | Testing: {} tweets | Undetermined: {}",
            self.positive_training, self.negative_training, self.test_size, self.undetermined
        )?;
        writeln!(f, "{}", self.metrics)?;
        write!(f, "{}", self.confusion_matrix)
    }
}

impl Display for CrossValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fold) in self.folds.iter().enumerate() {
            writeln!(f, "=== Fold {} ===", i + 1)?;
            writeln!(f, "{}", fold)?;
            writeln!(f)?;
        }
        writeln!(
            f,
            "Cross-validation with {}-fold metrics' arithmetic mean results ({} undetermined in total):",
            self.folds.len(),
            self.total_undetermined
        )?;
        writeln!(f, "{}", self.mean_confusion_matrix)?;
        write!(f, "{}", self.mean_metrics)
    }
}

impl Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationReport::Holdout(outcome) => write!(f, "{}", outcome),
            EvaluationReport::CrossValidation(summary) => write!(f, "{}", summary),
        }
    }
}
