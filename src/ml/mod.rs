//! Model evaluation

pub mod metrics;

pub use metrics::{ConfusionMatrix, Evaluation, Evaluator, MetricsReport};
