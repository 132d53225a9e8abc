//! Core data types
//!
//! - Label: ground truth sentiment of a sample
//! - LabeledSample: one tweet with its label

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ground truth sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Negative = 0,
    Positive = 1,
}

impl Label {
    /// Convert a raw integer label
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            0 => Some(Label::Negative),
            1 => Some(Label::Positive),
            _ => None,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Label::Positive
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Negative => write!(f, "negative"),
            Label::Positive => write!(f, "positive"),
        }
    }
}

/// A tweet and its sentiment
///
/// The text is optional: malformed rows keep their label but contribute no
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledSample {
    pub text: Option<String>,
    pub label: Label,
}

impl LabeledSample {
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: Some(text.into()),
            label,
        }
    }

    /// Sample whose text is missing
    pub fn without_text(label: Label) -> Self {
        Self { text: None, label }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
