//! Configuration management
//!
//! One configuration drives the whole train/evaluate pipeline. It can be
//! loaded from TOML or JSON and is overridden by command-line flags.

use crate::data::FoldRemainder;
use crate::sentiment::{ScoreSpace, Smoothing};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seed for the shuffles; entropy is used when unset
    pub seed: Option<u64>,
    pub data: DataSettings,
    pub validation: ValidationSettings,
    pub dictionary: DictionarySettings,
    pub classifier: ClassifierSettings,
}

/// Input file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub path: PathBuf,
    pub delimiter: char,
    pub has_headers: bool,
    /// Zero-based index of the tweet text column
    pub text_column: usize,
    /// Zero-based index of the 0/1 label column
    pub label_column: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Database/FinalStemmedSentimentAnalysisDataset.csv"),
            delimiter: ';',
            has_headers: true,
            text_column: 1,
            label_column: 3,
        }
    }
}

/// Validation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrategy {
    #[default]
    Holdout,
    #[serde(alias = "crossvalidation")]
    CrossValidation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub strategy: ValidationStrategy,
    /// Share of each class used for training in holdout
    pub holdout_fraction: f64,
    /// Number of folds for cross-validation
    pub folds: usize,
    pub fold_remainder: FoldRemainder,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            strategy: ValidationStrategy::Holdout,
            holdout_fraction: 0.9,
            folds: 8,
            fold_remainder: FoldRemainder::TrainOnly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionarySettings {
    /// Cap each class dictionary at `size` counted tokens
    pub sized: bool,
    pub size: usize,
}

impl Default for DictionarySettings {
    fn default() -> Self {
        Self {
            sized: true,
            size: 9_000_000,
        }
    }
}

impl DictionarySettings {
    /// Token cap, `None` when unbounded
    pub fn cap(&self) -> Option<usize> {
        self.sized.then_some(self.size)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub laplace_smoothing: bool,
    pub score_space: ScoreSpace,
}

impl ClassifierSettings {
    pub fn smoothing(&self) -> Smoothing {
        Smoothing::from(self.laplace_smoothing)
    }
}

impl PipelineConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a `.toml` or `.json` file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if is_json(path) {
            Self::from_json(path)
        } else {
            Self::from_toml(path)
        }
    }

    /// Load configuration from TOML file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;
        let config: PipelineConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {:?}", path.as_ref()))?;
        let config: PipelineConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Save to a `.toml` or `.json` file, chosen by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {:?}", path))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        let fraction = self.validation.holdout_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            bail!("Holdout fraction must be in (0, 1], got {}", fraction);
        }
        if self.validation.strategy == ValidationStrategy::CrossValidation && self.validation.folds < 2 {
            bail!("Cross-validation needs at least 2 folds, got {}", self.validation.folds);
        }
        if self.data.text_column == self.data.label_column {
            bail!("Text and label columns must differ");
        }
        if !self.data.delimiter.is_ascii() {
            bail!("Delimiter must be an ASCII character");
        }
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.validation.strategy, ValidationStrategy::Holdout);
        assert_eq!(config.validation.holdout_fraction, 0.9);
        assert_eq!(config.validation.folds, 8);
        assert_eq!(config.dictionary.cap(), Some(9_000_000));
        assert!(!config.classifier.laplace_smoothing);
        assert_eq!(config.data.delimiter, ';');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = PipelineConfig::default();
        config.validation.strategy = ValidationStrategy::CrossValidation;
        config.classifier.score_space = ScoreSpace::Log;
        config.seed = Some(7);
        config.save(&path).unwrap();

        assert_eq!(PipelineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PipelineConfig::default();
        config.dictionary.sized = false;
        config.validation.fold_remainder = FoldRemainder::LastFold;
        config.save(&path).unwrap();

        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.dictionary.cap(), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PipelineConfig = toml::from_str(
            r#"
            [validation]
            strategy = "crossvalidation"
            folds = 4

            [classifier]
            laplace_smoothing = true
            "#,
        )
        .unwrap();

        assert_eq!(config.validation.strategy, ValidationStrategy::CrossValidation);
        assert_eq!(config.validation.folds, 4);
        assert_eq!(config.validation.holdout_fraction, 0.9);
        assert_eq!(config.classifier.smoothing(), Smoothing::Laplace);
        assert_eq!(config.data.label_column, 3);
    }

    #[test]
    fn test_config_validation() {
        let mut config = PipelineConfig::default();
        config.validation.holdout_fraction = 0.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.validation.strategy = ValidationStrategy::CrossValidation;
        config.validation.folds = 1;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.data.label_column = config.data.text_column;
        assert!(config.validate().is_err());
    }
}
