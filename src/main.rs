//! CLI for Naive Bayes tweet sentiment evaluation
//!
//! Usage:
//! ```bash
//! cargo run -- --help
//! cargo run -- evaluate --data tweets.csv --validation holdout --holdout 0.9
//! cargo run -- evaluate --config bayes.toml --validation cross-validation --folds 8 --laplace
//! cargo run -- classify --data tweets.csv --text "what a great day"
//! cargo run -- init-config --output bayes.toml
//! ```

use anyhow::{Context, Result};
use bayes_sentiment::{
    DataLoader, Dataset, FrequencyDictionary, Pipeline, PipelineConfig, Prediction, ScoreSpace,
    ValidationStrategy,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "bayes_sentiment")]
#[command(version = "0.1.0")]
#[command(about = "Naive Bayes sentiment classification of tweets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Train and evaluate with holdout or k-fold cross-validation
    Evaluate {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Validation method
        #[arg(short, long, value_enum)]
        validation: Option<Validation>,

        /// Share of each class used for training in holdout
        #[arg(long)]
        holdout: Option<f64>,

        /// Number of folds for cross-validation
        #[arg(short = 'k', long)]
        folds: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Train on the whole dataset and classify free text
    Classify {
        #[command(flatten)]
        settings: SettingsArgs,

        /// Text to classify (repeatable)
        #[arg(short, long, required = true)]
        text: Vec<String>,

        /// Number of most frequent words to show per class
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Write a default configuration file
    InitConfig {
        /// Output path (.toml or .json)
        #[arg(short, long, default_value = "bayes_sentiment.toml")]
        output: PathBuf,
    },
}

/// Settings shared by the training commands
#[derive(Args)]
struct SettingsArgs {
    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data file, overrides the configured path
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Cap each class dictionary at this many counted tokens
    #[arg(long, conflicts_with = "unbounded")]
    size: Option<usize>,

    /// Build unbounded dictionaries
    #[arg(long)]
    unbounded: bool,

    /// Use Laplace smoothing
    #[arg(long)]
    laplace: bool,

    /// Chain word probabilities as log sums
    #[arg(long)]
    log_space: bool,

    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Validation {
    Holdout,
    CrossValidation,
}

impl From<Validation> for ValidationStrategy {
    fn from(value: Validation) -> Self {
        match value {
            Validation::Holdout => ValidationStrategy::Holdout,
            Validation::CrossValidation => ValidationStrategy::CrossValidation,
        }
    }
}

impl SettingsArgs {
    /// Load the configuration file (or defaults) and apply flag overrides
    fn resolve(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(data) = &self.data {
            config.data.path = data.clone();
        }
        if let Some(size) = self.size {
            config.dictionary.sized = true;
            config.dictionary.size = size;
        }
        if self.unbounded {
            config.dictionary.sized = false;
        }
        if self.laplace {
            config.classifier.laplace_smoothing = true;
        }
        if self.log_space {
            config.classifier.score_space = ScoreSpace::Log;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Evaluate {
            settings,
            validation,
            holdout,
            folds,
            json,
        } => {
            let mut config = settings.resolve()?;
            if let Some(validation) = validation {
                config.validation.strategy = validation.into();
            }
            if let Some(holdout) = holdout {
                config.validation.holdout_fraction = holdout;
            }
            if let Some(folds) = folds {
                config.validation.folds = folds;
            }
            run_evaluate(config, json)?;
        }
        Commands::Classify {
            settings,
            text,
            top,
        } => {
            run_classify(settings.resolve()?, &text, top)?;
        }
        Commands::InitConfig { output } => {
            PipelineConfig::default().save(&output)?;
            println!("Default configuration written to {}", output.display());
        }
    }

    Ok(())
}

fn run_evaluate(config: PipelineConfig, json: bool) -> Result<()> {
    config.validate()?;

    info!("Reading data from {:?}...", config.data.path);
    let samples = DataLoader::load_samples(&config.data.path, &config.data)?;
    info!("Loaded {} samples", samples.len());

    let report = Pipeline::new(config)
        .run(samples)
        .context("Evaluation aborted")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("\n{}", report);
    }

    Ok(())
}

fn run_classify(config: PipelineConfig, texts: &[String], top: usize) -> Result<()> {
    config.validate()?;

    let samples = DataLoader::load_samples(&config.data.path, &config.data)?;
    let mut dataset = match config.seed {
        Some(seed) => Dataset::with_seed(samples, seed),
        None => Dataset::new(samples),
    };
    info!("{}", dataset.summary());

    // every sample goes to training
    let split = dataset.holdout_split(1.0)?;
    let pipeline = Pipeline::new(config);
    let classifier = pipeline.train(&split).context("Training failed")?;
    info!(
        "Priors: positive {:.4}, negative {:.4}",
        classifier.positive_prior(),
        classifier.negative_prior()
    );

    if top > 0 {
        println!(
            "Most common positive words: {}",
            format_words(classifier.positive_dictionary(), top)
        );
        println!(
            "Most common negative words: {}",
            format_words(classifier.negative_dictionary(), top)
        );
        println!();
    }

    for text in texts {
        let scores = classifier.scores(Some(text.as_str()), pipeline.smoothing());
        let sentiment = match scores.decide() {
            Prediction::Positive => "positive",
            Prediction::Negative => "negative",
            Prediction::Undetermined => "undetermined",
        };
        println!(
            "{:<12} (pos {:.3e}, neg {:.3e})  {}",
            sentiment, scores.positive, scores.negative, text
        );
    }

    Ok(())
}

fn format_words(dictionary: &FrequencyDictionary, n: usize) -> String {
    dictionary
        .most_common(n)
        .iter()
        .map(|(word, count)| format!("{} ({})", word, count))
        .collect::<Vec<_>>()
        .join(", ")
}
