//! Labeled tweet loading
//!
//! Reads a delimited file into `LabeledSample`s. Only two columns are used:
//! the tweet text and the integer sentiment label.

use super::types::{Label, LabeledSample};
use crate::config::DataSettings;
use anyhow::{anyhow, bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Data loader for delimited tweet files
pub struct DataLoader;

impl DataLoader {
    /// Load samples from a file
    pub fn load_samples<P: AsRef<Path>>(path: P, settings: &DataSettings) -> Result<Vec<LabeledSample>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        Self::read_samples(file, settings)
            .with_context(|| format!("Failed to read samples from {:?}", path.as_ref()))
    }

    /// Read samples from any reader
    pub fn read_samples<R: Read>(reader: R, settings: &DataSettings) -> Result<Vec<LabeledSample>> {
        let delimiter = delimiter_byte(settings.delimiter)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(settings.has_headers)
            .flexible(true)
            .from_reader(reader);

        let mut samples = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to parse record {}", index + 1))?;
            let sample = parse_record(&record, settings)
                .with_context(|| format!("Invalid record {}", index + 1))?;
            samples.push(sample);
        }

        tracing::debug!("Loaded {} samples", samples.len());
        Ok(samples)
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii())
        .ok_or_else(|| anyhow!("Delimiter must be a single ASCII character, got {:?}", delimiter))
}

fn parse_record(record: &StringRecord, settings: &DataSettings) -> Result<LabeledSample> {
    let text = record
        .get(settings.text_column)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    let raw_label = record
        .get(settings.label_column)
        .ok_or_else(|| anyhow!("Missing label column {}", settings.label_column))?;

    Ok(LabeledSample {
        text,
        label: parse_label(raw_label)?,
    })
}

/// Parse `0`/`1`, also accepting integral floats such as `1.0`
fn parse_label(raw: &str) -> Result<Label> {
    let raw = raw.trim();
    let value = match raw.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            let value: f64 = raw
                .parse()
                .with_context(|| format!("Label is not a number: {:?}", raw))?;
            if value.fract() != 0.0 {
                bail!("Label is not an integer: {:?}", raw);
            }
            value as i64
        }
    };

    Label::from_value(value).ok_or_else(|| anyhow!("Label must be 0 or 1, got {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings() -> DataSettings {
        DataSettings::default()
    }

    #[test]
    fn test_reads_default_layout() {
        let csv = "\
id;text;source;label
1;I love this;x;1
2;so sad today;x;0
3;;x;1
";
        let samples = DataLoader::read_samples(csv.as_bytes(), &settings()).unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], LabeledSample::new("I love this", Label::Positive));
        assert_eq!(samples[1].label, Label::Negative);
        assert_eq!(samples[2], LabeledSample::without_text(Label::Positive));
    }

    #[test]
    fn test_custom_columns() {
        let mut settings = settings();
        settings.delimiter = ',';
        settings.text_column = 0;
        settings.label_column = 1;
        settings.has_headers = false;

        let samples = DataLoader::read_samples("great,1\nawful,0.0\n".as_bytes(), &settings).unwrap();

        assert_eq!(samples[0].label, Label::Positive);
        assert_eq!(samples[1].label, Label::Negative);
    }

    #[test]
    fn test_rejects_unknown_label() {
        let csv = "id;text;source;label\n1;meh;x;2\n";
        let err = DataLoader::read_samples(csv.as_bytes(), &settings()).unwrap_err();

        assert!(format!("{:#}", err).contains("record 1"));
    }

    #[test]
    fn test_rejects_missing_label_column() {
        let csv = "id;text;source;label\n1;short row\n";
        assert!(DataLoader::read_samples(csv.as_bytes(), &settings()).is_err());
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label(" 1 ").unwrap(), Label::Positive);
        assert_eq!(parse_label("0.0").unwrap(), Label::Negative);
        assert!(parse_label("0.5").is_err());
        assert!(parse_label("yes").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id;text;source;label").unwrap();
        writeln!(file, "1;happy happy;x;1").unwrap();
        file.flush().unwrap();

        let samples = DataLoader::load_samples(file.path(), &settings()).unwrap();
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        assert!(DataLoader::load_samples("/nonexistent/tweets.csv", &settings()).is_err());
    }
}
