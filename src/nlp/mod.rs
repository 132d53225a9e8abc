//! Text processing
//!
//! - Tokenization into word runs
//! - Per-class word-frequency dictionaries

pub mod dictionary;
pub mod tokenizer;

pub use dictionary::FrequencyDictionary;
pub use tokenizer::{tokenize, words};
