//! Labeled tweet data: types, loading and partitioning

pub mod loader;
pub mod partition;
pub mod types;

pub use loader::DataLoader;
pub use partition::{Dataset, FoldRemainder, TrainingSplit};
pub use types::{Label, LabeledSample};
