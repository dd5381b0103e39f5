pub mod cache;
pub mod error;
pub mod loader;
pub mod models;

pub use error::DataLoadError;
pub use models::{DIGIT_COUNT, Digit, DrawRecord, HistoricalDataset, POSITIONS};
