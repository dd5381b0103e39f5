pub mod config;
pub mod distribution;
pub mod error;
pub mod frequency;
pub mod matching;
pub mod pipeline;
pub mod ranking;
pub mod sampler;

pub use error::{ConfigError, DistributionError, InvalidGuessError, SimulationError};
