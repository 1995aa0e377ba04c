//! The inference pipeline: load a classifier once, turn user images into
//! predictions.

mod config;
mod context;
mod engine;
mod error;
mod prediction;

pub use config::{ConfigError, ModelConfig};
pub use context::{ContextInfo, ModelContext};
pub use engine::{predict, predict_bytes, prepare_tensor};
pub use error::{InferenceError, LoadError};
pub use prediction::{ConfidenceTier, Prediction};
