//! A thread-safe skin lesion classification pipeline over a pretrained ONNX
//! image classifier.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dermalens::{predict_bytes, ArtifactLocator, ModelContext};
//!
//! let locator = ArtifactLocator::new_default();
//! let context = ModelContext::load(locator.model_path(), locator.config_path())?;
//!
//! let bytes = std::fs::read("lesion.jpg")?;
//! let prediction = predict_bytes(&context, &bytes)?;
//! println!("{} ({:.2}%, {})", prediction.label, prediction.confidence, prediction.tier);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! A context is loaded once and shared read-only; predictions never mutate
//! it, so concurrent callers just clone the `Arc`:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dermalens::{predict_bytes, ArtifactLocator, ModelContext};
//! use std::thread;
//!
//! let locator = ArtifactLocator::new_default();
//! let context = ModelContext::shared(locator.model_path(), locator.config_path())?;
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let context = std::sync::Arc::clone(&context);
//!     handles.push(thread::spawn(move || {
//!         let bytes = std::fs::read("lesion.jpg").unwrap();
//!         predict_bytes(&context, &bytes).unwrap();
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub mod pipeline;
pub mod report;
mod runtime;

pub use artifacts::ArtifactLocator;
pub use pipeline::{
    predict, predict_bytes, prepare_tensor, ConfidenceTier, ConfigError, ContextInfo,
    InferenceError, LoadError, ModelConfig, ModelContext, Prediction,
};
pub use report::{render_report, report_filename, MEDICAL_DISCLAIMER};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
