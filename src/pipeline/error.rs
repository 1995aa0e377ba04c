use std::path::PathBuf;

/// Fatal startup errors raised while loading the model and config artifacts.
///
/// Any of these means the process must refuse to serve predictions until an
/// operator fixes the deployment; they are never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },
    #[error("artifact corrupt ({path}): {reason}")]
    ArtifactCorrupt { path: PathBuf, reason: String },
}

/// Per-request errors raised by the inference engine.
///
/// These are recoverable: they affect only the request that triggered them
/// and never invalidate the shared [`ModelContext`](crate::ModelContext).
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The submitted bytes could not be decoded into a usable bitmap.
    /// Successfully decoded images are normalized to 3-channel RGB before
    /// tensorizing, so decode is the only place this can arise.
    #[error("unsupported image format: {0}")]
    UnsupportedImageFormat(String),
    /// The classifier invocation itself failed (tensor shape mismatch or a
    /// runtime failure in the numeric backend).
    #[error("inference failure: {0}")]
    InferenceFailure(String),
}

impl From<ort::Error> for InferenceError {
    fn from(err: ort::Error) -> Self {
        InferenceError::InferenceFailure(err.to_string())
    }
}
