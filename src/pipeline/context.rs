use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use log::info;
use ort::session::Session;
use serde::Serialize;

use super::config::ModelConfig;
use super::error::LoadError;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// A loaded classifier and its validated configuration.
///
/// Constructed once from the two deployment-time artifacts (serialized model
/// plus JSON config), immutable afterwards, and shared read-only across any
/// number of concurrent inference calls. Construction is atomic: either both
/// artifacts load and validate, or the whole operation fails and no
/// partially-initialized context is ever exposed.
#[derive(Debug)]
pub struct ModelContext {
    pub config: ModelConfig,
    pub(crate) session: Session,
    /// Name of the model's batched image input, captured at load time.
    pub(crate) input_name: String,
    pub model_path: PathBuf,
    pub config_path: PathBuf,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ModelContext>();
    }
};

/// Summary of a loaded context, for presentation layers that render a
/// "system information" panel.
#[derive(Debug, Clone, Serialize)]
pub struct ContextInfo {
    pub architecture: String,
    pub input_height: u32,
    pub input_width: u32,
    pub classes: Vec<String>,
    pub model_path: String,
}

static SHARED: OnceLock<Arc<ModelContext>> = OnceLock::new();
static LOAD_GUARD: Mutex<()> = Mutex::new(());

impl ModelContext {
    /// Loads the model and config artifacts with default runtime settings.
    ///
    /// # Errors
    /// * [`LoadError::ArtifactNotFound`] if either file is absent
    /// * [`LoadError::ArtifactCorrupt`] if either file exists but cannot be
    ///   read, parsed or validated
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        model_path: P,
        config_path: Q,
    ) -> Result<Self, LoadError> {
        Self::load_with_runtime(model_path, config_path, &RuntimeConfig::default())
    }

    /// Same as [`ModelContext::load`] but with explicit ONNX Runtime
    /// session settings.
    pub fn load_with_runtime<P: AsRef<Path>, Q: AsRef<Path>>(
        model_path: P,
        config_path: Q,
        runtime: &RuntimeConfig,
    ) -> Result<Self, LoadError> {
        let model_path = model_path.as_ref().to_path_buf();
        let config_path = config_path.as_ref().to_path_buf();

        if !config_path.exists() {
            return Err(LoadError::ArtifactNotFound { path: config_path });
        }
        if !model_path.exists() {
            return Err(LoadError::ArtifactNotFound { path: model_path });
        }

        let raw = fs::read_to_string(&config_path).map_err(|e| LoadError::ArtifactCorrupt {
            path: config_path.clone(),
            reason: e.to_string(),
        })?;
        let config = ModelConfig::parse(&raw).map_err(|e| LoadError::ArtifactCorrupt {
            path: config_path.clone(),
            reason: e.to_string(),
        })?;
        info!(
            "Config loaded: {} {}x{}x{}, classes {:?}",
            config.architecture,
            config.height(),
            config.width(),
            config.channels(),
            config.classes
        );

        let session = create_session_builder(runtime)
            .and_then(|builder| builder.commit_from_file(&model_path))
            .map_err(|e| LoadError::ArtifactCorrupt {
                path: model_path.clone(),
                reason: e.to_string(),
            })?;

        Self::validate_model(&session, &model_path)?;
        let input_name = session.inputs[0].name.clone();
        info!(
            "Model loaded from {:?} (input '{}', {} output(s))",
            model_path,
            input_name,
            session.outputs.len()
        );

        Ok(Self {
            config,
            session,
            input_name,
            model_path,
            config_path,
        })
    }

    /// Returns the process-wide shared context, loading it on first use.
    ///
    /// Concurrent first calls are serialized through a load guard so the
    /// expensive artifact load runs at most once per process; every later
    /// call is a lock-free clone of the `Arc`.
    pub fn shared<P: AsRef<Path>, Q: AsRef<Path>>(
        model_path: P,
        config_path: Q,
    ) -> Result<Arc<Self>, LoadError> {
        if let Some(context) = SHARED.get() {
            return Ok(Arc::clone(context));
        }
        let _guard = LOAD_GUARD.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(context) = SHARED.get() {
            return Ok(Arc::clone(context));
        }
        let context = Arc::new(Self::load(model_path, config_path)?);
        let _ = SHARED.set(Arc::clone(&context));
        Ok(context)
    }

    /// Returns information about the loaded model for display purposes.
    pub fn info(&self) -> ContextInfo {
        ContextInfo {
            architecture: self.config.architecture.clone(),
            input_height: self.config.height(),
            input_width: self.config.width(),
            classes: self.config.classes.clone(),
            model_path: self.model_path.to_string_lossy().to_string(),
        }
    }

    /// Checks that the deserialized model exposes the single-input,
    /// single-output shape the pipeline invokes.
    fn validate_model(session: &Session, model_path: &Path) -> Result<(), LoadError> {
        if session.inputs.is_empty() {
            return Err(LoadError::ArtifactCorrupt {
                path: model_path.to_path_buf(),
                reason: "model has no inputs; expected one batched image input".into(),
            });
        }
        if session.outputs.is_empty() {
            return Err(LoadError::ArtifactCorrupt {
                path: model_path.to_path_buf(),
                reason: "model has no outputs; expected one probability vector".into(),
            });
        }
        Ok(())
    }
}
