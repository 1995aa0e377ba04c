use std::env;
use std::path::{Path, PathBuf};

use log::info;

const MODEL_FILE: &str = "skin_lesion_model.onnx";
const CONFIG_FILE: &str = "model_config.json";

/// Resolves where the deployment keeps the model and config artifacts.
///
/// The artifacts are deployment-time constants: this type only locates
/// them, it never writes or downloads anything.
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    artifacts_dir: PathBuf,
}

impl ArtifactLocator {
    /// Creates a locator rooted at the default artifacts directory.
    pub fn new_default() -> Self {
        Self::new(Self::default_artifacts_dir())
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> Self {
        Self {
            artifacts_dir: artifacts_dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the default artifacts directory path.
    pub fn default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("DERMALENS_MODEL_DIR") {
            return PathBuf::from(path);
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("dermalens").join("models");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("dermalens").join("models");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("dermalens").join("models")
    }

    pub fn model_path(&self) -> PathBuf {
        self.artifacts_dir.join(MODEL_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.artifacts_dir.join(CONFIG_FILE)
    }

    pub fn artifacts_present(&self) -> bool {
        let model_path = self.model_path();
        let config_path = self.config_path();
        info!(
            "Model artifact: {:?} (exists: {}), config artifact: {:?} (exists: {})",
            model_path,
            model_path.exists(),
            config_path,
            config_path.exists()
        );
        model_path.exists() && config_path.exists()
    }
}
