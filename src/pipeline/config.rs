use serde::{Deserialize, Serialize};

/// Number of color channels the classifier was trained on.
const EXPECTED_CHANNELS: u32 = 3;

/// Errors raised while parsing or validating a config artifact.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Validated, immutable classifier metadata.
///
/// Deserialized from the JSON config artifact shipped next to the model file.
/// The artifact uses the training pipeline's key scheme
/// (`MODEL_ARCHITECTURE`, `INPUT_SHAPE`, `RESCALE`, `CLASSES`); any extra
/// keys the training run recorded (batch size, epochs, learning rate ...)
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Descriptive architecture name, informational only.
    #[serde(rename = "MODEL_ARCHITECTURE")]
    pub architecture: String,
    /// `[height, width]` or `[height, width, channels]`.
    #[serde(rename = "INPUT_SHAPE")]
    input_shape: Vec<u32>,
    /// Scalar multiplied into every pixel intensity, typically 1/255.
    #[serde(rename = "RESCALE")]
    pub rescale: f32,
    /// Two label strings, index-aligned with the model's output vector.
    /// Index 0 is by convention the benign class.
    #[serde(rename = "CLASSES")]
    pub classes: Vec<String>,
}

impl ModelConfig {
    /// Parses and validates a config artifact from its raw JSON text.
    /// Fails fast on missing or out-of-range fields so that nothing
    /// downstream ever sees a half-valid config.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        match self.input_shape.len() {
            2 | 3 => {}
            n => return invalid(format!("INPUT_SHAPE must have 2 or 3 entries, found {}", n)),
        }
        if self.input_shape.iter().take(2).any(|&d| d == 0) {
            return invalid("INPUT_SHAPE height and width must be positive".into());
        }
        if self.channels() != EXPECTED_CHANNELS {
            return invalid(format!(
                "unsupported channel count {} (only {}-channel color input is supported)",
                self.channels(),
                EXPECTED_CHANNELS
            ));
        }
        if !(self.rescale > 0.0) || !self.rescale.is_finite() {
            return invalid(format!("RESCALE must be a positive finite number, found {}", self.rescale));
        }
        if self.classes.len() != 2 {
            return invalid(format!(
                "CLASSES must list exactly 2 labels, found {}",
                self.classes.len()
            ));
        }
        if self.classes.iter().any(|c| c.is_empty()) {
            return invalid("class labels cannot be empty".into());
        }
        if self.classes[0] == self.classes[1] {
            return invalid(format!("class labels must be distinct, both are '{}'", self.classes[0]));
        }
        Ok(())
    }

    /// Target spatial height of the prepared tensor.
    pub fn height(&self) -> u32 {
        self.input_shape[0]
    }

    /// Target spatial width of the prepared tensor.
    pub fn width(&self) -> u32 {
        self.input_shape[1]
    }

    /// Channel count; artifacts that omit it mean 3-channel color.
    pub fn channels(&self) -> u32 {
        self.input_shape.get(2).copied().unwrap_or(EXPECTED_CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "MODEL_ARCHITECTURE": "MobileNetV2",
        "INPUT_SHAPE": [224, 224, 3],
        "RESCALE": 0.00392156862,
        "CLASSES": ["benign", "malignant"]
    }"#;

    #[test]
    fn test_parse_valid_config() {
        let config = ModelConfig::parse(VALID).unwrap();
        assert_eq!(config.architecture, "MobileNetV2");
        assert_eq!(config.height(), 224);
        assert_eq!(config.width(), 224);
        assert_eq!(config.channels(), 3);
        assert_eq!(config.classes, vec!["benign", "malignant"]);
        assert!(config.rescale > 0.0);
    }

    #[test]
    fn test_two_element_shape_defaults_to_three_channels() {
        let config = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "MobileNetV2", "INPUT_SHAPE": [128, 96],
                "RESCALE": 0.00392156862, "CLASSES": ["benign", "malignant"]}"#,
        )
        .unwrap();
        assert_eq!(config.height(), 128);
        assert_eq!(config.width(), 96);
        assert_eq!(config.channels(), 3);
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let config = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "MobileNetV2", "INPUT_SHAPE": [224, 224, 3],
                "RESCALE": 0.00392156862, "CLASSES": ["benign", "malignant"],
                "BATCH_SIZE": 32, "EPOCHS": 15, "INITIAL_LEARNING_RATE": 0.001,
                "DROPOUT_RATE": 0.3}"#,
        );
        assert!(config.is_ok());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let result = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "MobileNetV2", "INPUT_SHAPE": [224, 224, 3],
                "CLASSES": ["benign", "malignant"]}"#,
        );
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_zero_rescale_is_rejected() {
        let result = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "m", "INPUT_SHAPE": [224, 224, 3],
                "RESCALE": 0.0, "CLASSES": ["benign", "malignant"]}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_rescale_is_rejected() {
        let result = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "m", "INPUT_SHAPE": [224, 224, 3],
                "RESCALE": -1.0, "CLASSES": ["benign", "malignant"]}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_wrong_class_count_is_rejected() {
        let one = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "m", "INPUT_SHAPE": [224, 224, 3],
                "RESCALE": 0.004, "CLASSES": ["benign"]}"#,
        );
        assert!(one.is_err());

        let three = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "m", "INPUT_SHAPE": [224, 224, 3],
                "RESCALE": 0.004, "CLASSES": ["a", "b", "c"]}"#,
        );
        assert!(three.is_err());
    }

    #[test]
    fn test_duplicate_class_labels_are_rejected() {
        let result = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "m", "INPUT_SHAPE": [224, 224, 3],
                "RESCALE": 0.004, "CLASSES": ["benign", "benign"]}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let result = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "m", "INPUT_SHAPE": [0, 224, 3],
                "RESCALE": 0.004, "CLASSES": ["benign", "malignant"]}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_grayscale_channel_count_is_rejected() {
        let result = ModelConfig::parse(
            r#"{"MODEL_ARCHITECTURE": "m", "INPUT_SHAPE": [224, 224, 1],
                "RESCALE": 0.004, "CLASSES": ["benign", "malignant"]}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(ModelConfig::parse("not json at all"), Err(ConfigError::Json(_))));
    }
}
