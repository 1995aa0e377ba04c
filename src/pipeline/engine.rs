use std::collections::HashMap;

use image::imageops::{self, FilterType};
use image::DynamicImage;
use log::debug;
use ndarray::Array4;
use ort::value::Tensor;

use super::config::ModelConfig;
use super::context::ModelContext;
use super::error::InferenceError;
use super::prediction::{ConfidenceTier, Prediction};

/// Decodes user-submitted bytes (file upload or camera capture) and
/// classifies the resulting image. Decode failures surface as
/// [`InferenceError::UnsupportedImageFormat`].
pub fn predict_bytes(context: &ModelContext, bytes: &[u8]) -> Result<Prediction, InferenceError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| InferenceError::UnsupportedImageFormat(e.to_string()))?;
    predict(context, &image)
}

/// Classifies one decoded image against a loaded context.
///
/// The pipeline is a single pass: resize to the configured input shape,
/// tensorize into `[1, H, W, C]`, multiply by the configured rescale factor,
/// invoke the session once, then map the output vector to a [`Prediction`].
/// The model is assumed to end in a softmax, so its outputs are taken as
/// probabilities without renormalization; only their cardinality is checked.
///
/// The context is never mutated, so any number of callers may run this
/// concurrently against one shared context.
pub fn predict(context: &ModelContext, image: &DynamicImage) -> Result<Prediction, InferenceError> {
    let tensor = prepare_tensor(image, &context.config);
    let scores = invoke(context, tensor)?;
    debug!("Raw model output: {:?}", scores);
    classify(&context.config.classes, &scores)
}

/// Resamples the image directly to the configured spatial dimensions
/// (aspect ratio is discarded, no letterboxing or cropping) and fills a
/// batched NHWC tensor with rescaled pixel intensities.
pub fn prepare_tensor(image: &DynamicImage, config: &ModelConfig) -> Array4<f32> {
    let (height, width) = (config.height(), config.width());
    let rgb = image.to_rgb8();
    let resized = imageops::resize(&rgb, width, height, FilterType::Triangle);
    let rescale = config.rescale;
    Array4::from_shape_fn(
        (1, height as usize, width as usize, config.channels() as usize),
        |(_, y, x, c)| resized.get_pixel(x as u32, y as u32)[c] as f32 * rescale,
    )
}

/// Runs the classifier once on a prepared tensor and returns the flattened
/// output vector.
fn invoke(context: &ModelContext, tensor: Array4<f32>) -> Result<Vec<f32>, InferenceError> {
    let input_dyn = tensor.into_dyn();
    let input_view = input_dyn.as_standard_layout();
    let input = Tensor::from_array(&input_view)
        .map_err(|e| InferenceError::InferenceFailure(format!("failed to create input tensor: {}", e)))?;

    let mut input_tensors = HashMap::new();
    input_tensors.insert(context.input_name.as_str(), input);

    let outputs = context
        .session
        .run(input_tensors)
        .map_err(|e| InferenceError::InferenceFailure(format!("failed to run model: {}", e)))?;
    let output_tensor = outputs[0]
        .try_extract_tensor::<f32>()
        .map_err(|e| InferenceError::InferenceFailure(format!("failed to extract output tensor: {}", e)))?;

    Ok(output_tensor.iter().copied().collect())
}

/// Maps a raw probability vector to a [`Prediction`]: argmax picks the label
/// (lowest index wins exact ties), probabilities are scaled to percentages,
/// and the winning percentage is banded into a tier.
pub(crate) fn classify(classes: &[String], scores: &[f32]) -> Result<Prediction, InferenceError> {
    if scores.len() != classes.len() {
        return Err(InferenceError::InferenceFailure(format!(
            "model returned {} scores for {} classes",
            scores.len(),
            classes.len()
        )));
    }

    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }

    let probabilities: HashMap<String, f32> = classes
        .iter()
        .cloned()
        .zip(scores.iter().map(|s| s * 100.0))
        .collect();
    let confidence = scores[best] * 100.0;

    Ok(Prediction {
        label: classes[best].clone(),
        confidence,
        probabilities,
        tier: ConfidenceTier::from_percent(confidence),
    })
}
