use std::sync::Arc;
use std::thread;

use dermalens::{prepare_tensor, LoadError, ModelConfig, ModelContext};
use image::{DynamicImage, RgbImage};

fn test_config() -> ModelConfig {
    ModelConfig::parse(
        r#"{"MODEL_ARCHITECTURE": "MobileNetV2", "INPUT_SHAPE": [224, 224, 3],
            "RESCALE": 0.00392156862, "CLASSES": ["benign", "malignant"]}"#,
    )
    .unwrap()
}

fn synthetic_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(320, 240, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

#[test]
fn test_concurrent_preprocessing_matches_sequential() {
    let config = Arc::new(test_config());
    let image = Arc::new(synthetic_image());
    let baseline = prepare_tensor(&image, &config);

    let mut handles = vec![];
    for _ in 0..4 {
        let config = Arc::clone(&config);
        let image = Arc::clone(&image);
        handles.push(thread::spawn(move || prepare_tensor(&image, &config)));
    }

    for handle in handles {
        let tensor = handle.join().unwrap();
        assert_eq!(tensor, baseline);
    }
}

#[test]
fn test_concurrent_preprocessing_of_distinct_images_does_not_cross_contaminate() {
    let config = Arc::new(test_config());
    let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, image::Rgb([255, 255, 255])));
    let black = DynamicImage::ImageRgb8(RgbImage::new(64, 64));
    let expected_white = prepare_tensor(&white, &config);
    let expected_black = prepare_tensor(&black, &config);

    let mut handles = vec![];
    for i in 0..8 {
        let config = Arc::clone(&config);
        let image = if i % 2 == 0 { white.clone() } else { black.clone() };
        handles.push(thread::spawn(move || (i, prepare_tensor(&image, &config))));
    }

    for handle in handles {
        let (i, tensor) = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(tensor, expected_white);
        } else {
            assert_eq!(tensor, expected_black);
        }
    }
}

#[test]
fn test_concurrent_first_use_of_shared_context_fails_consistently() {
    // Concurrent first-use races through the one-time load guard; with the
    // artifacts absent every caller must see ArtifactNotFound, with no
    // deadlock and no poisoned guard left behind.
    let mut handles = vec![];
    for _ in 0..4 {
        handles.push(thread::spawn(|| {
            ModelContext::shared(
                "/tmp/dermalens-pipeline-tests/no-model.onnx",
                "/tmp/dermalens-pipeline-tests/no-config.json",
            )
        }));
    }

    for handle in handles {
        let result = handle.join().unwrap();
        assert!(matches!(result, Err(LoadError::ArtifactNotFound { .. })));
    }

    // A later sequential call behaves the same.
    let result = ModelContext::shared(
        "/tmp/dermalens-pipeline-tests/no-model.onnx",
        "/tmp/dermalens-pipeline-tests/no-config.json",
    );
    assert!(matches!(result, Err(LoadError::ArtifactNotFound { .. })));
}
