use anyhow::Context as _;
use clap::Parser;
use dermalens::{predict_bytes, render_report, report_filename, ArtifactLocator, ModelContext, MEDICAL_DISCLAIMER};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image of the skin lesion to analyze (JPG/JPEG/PNG)
    image: PathBuf,

    /// Path to the ONNX model artifact (defaults to the artifact directory)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Path to the JSON config artifact (defaults to the artifact directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the plain-text analysis report next to the image
    #[arg(short, long)]
    report: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let locator = ArtifactLocator::new_default();
    let model_path = args.model.unwrap_or_else(|| locator.model_path());
    let config_path = args.config.unwrap_or_else(|| locator.config_path());

    let start_time = Instant::now();
    info!("Loading model context...");
    let context = ModelContext::shared(&model_path, &config_path)?;
    let info_panel = context.info();
    info!(
        "Context ready (took {:.2?}): {} {}x{}",
        start_time.elapsed(),
        info_panel.architecture,
        info_panel.input_height,
        info_panel.input_width
    );

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read image {}", args.image.display()))?;
    let predict_start = Instant::now();
    let prediction = predict_bytes(&context, &bytes)?;
    info!("Prediction took {:.2?}", predict_start.elapsed());

    let mut scores: Vec<_> = prediction.probabilities.iter().collect();
    scores.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("\nResults for {}:", args.image.display());
    println!("  Predicted class: {}", prediction.label);
    println!("  Confidence: {:.2}% ({})", prediction.confidence, prediction.tier);
    println!("  Probabilities:");
    for (label, pct) in scores {
        println!("    {}: {:.2}%", label, pct);
    }
    println!("\n{}", MEDICAL_DISCLAIMER);

    if args.report {
        let report = render_report(&prediction, &info_panel);
        let path = args
            .image
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join(report_filename(&prediction));
        std::fs::write(&path, report)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("\nReport written to {}", path.display());
    }

    Ok(())
}
