//! Plain-text analysis summaries for download or logging.

use std::fmt::Write as _;

use crate::pipeline::{ContextInfo, Prediction};

/// Fixed disclaimer that must accompany every rendered result.
pub const MEDICAL_DISCLAIMER: &str = "THIS RESULT IS INFORMATIONAL ONLY AND DOES NOT \
CONSTITUTE A MEDICAL DIAGNOSIS. Always consult a professional dermatologist; a \
definitive diagnosis requires clinical examination and possibly a biopsy.";

/// Renders a prediction as a plain-text report, the payload behind the
/// presentation layer's "download results" action.
pub fn render_report(prediction: &Prediction, info: &ContextInfo) -> String {
    let adverse = prediction.label != info.classes[0];
    let verdict = if adverse {
        format!("SUSPICIOUS / {}", prediction.label.to_uppercase())
    } else {
        prediction.label.to_uppercase()
    };
    let recommendation = if adverse {
        "Consult a dermatologist IMMEDIATELY for a full clinical evaluation. \
         Early diagnosis is crucial for successful treatment."
    } else {
        "Even with a benign-looking result, a dermatologist should confirm the \
         finding and evaluate personal risk factors."
    };

    let mut out = String::new();
    let _ = writeln!(out, "SKIN LESION ANALYSIS RESULT");
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", MEDICAL_DISCLAIMER);
    let _ = writeln!(out);
    let _ = writeln!(out, "RESULT: {}", verdict);
    let _ = writeln!(out, "Model confidence: {:.2}% ({})", prediction.confidence, prediction.tier);
    let _ = writeln!(out);
    let _ = writeln!(out, "PROBABILITIES:");
    for class in &info.classes {
        if let Some(pct) = prediction.probabilities.get(class) {
            let _ = writeln!(out, "- {}: {:.2}%", class, pct);
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "RECOMMENDATION:");
    let _ = writeln!(out, "{}", recommendation);
    let _ = writeln!(out);
    let _ = writeln!(out, "---");
    let _ = writeln!(out, "System: {}", info.architecture);
    let _ = writeln!(out, "This is a diagnostic aid, NOT a certified medical device.");
    out
}

/// Suggested filename for a downloaded report.
pub fn report_filename(prediction: &Prediction) -> String {
    format!("lesion_analysis_{}.txt", prediction.label)
}
