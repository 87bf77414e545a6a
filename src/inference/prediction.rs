// Prediction payload and the rules that turn logits into a verdict.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Probability of FAKTA at or below which content is called a hoax.
pub const UNCERTAIN_THRESHOLD_LOW: f64 = 0.15;
/// Probability of FAKTA at or above which content is called fact.
pub const UNCERTAIN_THRESHOLD_HIGH: f64 = 0.85;

/// Classifier output index -> label. Index 0 is HOAX, index 1 is FAKTA.
pub const CLASS_LABELS: [&str; 2] = ["HOAX", "FAKTA"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Success,
    Error,
}

/// The thresholded verdict shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalLabel {
    #[serde(rename = "HOAX")]
    Hoax,
    #[serde(rename = "FAKTA")]
    Fakta,
    #[serde(rename = "BELUM DIVERIFIKASI")]
    Unverified,
}

impl FinalLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hoax => "HOAX",
            Self::Fakta => "FAKTA",
            Self::Unverified => "BELUM DIVERIFIKASI",
        }
    }

    /// Confident verdicts only at the extremes; everything between stays
    /// unverified.
    pub fn from_fakta_probability(p_fakta: f64) -> Self {
        if p_fakta >= UNCERTAIN_THRESHOLD_HIGH {
            Self::Fakta
        } else if p_fakta <= UNCERTAIN_THRESHOLD_LOW {
            Self::Hoax
        } else {
            Self::Unverified
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    #[serde(rename = "HOAX")]
    pub hoax: f64,
    #[serde(rename = "FAKTA")]
    pub fakta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutput {
    pub status: PredictionStatus,
    pub message: String,
    pub probabilities: Probabilities,
    pub predicted_label_model: String,
    pub highest_confidence: f64,
    pub final_label_thresholded: FinalLabel,
    pub inference_time_ms: f64,
}

impl PredictionOutput {
    /// Zeroed payload for anything that prevented a real prediction.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: PredictionStatus::Error,
            message: message.into(),
            probabilities: Probabilities::default(),
            predicted_label_model: "N/A".to_string(),
            highest_confidence: 0.0,
            final_label_thresholded: FinalLabel::Unverified,
            inference_time_ms: 0.0,
        }
    }

    pub fn from_logits(logits: [f32; 2], elapsed: Duration) -> Self {
        let [hoax, fakta] = softmax(logits);
        let (best, confidence) = if fakta > hoax { (1, fakta) } else { (0, hoax) };

        Self {
            status: PredictionStatus::Success,
            message: "Prediksi berhasil.".to_string(),
            probabilities: Probabilities { hoax, fakta },
            predicted_label_model: CLASS_LABELS[best].to_string(),
            highest_confidence: confidence,
            final_label_thresholded: FinalLabel::from_fakta_probability(fakta),
            inference_time_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PredictionStatus::Success
    }
}

/// Numerically stable two-class softmax.
pub fn softmax(logits: [f32; 2]) -> [f64; 2] {
    let a = logits[0] as f64;
    let b = logits[1] as f64;
    let max = a.max(b);
    let ea = (a - max).exp();
    let eb = (b - max).exp();
    let sum = ea + eb;
    [ea / sum, eb / sum]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_equal_logits() {
        let [a, b] = softmax([1.0, 1.0]);
        assert!((a - 0.5).abs() < 1e-10);
        assert!((b - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_softmax_sums_to_one_for_large_logits() {
        let [a, b] = softmax([800.0, -800.0]);
        assert!((a + b - 1.0).abs() < 1e-9, "softmax should not overflow");
        assert!(a > 0.999);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(FinalLabel::from_fakta_probability(0.90), FinalLabel::Fakta);
        assert_eq!(FinalLabel::from_fakta_probability(0.85), FinalLabel::Fakta);
        assert_eq!(FinalLabel::from_fakta_probability(0.05), FinalLabel::Hoax);
        assert_eq!(FinalLabel::from_fakta_probability(0.15), FinalLabel::Hoax);
        assert_eq!(FinalLabel::from_fakta_probability(0.50), FinalLabel::Unverified);
    }

    #[test]
    fn test_from_logits_picks_argmax() {
        let out = PredictionOutput::from_logits([-2.0, 3.0], Duration::from_millis(12));
        assert!(out.is_success());
        assert_eq!(out.predicted_label_model, "FAKTA");
        assert!((out.highest_confidence - out.probabilities.fakta).abs() < 1e-12);
        assert_eq!(out.final_label_thresholded, FinalLabel::Fakta);
        assert!((out.inference_time_ms - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_error_payload_is_zeroed() {
        let out = PredictionOutput::error("Model/Tokenizer belum dimuat.");
        assert_eq!(out.status, PredictionStatus::Error);
        assert_eq!(out.probabilities, Probabilities::default());
        assert_eq!(out.final_label_thresholded, FinalLabel::Unverified);
    }

    #[test]
    fn test_serialized_keys() {
        let out = PredictionOutput::from_logits([2.0, -2.0], Duration::ZERO);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json["probabilities"]["HOAX"].as_f64().unwrap() > 0.9);
        assert!(json["probabilities"].get("FAKTA").is_some());
        assert_eq!(json["final_label_thresholded"], "HOAX");

        let err = serde_json::to_value(PredictionOutput::error("x")).unwrap();
        assert_eq!(err["final_label_thresholded"], "BELUM DIVERIFIKASI");
    }
}
