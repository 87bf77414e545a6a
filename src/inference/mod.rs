// Hoax classifier inference.
//
// InferenceEngine owns the loaded classifier for the process lifetime and
// is shared behind an Arc. Loading never fails hard: a missing or broken
// model leaves the engine unavailable, and every prediction then reports an
// error payload instead of a verdict.

pub mod download;
pub mod onnx;
pub mod prediction;
pub mod traits;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

pub use prediction::{
    FinalLabel, PredictionOutput, PredictionStatus, Probabilities, CLASS_LABELS,
    UNCERTAIN_THRESHOLD_HIGH, UNCERTAIN_THRESHOLD_LOW,
};
pub use traits::{EncodedInput, SequenceClassifier};

/// Token sequence length the classifier was trained with.
pub const MAX_SEQUENCE_LENGTH: usize = 128;

const MODEL_NOT_LOADED: &str = "Model/Tokenizer belum dimuat.";
const EMPTY_INPUT: &str = "Teks setelah pra-pemrosesan kosong. Tidak ada konten untuk diverifikasi.";

pub struct InferenceEngine {
    backend: Option<Arc<dyn SequenceClassifier>>,
    load_error: Option<String>,
}

impl InferenceEngine {
    /// Load the ONNX classifier from `model_dir`. On failure the engine is
    /// still returned, in the unavailable state.
    pub fn initialize(model_dir: &Path) -> Self {
        match onnx::OnnxClassifier::load(model_dir, MAX_SEQUENCE_LENGTH) {
            Ok(classifier) => {
                info!(
                    dir = %model_dir.display(),
                    vocab_size = classifier.vocab_size(),
                    "Hoax classifier loaded"
                );
                Self::with_backend(Arc::new(classifier))
            }
            Err(e) => {
                error!(error = %e, "Failed to load hoax classifier");
                Self::unavailable(e.to_string())
            }
        }
    }

    pub fn with_backend(backend: Arc<dyn SequenceClassifier>) -> Self {
        Self {
            backend: Some(backend),
            load_error: None,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: None,
            load_error: Some(reason.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.backend.is_some()
    }

    /// Why the model could not be loaded, if it wasn't.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Classify normalized text. Never fails: problems are reported in the
    /// returned payload.
    pub async fn predict(&self, normalized_text: &str) -> PredictionOutput {
        let Some(backend) = &self.backend else {
            warn!("Prediction requested but the classifier is not loaded");
            return PredictionOutput::error(MODEL_NOT_LOADED);
        };
        if normalized_text.trim().is_empty() {
            warn!("Prediction requested for empty text");
            return PredictionOutput::error(EMPTY_INPUT);
        }

        let backend = Arc::clone(backend);
        let text = normalized_text.to_string();
        match tokio::task::spawn_blocking(move || predict_blocking(backend.as_ref(), &text)).await {
            Ok(output) => output,
            Err(e) => {
                error!(error = %e, "Inference task panicked");
                PredictionOutput::error(format!("Kesalahan prediksi model: {e}"))
            }
        }
    }
}

/// Tokenize, bounds-check, run the model and threshold the result.
pub fn predict_blocking(backend: &dyn SequenceClassifier, text: &str) -> PredictionOutput {
    let start = Instant::now();

    let encoded = match backend.encode(text) {
        Ok(encoded) => encoded,
        Err(e) => {
            error!(error = %e, "Tokenization failed");
            return PredictionOutput::error(format!("Kesalahan prediksi model: {e}"));
        }
    };

    let vocab_size = backend.vocab_size();
    if let Some(&bad) = encoded.input_ids.iter().find(|&&id| id as usize >= vocab_size) {
        error!(token_id = bad, vocab_size, "Token id outside model vocabulary");
        return PredictionOutput::error(format!(
            "Tokenisasi menghasilkan ID ({bad}) di luar batas kosakata model ({vocab_size}). Mohon pastikan model dan tokenizer sesuai."
        ));
    }

    let logits = match backend.forward(&encoded) {
        Ok(logits) => logits,
        Err(e) => {
            error!(error = %e, "Model forward pass failed");
            return PredictionOutput::error(format!("Kesalahan prediksi model: {e}"));
        }
    };

    let output = PredictionOutput::from_logits(logits, start.elapsed());
    debug!(
        hoax = output.probabilities.hoax,
        fakta = output.probabilities.fakta,
        label = output.final_label_thresholded.as_str(),
        elapsed_ms = output.inference_time_ms,
        text_preview = %crate::output::truncate_chars(text, 50),
        "Classified text"
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLogits([f32; 2]);

    impl SequenceClassifier for FixedLogits {
        fn vocab_size(&self) -> usize {
            100
        }
        fn encode(&self, _text: &str) -> anyhow::Result<EncodedInput> {
            Ok(EncodedInput {
                input_ids: vec![1, 5, 2],
                attention_mask: vec![1, 1, 1],
                type_ids: vec![0, 0, 0],
            })
        }
        fn forward(&self, _input: &EncodedInput) -> anyhow::Result<[f32; 2]> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_unavailable_engine_reports_error() {
        let engine = InferenceEngine::unavailable("missing model");
        assert!(!engine.is_ready());
        assert_eq!(engine.load_error(), Some("missing model"));

        let out = engine.predict("teks").await;
        assert_eq!(out.status, PredictionStatus::Error);
        assert_eq!(out.message, MODEL_NOT_LOADED);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let engine = InferenceEngine::with_backend(Arc::new(FixedLogits([0.0, 0.0])));
        let out = engine.predict("   ").await;
        assert_eq!(out.status, PredictionStatus::Error);
        assert_eq!(out.message, EMPTY_INPUT);
    }

    #[tokio::test]
    async fn test_confident_hoax() {
        let engine = InferenceEngine::with_backend(Arc::new(FixedLogits([4.0, -4.0])));
        let out = engine.predict("vaksin berbahaya").await;
        assert!(out.is_success());
        assert_eq!(out.predicted_label_model, "HOAX");
        assert_eq!(out.final_label_thresholded, FinalLabel::Hoax);
        assert!((out.probabilities.hoax + out.probabilities.fakta - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_initialize_without_model_is_unavailable() {
        let dir = std::env::temp_dir().join("cekviral-test-missing-model-dir");
        let engine = InferenceEngine::initialize(&dir);
        assert!(!engine.is_ready());
        assert!(engine.load_error().unwrap().contains("not found"));
    }
}
