// Verification orchestrator.
//
// One linear pass per request: detect the input type, classify URLs, extract
// text, normalize, classify, assemble the result, hand it to the history
// store. Every stage failure becomes a processing message; the caller always
// gets a well-formed VerificationResult.

use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use super::models::{InputType, VerificationResult, UNSAVED};
use crate::classify::{self, UrlCategory};
use crate::db::HistoryStore;
use crate::extract::{self, ExtractionOutcome, PageFetcher, Transcriber};
use crate::inference::{InferenceEngine, PredictionOutput};
use crate::normalize;

const MSG_VIDEO_OK: &str = "Transkripsi video berhasil.";
const MSG_ARTICLE_OK: &str = "Teks dari halaman web berhasil diekstrak.";
const MSG_UNSUPPORTED: &str = "Maaf, konten dari platform ini belum didukung untuk verifikasi.";
const MSG_ACADEMIC: &str =
    "Konten dari jurnal atau situs ilmiah tidak diproses demi etika dan hak cipta.";
const MSG_UNKNOWN_URL: &str = "Maaf, jenis URL ini tidak dikenali atau belum didukung.";
const MSG_TEXT_OK: &str = "Teks murni diterima untuk verifikasi.";
const MSG_EMPTY_INPUT: &str = "Input teks kosong, tidak ada yang dapat diverifikasi.";
const MSG_NOTHING_TO_VERIFY: &str = "Tidak ada teks yang dapat diekstrak atau diproses dari input.";
const MSG_ML_DONE: &str = " Verifikasi oleh model ML selesai.";
const NO_TEXT_PREDICTION: &str = "Tidak ada teks yang dapat diproses oleh model ML.";

/// Text obtained from the input (if any) and the narrative so far.
struct Obtained {
    input_type: InputType,
    text: Option<String>,
    message: String,
}

pub struct Verifier {
    engine: Arc<InferenceEngine>,
    fetcher: Arc<dyn PageFetcher>,
    transcriber: Arc<dyn Transcriber>,
    history: Arc<dyn HistoryStore>,
    pending_saves: Mutex<JoinSet<()>>,
}

impl Verifier {
    pub fn new(
        engine: Arc<InferenceEngine>,
        fetcher: Arc<dyn PageFetcher>,
        transcriber: Arc<dyn Transcriber>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            engine,
            fetcher,
            transcriber,
            history,
            pending_saves: Mutex::new(JoinSet::new()),
        }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Verify one piece of content. `user_id` is attached to the saved
    /// history entry.
    pub async fn verify(&self, content: &str, user_id: Option<&str>) -> VerificationResult {
        let input = content.trim();
        let obtained = self.obtain_text(input).await;

        let extracted = obtained.text.unwrap_or_default();
        let mut message = obtained.message;

        let normalized = if extracted.trim().is_empty() {
            String::new()
        } else {
            let text = extracted.clone();
            tokio::task::spawn_blocking(move || normalize::normalize(&text))
                .await
                .unwrap_or_else(|e| {
                    error!(error = %e, "Normalization task panicked");
                    String::new()
                })
        };

        let prediction = if normalized.is_empty() {
            if !extracted.trim().is_empty() {
                message = MSG_NOTHING_TO_VERIFY.to_string();
            }
            debug!("Nothing left to classify after normalization");
            PredictionOutput::error(NO_TEXT_PREDICTION)
        } else {
            let output = self.engine.predict(&normalized).await;
            if output.is_success() {
                message.push_str(MSG_ML_DONE);
            } else {
                message = format!("Verifikasi ML gagal: {}", output.message);
            }
            output
        };

        let mut result = VerificationResult {
            original_input: input.to_string(),
            input_type: obtained.input_type,
            processed_text: extracted,
            prediction,
            processing_message: message,
            history_id: UNSAVED.to_string(),
        };

        if !input.is_empty() {
            result.history_id = self.persist(&result, user_id);
        }

        info!(
            input_type = result.input_type.as_str(),
            label = result.prediction.final_label_thresholded.as_str(),
            history_id = %result.history_id,
            "Verification finished"
        );
        result
    }

    async fn obtain_text(&self, input: &str) -> Obtained {
        if input.is_empty() {
            return Obtained {
                input_type: InputType::Text,
                text: None,
                message: MSG_EMPTY_INPUT.to_string(),
            };
        }

        if !classify::is_url(input) {
            return Obtained {
                input_type: InputType::Text,
                text: Some(input.to_string()),
                message: MSG_TEXT_OK.to_string(),
            };
        }

        let category = classify::classify(input);
        info!(url = input, %category, "Processing URL");

        let (text, message) = match category {
            UrlCategory::DirectVideo => {
                let outcome = extract::transcribe_video(self.transcriber.as_ref(), input).await;
                from_outcome(outcome, MSG_VIDEO_OK)
            }
            UrlCategory::WebArticle => {
                let outcome = extract::extract_article(self.fetcher.as_ref(), input).await;
                from_outcome(outcome, MSG_ARTICLE_OK)
            }
            UrlCategory::UnsupportedSocial => (None, MSG_UNSUPPORTED.to_string()),
            UrlCategory::Academic => (None, MSG_ACADEMIC.to_string()),
            UrlCategory::Unknown => (None, MSG_UNKNOWN_URL.to_string()),
        };

        Obtained {
            input_type: InputType::Url,
            text,
            message,
        }
    }

    /// Reserve a history id now and write the record in the background.
    fn persist(&self, result: &VerificationResult, user_id: Option<&str>) -> String {
        let Some(id) = self.history.allocate_id() else {
            return UNSAVED.to_string();
        };

        let store = Arc::clone(&self.history);
        let mut record = result.clone();
        record.history_id = id.clone();
        let user_id = user_id.map(str::to_string);

        let task = async move {
            match store.save(&record.history_id, &record, user_id.as_deref()).await {
                Ok(()) => debug!(history_id = %record.history_id, "Saved verification result"),
                Err(e) => {
                    warn!(history_id = %record.history_id, error = %e, "Failed to save verification result")
                }
            }
        };

        match self.pending_saves.lock() {
            Ok(mut pending) => {
                while pending.try_join_next().is_some() {}
                pending.spawn(task);
            }
            Err(_) => {
                tokio::spawn(task);
            }
        }
        id
    }

    /// Wait for every background history write started so far.
    pub async fn flush_pending(&self) {
        let mut pending = match self.pending_saves.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => return,
        };
        while pending.join_next().await.is_some() {}
    }
}

fn from_outcome(outcome: ExtractionOutcome, success: &str) -> (Option<String>, String) {
    match outcome {
        ExtractionOutcome::Text(text) => (Some(text), success.to_string()),
        ExtractionOutcome::Failed(failure) => {
            warn!(reason = %failure, "Extraction failed");
            (None, failure.message().to_string())
        }
    }
}
