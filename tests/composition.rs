// Composition tests: the verification pipeline end to end.
//
// These tests exercise the data flow between modules:
//   input -> classify -> extract -> normalize -> infer -> persist
// with fakes behind every collaborator trait. No network, no model files.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use cekviral::db::{HistoryRecord, HistoryStore, NoopHistoryStore};
use cekviral::extract::{FetchFailure, PageFetcher, Transcriber, TranscriptionFailure};
use cekviral::inference::{
    EncodedInput, FinalLabel, InferenceEngine, PredictionStatus, SequenceClassifier,
};
use cekviral::pipeline::{InputType, VerificationResult, Verifier, UNSAVED};

// ============================================================
// Fakes
// ============================================================

struct CountingClassifier {
    logits: [f32; 2],
    calls: AtomicUsize,
}

impl SequenceClassifier for CountingClassifier {
    fn vocab_size(&self) -> usize {
        1000
    }

    fn encode(&self, text: &str) -> Result<EncodedInput> {
        let n = text.split_whitespace().count();
        Ok(EncodedInput {
            input_ids: vec![7; n],
            attention_mask: vec![1; n],
            type_ids: vec![0; n],
        })
    }

    fn forward(&self, _input: &EncodedInput) -> Result<[f32; 2]> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.logits)
    }
}

struct StaticFetcher(Result<String, FetchFailure>);

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, FetchFailure> {
        self.0.clone()
    }
}

struct StaticTranscriber(Result<String, TranscriptionFailure>);

#[async_trait]
impl Transcriber for StaticTranscriber {
    async fn transcribe(&self, _url: &str) -> Result<String, TranscriptionFailure> {
        self.0.clone()
    }
}

#[derive(Default)]
struct RecordingStore {
    saved: Mutex<Vec<(String, VerificationResult, Option<String>)>>,
}

#[async_trait]
impl HistoryStore for RecordingStore {
    async fn save(&self, id: &str, result: &VerificationResult, user_id: Option<&str>) -> Result<()> {
        self.saved.lock().unwrap().push((
            id.to_string(),
            result.clone(),
            user_id.map(str::to_string),
        ));
        Ok(())
    }

    async fn recent(&self, _user_id: Option<&str>, _limit: u32) -> Result<Vec<HistoryRecord>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _user_id: Option<&str>, _history_id: &str) -> Result<bool> {
        Ok(false)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.saved.lock().unwrap().len() as i64)
    }
}

struct FailingStore;

#[async_trait]
impl HistoryStore for FailingStore {
    async fn save(&self, _id: &str, _result: &VerificationResult, _user_id: Option<&str>) -> Result<()> {
        anyhow::bail!("database is locked")
    }

    async fn recent(&self, _user_id: Option<&str>, _limit: u32) -> Result<Vec<HistoryRecord>> {
        anyhow::bail!("database is locked")
    }

    async fn delete(&self, _user_id: Option<&str>, _history_id: &str) -> Result<bool> {
        anyhow::bail!("database is locked")
    }

    async fn count(&self) -> Result<i64> {
        anyhow::bail!("database is locked")
    }
}

struct Harness {
    verifier: Verifier,
    classifier: Arc<CountingClassifier>,
}

fn harness(
    logits: [f32; 2],
    page: Result<String, FetchFailure>,
    transcript: Result<String, TranscriptionFailure>,
    history: Arc<dyn HistoryStore>,
) -> Harness {
    let classifier = Arc::new(CountingClassifier {
        logits,
        calls: AtomicUsize::new(0),
    });
    let engine = Arc::new(InferenceEngine::with_backend(classifier.clone()));
    let verifier = Verifier::new(
        engine,
        Arc::new(StaticFetcher(page)),
        Arc::new(StaticTranscriber(transcript)),
        history,
    );
    Harness {
        verifier,
        classifier,
    }
}

fn default_harness(history: Arc<dyn HistoryStore>) -> Harness {
    harness(
        [3.0, -3.0],
        Err(FetchFailure::Network("connection refused".into())),
        Err(TranscriptionFailure::ToolsUnavailable),
        history,
    )
}

// ============================================================
// Input handling
// ============================================================

#[tokio::test]
async fn empty_input_is_never_inferred_or_saved() {
    let store = Arc::new(RecordingStore::default());
    let h = default_harness(store.clone());

    let result = h.verifier.verify("   ", Some("u1")).await;
    h.verifier.flush_pending().await;

    assert_eq!(result.input_type, InputType::Text);
    assert!(result.processing_message.contains("kosong"));
    assert_eq!(result.prediction.status, PredictionStatus::Error);
    assert_eq!(result.history_id, UNSAVED);
    assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 0);
    assert!(store.saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn plain_text_is_classified_and_saved() {
    let store = Arc::new(RecordingStore::default());
    let h = default_harness(store.clone());

    let input = "Vaksin covid mengandung microchip berbahaya";
    let result = h.verifier.verify(input, Some("u1")).await;
    h.verifier.flush_pending().await;

    assert_eq!(result.input_type, InputType::Text);
    assert_eq!(result.processed_text, input);
    assert!(result.prediction.is_success());
    assert_eq!(result.prediction.final_label_thresholded, FinalLabel::Hoax);
    assert!(result
        .processing_message
        .ends_with("Verifikasi oleh model ML selesai."));
    assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 1);

    assert!(result.is_saved());
    let saved = store.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    let (id, record, user) = &saved[0];
    assert_eq!(id, &result.history_id);
    assert_eq!(record.prediction, result.prediction);
    assert_eq!(user.as_deref(), Some("u1"));
}

#[tokio::test]
async fn text_that_normalizes_to_nothing_skips_inference() {
    let h = default_harness(Arc::new(RecordingStore::default()));

    let result = h.verifier.verify("@someone #viral 2024", None).await;
    assert_eq!(result.prediction.status, PredictionStatus::Error);
    assert_eq!(
        result.processing_message,
        "Tidak ada teks yang dapat diekstrak atau diproses dari input."
    );
    assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 0);
}

// ============================================================
// URL dispatch
// ============================================================

#[tokio::test]
async fn web_article_fetch_failure_returns_a_message() {
    let h = default_harness(Arc::new(RecordingStore::default()));

    let result = h
        .verifier
        .verify("https://berita.contoh.id/2024/klaim-viral", None)
        .await;

    assert_eq!(result.input_type, InputType::Url);
    assert_eq!(result.processed_text, "");
    assert_eq!(
        result.processing_message,
        "Gagal mengakses atau membaca konten dari URL yang diberikan."
    );
    assert_eq!(result.prediction.status, PredictionStatus::Error);
    assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn web_article_text_flows_into_the_model() {
    let page = r#"<html><head><title>Pemerintah bagikan kuota gratis</title></head>
        <body><article><p>Pesan berantai menyebut pemerintah membagikan kuota internet.</p></article></body></html>"#;
    let h = harness(
        [-3.0, 3.0],
        Ok(page.to_string()),
        Err(TranscriptionFailure::ToolsUnavailable),
        Arc::new(RecordingStore::default()),
    );

    let result = h.verifier.verify("https://berita.contoh.id/kuota", None).await;
    assert!(result.processed_text.starts_with("Pemerintah bagikan kuota gratis"));
    assert_eq!(result.prediction.final_label_thresholded, FinalLabel::Fakta);
    assert!(result
        .processing_message
        .starts_with("Teks dari halaman web berhasil diekstrak."));
}

#[tokio::test]
async fn video_transcript_is_verified() {
    let h = harness(
        [0.0, 0.0],
        Err(FetchFailure::Timeout),
        Ok("Air kelapa menyembuhkan penyakit kanker dalam semalam".to_string()),
        Arc::new(RecordingStore::default()),
    );

    let result = h.verifier.verify("https://youtu.be/abc123", None).await;
    assert_eq!(result.input_type, InputType::Url);
    assert_eq!(
        result.prediction.final_label_thresholded,
        FinalLabel::Unverified
    );
    assert!(result.processing_message.starts_with("Transkripsi video berhasil."));
}

#[tokio::test]
async fn transcription_failure_reason_becomes_the_message() {
    let h = default_harness(Arc::new(RecordingStore::default()));

    let result = h.verifier.verify("https://youtu.be/abc123", None).await;
    assert_eq!(result.processed_text, "");
    assert_eq!(
        result.processing_message,
        TranscriptionFailure::ToolsUnavailable.message()
    );
    assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn policy_categories_are_not_extracted() {
    let h = default_harness(Arc::new(RecordingStore::default()));

    let social = h
        .verifier
        .verify("https://www.instagram.com/p/Cx1abc/", None)
        .await;
    assert!(social.processing_message.contains("belum didukung"));

    let academic = h.verifier.verify("https://doi.org/10.1000/xyz", None).await;
    assert!(academic.processing_message.contains("ilmiah"));

    assert_eq!(h.classifier.calls.load(Ordering::SeqCst), 0);
}

// ============================================================
// Persistence never alters the verdict
// ============================================================

#[tokio::test]
async fn failing_store_keeps_verdict_and_id() {
    let h = default_harness(Arc::new(FailingStore));
    let result = h.verifier.verify("Vaksin covid berbahaya", None).await;
    h.verifier.flush_pending().await;

    assert!(result.prediction.is_success());
    assert_eq!(result.prediction.final_label_thresholded, FinalLabel::Hoax);
    // The id is allocated before the write, so the caller still gets one.
    assert!(result.is_saved());
}

#[tokio::test]
async fn noop_store_reports_unsaved() {
    let h = default_harness(Arc::new(NoopHistoryStore));
    let result = h.verifier.verify("Vaksin covid berbahaya", None).await;
    assert_eq!(result.history_id, UNSAVED);
    assert!(result.prediction.is_success());
}

#[tokio::test]
async fn unavailable_model_degrades_to_error_payload() {
    let verifier = Verifier::new(
        Arc::new(InferenceEngine::unavailable("model.onnx not found")),
        Arc::new(StaticFetcher(Err(FetchFailure::Timeout))),
        Arc::new(StaticTranscriber(Err(TranscriptionFailure::NoSpeech))),
        Arc::new(NoopHistoryStore),
    );

    let result = verifier.verify("Vaksin covid berbahaya", None).await;
    assert_eq!(result.prediction.status, PredictionStatus::Error);
    assert!(result.processing_message.starts_with("Verifikasi ML gagal:"));
    assert_eq!(
        result.prediction.final_label_thresholded,
        FinalLabel::Unverified
    );
}

#[test]
fn result_json_uses_wire_names() {
    let result = VerificationResult {
        original_input: "x".into(),
        input_type: InputType::Url,
        processed_text: String::new(),
        prediction: cekviral::inference::PredictionOutput::error("n/a"),
        processing_message: "m".into(),
        history_id: UNSAVED.into(),
    };
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["input_type"], "url");
    assert_eq!(json["prediction"]["final_label_thresholded"], "BELUM DIVERIFIKASI");
    assert_eq!(json["history_id"], "unsaved");
}
