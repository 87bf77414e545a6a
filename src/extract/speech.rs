// Google Cloud Speech-to-Text (REST v1) long-running recognition.
//
// A recognition job is started for a gs:// URI and the returned operation is
// polled until done. The whole wait is bounded by RECOGNITION_TIMEOUT.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::traits::SpeechRecognizer;

const SPEECH_BASE: &str = "https://speech.googleapis.com/v1";
const RECOGNITION_TIMEOUT: Duration = Duration::from_secs(900);
const POLL_INTERVAL: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecognitionConfig<'a> {
    language_code: &'a str,
    enable_automatic_punctuation: bool,
}

#[derive(Debug, Serialize)]
struct RecognitionAudio<'a> {
    uri: &'a str,
}

#[derive(Debug, Serialize)]
struct LongRunningRequest<'a> {
    config: RecognitionConfig<'a>,
    audio: RecognitionAudio<'a>,
}

/// A long-running operation as returned by the Speech API.
#[derive(Debug, Deserialize)]
pub struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub response: Option<RecognizeResponse>,
    pub error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecognizeResponse {
    #[serde(default)]
    pub results: Vec<SpeechResult>,
}

#[derive(Debug, Deserialize)]
pub struct SpeechResult {
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub transcript: String,
}

/// First alternative of each result, in order, skipping empty ones.
pub fn transcript_segments(response: &RecognizeResponse) -> Vec<String> {
    response
        .results
        .iter()
        .filter_map(|r| r.alternatives.first())
        .map(|alt| alt.transcript.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub struct GoogleSpeechRecognizer {
    client: reqwest::Client,
    access_token: String,
    language: String,
}

impl GoogleSpeechRecognizer {
    pub fn new(access_token: &str, language: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            access_token: access_token.to_string(),
            language: language.to_string(),
        })
    }

    async fn start(&self, audio_uri: &str) -> Result<Operation> {
        let request = LongRunningRequest {
            config: RecognitionConfig {
                language_code: &self.language,
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio { uri: audio_uri },
        };

        let response = self
            .client
            .post(format!("{SPEECH_BASE}/speech:longrunningrecognize"))
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .context("Speech recognition request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Speech API returned {status}: {body}");
        }
        response
            .json()
            .await
            .context("Failed to parse speech operation")
    }

    async fn poll(&self, name: &str) -> Result<Operation> {
        let response = self
            .client
            .get(format!("{SPEECH_BASE}/operations/{name}"))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Speech operation poll failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Speech operation poll returned {status}");
        }
        response
            .json()
            .await
            .context("Failed to parse speech operation")
    }

    async fn wait(&self, mut operation: Operation) -> Result<RecognizeResponse> {
        loop {
            if operation.done {
                if let Some(err) = operation.error {
                    anyhow::bail!("Speech operation failed ({}): {}", err.code, err.message);
                }
                return Ok(operation.response.unwrap_or_default());
            }
            debug!(operation = %operation.name, "Waiting for speech recognition");
            tokio::time::sleep(POLL_INTERVAL).await;
            operation = self.poll(&operation.name).await?;
        }
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechRecognizer {
    async fn recognize(&self, audio_uri: &str) -> Result<Vec<String>> {
        info!(audio_uri, language = %self.language, "Starting speech recognition");
        let operation = self.start(audio_uri).await?;
        let response = tokio::time::timeout(RECOGNITION_TIMEOUT, self.wait(operation))
            .await
            .context("Speech recognition timed out")??;
        Ok(transcript_segments(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = LongRunningRequest {
            config: RecognitionConfig {
                language_code: "id-ID",
                enable_automatic_punctuation: true,
            },
            audio: RecognitionAudio {
                uri: "gs://b/a.wav",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["config"]["languageCode"], "id-ID");
        assert_eq!(json["config"]["enableAutomaticPunctuation"], true);
        assert_eq!(json["audio"]["uri"], "gs://b/a.wav");
    }

    #[test]
    fn test_finished_operation_segments() {
        let json = r#"{
            "name": "123",
            "done": true,
            "response": {
                "results": [
                    {"alternatives": [{"transcript": "Vaksin itu", "confidence": 0.9}, {"transcript": "Faksin itu"}]},
                    {"alternatives": []},
                    {"alternatives": [{"transcript": " berbahaya. "}]}
                ]
            }
        }"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert!(op.done);
        let segments = transcript_segments(&op.response.unwrap());
        assert_eq!(segments, vec!["Vaksin itu", "berbahaya."]);
    }

    #[test]
    fn test_pending_operation_defaults() {
        let op: Operation = serde_json::from_str(r#"{"name": "abc"}"#).unwrap();
        assert!(!op.done);
        assert!(op.response.is_none());
        assert!(op.error.is_none());
    }

    #[test]
    fn test_no_results_means_no_segments() {
        let op: Operation =
            serde_json::from_str(r#"{"name": "x", "done": true, "response": {}}"#).unwrap();
        assert!(transcript_segments(&op.response.unwrap()).is_empty());
    }
}
