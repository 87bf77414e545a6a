// Collaborator traits for content extraction.
//
// Each external dependency (HTTP, the download toolchain, object storage,
// speech recognition) sits behind a trait so the pipeline can be exercised
// with in-memory fakes.

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::outcome::{FetchFailure, TranscriptionFailure};

/// Downloads a web page's HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure>;
}

/// Turns a video URL into spoken text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, url: &str) -> Result<String, TranscriptionFailure>;
}

/// The external download/convert toolchain.
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// Succeeds only when every required tool is installed and runnable.
    async fn check_tools(&self) -> Result<()>;

    /// Fetch the audio track of `url` as a mono WAV file at `dest`.
    async fn download_audio(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Blob storage the speech service can read from.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file and return the URI the recognizer should use.
    async fn upload(&self, local: &Path, object_name: &str) -> Result<String>;

    async fn delete(&self, object_name: &str) -> Result<()>;
}

/// Long-running speech-to-text.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcript segments in order, one per recognized result.
    async fn recognize(&self, audio_uri: &str) -> Result<Vec<String>>;
}
