// Video transcription: download audio, upload it, run speech recognition.
//
// The local WAV file and the uploaded object are owned by a TransientAudio
// guard. `release` cleans up on the normal path; Drop covers panics and
// cancelled futures.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::outcome::TranscriptionFailure;
use super::traits::{MediaDownloader, ObjectStore, SpeechRecognizer, Transcriber};

/// Temporary audio that must not outlive one transcription.
pub struct TransientAudio {
    local_path: PathBuf,
    object_name: String,
    uploaded: bool,
    released: bool,
    store: Arc<dyn ObjectStore>,
}

impl TransientAudio {
    pub fn new(temp_dir: &Path, store: Arc<dyn ObjectStore>) -> Self {
        let object_name = format!("temp_audio_{}.wav", Uuid::new_v4().simple());
        Self {
            local_path: temp_dir.join(&object_name),
            object_name,
            uploaded: false,
            released: false,
            store,
        }
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn mark_uploaded(&mut self) {
        self.uploaded = true;
    }

    /// Remove the local file and the uploaded object. Errors are logged.
    pub async fn release(mut self) {
        self.released = true;

        match tokio::fs::remove_file(&self.local_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.local_path.display(), error = %e, "Failed to remove temp audio"),
        }

        if self.uploaded {
            if let Err(e) = self.store.delete(&self.object_name).await {
                error!(object = %self.object_name, error = %e, "Failed to delete uploaded audio");
            }
        }
    }
}

impl Drop for TransientAudio {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if self.local_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.local_path) {
                warn!(path = %self.local_path.display(), error = %e, "Failed to remove temp audio");
            }
        }
        if self.uploaded {
            let Ok(handle) = tokio::runtime::Handle::try_current() else {
                warn!(object = %self.object_name, "No runtime left to delete uploaded audio");
                return;
            };
            let store = Arc::clone(&self.store);
            let name = std::mem::take(&mut self.object_name);
            handle.spawn(async move {
                if let Err(e) = store.delete(&name).await {
                    error!(object = %name, error = %e, "Failed to delete uploaded audio");
                }
            });
        }
    }
}

/// Transcriber backed by the download toolchain, object storage and a
/// speech recognizer.
pub struct CloudTranscriber {
    downloader: Arc<dyn MediaDownloader>,
    store: Arc<dyn ObjectStore>,
    recognizer: Arc<dyn SpeechRecognizer>,
    temp_dir: PathBuf,
}

impl CloudTranscriber {
    pub fn new(
        downloader: Arc<dyn MediaDownloader>,
        store: Arc<dyn ObjectStore>,
        recognizer: Arc<dyn SpeechRecognizer>,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            downloader,
            store,
            recognizer,
            temp_dir,
        }
    }

    async fn run(
        &self,
        url: &str,
        audio: &mut TransientAudio,
    ) -> Result<String, TranscriptionFailure> {
        if let Err(e) = self.downloader.download_audio(url, audio.local_path()).await {
            error!(url, error = %e, "Audio download failed");
            return Err(TranscriptionFailure::DownloadFailed);
        }

        match tokio::fs::metadata(audio.local_path()).await {
            Ok(meta) if meta.len() > 0 => {}
            _ => {
                error!(path = %audio.local_path().display(), "Audio file missing or empty");
                return Err(TranscriptionFailure::AudioMissing);
            }
        }

        let uri = match self.store.upload(audio.local_path(), audio.object_name()).await {
            Ok(uri) => {
                audio.mark_uploaded();
                uri
            }
            Err(e) => {
                error!(object = audio.object_name(), error = %e, "Audio upload failed");
                return Err(TranscriptionFailure::Service);
            }
        };

        let segments = match self.recognizer.recognize(&uri).await {
            Ok(segments) => segments,
            Err(e) => {
                error!(uri = %uri, error = %e, "Speech recognition failed");
                return Err(TranscriptionFailure::Service);
            }
        };

        let text = segments.join(" ");
        if text.trim().is_empty() {
            warn!(url, "Speech recognition returned no results");
            return Err(TranscriptionFailure::NoSpeech);
        }
        Ok(text)
    }
}

#[async_trait]
impl Transcriber for CloudTranscriber {
    async fn transcribe(&self, url: &str) -> Result<String, TranscriptionFailure> {
        if let Err(e) = self.downloader.check_tools().await {
            error!(error = %e, "Transcription tools unavailable");
            return Err(TranscriptionFailure::ToolsUnavailable);
        }

        if let Err(e) = tokio::fs::create_dir_all(&self.temp_dir).await {
            error!(dir = %self.temp_dir.display(), error = %e, "Cannot create temp directory");
            return Err(TranscriptionFailure::Service);
        }

        let mut audio = TransientAudio::new(&self.temp_dir, Arc::clone(&self.store));
        let result = self.run(url, &mut audio).await;
        audio.release().await;

        if let Ok(text) = &result {
            info!(url, chars = text.len(), "Transcription finished");
        }
        result
    }
}
