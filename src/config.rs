use std::env;
use std::path::PathBuf;

use anyhow::Result;

pub const DEFAULT_AUDIO_BUCKET: &str = "cekviral-audio-uploads";
pub const DEFAULT_SPEECH_LANGUAGE: &str = "id-ID";

/// Central configuration loaded from environment variables.
///
/// Secrets come from env vars only. The .env file is loaded at startup via
/// dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding model.onnx and tokenizer.json
    pub model_dir: PathBuf,
    /// Base URL the model artifacts are downloaded from
    pub model_url: String,
    /// Where transient audio files are written during transcription
    pub temp_dir: PathBuf,
    pub db_path: String,
    /// PostgreSQL connection URL (postgres://... selects the Postgres backend)
    pub database_url: Option<String>,
    pub audio_bucket: String,
    /// OAuth bearer token for the storage and speech REST APIs
    pub gcp_access_token: String,
    pub speech_language: String,
    /// HMAC secret for API bearer tokens. Empty disables authentication.
    #[cfg(feature = "web")]
    pub token_secret: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment in production).
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model_dir = non_empty("CEKVIRAL_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(crate::inference::download::default_model_dir);

        Ok(Self {
            model_dir,
            model_url: non_empty("CEKVIRAL_MODEL_URL").unwrap_or_default(),
            temp_dir: non_empty("CEKVIRAL_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("temp_downloads")),
            db_path: non_empty("CEKVIRAL_DB_PATH").unwrap_or_else(|| "./cekviral.db".to_string()),
            database_url: non_empty("DATABASE_URL"),
            audio_bucket: non_empty("CEKVIRAL_AUDIO_BUCKET")
                .unwrap_or_else(|| DEFAULT_AUDIO_BUCKET.to_string()),
            gcp_access_token: non_empty("GCP_ACCESS_TOKEN").unwrap_or_default(),
            speech_language: non_empty("CEKVIRAL_SPEECH_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_SPEECH_LANGUAGE.to_string()),
            #[cfg(feature = "web")]
            token_secret: non_empty("CEKVIRAL_TOKEN_SECRET").unwrap_or_default(),
        })
    }

    /// Check that video transcription can reach the cloud services.
    pub fn require_transcription(&self) -> Result<()> {
        if self.gcp_access_token.is_empty() {
            anyhow::bail!(
                "GCP_ACCESS_TOKEN not set. Video transcription needs it.\n\
                 Add it to your .env file. See .env.example for the required variables."
            );
        }
        Ok(())
    }

    pub fn require_model_url(&self) -> Result<()> {
        if self.model_url.is_empty() {
            anyhow::bail!(
                "CEKVIRAL_MODEL_URL not set. Point it at the directory serving \
                 model.onnx and tokenizer.json."
            );
        }
        Ok(())
    }
}
