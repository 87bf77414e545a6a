// Extraction results and the failures a stage can report.
//
// Failures carry enough detail for logs; `message()` gives the fixed
// Indonesian sentence shown to users.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionOutcome {
    Text(String),
    Failed(ExtractionFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionFailure {
    /// The page could not be downloaded.
    Fetch(FetchFailure),
    /// The page downloaded but held no readable text.
    NoSignificantText,
    /// HTML parsing crashed.
    ArticleError,
    Transcription(TranscriptionFailure),
}

impl ExtractionFailure {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "Gagal mengakses atau membaca konten dari URL yang diberikan.",
            Self::NoSignificantText => {
                "Gagal mengekstrak teks dari artikel. Halaman mungkin tidak berisi konten teks yang jelas."
            }
            Self::ArticleError => "Terjadi kesalahan saat mencoba mengekstrak artikel dari URL.",
            Self::Transcription(failure) => failure.message(),
        }
    }
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(failure) => write!(f, "fetch failed: {failure}"),
            Self::NoSignificantText => f.write_str("no significant text in page"),
            Self::ArticleError => f.write_str("article extraction crashed"),
            Self::Transcription(failure) => write!(f, "transcription failed: {failure:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchFailure {
    Timeout,
    Network(String),
    Status(u16),
    Body(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("request timed out"),
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::Body(e) => write!(f, "could not read body: {e}"),
        }
    }
}

impl std::error::Error for FetchFailure {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionFailure {
    /// yt-dlp or ffmpeg is missing from the host.
    ToolsUnavailable,
    DownloadFailed,
    /// The downloader succeeded but left no audio behind.
    AudioMissing,
    NoSpeech,
    /// Storage or speech service error.
    Service,
}

impl TranscriptionFailure {
    pub fn message(&self) -> &'static str {
        match self {
            Self::ToolsUnavailable => {
                "Maaf, fitur transkripsi suara tidak tersedia karena aplikasi tidak dapat menemukan alat bantu (yt-dlp/ffmpeg)."
            }
            Self::DownloadFailed => "Maaf, gagal mengunduh audio dari video tersebut.",
            Self::AudioMissing => "Maaf, audio dari video tidak dapat diunduh.",
            Self::NoSpeech => "Maaf, tidak ada obrolan yang dapat dikenali dari audio ini.",
            Self::Service => "Maaf, terjadi kesalahan pada layanan transkripsi suara.",
        }
    }
}
