// Content extraction: turn a classified URL into text for the classifier.
//
// Web articles are fetched and scraped; direct videos are transcribed.
// Neither path returns an error: every failure resolves to an
// ExtractionOutcome carrying a user-facing reason.

pub mod fetch;
pub mod html;
pub mod media;
pub mod outcome;
pub mod speech;
pub mod storage;
pub mod traits;
pub mod transcribe;

use tracing::{error, warn};

pub use outcome::{ExtractionFailure, ExtractionOutcome, FetchFailure, TranscriptionFailure};
pub use traits::{MediaDownloader, ObjectStore, PageFetcher, SpeechRecognizer, Transcriber};

/// Fetch a page and pull its article text.
pub async fn extract_article(fetcher: &dyn PageFetcher, url: &str) -> ExtractionOutcome {
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(failure) => {
            warn!(url, error = %failure, "Failed to fetch article");
            return ExtractionOutcome::Failed(ExtractionFailure::Fetch(failure));
        }
    };

    // scraper's Html is !Send, so parsing happens entirely on the blocking pool.
    match tokio::task::spawn_blocking(move || html::article_text(&page)).await {
        Ok(Some(text)) => ExtractionOutcome::Text(text),
        Ok(None) => {
            warn!(url, "No significant text in article");
            ExtractionOutcome::Failed(ExtractionFailure::NoSignificantText)
        }
        Err(e) => {
            error!(url, error = %e, "Article extraction panicked");
            ExtractionOutcome::Failed(ExtractionFailure::ArticleError)
        }
    }
}

/// Transcribe the speech in a video.
pub async fn transcribe_video(transcriber: &dyn Transcriber, url: &str) -> ExtractionOutcome {
    match transcriber.transcribe(url).await {
        Ok(text) => ExtractionOutcome::Text(text),
        Err(failure) => ExtractionOutcome::Failed(ExtractionFailure::Transcription(failure)),
    }
}
