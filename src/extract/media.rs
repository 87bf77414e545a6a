// yt-dlp + ffmpeg audio downloader.
//
// Both tools run as child processes. `kill_on_drop` makes a timed-out or
// cancelled download terminate the child instead of leaking it.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use super::traits::MediaDownloader;

const PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(10);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(900);

#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    yt_dlp: String,
    ffmpeg: String,
}

impl Default for YtDlpDownloader {
    fn default() -> Self {
        Self {
            yt_dlp: "yt-dlp".to_string(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}

impl YtDlpDownloader {
    /// Use explicit binary paths instead of looking them up on PATH.
    pub fn with_binaries(yt_dlp: impl Into<String>, ffmpeg: impl Into<String>) -> Self {
        Self {
            yt_dlp: yt_dlp.into(),
            ffmpeg: ffmpeg.into(),
        }
    }
}

async fn probe(program: &str, version_flag: &str) -> Result<()> {
    let status = timeout(
        PREFLIGHT_TIMEOUT,
        Command::new(program)
            .arg(version_flag)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status(),
    )
    .await
    .with_context(|| format!("{program} {version_flag} timed out"))?
    .with_context(|| format!("Failed to run {program}"))?;

    if !status.success() {
        anyhow::bail!("{program} {version_flag} exited with {status}");
    }
    debug!(program, "Tool available");
    Ok(())
}

#[async_trait]
impl MediaDownloader for YtDlpDownloader {
    async fn check_tools(&self) -> Result<()> {
        probe(&self.yt_dlp, "--version").await?;
        probe(&self.ffmpeg, "-version").await
    }

    async fn download_audio(&self, url: &str, dest: &Path) -> Result<()> {
        info!(url, dest = %dest.display(), "Downloading audio");

        let output = timeout(
            DOWNLOAD_TIMEOUT,
            Command::new(&self.yt_dlp)
                .args(["-x", "--audio-format", "wav", "--ppa", "ffmpeg:-ac 1", "-o"])
                .arg(dest)
                .arg(url)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .context("yt-dlp download timed out")?
        .context("Failed to run yt-dlp")?;

        if !output.status.success() {
            anyhow::bail!(
                "yt-dlp exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
