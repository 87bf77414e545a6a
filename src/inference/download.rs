// Model artifact download.
//
// The fine-tuned classifier is not on a public hub, so the base URL comes
// from configuration (CEKVIRAL_MODEL_URL). Files land in a platform data
// directory (~/.local/share/cekviral/models/ on Linux) unless overridden.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::onnx::{MODEL_FILE, TOKENIZER_FILE};

pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cekviral")
        .join("models")
}

/// Both the model and its tokenizer are on disk.
pub fn model_files_present(dir: &Path) -> bool {
    dir.join(MODEL_FILE).exists() && dir.join(TOKENIZER_FILE).exists()
}

/// Download the tokenizer and model from `base_url`, skipping files that
/// already exist.
pub async fn download_model(dir: &Path, base_url: &str) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create model directory: {}", dir.display()))?;

    let base_url = base_url.trim_end_matches('/');
    println!("\nHoax classifier ({}):", dir.display());

    for (file, show_progress) in [(TOKENIZER_FILE, false), (MODEL_FILE, true)] {
        let dest = dir.join(file);
        if dest.exists() {
            info!(file, "Model artifact already exists, skipping");
            println!("  {} (already exists)", file);
            continue;
        }
        println!("  Downloading {}...", file);
        download_file(&format!("{base_url}/{file}"), &dest, show_progress).await?;
    }

    Ok(())
}

async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let pb = show_progress.then(|| progress_bar(response.content_length()));

    // Written to a sibling path first so an interrupted download never
    // looks like a complete model.
    let partial = dest.with_extension("part");
    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await.context("Failed to read response body")? {
        bytes.extend_from_slice(&chunk);
        if let Some(ref pb) = pb {
            pb.set_position(bytes.len() as u64);
        }
    }

    tokio::fs::write(&partial, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", partial.display()))?;
    tokio::fs::rename(&partial, dest)
        .await
        .with_context(|| format!("Failed to move {} into place", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}

fn progress_bar(total_size: Option<u64>) -> ProgressBar {
    match total_size {
        Some(size) => {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        }
    }
}
