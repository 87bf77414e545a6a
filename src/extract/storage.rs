// Google Cloud Storage client for transient audio uploads.
//
// Uses the JSON API directly with an OAuth bearer token. Long recordings go
// to the bucket because the speech service only reads audio over a minute
// from a gs:// URI.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};
use url::Url;

use super::traits::ObjectStore;

const API_BASE: &str = "https://storage.googleapis.com/storage/v1";
const UPLOAD_BASE: &str = "https://storage.googleapis.com/upload/storage/v1";
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(900);

pub struct GcsObjectStore {
    client: reqwest::Client,
    bucket: String,
    access_token: String,
}

impl GcsObjectStore {
    pub fn new(bucket: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            client,
            bucket: bucket.to_string(),
            access_token: access_token.to_string(),
        })
    }

    fn endpoint(&self, base: &str, object_name: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(base).context("Invalid storage base URL")?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow::anyhow!("Storage base URL cannot hold a path"))?;
            segments.extend(["b", self.bucket.as_str(), "o"]);
            if let Some(name) = object_name {
                segments.push(name);
            }
        }
        Ok(url)
    }
}

pub fn gs_uri(bucket: &str, object_name: &str) -> String {
    format!("gs://{bucket}/{object_name}")
}

#[async_trait]
impl ObjectStore for GcsObjectStore {
    async fn upload(&self, local: &Path, object_name: &str) -> Result<String> {
        let bytes = tokio::fs::read(local)
            .await
            .with_context(|| format!("Failed to read {}", local.display()))?;

        info!(bucket = %self.bucket, object = object_name, bytes = bytes.len(), "Uploading audio");
        let response = self
            .client
            .post(self.endpoint(UPLOAD_BASE, None)?)
            .query(&[("uploadType", "media"), ("name", object_name)])
            .bearer_auth(&self.access_token)
            .header(CONTENT_TYPE, "audio/wav")
            .body(bytes)
            .send()
            .await
            .context("Object upload request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Object upload returned {status}: {body}");
        }
        Ok(gs_uri(&self.bucket, object_name))
    }

    async fn delete(&self, object_name: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.endpoint(API_BASE, Some(object_name))?)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .context("Object delete request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Object delete returned {status}");
        }
        debug!(bucket = %self.bucket, object = object_name, "Deleted object");
        Ok(())
    }
}
