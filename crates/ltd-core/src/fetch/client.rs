use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use ltd_error::{Result, TypeLinkError};

pub struct DownloadClient {
    client: reqwest::Client,
}

impl Default for DownloadClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: ltd_registry::build_client(),
        }
    }

    #[must_use]
    pub const fn get_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Streams `url` into `dest` chunk by chunk. Returns the byte count.
    pub async fn download_to_file(&self, url: &str, dest: &Path, debug: bool) -> Result<u64> {
        let mut resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TypeLinkError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(TypeLinkError::DownloadFailed(
                url.to_string(),
                format!("HTTP {}", resp.status()),
            ));
        }

        let mut file = File::create(dest).await?;
        let mut written: u64 = 0;

        while let Some(chunk) = resp
            .chunk()
            .await
            .map_err(|e| TypeLinkError::DownloadFailed(url.to_string(), e.to_string()))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        ltd_logger::debug(&format!("Downloaded {url} ({written} bytes)"), debug);
        Ok(written)
    }
}
