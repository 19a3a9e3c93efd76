use crate::{
    error::{Result, VidGenError},
    models::MediaDescriptor,
};
use chrono::Utc;
use reqwest::Client;
use std::path::{Path, PathBuf};

pub const DOWNLOAD_PREFIX: &str = "sora-gen";

pub fn download_file_name(media: &MediaDescriptor, unix_millis: i64) -> String {
    format!("{}-{}.{}", DOWNLOAD_PREFIX, unix_millis, media.file_extension())
}

/// Saves generated media into `dir`, returning the written path.
pub async fn download_media(
    client: &Client,
    media: &MediaDescriptor,
    dir: &Path,
) -> Result<PathBuf> {
    let response = client
        .get(&media.url)
        .send()
        .await
        .map_err(|e| VidGenError::Network(format!("media download failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(VidGenError::Network(format!(
            "media download failed with status {}",
            status
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| VidGenError::Network(format!("failed to read media body: {}", e)))?;

    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        VidGenError::Storage(format!("failed to create {}: {}", dir.display(), e))
    })?;

    let path = dir.join(download_file_name(media, Utc::now().timestamp_millis()));
    tokio::fs::write(&path, &bytes).await.map_err(|e| {
        VidGenError::Storage(format!("failed to write {}: {}", path.display(), e))
    })?;

    log::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
