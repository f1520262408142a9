// SPDX-License-Identifier: MPL-2.0
//! Media store keeping one file per asset in a directory.
//!
//! Identifiers have the form `YYYYMMDDHHMMSS-<digest>`, where the digest is a
//! truncated `blake3` hash of the content (for clips, the source path and
//! size) and the creation time. Files are named `<identifier>.<extension>`,
//! so identifiers sort by creation time.

use super::codec::encode_png;
use crate::application::port::{AssetSource, MediaStore, StoreError};
use crate::domain::asset::StoreRecord;
use crate::domain::media::MediaType;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Hex characters of the digest kept in identifiers.
const DIGEST_LEN: usize = 16;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp"];

/// [`MediaStore`] writing assets as files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryMediaStore {
    root: PathBuf,
}

impl DirectoryMediaStore {
    /// Opens (creating if needed) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn write(&self, bytes: &[u8], extension: &str) -> Result<String, StoreError> {
        let identifier = new_identifier(bytes);
        let path = self.root.join(format!("{identifier}.{extension}"));
        fs::write(&path, bytes)
            .await
            .map_err(|e| StoreError::WriteFailed(format!("{}: {e}", path.display())))?;
        tracing::debug!(%identifier, path = %path.display(), "asset written");
        Ok(identifier)
    }

    /// Copies a recorded clip into the store without buffering it.
    ///
    /// The digest covers the source path and size instead of the content.
    async fn copy_in(&self, source: &Path) -> Result<String, StoreError> {
        let unreadable = |e: std::io::Error| {
            StoreError::WriteFailed(format!("{}: {e}", source.display()))
        };
        let size = fs::metadata(source).await.map_err(unreadable)?.len();
        let mut seed = source.to_string_lossy().into_owned().into_bytes();
        seed.extend_from_slice(&size.to_le_bytes());

        let extension = source
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "mov".to_string());
        let identifier = new_identifier(&seed);
        let path = self.root.join(format!("{identifier}.{extension}"));
        fs::copy(source, &path).await.map_err(unreadable)?;
        tracing::debug!(%identifier, path = %path.display(), bytes = size, "clip copied");
        Ok(identifier)
    }

    /// Maps identifiers (file stems) to files currently in the store.
    async fn index(&self) -> Result<HashMap<String, PathBuf>, StoreError> {
        let mut index = HashMap::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                index.insert(stem.to_string(), path.clone());
            }
        }
        Ok(index)
    }
}

#[async_trait]
impl MediaStore for DirectoryMediaStore {
    async fn create_asset(&self, source: AssetSource) -> Result<String, StoreError> {
        match source {
            AssetSource::ImageBytes(bytes) => {
                let extension = image_extension(&bytes).ok_or_else(|| {
                    StoreError::Unsupported("image bytes in an unknown format".into())
                })?;
                self.write(&bytes, extension).await
            }
            AssetSource::Image(image) => {
                let bytes = encode_png(&image)
                    .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
                self.write(&bytes, "png").await
            }
            AssetSource::VideoFile(path) => self.copy_in(&path).await,
        }
    }

    async fn resolve(&self, identifiers: &[String]) -> Result<Vec<StoreRecord>, StoreError> {
        let index = self.index().await?;
        let mut records = Vec::with_capacity(identifiers.len());
        for identifier in identifiers {
            match index.get(identifier) {
                Some(path) => records.push(record_for(identifier, path).await?),
                None => tracing::debug!(%identifier, "unknown identifier skipped"),
            }
        }
        Ok(records)
    }
}

fn new_identifier(seed: &[u8]) -> String {
    let now = Utc::now();
    let mut hasher = blake3::Hasher::new();
    hasher.update(seed);
    hasher.update(&now.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
    let digest = hasher.finalize().to_hex();
    format!("{}-{}", now.format("%Y%m%d%H%M%S"), &digest[..DIGEST_LEN])
}

fn image_extension(bytes: &[u8]) -> Option<&'static str> {
    let format = image_rs::guess_format(bytes).ok()?;
    format.extensions_str().first().copied()
}

fn media_type_for(path: &Path) -> MediaType {
    let is_image = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|i| ext.eq_ignore_ascii_case(i)));
    if is_image {
        MediaType::Image
    } else {
        MediaType::Video
    }
}

async fn record_for(identifier: &str, path: &Path) -> Result<StoreRecord, StoreError> {
    let media_type = media_type_for(path);
    let metadata = fs::metadata(path).await?;

    let dimensions = if media_type == MediaType::Image {
        let image_path = path.to_path_buf();
        tokio::task::spawn_blocking(move || image_rs::image_dimensions(image_path).ok())
            .await
            .ok()
            .flatten()
    } else {
        None
    };

    let mut record = StoreRecord::new(identifier, media_type);
    record.dimensions = dimensions;
    record.created_at = metadata.created().or_else(|_| metadata.modified()).ok();
    record.location = Some(path.to_path_buf());
    Ok(record)
}
