// SPDX-License-Identifier: MPL-2.0
//! Exporter copying the confirmed selection into a directory.
//!
//! Stored assets are copied from their store location; unpersisted captures
//! are encoded to JPEG first. File names are derived from the asset key so
//! that a report entry can be traced back to the selection.

use super::codec::encode_jpeg_with_quality;
use crate::application::port::{AssetExporter, ExportError, ExportReport};
use crate::config::defaults::DEFAULT_EXPORT_JPEG_QUALITY;
use crate::domain::asset::Asset;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// [`AssetExporter`] writing one file per asset into `dir`.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    dir: PathBuf,
    jpeg_quality: u8,
}

impl DirectoryExporter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            jpeg_quality: DEFAULT_EXPORT_JPEG_QUALITY,
        }
    }

    /// Sets the JPEG quality used for unpersisted captures (clamped to 1..=100).
    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn export_one(&self, asset: &Asset) -> Result<PathBuf, ExportError> {
        if let Some(source) = asset.location() {
            let extension = source
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("bin");
            let target = self.dir.join(format!("{}.{extension}", file_stem(asset)));
            fs::copy(source, &target).await?;
            return Ok(target);
        }

        if let Some(image) = asset.image() {
            let image = image.clone();
            let quality = self.jpeg_quality;
            let bytes = tokio::task::spawn_blocking(move || {
                encode_jpeg_with_quality(&image, quality)
            })
            .await
            .map_err(|e| ExportError::Encode(e.to_string()))?
            .map_err(|e| ExportError::Encode(e.to_string()))?;

            let target = self.dir.join(format!("{}.jpg", file_stem(asset)));
            fs::write(&target, bytes).await?;
            return Ok(target);
        }

        Err(ExportError::Unsupported(format!(
            "{} has neither a file nor pixels",
            asset.key()
        )))
    }
}

/// Turns the asset key into a single file name component.
///
/// Store identifiers are opaque and may contain separators or dots. Anything
/// outside `[A-Za-z0-9_-]` becomes `_`, and a rewritten key gets a short digest
/// of the original appended so distinct keys keep distinct names.
fn file_stem(asset: &Asset) -> String {
    let key = asset.key().to_string();
    let safe: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe == key && !safe.is_empty() {
        return safe;
    }
    let digest = blake3::hash(key.as_bytes()).to_hex();
    format!("{safe}-{}", &digest[..STEM_DIGEST_LEN])
}

const STEM_DIGEST_LEN: usize = 8;

#[async_trait]
impl AssetExporter for DirectoryExporter {
    async fn export(&self, assets: Vec<Asset>) -> ExportReport {
        let mut report = ExportReport::new();
        if let Err(err) = fs::create_dir_all(&self.dir).await {
            tracing::error!(dir = %self.dir.display(), error = %err, "cannot create export directory");
            let err = ExportError::from(err);
            for asset in &assets {
                report.push(asset.key(), Err(err.clone()));
            }
            return report;
        }

        for asset in &assets {
            let outcome = self.export_one(asset).await;
            match &outcome {
                Ok(path) => tracing::debug!(key = %asset.key(), path = %path.display(), "exported"),
                Err(err) => tracing::warn!(key = %asset.key(), error = %err, "export failed"),
            }
            report.push(asset.key(), outcome);
        }
        report
    }
}
