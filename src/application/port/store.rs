// SPDX-License-Identifier: MPL-2.0
//! Media store port definitions.
//!
//! The media store is the system of record for persisted photos and videos.
//! The picker only ever creates new items (from captures) and resolves
//! identifiers back into [`StoreRecord`]s.

use crate::domain::asset::StoreRecord;
use crate::domain::media::RawImage;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// StoreError
// =============================================================================

/// Errors reported by a media store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store refused or failed the write.
    WriteFailed(String),

    /// No item exists for the identifier.
    NotFound(String),

    /// The source kind is not supported by this store.
    Unsupported(String),

    /// Underlying I/O failure.
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::WriteFailed(msg) => write!(f, "Failed to write asset: {msg}"),
            StoreError::NotFound(id) => write!(f, "Asset not found: {id}"),
            StoreError::Unsupported(msg) => write!(f, "Unsupported asset source: {msg}"),
            StoreError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

// =============================================================================
// AssetSource
// =============================================================================

/// What a new store item is created from.
#[derive(Debug, Clone)]
pub enum AssetSource {
    /// Encoded image bytes (JPEG with merged metadata, usually).
    ImageBytes(Vec<u8>),
    /// An in-memory image; the store picks the encoding.
    Image(RawImage),
    /// A video file written by the camera.
    VideoFile(PathBuf),
}

impl AssetSource {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            AssetSource::ImageBytes(_) => "image-bytes",
            AssetSource::Image(_) => "image",
            AssetSource::VideoFile(_) => "video-file",
        }
    }
}

// =============================================================================
// MediaStore Trait
// =============================================================================

/// Port for the external media store.
///
/// Every call completes exactly once. The picker runs these futures on
/// spawned tasks and applies the results on its own context.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Creates a new item and returns its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the item could not be written.
    async fn create_asset(&self, source: AssetSource) -> Result<String, StoreError>;

    /// Resolves identifiers into records. Unknown identifiers are skipped.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store could not be queried.
    async fn resolve(&self, identifiers: &[String]) -> Result<Vec<StoreRecord>, StoreError>;
}
