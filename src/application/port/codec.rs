// SPDX-License-Identifier: MPL-2.0
//! Image codec port definitions.
//!
//! The codec turns in-memory captures into bytes and merges capture metadata
//! into those bytes. Merge failures are never fatal for the picker: the
//! capture pipeline falls back to the unmerged bytes.

use crate::domain::media::RawImage;
use crate::domain::metadata::CaptureMetadata;
use std::fmt;

// =============================================================================
// CodecError
// =============================================================================

/// Errors that can occur during codec operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Pixels could not be encoded.
    EncodeFailed(String),

    /// Bytes could not be decoded into an image.
    DecodeFailed(String),

    /// Metadata could not be merged into the encoded bytes.
    MergeFailed(String),

    /// The byte format doesn't support the operation.
    UnsupportedFormat,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::EncodeFailed(msg) => write!(f, "Failed to encode image: {msg}"),
            CodecError::DecodeFailed(msg) => write!(f, "Failed to decode image: {msg}"),
            CodecError::MergeFailed(msg) => write!(f, "Failed to merge metadata: {msg}"),
            CodecError::UnsupportedFormat => write!(f, "Format does not support metadata"),
        }
    }
}

impl std::error::Error for CodecError {}

// =============================================================================
// ImageCodec Trait
// =============================================================================

/// Port for image byte encoding and metadata merging.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the capture pipeline calls them
/// from spawned tasks.
pub trait ImageCodec: Send + Sync {
    /// Encodes an image as full-quality JPEG.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncodeFailed`] if encoding fails.
    fn encode_jpeg(&self, image: &RawImage) -> Result<Vec<u8>, CodecError>;

    /// Returns a copy of `bytes` with `metadata` written into it.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the bytes cannot carry the metadata.
    fn merge_metadata(&self, bytes: &[u8], metadata: &CaptureMetadata)
        -> Result<Vec<u8>, CodecError>;

    /// Decodes encoded bytes into RGBA pixels.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DecodeFailed`] if the bytes are not an image.
    fn decode(&self, bytes: &[u8]) -> Result<RawImage, CodecError>;

    /// Reads capture metadata back out of encoded bytes.
    fn read_metadata(&self, bytes: &[u8]) -> Option<CaptureMetadata>;
}
