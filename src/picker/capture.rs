// SPDX-License-Identifier: MPL-2.0
//! Capture pipeline: from camera output to a selected asset.
//!
//! A capture attempt ends in one of three ways:
//!
//! - **cancel**: the camera goes away; capture-only pickers are dismissed
//! - **image**: optionally edited, then persisted and selected
//! - **video**: persisted and selected, or dropped if the store refuses it
//!
//! Persisting a photo never fails from the user's point of view. If the store
//! (or encoding) fails, the photo is selected as an unpersisted asset
//! wrapping the in-memory image.

use super::message::Message;
use super::ImagePicker;
use crate::application::port::{
    AssetSource, CameraRequest, CapabilityKind, CapabilityRequest, CaptureOutcome,
    CaptureResponder, CodecError, EditResponder, EditorRequest, ImageCodec, MediaStore,
    StoreError,
};
use crate::domain::asset::Asset;
use crate::domain::media::RawImage;
use crate::domain::metadata::CaptureMetadata;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

// =============================================================================
// CapturePipeline
// =============================================================================

/// Persists captures through the media store. Cheap to clone into tasks.
#[derive(Clone)]
pub struct CapturePipeline {
    store: Arc<dyn MediaStore>,
    codec: Arc<dyn ImageCodec>,
}

impl CapturePipeline {
    #[must_use]
    pub fn new(store: Arc<dyn MediaStore>, codec: Arc<dyn ImageCodec>) -> Self {
        Self { store, codec }
    }

    /// Writes a captured photo to the store and resolves it.
    ///
    /// With metadata, the photo is encoded to JPEG and the metadata merged
    /// into the bytes (unmerged bytes are written if the merge fails).
    /// Without metadata, the in-memory image goes to the store as is. Any
    /// failure yields an unpersisted asset wrapping `image`.
    pub async fn persist_image(
        &self,
        image: RawImage,
        metadata: Option<CaptureMetadata>,
    ) -> Asset {
        let source = match metadata {
            Some(metadata) => match self.encode_with_metadata(image.clone(), metadata).await {
                Ok(bytes) => AssetSource::ImageBytes(bytes),
                Err(err) => {
                    tracing::warn!(error = %err, "could not encode capture, keeping it in memory");
                    return Asset::unpersisted(image);
                }
            },
            None => AssetSource::Image(image.clone()),
        };

        match self.create_and_resolve(source).await {
            Ok(asset) => asset,
            Err(err) => {
                tracing::warn!(error = %err, "could not persist capture, keeping it in memory");
                Asset::unpersisted(image)
            }
        }
    }

    /// Writes a recorded video to the store and resolves it.
    ///
    /// Returns `None` if the store refused the file.
    pub async fn persist_video(&self, path: PathBuf) -> Option<Asset> {
        match self.create_and_resolve(AssetSource::VideoFile(path)).await {
            Ok(asset) => Some(asset),
            Err(err) => {
                tracing::warn!(error = %err, "could not persist recorded video");
                None
            }
        }
    }

    async fn encode_with_metadata(
        &self,
        image: RawImage,
        metadata: CaptureMetadata,
    ) -> Result<Vec<u8>, CodecError> {
        let codec = Arc::clone(&self.codec);
        let encoded = tokio::task::spawn_blocking(move || {
            let bytes = codec.encode_jpeg(&image)?;
            match codec.merge_metadata(&bytes, &metadata) {
                Ok(merged) => Ok(merged),
                Err(err) => {
                    tracing::debug!(error = %err, "metadata merge failed, using unmerged bytes");
                    Ok(bytes)
                }
            }
        })
        .await;

        encoded.map_err(|err| CodecError::EncodeFailed(err.to_string()))?
    }

    async fn create_and_resolve(&self, source: AssetSource) -> Result<Asset, StoreError> {
        let kind = source.kind();
        let identifier = self.store.create_asset(source).await?;
        tracing::debug!(%identifier, source = kind, "store created asset");

        let records = self.store.resolve(std::slice::from_ref(&identifier)).await?;
        records
            .into_iter()
            .find(|record| record.identifier == identifier)
            .map(Asset::stored)
            .ok_or(StoreError::NotFound(identifier))
    }
}

impl fmt::Debug for CapturePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturePipeline").finish_non_exhaustive()
    }
}

// =============================================================================
// Picker side
// =============================================================================

impl ImagePicker {
    /// Presents the (non-inline) camera over the picker.
    pub fn present_camera(&mut self) {
        self.show_camera(false);
    }

    /// Tears down the camera presented by [`present_camera`](Self::present_camera)
    /// or, with `inline`, the embedded capture-only camera.
    pub fn dismiss_camera(&mut self, inline: bool) {
        self.dispatcher.finish(camera_kind(inline));
    }

    pub(super) fn show_camera(&mut self, inline: bool) {
        let kind = camera_kind(inline);
        let request = CameraRequest {
            responder: CaptureResponder::new(kind, self.sink()),
        };
        self.outstanding_responders += 1;

        let request = if inline {
            CapabilityRequest::InlineCamera(request)
        } else {
            CapabilityRequest::Camera(request)
        };
        self.perform(request);
    }

    pub(super) fn on_capture(&mut self, kind: CapabilityKind, outcome: CaptureOutcome) {
        match outcome {
            CaptureOutcome::Cancelled => {
                tracing::debug!(capability = %kind, "capture cancelled");
                if self.config.is_capture_only() {
                    self.dismiss_camera(true);
                    self.dismiss();
                } else {
                    self.dismiss_camera(false);
                }
            }
            CaptureOutcome::Image { image, metadata } => {
                if self.dispatcher.is_available(CapabilityKind::PhotoEditor) {
                    let request = EditorRequest {
                        image,
                        metadata,
                        responder: EditResponder::new(self.sink()),
                    };
                    self.outstanding_responders += 1;
                    self.perform(CapabilityRequest::PhotoEditor(request));
                } else {
                    self.persist_image(image, metadata);
                }
            }
            CaptureOutcome::Video(path) => {
                let pipeline = self.capture.clone();
                self.spawn(async move {
                    Message::VideoPersisted(pipeline.persist_video(path).await)
                });
            }
        }
    }

    pub(super) fn persist_image(&mut self, image: RawImage, metadata: Option<CaptureMetadata>) {
        let pipeline = self.capture.clone();
        self.spawn(async move {
            Message::ImagePersisted(pipeline.persist_image(image, metadata).await)
        });
    }

    pub(super) fn on_image_persisted(&mut self, asset: Asset) {
        if !self.config.is_capture_only() {
            self.dismiss_camera(false);
        }
        self.select(asset);
    }

    pub(super) fn on_video_persisted(&mut self, asset: Option<Asset>) {
        let Some(asset) = asset else {
            self.dismiss_camera(false);
            return;
        };
        if !(self.config.is_capture_only() && !self.root_installed) {
            self.dismiss_camera(false);
        }
        self.select(asset);
    }
}

fn camera_kind(inline: bool) -> CapabilityKind {
    if inline {
        CapabilityKind::InlineCamera
    } else {
        CapabilityKind::Camera
    }
}
