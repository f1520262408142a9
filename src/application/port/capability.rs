// SPDX-License-Identifier: MPL-2.0
//! Capability provider port definitions.
//!
//! A capability is an optional, heavyweight UI flow (camera, inline camera,
//! photo editor, full-screen gallery) that the picker delegates to without
//! knowing how it is implemented. Each kind has a typed request; requests
//! that expect an answer carry a single-use responder.
//!
//! # Responders
//!
//! Responders post their answer back into the picker's message queue, so the
//! picker applies it on its own context. A responder is consumed when it
//! answers. Dropping it unanswered marks the flow as abandoned: the picker
//! makes no further progress for that flow and changes no state.
//!
//! # Example
//!
//! ```ignore
//! use asset_picker::application::port::capability::*;
//!
//! struct InstantCamera(RawImage);
//!
//! impl CapabilityProvider for InstantCamera {
//!     fn perform(&self, _context: &CapabilityContext<'_>, request: CapabilityRequest) {
//!         if let CapabilityRequest::Camera(camera) = request {
//!             camera.responder.finish_image(self.0.clone(), None);
//!         }
//!     }
//!
//!     fn finish(&self, _kind: CapabilityKind) {}
//! }
//! ```

use crate::config::PickerConfig;
use crate::domain::asset::Asset;
use crate::domain::media::RawImage;
use crate::domain::metadata::CaptureMetadata;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

// =============================================================================
// CapabilityKind
// =============================================================================

/// The optional flows a picker can delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityKind {
    /// Camera presented modally on top of the picker.
    Camera,
    /// Camera embedded as the picker's only screen (capture-only pickers).
    InlineCamera,
    /// Editor shown between capture and persistence.
    PhotoEditor,
    /// Full-screen gallery over an album.
    Gallery,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 4] = [
        CapabilityKind::Camera,
        CapabilityKind::InlineCamera,
        CapabilityKind::PhotoEditor,
        CapabilityKind::Gallery,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CapabilityKind::Camera => "camera",
            CapabilityKind::InlineCamera => "inline-camera",
            CapabilityKind::PhotoEditor => "photo-editor",
            CapabilityKind::Gallery => "gallery",
        }
    }

    /// Camera kinds deliver captures.
    #[must_use]
    pub const fn is_camera(self) -> bool {
        matches!(self, CapabilityKind::Camera | CapabilityKind::InlineCamera)
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Picker input (what responders and handles post back)
// =============================================================================

/// Result of one capture attempt.
#[derive(Debug, Clone)]
pub enum CaptureOutcome {
    /// A photo, with whatever metadata the camera recorded.
    Image {
        image: RawImage,
        metadata: Option<CaptureMetadata>,
    },
    /// A video written to a file.
    Video(PathBuf),
    /// The user backed out of the camera.
    Cancelled,
}

/// Answers posted by capability responders.
#[derive(Debug, Clone)]
pub enum CapabilityResponse {
    Captured {
        kind: CapabilityKind,
        outcome: CaptureOutcome,
    },
    Edited {
        image: RawImage,
        metadata: Option<CaptureMetadata>,
    },
    /// A responder was dropped without answering.
    Abandoned(CapabilityKind),
}

/// Requests a provider (or any other party) may make of the picker.
#[derive(Debug, Clone)]
pub enum PickerCommand {
    Select(Asset),
    Deselect(Asset),
    Done,
    Dismiss,
}

/// Everything that enters the picker's queue from outside its own tasks.
#[derive(Debug, Clone)]
pub enum PickerInput {
    Command(PickerCommand),
    Response(CapabilityResponse),
}

/// Where picker input is delivered. Built by the picker around its queue.
pub type PickerSink = Arc<dyn Fn(PickerInput) + Send + Sync>;

/// Cloneable handle for posting commands to a picker.
///
/// Commands are applied the next time the picker drains its queue, on the
/// picker's own context.
#[derive(Clone)]
pub struct PickerHandle {
    sink: PickerSink,
}

impl PickerHandle {
    #[must_use]
    pub fn new(sink: PickerSink) -> Self {
        Self { sink }
    }

    pub fn select(&self, asset: Asset) {
        (self.sink)(PickerInput::Command(PickerCommand::Select(asset)));
    }

    pub fn deselect(&self, asset: Asset) {
        (self.sink)(PickerInput::Command(PickerCommand::Deselect(asset)));
    }

    pub fn done(&self) {
        (self.sink)(PickerInput::Command(PickerCommand::Done));
    }

    pub fn dismiss(&self) {
        (self.sink)(PickerInput::Command(PickerCommand::Dismiss));
    }
}

impl fmt::Debug for PickerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerHandle").finish_non_exhaustive()
    }
}

// =============================================================================
// Responders
// =============================================================================

/// Single-use answer channel of a camera request.
pub struct CaptureResponder {
    kind: CapabilityKind,
    sink: Option<PickerSink>,
}

impl CaptureResponder {
    #[must_use]
    pub fn new(kind: CapabilityKind, sink: PickerSink) -> Self {
        Self {
            kind,
            sink: Some(sink),
        }
    }

    pub fn finish_image(mut self, image: RawImage, metadata: Option<CaptureMetadata>) {
        self.respond(CaptureOutcome::Image { image, metadata });
    }

    pub fn finish_video(mut self, path: impl Into<PathBuf>) {
        self.respond(CaptureOutcome::Video(path.into()));
    }

    pub fn cancel(mut self) {
        self.respond(CaptureOutcome::Cancelled);
    }

    fn respond(&mut self, outcome: CaptureOutcome) {
        if let Some(sink) = self.sink.take() {
            sink(PickerInput::Response(CapabilityResponse::Captured {
                kind: self.kind,
                outcome,
            }));
        }
    }
}

impl Drop for CaptureResponder {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink(PickerInput::Response(CapabilityResponse::Abandoned(self.kind)));
        }
    }
}

impl fmt::Debug for CaptureResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureResponder")
            .field("kind", &self.kind)
            .field("answered", &self.sink.is_none())
            .finish()
    }
}

/// Single-use answer channel of an editor request.
pub struct EditResponder {
    sink: Option<PickerSink>,
}

impl EditResponder {
    #[must_use]
    pub fn new(sink: PickerSink) -> Self {
        Self { sink: Some(sink) }
    }

    /// Hands the edited image (and possibly edited metadata) back.
    pub fn finish(mut self, image: RawImage, metadata: Option<CaptureMetadata>) {
        if let Some(sink) = self.sink.take() {
            sink(PickerInput::Response(CapabilityResponse::Edited { image, metadata }));
        }
    }
}

impl Drop for EditResponder {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink(PickerInput::Response(CapabilityResponse::Abandoned(
                CapabilityKind::PhotoEditor,
            )));
        }
    }
}

impl fmt::Debug for EditResponder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditResponder")
            .field("answered", &self.sink.is_none())
            .finish()
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug)]
pub struct CameraRequest {
    pub responder: CaptureResponder,
}

#[derive(Debug)]
pub struct EditorRequest {
    pub image: RawImage,
    pub metadata: Option<CaptureMetadata>,
    pub responder: EditResponder,
}

#[derive(Debug, Clone)]
pub struct GalleryRequest {
    /// Album to show.
    pub group_id: String,
    /// Index to open at.
    pub presentation_index: Option<usize>,
    /// Asset whose thumbnail the gallery animates from.
    pub presenting_from: Option<Asset>,
}

/// A typed request for one capability kind.
#[derive(Debug)]
pub enum CapabilityRequest {
    Camera(CameraRequest),
    InlineCamera(CameraRequest),
    PhotoEditor(EditorRequest),
    Gallery(GalleryRequest),
}

impl CapabilityRequest {
    #[must_use]
    pub fn kind(&self) -> CapabilityKind {
        match self {
            CapabilityRequest::Camera(_) => CapabilityKind::Camera,
            CapabilityRequest::InlineCamera(_) => CapabilityKind::InlineCamera,
            CapabilityRequest::PhotoEditor(_) => CapabilityKind::PhotoEditor,
            CapabilityRequest::Gallery(_) => CapabilityKind::Gallery,
        }
    }
}

// =============================================================================
// CapabilityProvider Trait
// =============================================================================

/// What a provider sees of the picker while performing.
#[derive(Debug)]
pub struct CapabilityContext<'a> {
    pub config: &'a PickerConfig,
    /// Selection at dispatch time, in order.
    pub selected_assets: &'a [Asset],
    pub handle: PickerHandle,
}

/// Port for an optional capability implementation.
///
/// Providers present their own UI and answer through the responder embedded
/// in the request. They are independent of each other and held weakly by the
/// picker: dropping the last strong reference unregisters a provider.
pub trait CapabilityProvider {
    fn perform(&self, context: &CapabilityContext<'_>, request: CapabilityRequest);

    /// Tears down whatever the provider presented for `kind`.
    fn finish(&self, kind: CapabilityKind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_sink() -> (PickerSink, Arc<Mutex<Vec<PickerInput>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink_received = Arc::clone(&received);
        let sink: PickerSink = Arc::new(move |input| {
            sink_received.lock().unwrap().push(input);
        });
        (sink, received)
    }

    #[test]
    fn capture_responder_answers_once() {
        let (sink, received) = recording_sink();
        let responder = CaptureResponder::new(CapabilityKind::Camera, sink);
        responder.cancel();

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert!(matches!(
            received[0],
            PickerInput::Response(CapabilityResponse::Captured {
                kind: CapabilityKind::Camera,
                outcome: CaptureOutcome::Cancelled,
            })
        ));
    }

    #[test]
    fn dropped_capture_responder_reports_abandoned() {
        let (sink, received) = recording_sink();
        drop(CaptureResponder::new(CapabilityKind::InlineCamera, sink));

        let received = received.lock().unwrap();
        assert!(matches!(
            received.as_slice(),
            [PickerInput::Response(CapabilityResponse::Abandoned(
                CapabilityKind::InlineCamera
            ))]
        ));
    }

    #[test]
    fn edit_responder_delivers_image() {
        let (sink, received) = recording_sink();
        let responder = EditResponder::new(sink);
        responder.finish(RawImage::solid(2, 2, [9, 9, 9, 255]), None);

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        match &received[0] {
            PickerInput::Response(CapabilityResponse::Edited { image, metadata }) => {
                assert_eq!(image.width(), 2);
                assert!(metadata.is_none());
            }
            other => panic!("unexpected input: {other:?}"),
        }
    }

    #[test]
    fn handle_posts_commands() {
        let (sink, received) = recording_sink();
        let handle = PickerHandle::new(sink);
        handle.done();
        handle.dismiss();

        let received = received.lock().unwrap();
        assert!(matches!(
            received.as_slice(),
            [
                PickerInput::Command(PickerCommand::Done),
                PickerInput::Command(PickerCommand::Dismiss)
            ]
        ));
    }

    #[test]
    fn request_kind_matches_variant() {
        let (sink, _) = recording_sink();
        let request = CapabilityRequest::InlineCamera(CameraRequest {
            responder: CaptureResponder::new(CapabilityKind::InlineCamera, sink),
        });
        assert_eq!(request.kind(), CapabilityKind::InlineCamera);
        assert!(request.kind().is_camera());
        assert!(!CapabilityKind::Gallery.is_camera());
    }
}
