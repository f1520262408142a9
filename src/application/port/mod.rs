// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the interfaces of the picker's external collaborators.
//! Infrastructure adapters (or the embedding application) implement them; the
//! picker core only ever sees these traits and domain types.
//!
//! # Available Ports
//!
//! - [`capability`]: Optional UI flows (camera, inline camera, editor, gallery)
//! - [`codec`]: JPEG encoding and metadata merging
//! - [`export`]: Exporting the confirmed selection
//! - [`group`]: Album enumeration
//! - [`presenter`]: Closing the picker
//! - [`store`]: Creating and resolving assets in the media store
//! - [`ui`]: Selection screen layout and notifications
//!
//! # Design Notes
//!
//! - Store, export and presenter work is asynchronous (`async_trait`); the
//!   picker spawns it and applies the result on its own context
//! - Capability providers and the UI delegate are synchronous and called from
//!   the picker's context
//! - Methods return `Result` with port-level error types
//!
//! # Example
//!
//! ```ignore
//! use asset_picker::application::port::{AssetSource, MediaStore};
//! use asset_picker::domain::media::RawImage;
//!
//! async fn persist(store: &dyn MediaStore, image: RawImage) -> Option<String> {
//!     store.create_asset(AssetSource::Image(image)).await.ok()
//! }
//! ```

pub mod capability;
pub mod codec;
pub mod export;
pub mod group;
pub mod presenter;
pub mod store;
pub mod ui;

// Re-export main types for convenience
pub use capability::{
    CameraRequest, CapabilityContext, CapabilityKind, CapabilityProvider, CapabilityRequest,
    CapabilityResponse, CaptureOutcome, CaptureResponder, EditResponder, EditorRequest,
    GalleryRequest, PickerCommand, PickerHandle, PickerInput, PickerSink,
};
pub use codec::{CodecError, ImageCodec};
pub use export::{AssetExporter, ExportEntry, ExportError, ExportReport};
pub use group::{AssetGroupDataManager, FetchOptions};
pub use presenter::Presenter;
pub use store::{AssetSource, MediaStore, StoreError};
pub use ui::{DefaultUiDelegate, PickerUiDelegate};
