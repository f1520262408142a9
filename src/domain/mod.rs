// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core types of the picker.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `serde` derives on configuration enums it depends on `std` only.
//!
//! # Modules
//!
//! - [`asset`]: The [`Asset`](asset::Asset) entity and its identity
//! - [`media`]: Media types ([`MediaType`](media::MediaType), [`RawImage`](media::RawImage),
//!   [`AssetType`](media::AssetType))
//! - [`metadata`]: Capture metadata ([`CaptureMetadata`](metadata::CaptureMetadata),
//!   [`GpsCoordinates`](metadata::GpsCoordinates))
//! - [`picker`]: Session types ([`PickerStatus`](picker::PickerStatus),
//!   [`SourceType`](picker::SourceType), [`SelectionMode`](picker::SelectionMode))

pub mod asset;
pub mod media;
pub mod metadata;
pub mod picker;
