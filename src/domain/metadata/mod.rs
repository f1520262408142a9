// SPDX-License-Identifier: MPL-2.0
//! Metadata domain types.
//!
//! - [`CaptureMetadata`]: metadata attached to a freshly captured photo
//! - [`GpsCoordinates`]: pure GPS coordinate representation

mod types;

pub use types::{CaptureMetadata, GpsCoordinates};
