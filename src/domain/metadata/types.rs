// SPDX-License-Identifier: MPL-2.0
//! Capture metadata carried from the camera to the media store.

use std::collections::BTreeMap;

// =============================================================================
// GpsCoordinates
// =============================================================================

/// Capture location in decimal degrees (WGS84), as written to the EXIF GPS
/// tags.
///
/// ```
/// use asset_picker::domain::metadata::GpsCoordinates;
///
/// let clamped = GpsCoordinates::new(95.0, 2.3522);
/// assert_eq!(clamped.latitude(), 90.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpsCoordinates {
    latitude: f64,
    longitude: f64,
}

impl GpsCoordinates {
    /// Latitude is clamped to ±90, longitude to ±180.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: longitude.clamp(-180.0, 180.0),
        }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Both components are finite. Invalid coordinates are never written.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

// =============================================================================
// CaptureMetadata
// =============================================================================

/// Metadata a camera capability attaches to a captured photo.
///
/// Known EXIF fields are typed; anything else the camera reports travels in
/// `extra` and is carried along untouched (it is not written into EXIF).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureMetadata {
    /// Camera manufacturer (e.g., "Canon").
    pub camera_make: Option<String>,

    /// Camera model (e.g., "EOS 5D Mark IV").
    pub camera_model: Option<String>,

    /// Lens model reported by the camera.
    pub lens_model: Option<String>,

    /// Capture date in EXIF format (`YYYY:MM:DD HH:MM:SS`).
    pub date_taken: Option<String>,

    /// EXIF orientation tag (1-8).
    pub orientation: Option<u16>,

    /// Where the photo was taken.
    pub gps: Option<GpsCoordinates>,

    /// Software that produced the capture.
    pub software: Option<String>,

    /// Vendor-specific entries without an EXIF mapping.
    pub extra: BTreeMap<String, String>,
}

impl CaptureMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if at least one EXIF-mapped field is set.
    #[must_use]
    pub fn has_exif_fields(&self) -> bool {
        self.camera_make.is_some()
            || self.camera_model.is_some()
            || self.lens_model.is_some()
            || self.date_taken.is_some()
            || self.orientation.is_some()
            || self.gps.is_some_and(|gps| gps.is_valid())
            || self.software.is_some()
    }

    /// Returns `true` if nothing at all is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_exif_fields() && self.extra.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
