// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Selection**: Selection mode behavior and limits
//! - **Presentation**: Screen chrome and orientation
//! - **Albums**: Group listing
//! - **Capture**: Encoding of captured photos
//! - **Logging**: Subscriber filter

// ==========================================================================
// Selection Defaults
// ==========================================================================

/// Single-select pickers close as soon as an asset is picked.
pub const DEFAULT_AUTO_CLOSE_ON_SINGLE_SELECT: bool = true;

/// Maximum number of selected assets (0 means unlimited).
pub const DEFAULT_MAX_SELECTABLE_COUNT: usize = 0;

/// Swiping across the grid selects by default only when enabled.
pub const DEFAULT_ALLOW_SWIPE_TO_SELECT: bool = false;

/// Photos and videos may be mixed in one selection.
pub const DEFAULT_ALLOW_MULTIPLE_TYPES: bool = true;

// ==========================================================================
// Presentation Defaults
// ==========================================================================

pub const DEFAULT_ALLOWS_LANDSCAPE: bool = false;

pub const DEFAULT_SHOWS_CANCEL_BUTTON: bool = false;

/// Embedded pickers are not presented modally.
pub const DEFAULT_INLINE: bool = false;

// ==========================================================================
// Album Defaults
// ==========================================================================

pub const DEFAULT_SHOWS_EMPTY_ALBUMS: bool = true;

// ==========================================================================
// Capture Defaults
// ==========================================================================

/// JPEG quality used when a captured photo is encoded before metadata merge.
pub const CAPTURE_JPEG_QUALITY: u8 = 100;

/// JPEG quality used when exporting unpersisted images.
pub const DEFAULT_EXPORT_JPEG_QUALITY: u8 = 92;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "ASSET_PICKER_LOG";

/// Filter used when [`LOG_FILTER_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "asset_picker=info";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(CAPTURE_JPEG_QUALITY > 0 && CAPTURE_JPEG_QUALITY <= 100);
    assert!(DEFAULT_EXPORT_JPEG_QUALITY > 0 && DEFAULT_EXPORT_JPEG_QUALITY <= 100);
};
