// SPDX-License-Identifier: MPL-2.0
//! Picker source and selection mode.

use serde::{Deserialize, Serialize};

/// Where the picker gets its media from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Capture only: the library screen is never shown.
    Camera,
    /// Library only.
    Photo,
    /// Library with a camera entry.
    #[default]
    Both,
}

impl SourceType {
    #[must_use]
    pub fn is_capture_only(self) -> bool {
        matches!(self, Self::Camera)
    }

    /// Whether a library (grid) screen is part of the picker.
    #[must_use]
    pub fn shows_library(self) -> bool {
        !self.is_capture_only()
    }
}

/// How many assets may be selected at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Selecting an asset replaces the previous selection.
    Single,
    #[default]
    Multiple,
}

impl SelectionMode {
    #[must_use]
    pub fn is_single(self) -> bool {
        matches!(self, Self::Single)
    }
}

/// Interface orientations the picker allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedOrientations {
    PortraitOnly,
    All,
}
