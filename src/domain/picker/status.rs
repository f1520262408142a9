// SPDX-License-Identifier: MPL-2.0
//! Picker lifecycle status and its transition table.

use std::fmt;

/// Where a picker session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PickerStatus {
    /// Nothing has happened yet.
    #[default]
    Unknown,
    /// The user is browsing or selecting.
    Selecting,
    /// The confirmed selection is being exported.
    Exporting,
    /// The selection was delivered to the caller.
    Completed,
    /// The user aborted the picker.
    Cancelled,
}

impl PickerStatus {
    /// `Completed` and `Cancelled` end a session; nothing leaves them.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the lifecycle may move from `self` to `next`.
    ///
    /// Re-entering the current status is not a transition and returns `false`.
    #[must_use]
    pub fn can_transition_to(self, next: PickerStatus) -> bool {
        use PickerStatus::{Cancelled, Completed, Exporting, Selecting, Unknown};

        match (self, next) {
            (Unknown, Selecting | Exporting | Completed | Cancelled) => true,
            (Selecting, Exporting | Completed | Cancelled) => true,
            (Exporting, Completed) => true,
            _ => false,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Selecting => "selecting",
            Self::Exporting => "exporting",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PickerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
