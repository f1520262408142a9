// SPDX-License-Identifier: MPL-2.0
//! Picker session types: lifecycle status, source type, selection mode.

mod source;
mod status;

pub use source::{SelectionMode, SourceType, SupportedOrientations};
pub use status::PickerStatus;
