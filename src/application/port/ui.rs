// SPDX-License-Identifier: MPL-2.0
//! UI delegate port.
//!
//! The UI delegate owns everything visual about the default selection screen
//! (grid layout, cells, cancel button). The picker only tells it what
//! happened. All methods have no-op defaults so delegates implement only what
//! they render.

use crate::config::PickerConfig;
use crate::domain::asset::Asset;

/// Port for the layout/UI collaborator of the selection screen.
pub trait PickerUiDelegate {
    /// Called once per session, before the selection screen is first shown.
    fn prepare_layout(&mut self, _config: &PickerConfig) {}

    fn show_cancel_button(&mut self) {}

    fn hide_cancel_button(&mut self) {}

    /// Assets newly added to the selection, in selection order.
    fn did_select_assets(&mut self, _assets: &[Asset]) {}

    /// Assets removed from the selection, in their previous order.
    fn did_deselect_assets(&mut self, _assets: &[Asset]) {}

    /// A select was refused because `max_selectable_count` was reached.
    fn did_reach_max_limit(&mut self) {}

    /// The selection changed and visible cells need a refresh.
    ///
    /// Batched operations call this once at the end.
    fn reload_selection_view(&mut self) {}
}

/// Delegate used when the embedder doesn't provide one.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultUiDelegate;

impl PickerUiDelegate for DefaultUiDelegate {
    fn prepare_layout(&mut self, config: &PickerConfig) {
        tracing::debug!(source = ?config.source_type, "preparing default selection layout");
    }

    fn did_reach_max_limit(&mut self) {
        tracing::debug!("selection limit reached");
    }
}
