// SPDX-License-Identifier: MPL-2.0
//! Finalize and cancel paths.
//!
//! Both paths first wait for the presenter to close the picker. `done()` then
//! optionally exports the selection before completing and invoking the result
//! callback. The export report never changes the outcome; it is kept for the
//! caller to inspect.

use super::message::{FinalizeIntent, Message};
use super::ImagePicker;
use crate::application::port::{AssetExporter, ExportReport, Presenter};
use crate::domain::asset::Asset;
use crate::domain::picker::PickerStatus;
use std::fmt;
use std::sync::Arc;

type ResultCallback = Box<dyn FnMut(&[Asset])>;

/// Collaborators and bookkeeping of the finalize path.
pub struct FinalizeCoordinator {
    presenter: Arc<dyn Presenter>,
    exporter: Option<Arc<dyn AssetExporter>>,
    pending: Option<FinalizeIntent>,
    last_report: Option<ExportReport>,
    on_did_select_assets: Option<ResultCallback>,
}

impl FinalizeCoordinator {
    #[must_use]
    pub fn new(presenter: Arc<dyn Presenter>, exporter: Option<Arc<dyn AssetExporter>>) -> Self {
        Self {
            presenter,
            exporter,
            pending: None,
            last_report: None,
            on_did_select_assets: None,
        }
    }

    pub fn set_result_callback(&mut self, callback: ResultCallback) {
        self.on_did_select_assets = Some(callback);
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&ExportReport> {
        self.last_report.as_ref()
    }

    /// A finalize or cancel is waiting on the presenter or the exporter.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Claims the finalize slot. Returns `false` if a request is already
    /// pending or the session has ended.
    fn begin(&mut self, intent: FinalizeIntent, status: PickerStatus) -> bool {
        if let Some(pending) = self.pending {
            tracing::debug!(?intent, ?pending, "finalize already in progress, ignoring");
            return false;
        }
        if status.is_terminal() {
            tracing::debug!(?intent, %status, "picker already finished, ignoring");
            return false;
        }
        self.pending = Some(intent);
        true
    }

    fn deliver(&mut self, assets: &[Asset]) {
        if let Some(callback) = self.on_did_select_assets.as_mut() {
            callback(assets);
        }
    }
}

impl fmt::Debug for FinalizeCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinalizeCoordinator")
            .field("exporter", &self.exporter.is_some())
            .field("pending", &self.pending)
            .field("last_report", &self.last_report)
            .finish_non_exhaustive()
    }
}

impl ImagePicker {
    /// Confirms the selection.
    ///
    /// Once the presenter has closed the picker, the selection is exported (if
    /// an exporter is configured), the status becomes `Completed` and the
    /// result callback receives the selection. Ignored while another finalize
    /// is pending or after the session ended.
    pub fn done(&mut self) {
        if self.finalize.begin(FinalizeIntent::Done, self.lifecycle.status()) {
            self.close_picker(FinalizeIntent::Done);
        }
    }

    /// Aborts the picker; the status becomes `Cancelled` once it has closed.
    pub fn dismiss(&mut self) {
        if self.finalize.begin(FinalizeIntent::Cancel, self.lifecycle.status()) {
            self.close_picker(FinalizeIntent::Cancel);
        }
    }

    /// A `done()` or `dismiss()` is waiting on the presenter or the exporter.
    #[must_use]
    pub fn is_finalizing(&self) -> bool {
        self.finalize.is_pending()
    }

    fn close_picker(&mut self, intent: FinalizeIntent) {
        tracing::debug!(?intent, "closing picker");
        let presenter = Arc::clone(&self.finalize.presenter);
        self.spawn(async move {
            presenter.dismiss_picker().await;
            Message::PickerDismissed(intent)
        });
    }

    pub(super) fn on_picker_dismissed(&mut self, intent: FinalizeIntent) {
        match intent {
            FinalizeIntent::Cancel => {
                self.finalize.pending = None;
                self.lifecycle.transition(PickerStatus::Cancelled);
                self.rearm_inline_camera();
            }
            FinalizeIntent::Done => match self.finalize.exporter.clone() {
                Some(exporter) => {
                    self.lifecycle.transition(PickerStatus::Exporting);
                    let assets = self.selection.selected_assets().to_vec();
                    tracing::info!(count = assets.len(), "exporting selection");
                    self.spawn(async move {
                        Message::ExportFinished(exporter.export(assets).await)
                    });
                }
                None => self.complete(),
            },
        }
    }

    pub(super) fn on_export_finished(&mut self, report: ExportReport) {
        if report.is_complete_success() {
            tracing::info!(exported = report.succeeded(), "export finished");
        } else {
            tracing::warn!(
                exported = report.succeeded(),
                failed = report.failed(),
                "export finished with failures"
            );
        }
        self.finalize.last_report = Some(report);
        self.complete();
    }

    fn complete(&mut self) {
        self.finalize.pending = None;
        self.lifecycle.transition(PickerStatus::Completed);
        let assets = self.selection.selected_assets().to_vec();
        tracing::info!(count = assets.len(), "picker completed");
        self.finalize.deliver(&assets);
        self.rearm_inline_camera();
    }

    fn rearm_inline_camera(&mut self) {
        if self.config.is_capture_only() {
            self.needs_show_inline_camera = true;
        }
    }
}
