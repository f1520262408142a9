// SPDX-License-Identifier: MPL-2.0
//! The picker controller.
//!
//! [`ImagePicker`] owns the selection, the lifecycle and the capability
//! dispatcher, and drives the capture and finalize pipelines. All of its
//! state is mutated through `&mut self` on one controlling context (the UI
//! loop of the embedding application).
//!
//! # Asynchronous work
//!
//! Store writes, exports and the presenter's dismissal run on spawned Tokio
//! tasks. Each task posts one message back into the picker's queue, as do
//! capability responders and [`PickerHandle`]s. Nothing touches picker state
//! until the embedder drains that queue:
//!
//! - [`ImagePicker::process_pending`] applies whatever has arrived, without
//!   waiting (call it from the UI tick)
//! - [`ImagePicker::settle`] waits until every spawned task has reported back
//!   and every responder handed out has answered or been dropped
//!
//! Methods that spawn work must be called inside a Tokio runtime.
//!
//! # Example
//!
//! ```ignore
//! use asset_picker::picker::ImagePicker;
//!
//! let mut picker = ImagePicker::builder(store).build();
//! picker.on_did_select_assets(|assets| println!("picked {}", assets.len()));
//! picker.view_will_appear();
//! picker.select(asset);
//! picker.done();
//! picker.settle().await;
//! ```

mod capability;
mod capture;
mod finalize;
mod lifecycle;
mod message;
mod selection;

pub use capability::CapabilityDispatcher;
pub use capture::CapturePipeline;
pub use finalize::FinalizeCoordinator;
pub use lifecycle::LifecycleStateMachine;
pub use message::FinalizeIntent;
pub use selection::SelectionStore;

use crate::application::port::{
    AssetExporter, AssetGroupDataManager, CapabilityContext, CapabilityKind, CapabilityProvider,
    CapabilityRequest, CapabilityResponse, ExportReport, GalleryRequest, ImageCodec, MediaStore,
    PickerCommand, PickerHandle, PickerInput, PickerSink, PickerUiDelegate, Presenter,
};
use crate::config::PickerConfig;
use crate::domain::asset::Asset;
use crate::domain::picker::{PickerStatus, SourceType, SupportedOrientations};
use crate::infrastructure::{ExifImageCodec, ImmediatePresenter};
use message::Message;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

// =============================================================================
// Builder
// =============================================================================

/// Builds an [`ImagePicker`].
///
/// The media store is the only mandatory collaborator. Everything else has a
/// default: the EXIF codec, an immediate presenter, the logging UI delegate,
/// no exporter and no group data manager.
pub struct ImagePickerBuilder {
    config: PickerConfig,
    store: Arc<dyn MediaStore>,
    codec: Option<Arc<dyn ImageCodec>>,
    exporter: Option<Arc<dyn AssetExporter>>,
    presenter: Option<Arc<dyn Presenter>>,
    ui: Option<Box<dyn PickerUiDelegate>>,
    group_manager: Option<Box<dyn AssetGroupDataManager>>,
}

impl ImagePickerBuilder {
    fn new(store: Arc<dyn MediaStore>) -> Self {
        Self {
            config: PickerConfig::default(),
            store,
            codec: None,
            exporter: None,
            presenter: None,
            ui: None,
            group_manager: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: PickerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn codec(mut self, codec: Arc<dyn ImageCodec>) -> Self {
        self.codec = Some(codec);
        self
    }

    #[must_use]
    pub fn exporter(mut self, exporter: Arc<dyn AssetExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    #[must_use]
    pub fn presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    #[must_use]
    pub fn ui_delegate(mut self, ui: Box<dyn PickerUiDelegate>) -> Self {
        self.ui = Some(ui);
        self
    }

    #[must_use]
    pub fn group_data_manager(mut self, manager: Box<dyn AssetGroupDataManager>) -> Self {
        self.group_manager = Some(manager);
        self
    }

    #[must_use]
    pub fn build(self) -> ImagePicker {
        let codec = self
            .codec
            .unwrap_or_else(|| Arc::new(ExifImageCodec::default()));
        let presenter = self
            .presenter
            .unwrap_or_else(|| Arc::new(ImmediatePresenter));
        let dispatcher = match self.ui {
            Some(ui) => CapabilityDispatcher::new(ui),
            None => CapabilityDispatcher::default(),
        };
        let (sender, receiver) = mpsc::unbounded_channel();

        ImagePicker {
            config: self.config,
            selection: SelectionStore::new(),
            lifecycle: LifecycleStateMachine::new(),
            dispatcher,
            capture: CapturePipeline::new(self.store, codec),
            finalize: FinalizeCoordinator::new(presenter, self.exporter),
            group_manager: self.group_manager,
            selection_observers: Vec::new(),
            sender,
            receiver,
            in_flight: 0,
            outstanding_responders: 0,
            initialized: false,
            root_installed: false,
            needs_show_inline_camera: true,
        }
    }
}

impl fmt::Debug for ImagePickerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePickerBuilder")
            .field("config", &self.config)
            .field("exporter", &self.exporter.is_some())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// ImagePicker
// =============================================================================

/// Media picker session controller.
pub struct ImagePicker {
    config: PickerConfig,
    selection: SelectionStore,
    lifecycle: LifecycleStateMachine,
    dispatcher: CapabilityDispatcher,
    capture: CapturePipeline,
    finalize: FinalizeCoordinator,
    group_manager: Option<Box<dyn AssetGroupDataManager>>,
    selection_observers: Vec<Box<dyn FnMut()>>,
    sender: mpsc::UnboundedSender<Message>,
    receiver: mpsc::UnboundedReceiver<Message>,
    /// Spawned tasks that have not reported back yet.
    in_flight: usize,
    /// Responders handed to providers that have not answered or been dropped.
    outstanding_responders: usize,
    initialized: bool,
    /// The selection screen is installed (library pickers after first appearance).
    root_installed: bool,
    needs_show_inline_camera: bool,
}

impl ImagePicker {
    /// Starts building a picker backed by `store`.
    #[must_use]
    pub fn builder(store: Arc<dyn MediaStore>) -> ImagePickerBuilder {
        ImagePickerBuilder::new(store)
    }

    // -------------------------------------------------------------------------
    // Observers and state
    // -------------------------------------------------------------------------

    /// Result callback, invoked once per completed `done()` with the final
    /// selection in order.
    pub fn on_did_select_assets(&mut self, callback: impl FnMut(&[Asset]) + 'static) {
        self.finalize.set_result_callback(Box::new(callback));
    }

    pub fn on_status_changed(&mut self, observer: impl FnMut(PickerStatus) + 'static) {
        self.lifecycle.subscribe(observer);
    }

    /// Called whenever the selection changes through a user-facing operation.
    pub fn on_selection_changed(&mut self, observer: impl FnMut() + 'static) {
        self.selection_observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> PickerStatus {
        self.lifecycle.status()
    }

    /// Per-asset outcome of the last export, once it has finished.
    #[must_use]
    pub fn last_export_report(&self) -> Option<&ExportReport> {
        self.finalize.last_report()
    }

    /// Handle for posting commands to this picker from providers or tasks.
    #[must_use]
    pub fn handle(&self) -> PickerHandle {
        PickerHandle::new(self.sink())
    }

    #[must_use]
    pub fn should_autorotate(&self) -> bool {
        self.config.should_autorotate()
    }

    #[must_use]
    pub fn supported_orientations(&self) -> SupportedOrientations {
        self.config.supported_orientations()
    }

    pub fn set_ui_delegate(&mut self, ui: Box<dyn PickerUiDelegate>) {
        self.dispatcher.set_ui(ui);
    }

    /// Changing the source type re-runs first-appearance setup on the next
    /// [`view_will_appear`](Self::view_will_appear).
    pub fn set_source_type(&mut self, source_type: SourceType) {
        if self.config.source_type != source_type {
            self.config.source_type = source_type;
            self.initialized = false;
        }
    }

    pub fn set_shows_cancel_button(&mut self, shows: bool) {
        self.config.shows_cancel_button = shows;
        if self.root_installed {
            self.update_cancel_button();
        }
    }

    // -------------------------------------------------------------------------
    // Appearance
    // -------------------------------------------------------------------------

    /// Call each time the picker is about to be shown.
    ///
    /// The first call of a session configures the group data manager and
    /// prepares the selection screen. Capture-only pickers present the inline
    /// camera whenever it is due.
    pub fn view_will_appear(&mut self) {
        self.lifecycle.begin_selecting();

        if !self.initialized {
            self.initialized = true;
            if let Some(manager) = &self.group_manager {
                manager.configure(&self.config.fetch_options());
            }
            if self.config.source_type.shows_library() {
                self.dispatcher.ui().prepare_layout(&self.config);
                self.update_cancel_button();
                self.root_installed = true;
            } else {
                self.root_installed = false;
            }
        }

        if self.needs_show_inline_camera && self.config.is_capture_only() {
            self.needs_show_inline_camera = false;
            self.show_camera(true);
        }
    }

    fn update_cancel_button(&mut self) {
        if self.config.shows_cancel_button {
            self.dispatcher.ui().show_cancel_button();
        } else {
            self.dispatcher.ui().hide_cancel_button();
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Adds `asset` to the selection.
    ///
    /// Single-select pickers drop the previous selection first. Pickers that
    /// close on select (capture-only, or single-select with auto-close)
    /// finalize immediately instead of notifying the UI.
    pub fn select(&mut self, asset: Asset) {
        self.select_one(asset, true);
    }

    /// Selects each asset in order with a single view reload at the end.
    pub fn select_all(&mut self, assets: impl IntoIterator<Item = Asset>) {
        let mut any = false;
        for asset in assets {
            self.select_one(asset, false);
            any = true;
        }
        if any {
            self.dispatcher.ui().reload_selection_view();
        }
    }

    pub fn deselect(&mut self, asset: &Asset) {
        self.lifecycle.begin_selecting();
        if !self.selection.remove(asset) {
            return;
        }
        self.notify_selection_changed();
        let ui = self.dispatcher.ui();
        ui.did_deselect_assets(std::slice::from_ref(asset));
        ui.reload_selection_view();
    }

    /// Clears the selection with one batched "did deselect" notification.
    pub fn deselect_all(&mut self) {
        self.deselect_all_inner(true);
    }

    /// Replaces the selection with `assets`, preserving their order.
    pub fn set_selected_assets(&mut self, assets: Vec<Asset>) {
        if assets.is_empty() {
            self.deselect_all_inner(true);
        } else {
            self.deselect_all_inner(false);
            self.select_all(assets);
        }
    }

    #[must_use]
    pub fn contains(&self, asset: &Asset) -> bool {
        self.selection.contains(asset)
    }

    #[must_use]
    pub fn index_of(&self, asset: &Asset) -> Option<usize> {
        self.selection.index_of(asset)
    }

    /// Current selection in order.
    #[must_use]
    pub fn selected_assets(&self) -> &[Asset] {
        self.selection.selected_assets()
    }

    fn select_one(&mut self, asset: Asset, reload: bool) -> bool {
        self.lifecycle.begin_selecting();

        if self.config.selection_mode.is_single() {
            self.deselect_all_inner(reload);
        }
        if self.selection.contains(&asset) {
            return false;
        }
        if let Some(limit) = self.config.effective_max_selectable_count() {
            if self.selection.len() >= limit {
                tracing::debug!(limit, "selection limit reached");
                self.dispatcher.ui().did_reach_max_limit();
                return false;
            }
        }

        self.selection.insert(asset.clone());

        if self.config.closes_on_select() {
            self.done();
        } else {
            self.notify_selection_changed();
            let ui = self.dispatcher.ui();
            ui.did_select_assets(std::slice::from_ref(&asset));
            if reload {
                ui.reload_selection_view();
            }
        }
        true
    }

    fn deselect_all_inner(&mut self, reload: bool) {
        self.lifecycle.begin_selecting();
        let previous = self.selection.clear();
        if previous.is_empty() {
            return;
        }
        self.notify_selection_changed();
        let ui = self.dispatcher.ui();
        ui.did_deselect_assets(&previous);
        if reload {
            ui.reload_selection_view();
        }
    }

    fn notify_selection_changed(&mut self) {
        for observer in &mut self.selection_observers {
            observer();
        }
    }

    // -------------------------------------------------------------------------
    // Capabilities
    // -------------------------------------------------------------------------

    /// Registers a capability provider. The picker keeps a weak reference.
    pub fn register_capability(
        &mut self,
        kind: CapabilityKind,
        provider: &Arc<dyn CapabilityProvider>,
    ) {
        self.dispatcher.register(kind, provider);
    }

    pub fn unregister_capability(&mut self, kind: CapabilityKind) {
        self.dispatcher.unregister(kind);
    }

    #[must_use]
    pub fn is_capability_available(&self, kind: CapabilityKind) -> bool {
        self.dispatcher.is_available(kind)
    }

    /// Opens the full-screen gallery over `group_id`.
    ///
    /// Returns `false` when no gallery provider is available.
    pub fn show_gallery(
        &mut self,
        presentation_index: Option<usize>,
        presenting_from: Option<Asset>,
        group_id: impl Into<String>,
    ) -> bool {
        self.perform(CapabilityRequest::Gallery(GalleryRequest {
            group_id: group_id.into(),
            presentation_index,
            presenting_from,
        }))
    }

    fn perform(&self, request: CapabilityRequest) -> bool {
        let context = CapabilityContext {
            config: &self.config,
            selected_assets: self.selection.selected_assets(),
            handle: self.handle(),
        };
        self.dispatcher.perform(&context, request)
    }

    // -------------------------------------------------------------------------
    // Queue
    // -------------------------------------------------------------------------

    /// Applies every message that has already arrived. Never waits.
    ///
    /// Returns how many messages were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.receiver.try_recv() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    /// Applies messages until no spawned task or responder is outstanding.
    ///
    /// A provider that keeps a responder without ever answering keeps this
    /// waiting; there is no timeout.
    pub async fn settle(&mut self) {
        self.process_pending();
        while self.has_pending_work() {
            match self.receiver.recv().await {
                Some(message) => self.apply(message),
                None => break,
            }
            self.process_pending();
        }
    }

    /// Spawned tasks or responders have yet to report back.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.in_flight > 0 || self.outstanding_responders > 0
    }

    fn sink(&self) -> PickerSink {
        let sender = self.sender.clone();
        Arc::new(move |input| {
            if sender.send(Message::Input(input)).is_err() {
                tracing::debug!("picker is gone, input dropped");
            }
        })
    }

    /// Runs `task` on the runtime and queues its resulting message.
    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Message> + Send + 'static,
    {
        self.in_flight += 1;
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let message = task.await;
            if sender.send(message).is_err() {
                tracing::debug!("picker is gone, task result dropped");
            }
        });
    }

    fn apply(&mut self, message: Message) {
        if message.is_task_result() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        if message.is_responder_answer() {
            self.outstanding_responders = self.outstanding_responders.saturating_sub(1);
        }

        match message {
            Message::Input(PickerInput::Command(command)) => self.apply_command(command),
            Message::Input(PickerInput::Response(response)) => self.apply_response(response),
            Message::ImagePersisted(asset) => self.on_image_persisted(asset),
            Message::VideoPersisted(asset) => self.on_video_persisted(asset),
            Message::PickerDismissed(intent) => self.on_picker_dismissed(intent),
            Message::ExportFinished(report) => self.on_export_finished(report),
        }
    }

    fn apply_command(&mut self, command: PickerCommand) {
        match command {
            PickerCommand::Select(asset) => self.select(asset),
            PickerCommand::Deselect(asset) => self.deselect(&asset),
            PickerCommand::Done => self.done(),
            PickerCommand::Dismiss => self.dismiss(),
        }
    }

    fn apply_response(&mut self, response: CapabilityResponse) {
        match response {
            CapabilityResponse::Captured { kind, outcome } => self.on_capture(kind, outcome),
            CapabilityResponse::Edited { image, metadata } => self.persist_image(image, metadata),
            CapabilityResponse::Abandoned(kind) => {
                tracing::debug!(capability = %kind, "capability flow abandoned");
            }
        }
    }
}

impl Drop for ImagePicker {
    fn drop(&mut self) {
        if let Some(manager) = &self.group_manager {
            manager.invalidate();
        }
    }
}

impl fmt::Debug for ImagePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePicker")
            .field("status", &self.lifecycle.status())
            .field("selected", &self.selection.len())
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .field("in_flight", &self.in_flight)
            .field("outstanding_responders", &self.outstanding_responders)
            .finish_non_exhaustive()
    }
}
