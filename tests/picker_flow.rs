// SPDX-License-Identifier: MPL-2.0
use asset_picker::application::port::{
    AssetExporter, AssetSource, CapabilityContext, CapabilityKind, CapabilityProvider,
    CapabilityRequest, ExportReport, MediaStore, Presenter, StoreError,
};
use asset_picker::config::PickerConfig;
use asset_picker::domain::asset::{Asset, StoreRecord};
use asset_picker::domain::media::{MediaType, RawImage};
use asset_picker::domain::metadata::CaptureMetadata;
use asset_picker::domain::picker::{PickerStatus, SelectionMode, SourceType};
use asset_picker::picker::ImagePicker;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// =============================================================================
// Test collaborators
// =============================================================================

#[derive(Default)]
struct MemoryStore {
    fail_writes: bool,
    records: Mutex<HashMap<String, StoreRecord>>,
}

impl MemoryStore {
    fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaStore for MemoryStore {
    async fn create_asset(&self, source: AssetSource) -> Result<String, StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteFailed("read-only library".into()));
        }
        let mut records = self.records.lock().unwrap();
        let identifier = format!("mem-{}", records.len() + 1);
        let media_type = match source {
            AssetSource::VideoFile(_) => MediaType::Video,
            AssetSource::Image(_) | AssetSource::ImageBytes(_) => MediaType::Image,
        };
        records.insert(
            identifier.clone(),
            StoreRecord::new(identifier.clone(), media_type),
        );
        Ok(identifier)
    }

    async fn resolve(&self, identifiers: &[String]) -> Result<Vec<StoreRecord>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(identifiers
            .iter()
            .filter_map(|id| records.get(id).cloned())
            .collect())
    }
}

/// Exporter that records when it ran into a shared log.
struct LoggingExporter {
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl AssetExporter for LoggingExporter {
    async fn export(&self, assets: Vec<Asset>) -> ExportReport {
        tokio::task::yield_now().await;
        self.log.lock().unwrap().push(format!("export {}", assets.len()));
        let mut report = ExportReport::new();
        for asset in assets {
            report.push(asset.key(), Ok(PathBuf::from("/exported")));
        }
        report
    }
}

/// Presenter whose close finishes only when released.
struct GatedPresenter {
    gate: Arc<Notify>,
}

#[async_trait]
impl Presenter for GatedPresenter {
    async fn dismiss_picker(&self) {
        self.gate.notified().await;
    }
}

enum Shot {
    Photo(RawImage, Option<CaptureMetadata>),
    Video(PathBuf),
    Cancel,
    Ignore,
}

/// Camera answering each request with the next scripted shot.
#[derive(Default)]
struct ScriptedCamera {
    shots: Mutex<VecDeque<Shot>>,
    finished: Mutex<Vec<CapabilityKind>>,
}

impl ScriptedCamera {
    fn with(shots: impl IntoIterator<Item = Shot>) -> Arc<Self> {
        Arc::new(Self {
            shots: Mutex::new(shots.into_iter().collect()),
            finished: Mutex::default(),
        })
    }

    fn finished(&self) -> Vec<CapabilityKind> {
        self.finished.lock().unwrap().clone()
    }
}

impl CapabilityProvider for ScriptedCamera {
    fn perform(&self, _context: &CapabilityContext<'_>, request: CapabilityRequest) {
        let camera = match request {
            CapabilityRequest::Camera(camera) | CapabilityRequest::InlineCamera(camera) => camera,
            other => panic!("camera asked to perform {}", other.kind()),
        };
        match self.shots.lock().unwrap().pop_front() {
            Some(Shot::Photo(image, metadata)) => camera.responder.finish_image(image, metadata),
            Some(Shot::Video(path)) => camera.responder.finish_video(path),
            Some(Shot::Cancel) => camera.responder.cancel(),
            Some(Shot::Ignore) | None => drop(camera),
        }
    }

    fn finish(&self, kind: CapabilityKind) {
        self.finished.lock().unwrap().push(kind);
    }
}

/// Editor replacing every photo with a fixed image.
struct RecolorEditor {
    output: RawImage,
    seen: Mutex<Vec<RawImage>>,
}

impl CapabilityProvider for RecolorEditor {
    fn perform(&self, _context: &CapabilityContext<'_>, request: CapabilityRequest) {
        if let CapabilityRequest::PhotoEditor(editor) = request {
            self.seen.lock().unwrap().push(editor.image.clone());
            editor.responder.finish(self.output.clone(), editor.metadata);
        }
    }

    fn finish(&self, _kind: CapabilityKind) {}
}

/// Gallery that selects the asset it was opened from.
struct SelectingGallery;

impl CapabilityProvider for SelectingGallery {
    fn perform(&self, context: &CapabilityContext<'_>, request: CapabilityRequest) {
        if let CapabilityRequest::Gallery(gallery) = request {
            if let Some(asset) = gallery.presenting_from {
                context.handle.select(asset);
            }
        }
    }

    fn finish(&self, _kind: CapabilityKind) {}
}

// =============================================================================
// Helpers
// =============================================================================

fn asset(id: &str) -> Asset {
    Asset::stored(StoreRecord::new(id, MediaType::Image))
}

fn photo() -> RawImage {
    RawImage::solid(8, 6, [30, 120, 220, 255])
}

struct Recorded {
    statuses: Arc<Mutex<Vec<PickerStatus>>>,
    results: Arc<Mutex<Vec<Vec<Asset>>>>,
}

fn record(picker: &mut ImagePicker) -> Recorded {
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let results = Arc::new(Mutex::new(Vec::new()));
    let status_sink = Arc::clone(&statuses);
    let result_sink = Arc::clone(&results);
    picker.on_status_changed(move |status| status_sink.lock().unwrap().push(status));
    picker.on_did_select_assets(move |assets| result_sink.lock().unwrap().push(assets.to_vec()));
    Recorded { statuses, results }
}

fn register(picker: &mut ImagePicker, kind: CapabilityKind, provider: Arc<dyn CapabilityProvider>) {
    picker.register_capability(kind, &provider);
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn selection_stays_consistent_under_random_operations() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    let pool: Vec<Asset> = (0..12).map(|i| asset(&format!("a{i}"))).collect();
    let mut expected: Vec<Asset> = Vec::new();

    let mut seed: u64 = 0x5eed;
    for _ in 0..500 {
        seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        let candidate = pool[(seed >> 33) as usize % pool.len()].clone();
        if (seed >> 20) & 1 == 0 {
            picker.select(candidate.clone());
            if !expected.contains(&candidate) {
                expected.push(candidate);
            }
        } else {
            picker.deselect(&candidate);
            expected.retain(|a| a != &candidate);
        }

        assert_eq!(picker.selected_assets(), expected.as_slice());
        let unique: HashSet<_> = picker.selected_assets().iter().map(Asset::key).collect();
        assert_eq!(unique.len(), picker.selected_assets().len());
    }
}

#[test]
fn set_selected_assets_round_trips_order() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    let wanted = vec![asset("c"), asset("a"), asset("b")];

    picker.set_selected_assets(wanted.clone());
    assert_eq!(picker.selected_assets(), wanted.as_slice());
    for (index, item) in wanted.iter().enumerate() {
        assert_eq!(picker.index_of(item), Some(index));
    }
}

// =============================================================================
// Finalize
// =============================================================================

#[tokio::test]
async fn done_without_exporter_completes_immediately() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    let recorded = record(&mut picker);
    picker.view_will_appear();
    picker.select_all(vec![asset("a"), asset("b")]);

    picker.done();
    picker.settle().await;

    assert_eq!(
        *recorded.statuses.lock().unwrap(),
        [PickerStatus::Selecting, PickerStatus::Completed]
    );
    assert_eq!(
        *recorded.results.lock().unwrap(),
        [vec![asset("a"), asset("b")]]
    );
}

#[tokio::test]
async fn callback_follows_export() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default()))
        .exporter(Arc::new(LoggingExporter {
            log: Arc::clone(&log),
        }))
        .build();
    let recorded = record(&mut picker);
    let callback_log = Arc::clone(&log);
    picker.on_did_select_assets(move |assets| {
        callback_log
            .lock()
            .unwrap()
            .push(format!("callback {}", assets.len()));
    });

    picker.select(asset("a"));
    picker.done();
    picker.settle().await;

    assert_eq!(*log.lock().unwrap(), ["export 1", "callback 1"]);
    assert_eq!(
        *recorded.statuses.lock().unwrap(),
        [
            PickerStatus::Selecting,
            PickerStatus::Exporting,
            PickerStatus::Completed
        ]
    );
    let report = picker.last_export_report().expect("export report");
    assert!(report.is_complete_success());
}

#[tokio::test]
async fn dismiss_while_closing_is_ignored() {
    let gate = Arc::new(Notify::new());
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default()))
        .presenter(Arc::new(GatedPresenter {
            gate: Arc::clone(&gate),
        }))
        .build();
    let recorded = record(&mut picker);
    picker.select(asset("a"));

    picker.done();
    picker.dismiss();
    assert!(picker.is_finalizing());
    assert!(picker.has_pending_work());
    assert_eq!(picker.status(), PickerStatus::Selecting);

    gate.notify_one();
    picker.settle().await;

    assert_eq!(picker.status(), PickerStatus::Completed);
    assert_eq!(recorded.results.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn single_select_with_auto_close_finalizes() {
    let config = PickerConfig {
        selection_mode: SelectionMode::Single,
        ..PickerConfig::default()
    };
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default()))
        .config(config)
        .build();
    let recorded = record(&mut picker);

    picker.select(asset("only"));
    picker.settle().await;

    assert_eq!(picker.status(), PickerStatus::Completed);
    assert_eq!(*recorded.results.lock().unwrap(), [vec![asset("only")]]);
}

// =============================================================================
// Capture
// =============================================================================

#[tokio::test]
async fn captured_photo_is_persisted_and_selected() {
    let store = Arc::new(MemoryStore::default());
    let mut picker = ImagePicker::builder(store.clone()).build();
    let camera = ScriptedCamera::with([Shot::Photo(photo(), None)]);
    register(&mut picker, CapabilityKind::Camera, camera.clone());

    picker.view_will_appear();
    picker.present_camera();
    picker.settle().await;

    assert_eq!(store.len(), 1);
    let selected = picker.selected_assets();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].local_identifier(), Some("mem-1"));
    assert_eq!(camera.finished(), [CapabilityKind::Camera]);
    assert_eq!(picker.status(), PickerStatus::Selecting);
}

#[tokio::test]
async fn failing_store_still_selects_the_photo() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::failing())).build();
    let metadata = CaptureMetadata {
        camera_make: Some("Acme".into()),
        ..CaptureMetadata::default()
    };
    let camera = ScriptedCamera::with([Shot::Photo(photo(), Some(metadata))]);
    register(&mut picker, CapabilityKind::Camera, camera.clone());

    picker.present_camera();
    picker.settle().await;

    let selected = picker.selected_assets();
    assert_eq!(selected.len(), 1);
    assert!(!selected[0].is_persisted());
    assert_eq!(selected[0].image(), Some(&photo()));
}

#[tokio::test]
async fn editor_output_replaces_the_capture() {
    let edited = RawImage::solid(2, 2, [0, 0, 0, 255]);
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::failing())).build();
    let camera = ScriptedCamera::with([Shot::Photo(photo(), None)]);
    let editor = Arc::new(RecolorEditor {
        output: edited.clone(),
        seen: Mutex::default(),
    });
    register(&mut picker, CapabilityKind::Camera, camera.clone());
    register(&mut picker, CapabilityKind::PhotoEditor, editor.clone());

    picker.present_camera();
    picker.settle().await;

    assert_eq!(*editor.seen.lock().unwrap(), [photo()]);
    assert_eq!(picker.selected_assets()[0].image(), Some(&edited));
}

#[tokio::test]
async fn recorded_video_is_selected() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    let camera = ScriptedCamera::with([Shot::Video(PathBuf::from("/tmp/clip.mov"))]);
    register(&mut picker, CapabilityKind::Camera, camera.clone());

    picker.present_camera();
    picker.settle().await;

    assert_eq!(picker.selected_assets()[0].media_type(), MediaType::Video);
    assert_eq!(camera.finished(), [CapabilityKind::Camera]);
}

#[tokio::test]
async fn refused_video_only_closes_the_camera() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::failing())).build();
    let camera = ScriptedCamera::with([Shot::Video(PathBuf::from("/tmp/clip.mov"))]);
    register(&mut picker, CapabilityKind::Camera, camera.clone());

    picker.present_camera();
    picker.settle().await;

    assert!(picker.selected_assets().is_empty());
    assert_eq!(camera.finished(), [CapabilityKind::Camera]);
}

#[tokio::test]
async fn cancelled_camera_keeps_library_picker_open() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    let camera = ScriptedCamera::with([Shot::Cancel]);
    register(&mut picker, CapabilityKind::Camera, camera.clone());
    picker.view_will_appear();

    picker.present_camera();
    picker.settle().await;

    assert_eq!(picker.status(), PickerStatus::Selecting);
    assert_eq!(camera.finished(), [CapabilityKind::Camera]);
}

#[tokio::test]
async fn abandoned_capture_changes_nothing() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    let camera = ScriptedCamera::with([Shot::Ignore]);
    register(&mut picker, CapabilityKind::Camera, camera.clone());
    picker.select(asset("a"));

    picker.present_camera();
    picker.settle().await;

    assert!(!picker.has_pending_work());
    assert_eq!(picker.selected_assets(), [asset("a")]);
    assert!(camera.finished().is_empty());
}

// =============================================================================
// Capture-only pickers
// =============================================================================

fn capture_only() -> PickerConfig {
    PickerConfig {
        source_type: SourceType::Camera,
        ..PickerConfig::default()
    }
}

#[tokio::test]
async fn capture_only_completes_with_the_shot() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default()))
        .config(capture_only())
        .build();
    let recorded = record(&mut picker);
    let camera = ScriptedCamera::with([Shot::Photo(photo(), None)]);
    register(&mut picker, CapabilityKind::InlineCamera, camera.clone());

    picker.view_will_appear();
    picker.settle().await;

    assert_eq!(picker.status(), PickerStatus::Completed);
    let results = recorded.results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0][0].local_identifier(), Some("mem-1"));
    assert!(camera.finished().is_empty());
}

#[tokio::test]
async fn capture_only_video_completes_without_closing_the_camera() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default()))
        .config(capture_only())
        .build();
    let recorded = record(&mut picker);
    let camera = ScriptedCamera::with([Shot::Video(PathBuf::from("/tmp/clip.mov"))]);
    register(&mut picker, CapabilityKind::InlineCamera, camera.clone());
    register(&mut picker, CapabilityKind::Camera, camera.clone());

    picker.view_will_appear();
    picker.settle().await;

    assert_eq!(picker.status(), PickerStatus::Completed);
    let results = recorded.results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].len(), 1);
    assert_eq!(results[0][0].media_type(), MediaType::Video);
    assert_eq!(results[0][0].local_identifier(), Some("mem-1"));
    assert!(!camera.finished().contains(&CapabilityKind::Camera));
    assert!(camera.finished().is_empty());
}

#[tokio::test]
async fn capture_only_cancel_dismisses_the_picker() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default()))
        .config(capture_only())
        .build();
    let recorded = record(&mut picker);
    let camera = ScriptedCamera::with([Shot::Cancel]);
    register(&mut picker, CapabilityKind::InlineCamera, camera.clone());

    picker.view_will_appear();
    picker.settle().await;

    assert_eq!(picker.status(), PickerStatus::Cancelled);
    assert!(recorded.results.lock().unwrap().is_empty());
    assert_eq!(camera.finished(), [CapabilityKind::InlineCamera]);
}

// =============================================================================
// Capabilities
// =============================================================================

#[tokio::test]
async fn unregistered_capability_leaves_state_untouched() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    picker.view_will_appear();
    picker.select(asset("a"));

    picker.present_camera();
    assert!(!picker.show_gallery(None, None, "all"));
    picker.settle().await;

    assert_eq!(picker.status(), PickerStatus::Selecting);
    assert_eq!(picker.selected_assets(), [asset("a")]);
}

#[test]
fn dropped_provider_becomes_unavailable() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    let gallery: Arc<dyn CapabilityProvider> = Arc::new(SelectingGallery);
    picker.register_capability(CapabilityKind::Gallery, &gallery);
    assert!(picker.is_capability_available(CapabilityKind::Gallery));

    drop(gallery);
    assert!(!picker.is_capability_available(CapabilityKind::Gallery));
}

#[tokio::test]
async fn gallery_selects_through_the_handle() {
    let mut picker = ImagePicker::builder(Arc::new(MemoryStore::default())).build();
    let gallery: Arc<dyn CapabilityProvider> = Arc::new(SelectingGallery);
    picker.register_capability(CapabilityKind::Gallery, &gallery);

    assert!(picker.show_gallery(Some(3), Some(asset("g")), "all"));
    assert!(picker.selected_assets().is_empty());

    assert_eq!(picker.process_pending(), 1);
    assert_eq!(picker.selected_assets(), [asset("g")]);
}
