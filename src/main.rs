// SPDX-License-Identifier: MPL-2.0
//! Command-line driver: "captures" the given files through a file-backed
//! camera, optionally exports the selection, and prints it.
//!
//! ```text
//! asset-picker --store DIR [--export DIR] [--single] [--config FILE] FILES...
//! ```

use asset_picker::application::port::{
    CapabilityContext, CapabilityKind, CapabilityProvider, CapabilityRequest, CaptureResponder,
    ImageCodec,
};
use asset_picker::config::{self, PickerConfig};
use asset_picker::domain::asset::Asset;
use asset_picker::domain::picker::SelectionMode;
use asset_picker::error::{Error, Result};
use asset_picker::infrastructure::{DirectoryExporter, DirectoryMediaStore, ExifImageCodec};
use asset_picker::logging;
use asset_picker::picker::ImagePicker;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

const VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4", "m4v"];

struct Args {
    store: PathBuf,
    export: Option<PathBuf>,
    single: bool,
    config: Option<PathBuf>,
    files: Vec<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = pico_args::Arguments::from_env();
    let parsed = Args {
        single: args.contains("--single"),
        store: args
            .value_from_str("--store")
            .map_err(|e| Error::Config(e.to_string()))?,
        export: args
            .opt_value_from_str("--export")
            .map_err(|e| Error::Config(e.to_string()))?,
        config: args
            .opt_value_from_str("--config")
            .map_err(|e| Error::Config(e.to_string()))?,
        files: args.finish().into_iter().map(PathBuf::from).collect(),
    };
    Ok(parsed)
}

/// Camera that answers each request with the next file on the command line.
struct FileCamera {
    files: Mutex<VecDeque<PathBuf>>,
    codec: ExifImageCodec,
}

impl FileCamera {
    fn remaining(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }

    fn capture(&self, responder: CaptureResponder) {
        let Some(path) = self.files.lock().ok().and_then(|mut files| files.pop_front()) else {
            responder.cancel();
            return;
        };

        let is_video = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)));
        if is_video {
            responder.finish_video(path);
            return;
        }

        let decoded = std::fs::read(&path)
            .map_err(Error::from)
            .and_then(|bytes| Ok((self.codec.decode(&bytes)?, bytes)));
        match decoded {
            Ok((image, bytes)) => responder.finish_image(image, self.codec.read_metadata(&bytes)),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable file");
                responder.cancel();
            }
        }
    }
}

impl CapabilityProvider for FileCamera {
    fn perform(&self, _context: &CapabilityContext<'_>, request: CapabilityRequest) {
        match request {
            CapabilityRequest::Camera(camera) | CapabilityRequest::InlineCamera(camera) => {
                self.capture(camera.responder);
            }
            other => tracing::debug!(capability = %other.kind(), "not handled by the file camera"),
        }
    }

    fn finish(&self, kind: CapabilityKind) {
        tracing::trace!(capability = %kind, "camera closed");
    }
}

fn load_config(args: &Args) -> Result<PickerConfig> {
    let mut config = match &args.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };
    if args.single {
        config.selection_mode = SelectionMode::Single;
    }
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let store = DirectoryMediaStore::open(&args.store).await?;

    let mut builder = ImagePicker::builder(Arc::new(store)).config(config);
    if let Some(dir) = &args.export {
        builder = builder.exporter(Arc::new(DirectoryExporter::new(dir)));
    }
    let mut picker = builder.build();

    let result = Rc::new(RefCell::new(None::<Vec<Asset>>));
    let sink = Rc::clone(&result);
    picker.on_did_select_assets(move |assets| *sink.borrow_mut() = Some(assets.to_vec()));

    let camera = Arc::new(FileCamera {
        files: Mutex::new(args.files.into_iter().collect()),
        codec: ExifImageCodec::default(),
    });
    let provider: Arc<dyn CapabilityProvider> = camera.clone();
    picker.register_capability(CapabilityKind::Camera, &provider);
    picker.register_capability(CapabilityKind::InlineCamera, &provider);

    picker.view_will_appear();
    picker.settle().await;
    while camera.remaining() > 0 && !picker.status().is_terminal() {
        if picker.config().is_capture_only() {
            picker.view_will_appear();
        } else {
            picker.present_camera();
        }
        picker.settle().await;
    }
    picker.done();
    picker.settle().await;

    match result.borrow().as_deref() {
        Some(assets) => {
            println!("{} asset(s) selected", assets.len());
            for asset in assets {
                match asset.location() {
                    Some(path) => println!("  {} {}", asset.key(), path.display()),
                    None => println!("  {} (in memory)", asset.key()),
                }
            }
        }
        None => println!("picker {}", picker.status()),
    }
    if let Some(report) = picker.last_export_report() {
        println!(
            "exported {} asset(s), {} failed",
            report.succeeded(),
            report.failed()
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init(None);

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!(
                "usage: asset-picker --store DIR [--export DIR] [--single] [--config FILE] FILES..."
            );
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "asset-picker failed");
            ExitCode::FAILURE
        }
    }
}
