// SPDX-License-Identifier: MPL-2.0
//! `asset_picker` is the core of a media asset picker.
//!
//! It keeps an ordered, duplicate-free selection of photos and videos, tracks
//! the picker session lifecycle, dispatches to pluggable capabilities (camera,
//! photo editor, gallery) and runs the capture and finalize pipelines against
//! an injected media store, exporter and presenter.
//!
//! Start with [`picker::ImagePicker`].

#![doc(html_root_url = "https://docs.rs/asset_picker/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod picker;
