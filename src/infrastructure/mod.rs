// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`, backed by the file system and the `image` crate.
//!
//! # Available Adapters
//!
//! - [`codec`]: JPEG/PNG encoding and EXIF merge (implements [`ImageCodec`])
//! - [`store`]: Directory-backed media store (implements [`MediaStore`])
//! - [`export`]: Directory exporter (implements [`AssetExporter`])
//! - [`presenter`]: No-op presenter (implements [`Presenter`])
//!
//! [`ImageCodec`]: crate::application::port::ImageCodec
//! [`MediaStore`]: crate::application::port::MediaStore
//! [`AssetExporter`]: crate::application::port::AssetExporter
//! [`Presenter`]: crate::application::port::Presenter

pub mod codec;
pub mod export;
pub mod presenter;
pub mod store;

pub use codec::ExifImageCodec;
pub use export::DirectoryExporter;
pub use presenter::ImmediatePresenter;
pub use store::DirectoryMediaStore;
