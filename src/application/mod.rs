// SPDX-License-Identifier: MPL-2.0
//! Application layer - collaborator interfaces.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The picker core drives the ports; adapters only appear as builder defaults
//!
//! # Example
//!
//! ```ignore
//! use asset_picker::application::port::Presenter;
//!
//! // Infrastructure implements the port trait
//! struct WindowPresenter { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl Presenter for WindowPresenter {
//!     async fn dismiss_picker(&self) { /* close the window */ }
//! }
//! ```

pub mod port;
