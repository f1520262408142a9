// SPDX-License-Identifier: MPL-2.0
//! Presenting-context port.
//!
//! Whoever presented the picker closes it. Finalize and cancel both wait for
//! that close to complete before touching the lifecycle.

use async_trait::async_trait;

/// Port for the context that presented the picker.
#[async_trait]
pub trait Presenter: Send + Sync {
    /// Closes the picker; returns once the close has finished.
    async fn dismiss_picker(&self);
}
