// SPDX-License-Identifier: MPL-2.0
use crate::application::port::Presenter;
use async_trait::async_trait;

/// Presenter for pickers that are not shown by anyone; closing finishes at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediatePresenter;

#[async_trait]
impl Presenter for ImmediatePresenter {
    async fn dismiss_picker(&self) {
        tracing::trace!("picker closed");
    }
}
