// SPDX-License-Identifier: MPL-2.0
//! Capability registry and dispatch.
//!
//! The dispatcher holds the UI delegate and a weak reference per registered
//! capability provider. It routes typed requests to providers and never looks
//! at what they do with them.

use crate::application::port::{
    CapabilityContext, CapabilityKind, CapabilityProvider, CapabilityRequest, DefaultUiDelegate,
    PickerUiDelegate,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

pub struct CapabilityDispatcher {
    ui: Box<dyn PickerUiDelegate>,
    providers: HashMap<CapabilityKind, Weak<dyn CapabilityProvider>>,
}

impl CapabilityDispatcher {
    #[must_use]
    pub fn new(ui: Box<dyn PickerUiDelegate>) -> Self {
        Self {
            ui,
            providers: HashMap::new(),
        }
    }

    pub fn ui(&mut self) -> &mut dyn PickerUiDelegate {
        self.ui.as_mut()
    }

    pub fn set_ui(&mut self, ui: Box<dyn PickerUiDelegate>) {
        self.ui = ui;
    }

    /// Registers `provider` for `kind`, replacing any previous provider.
    ///
    /// Only a weak reference is kept; the caller owns the provider.
    pub fn register(&mut self, kind: CapabilityKind, provider: &Arc<dyn CapabilityProvider>) {
        tracing::debug!(capability = %kind, "capability provider registered");
        self.providers.insert(kind, Arc::downgrade(provider));
    }

    pub fn unregister(&mut self, kind: CapabilityKind) {
        self.providers.remove(&kind);
    }

    /// Registered and still alive.
    #[must_use]
    pub fn is_available(&self, kind: CapabilityKind) -> bool {
        self.provider(kind).is_some()
    }

    /// Hands `request` to its provider.
    ///
    /// Returns `false` when no live provider is registered; the request is
    /// dropped and nothing else happens.
    pub fn perform(&self, context: &CapabilityContext<'_>, request: CapabilityRequest) -> bool {
        let kind = request.kind();
        match self.provider(kind) {
            Some(provider) => {
                tracing::debug!(capability = %kind, "performing capability");
                provider.perform(context, request);
                true
            }
            None => {
                tracing::debug!(capability = %kind, "capability unavailable");
                false
            }
        }
    }

    /// Asks the provider for `kind` to tear down what it presented.
    pub fn finish(&self, kind: CapabilityKind) {
        if let Some(provider) = self.provider(kind) {
            tracing::debug!(capability = %kind, "finishing capability");
            provider.finish(kind);
        }
    }

    fn provider(&self, kind: CapabilityKind) -> Option<Arc<dyn CapabilityProvider>> {
        self.providers.get(&kind).and_then(Weak::upgrade)
    }
}

impl Default for CapabilityDispatcher {
    fn default() -> Self {
        Self::new(Box::new(DefaultUiDelegate))
    }
}

impl fmt::Debug for CapabilityDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let available: Vec<_> = CapabilityKind::ALL
            .into_iter()
            .filter(|kind| self.is_available(*kind))
            .collect();
        f.debug_struct("CapabilityDispatcher")
            .field("available", &available)
            .finish_non_exhaustive()
    }
}
