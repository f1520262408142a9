// SPDX-License-Identifier: MPL-2.0
//! Log subscriber setup for binaries and demos.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the embedding application. [`init`] is the one the bundled binary
//! uses.

use crate::config::defaults::{DEFAULT_LOG_FILTER, LOG_FILTER_ENV};
use tracing_subscriber::EnvFilter;

/// Builds the filter: `ASSET_PICKER_LOG` if set and valid, else `fallback`,
/// else the crate default.
#[must_use]
pub fn env_filter(fallback: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| {
        fallback
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    })
}

/// Installs a formatted subscriber writing to stderr.
///
/// Calling it again after a subscriber is set is harmless; the second call is
/// ignored.
pub fn init(fallback: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .with_writer(std::io::stderr)
        .try_init();
}
