// SPDX-License-Identifier: MPL-2.0
//! Export collaborator port definitions.
//!
//! After the user confirms, the picker can hand the final selection to an
//! exporter before reporting completion. The exporter reports a result per
//! asset; the picker completes regardless of that result.

use crate::domain::asset::{Asset, AssetKey};
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// ExportError
// =============================================================================

/// Why a single asset could not be exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// File system failure.
    Io(String),

    /// The asset could not be encoded for export.
    Encode(String),

    /// The exporter doesn't handle this kind of asset.
    Unsupported(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(msg) => write!(f, "I/O error: {msg}"),
            ExportError::Encode(msg) => write!(f, "Failed to encode asset: {msg}"),
            ExportError::Unsupported(msg) => write!(f, "Unsupported asset: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

// =============================================================================
// ExportReport
// =============================================================================

/// Outcome of exporting one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportEntry {
    pub key: AssetKey,
    pub outcome: Result<PathBuf, ExportError>,
}

/// Per-asset outcomes of one export run, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportReport {
    entries: Vec<ExportEntry>,
}

impl ExportReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: AssetKey, outcome: Result<PathBuf, ExportError>) {
        self.entries.push(ExportEntry { key, outcome });
    }

    #[must_use]
    pub fn entries(&self) -> &[ExportEntry] {
        &self.entries
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_ok()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    /// Returns `true` if every asset was exported.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.failed() == 0
    }
}

// =============================================================================
// AssetExporter Trait
// =============================================================================

/// Port for exporting the confirmed selection.
///
/// `export` must complete exactly once, whatever the mix of per-asset
/// successes and failures. The picker imposes no timeout.
#[async_trait]
pub trait AssetExporter: Send + Sync {
    async fn export(&self, assets: Vec<Asset>) -> ExportReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts_successes_and_failures() {
        let mut report = ExportReport::new();
        report.push(AssetKey::Stored("a".into()), Ok(PathBuf::from("/tmp/a.jpg")));
        report.push(
            AssetKey::Transient(3),
            Err(ExportError::Encode("empty".into())),
        );

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_complete_success());
        assert_eq!(report.entries()[1].key, AssetKey::Transient(3));
    }

    #[test]
    fn empty_report_is_a_success() {
        assert!(ExportReport::new().is_complete_success());
    }
}
