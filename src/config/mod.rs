// SPDX-License-Identifier: MPL-2.0
//! Picker configuration, including loading and saving it to a `picker.toml`
//! file.
//!
//! # Examples
//!
//! ```no_run
//! use asset_picker::config::{self, PickerConfig};
//! use asset_picker::domain::picker::SelectionMode;
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.selection_mode = SelectionMode::Single;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/picker.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.selection_mode, SelectionMode::Single);
//! ```

pub mod defaults;

use crate::application::port::FetchOptions;
use crate::domain::media::AssetType;
use crate::domain::picker::{SelectionMode, SourceType, SupportedOrientations};
use crate::error::Result;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "picker.toml";
const APP_NAME: &str = "AssetPicker";

/// Everything an embedder can tune about a picker session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub selection_mode: SelectionMode,
    /// Only meaningful with [`SelectionMode::Single`].
    pub auto_close_on_single_select: bool,
    /// 0 = unlimited.
    pub max_selectable_count: usize,
    pub asset_type: AssetType,
    /// Album opened first, by name.
    pub default_album: Option<String>,
    pub allow_swipe_to_select: bool,
    pub allows_landscape: bool,
    pub source_type: SourceType,
    pub shows_empty_albums: bool,
    pub shows_cancel_button: bool,
    /// Embedded in another screen rather than presented modally.
    pub inline: bool,
    pub allow_multiple_types: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::default(),
            auto_close_on_single_select: DEFAULT_AUTO_CLOSE_ON_SINGLE_SELECT,
            max_selectable_count: DEFAULT_MAX_SELECTABLE_COUNT,
            asset_type: AssetType::default(),
            default_album: None,
            allow_swipe_to_select: DEFAULT_ALLOW_SWIPE_TO_SELECT,
            allows_landscape: DEFAULT_ALLOWS_LANDSCAPE,
            source_type: SourceType::default(),
            shows_empty_albums: DEFAULT_SHOWS_EMPTY_ALBUMS,
            shows_cancel_button: DEFAULT_SHOWS_CANCEL_BUTTON,
            inline: DEFAULT_INLINE,
            allow_multiple_types: DEFAULT_ALLOW_MULTIPLE_TYPES,
        }
    }
}

impl PickerConfig {
    /// The camera is the only source; there is no library screen.
    #[must_use]
    pub fn is_capture_only(&self) -> bool {
        self.source_type.is_capture_only()
    }

    /// Selecting one asset finishes the session.
    #[must_use]
    pub fn closes_on_select(&self) -> bool {
        self.is_capture_only()
            || (self.selection_mode.is_single() && self.auto_close_on_single_select)
    }

    #[must_use]
    pub fn should_autorotate(&self) -> bool {
        self.allows_landscape && !self.is_capture_only()
    }

    #[must_use]
    pub fn supported_orientations(&self) -> SupportedOrientations {
        if self.allows_landscape {
            SupportedOrientations::All
        } else {
            SupportedOrientations::PortraitOnly
        }
    }

    /// Fetch options handed to the group data manager.
    #[must_use]
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            asset_type: self.asset_type,
            default_group: self.default_album.clone(),
            shows_empty_groups: self.shows_empty_albums,
        }
    }

    /// The selection limit actually enforced, if any.
    ///
    /// Single-select and capture-only pickers never hold more than one asset
    /// at a time, so the limit does not apply to them.
    #[must_use]
    pub fn effective_max_selectable_count(&self) -> Option<usize> {
        if self.max_selectable_count == 0
            || self.selection_mode.is_single()
            || self.is_capture_only()
        {
            None
        } else {
            Some(self.max_selectable_count)
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<PickerConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(PickerConfig::default())
}

pub fn save(config: &PickerConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file; unparsable content yields the defaults.
pub fn load_from_path(path: &Path) -> Result<PickerConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid picker config, using defaults");
            Ok(PickerConfig::default())
        }
    }
}

pub fn save_to_path(config: &PickerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
