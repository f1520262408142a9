// SPDX-License-Identifier: MPL-2.0
//! Album/group data manager port.
//!
//! Enumerating albums and paging their contents happens outside this crate.
//! The picker only tells the manager what to fetch and when to let go.

use crate::domain::media::AssetType;

/// What the group data manager should fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Media kinds to list.
    pub asset_type: AssetType,
    /// Album to open first, by name.
    pub default_group: Option<String>,
    /// Whether albums without matching assets are listed.
    pub shows_empty_groups: bool,
}

/// Port for the album enumeration collaborator.
pub trait AssetGroupDataManager {
    /// Applies fetch options; called once per picker session on first appearance.
    fn configure(&self, options: &FetchOptions);

    /// Releases observers and caches; called when the picker goes away.
    fn invalidate(&self);
}
