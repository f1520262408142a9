// SPDX-License-Identifier: MPL-2.0
//! Asset type filter for the domain layer.
//!
//! Decides which media kinds the picker lists. The filter is handed to the
//! group data manager as part of its fetch options; enumeration itself is
//! not done here.

use serde::{Deserialize, Serialize};

use super::MediaType;

/// Which media kinds the picker offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Photos only.
    AllPhotos,
    /// Videos only.
    AllVideos,
    /// Photos and videos.
    #[default]
    AllAssets,
}

impl AssetType {
    /// Returns `true` if this filter admits the given media type.
    #[must_use]
    pub fn matches(&self, media_type: MediaType) -> bool {
        match self {
            Self::AllAssets => true,
            Self::AllPhotos => matches!(media_type, MediaType::Image),
            Self::AllVideos => matches!(media_type, MediaType::Video),
        }
    }

    /// Media types admitted by this filter, in a stable order.
    #[must_use]
    pub fn media_types(&self) -> &'static [MediaType] {
        match self {
            Self::AllAssets => &[MediaType::Image, MediaType::Video],
            Self::AllPhotos => &[MediaType::Image],
            Self::AllVideos => &[MediaType::Video],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_assets_matches_everything() {
        assert!(AssetType::AllAssets.matches(MediaType::Image));
        assert!(AssetType::AllAssets.matches(MediaType::Video));
    }

    #[test]
    fn photos_and_videos_are_exclusive() {
        assert!(AssetType::AllPhotos.matches(MediaType::Image));
        assert!(!AssetType::AllPhotos.matches(MediaType::Video));
        assert!(AssetType::AllVideos.matches(MediaType::Video));
        assert!(!AssetType::AllVideos.matches(MediaType::Image));
    }

    #[test]
    fn media_types_follow_filter() {
        assert_eq!(AssetType::AllVideos.media_types(), &[MediaType::Video]);
        assert_eq!(AssetType::AllAssets.media_types().len(), 2);
    }
}
