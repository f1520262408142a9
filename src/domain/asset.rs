// SPDX-License-Identifier: MPL-2.0
//! The asset entity: one picked or captured media item.
//!
//! An [`Asset`] is either *stored* (resolved from the media store, carrying the
//! store-assigned `local_identifier`) or *unpersisted*: a capture whose store
//! write failed, carrying the raw image directly.
//!
//! # Unpersisted assets
//!
//! Unpersisted assets have no identifier and cannot be resolved from the store
//! later, neither by this crate nor by the caller. They are still valid
//! selections and are handed to the result callback like any other asset.
//! Consumers that need a store record must check [`Asset::is_persisted`] and
//! decide themselves whether to retry the write (the raw image is available
//! through [`Asset::image`]).
//!
//! # Equality
//!
//! Equality and hashing use [`AssetKey`]. Stored assets compare by identifier.
//! Each unpersisted asset receives a process-unique transient key when it is
//! constructed: clones of the same instance are equal, two separate captures
//! never are, even with identical pixels.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use super::media::{MediaType, RawImage};

static NEXT_TRANSIENT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identity of an asset inside a selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKey {
    /// Store-assigned identifier.
    Stored(String),
    /// Per-instance key of an unpersisted capture.
    Transient(u64),
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKey::Stored(id) => write!(f, "{id}"),
            AssetKey::Transient(n) => write!(f, "transient-{n}"),
        }
    }
}

/// What the media store knows about a persisted item.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    /// Store-assigned identifier.
    pub identifier: String,
    pub media_type: MediaType,
    /// Pixel dimensions, when the store could determine them.
    pub dimensions: Option<(u32, u32)>,
    /// Creation time reported by the store.
    pub created_at: Option<SystemTime>,
    /// Backing file, for stores that keep one.
    pub location: Option<PathBuf>,
}

impl StoreRecord {
    #[must_use]
    pub fn new(identifier: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            identifier: identifier.into(),
            media_type,
            dimensions: None,
            created_at: None,
            location: None,
        }
    }
}

#[derive(Debug)]
enum AssetContent {
    Stored(StoreRecord),
    Unpersisted { key: u64, image: RawImage },
}

/// A single picked or captured media item. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Asset {
    content: Arc<AssetContent>,
}

impl Asset {
    /// Wraps a record resolved from the media store.
    #[must_use]
    pub fn stored(record: StoreRecord) -> Self {
        Self {
            content: Arc::new(AssetContent::Stored(record)),
        }
    }

    /// Wraps an in-memory image that is not (yet) in the media store.
    #[must_use]
    pub fn unpersisted(image: RawImage) -> Self {
        let key = NEXT_TRANSIENT_KEY.fetch_add(1, Ordering::Relaxed);
        Self {
            content: Arc::new(AssetContent::Unpersisted { key, image }),
        }
    }

    #[must_use]
    pub fn key(&self) -> AssetKey {
        match self.content.as_ref() {
            AssetContent::Stored(record) => AssetKey::Stored(record.identifier.clone()),
            AssetContent::Unpersisted { key, .. } => AssetKey::Transient(*key),
        }
    }

    /// Store-assigned identifier, `None` for unpersisted assets.
    #[must_use]
    pub fn local_identifier(&self) -> Option<&str> {
        match self.content.as_ref() {
            AssetContent::Stored(record) => Some(&record.identifier),
            AssetContent::Unpersisted { .. } => None,
        }
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        matches!(self.content.as_ref(), AssetContent::Stored(_))
    }

    #[must_use]
    pub fn media_type(&self) -> MediaType {
        match self.content.as_ref() {
            AssetContent::Stored(record) => record.media_type,
            AssetContent::Unpersisted { .. } => MediaType::Image,
        }
    }

    #[must_use]
    pub fn record(&self) -> Option<&StoreRecord> {
        match self.content.as_ref() {
            AssetContent::Stored(record) => Some(record),
            AssetContent::Unpersisted { .. } => None,
        }
    }

    /// The raw image of an unpersisted asset.
    #[must_use]
    pub fn image(&self) -> Option<&RawImage> {
        match self.content.as_ref() {
            AssetContent::Stored(_) => None,
            AssetContent::Unpersisted { image, .. } => Some(image),
        }
    }

    /// Backing file of a stored asset, if the store exposes one.
    #[must_use]
    pub fn location(&self) -> Option<&Path> {
        self.record().and_then(|record| record.location.as_deref())
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        match (self.content.as_ref(), other.content.as_ref()) {
            (AssetContent::Stored(a), AssetContent::Stored(b)) => a.identifier == b.identifier,
            (AssetContent::Unpersisted { key: a, .. }, AssetContent::Unpersisted { key: b, .. }) => {
                a == b
            }
            _ => false,
        }
    }
}

impl Eq for Asset {}

impl Hash for Asset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
