// SPDX-License-Identifier: MPL-2.0
//! Ordered, deduplicated selection storage.
//!
//! [`SelectionStore`] keeps the selection order as a sequence of keys and the
//! assets in a map keyed the same way. Both always hold the same key set. The
//! ordered asset list handed to readers is memoized and rebuilt on the first
//! read after a mutation.
//!
//! The store only stores. Mode rules (single select, limits, auto-close) and
//! notifications live in [`ImagePicker`](super::ImagePicker).

use crate::domain::asset::{Asset, AssetKey};
use std::cell::OnceCell;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct SelectionStore {
    order: Vec<AssetKey>,
    assets: HashMap<AssetKey, Asset>,
    cache: OnceCell<Vec<Asset>>,
}

impl SelectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `asset` unless an equal asset is already selected.
    ///
    /// Returns `true` if the selection changed.
    pub fn insert(&mut self, asset: Asset) -> bool {
        let key = asset.key();
        if self.assets.contains_key(&key) {
            return false;
        }
        self.order.push(key.clone());
        self.assets.insert(key, asset);
        self.invalidate();
        true
    }

    /// Removes `asset` if selected. Returns `true` if the selection changed.
    pub fn remove(&mut self, asset: &Asset) -> bool {
        let key = asset.key();
        if self.assets.remove(&key).is_none() {
            return false;
        }
        self.order.retain(|k| *k != key);
        self.invalidate();
        true
    }

    /// Empties the store and returns what was selected, in order.
    ///
    /// Returns an empty list (and leaves the cache alone) when nothing was
    /// selected.
    pub fn clear(&mut self) -> Vec<Asset> {
        if self.order.is_empty() {
            return Vec::new();
        }
        let previous = self.selected_assets().to_vec();
        self.order.clear();
        self.assets.clear();
        self.invalidate();
        previous
    }

    #[must_use]
    pub fn contains(&self, asset: &Asset) -> bool {
        self.assets.contains_key(&asset.key())
    }

    /// Position of `asset` in selection order.
    #[must_use]
    pub fn index_of(&self, asset: &Asset) -> Option<usize> {
        if !self.contains(asset) {
            return None;
        }
        let key = asset.key();
        self.order.iter().position(|k| *k == key)
    }

    /// Selected assets in selection order.
    #[must_use]
    pub fn selected_assets(&self) -> &[Asset] {
        self.cache.get_or_init(|| {
            self.order
                .iter()
                .filter_map(|key| self.assets.get(key).cloned())
                .collect()
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn invalidate(&mut self) {
        self.cache.take();
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        use std::collections::HashSet;

        let ordered: HashSet<&AssetKey> = self.order.iter().collect();
        let mapped: HashSet<&AssetKey> = self.assets.keys().collect();
        ordered.len() == self.order.len() && ordered == mapped
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.cache.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::StoreRecord;
    use crate::domain::media::{MediaType, RawImage};

    fn stored(id: &str) -> Asset {
        Asset::stored(StoreRecord::new(id, MediaType::Image))
    }

    #[test]
    fn insert_keeps_order_and_ignores_duplicates() {
        let mut store = SelectionStore::new();
        assert!(store.insert(stored("b")));
        assert!(store.insert(stored("a")));
        assert!(!store.insert(stored("b")));

        let ids: Vec<_> = store
            .selected_assets()
            .iter()
            .filter_map(Asset::local_identifier)
            .collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_of_non_member_is_a_no_op() {
        let mut store = SelectionStore::new();
        store.insert(stored("a"));
        assert!(!store.remove(&stored("z")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_returns_previous_selection() {
        let mut store = SelectionStore::new();
        assert!(store.clear().is_empty());

        store.insert(stored("a"));
        store.insert(stored("b"));
        let previous = store.clear();
        assert_eq!(previous, vec![stored("a"), stored("b")]);
        assert!(store.is_empty());
        assert!(store.selected_assets().is_empty());
    }

    #[test]
    fn index_of_follows_order() {
        let mut store = SelectionStore::new();
        store.insert(stored("a"));
        store.insert(stored("b"));
        store.insert(stored("c"));
        store.remove(&stored("a"));

        assert_eq!(store.index_of(&stored("c")), Some(1));
        assert_eq!(store.index_of(&stored("a")), None);
    }

    #[test]
    fn cache_is_dropped_on_mutation_and_rebuilt_on_read() {
        let mut store = SelectionStore::new();
        store.insert(stored("a"));
        assert!(!store.is_cached());

        assert_eq!(store.selected_assets().len(), 1);
        assert!(store.is_cached());

        store.insert(stored("b"));
        assert!(!store.is_cached());
        assert_eq!(store.selected_assets().len(), 2);
    }

    #[test]
    fn unpersisted_captures_are_distinct_members() {
        let mut store = SelectionStore::new();
        let first = Asset::unpersisted(RawImage::solid(1, 1, [0, 0, 0, 255]));
        let second = Asset::unpersisted(RawImage::solid(1, 1, [0, 0, 0, 255]));

        assert!(store.insert(first.clone()));
        assert!(store.insert(second));
        assert!(!store.insert(first));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn key_sets_stay_equal_under_mixed_operations() {
        let mut store = SelectionStore::new();
        let ids = ["a", "b", "c", "d", "e"];
        // Deterministic pseudo-random walk over inserts and removes.
        let mut state = 7u32;
        for _ in 0..500 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = ids[(state >> 16) as usize % ids.len()];
            match (state >> 8) % 3 {
                0 => {
                    store.clear();
                }
                1 => {
                    store.remove(&stored(id));
                }
                _ => {
                    store.insert(stored(id));
                }
            }
            assert!(store.is_consistent());
            assert_eq!(store.selected_assets().len(), store.len());
        }
    }
}
