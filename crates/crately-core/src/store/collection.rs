// ── Reactive item collection ──
//
// Lock-free concurrent storage with O(1) lookups and push-based
// change notification via `watch` channels.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::Item;
use crate::stream::ItemStream;

/// The authoritative in-memory snapshot of the item collection.
///
/// Uses `DashMap` for O(1) concurrent id lookups and `watch` channels
/// for push-based change notification. The service owns the data; this
/// store only ever receives wholesale snapshot replacements from a
/// refresh -- there is no merge or diffing path.
pub struct ItemStore {
    /// Primary storage: id -> item.
    by_id: DashMap<i64, Arc<Item>>,

    /// Version counter, bumped on every replacement.
    version: watch::Sender<u64>,

    /// Full snapshot ordered by id, rebuilt on replacement.
    snapshot: watch::Sender<Arc<Vec<Arc<Item>>>>,
}

impl ItemStore {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            version,
            snapshot,
        }
    }

    /// Replace the entire collection with a freshly fetched snapshot.
    pub fn replace_all(&self, items: Vec<Item>) {
        self.by_id.clear();
        for item in items {
            self.by_id.insert(item.id, Arc::new(item));
        }

        self.rebuild_snapshot();
        self.bump_version();
    }

    /// Look up an item by id.
    pub fn get(&self, id: i64) -> Option<Arc<Item>> {
        self.by_id.get(&id).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone), ordered by id.
    pub fn snapshot(&self) -> Arc<Vec<Arc<Item>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> ItemStream {
        ItemStream::new(self.snapshot.subscribe())
    }

    /// Current version counter value.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Collect all items into an id-ordered snapshot vec and broadcast
    /// to subscribers.
    fn rebuild_snapshot(&self) {
        let mut values: Vec<Arc<Item>> =
            self.by_id.iter().map(|r| Arc::clone(r.value())).collect();
        values.sort_by_key(|item| item.id);
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Increment the version counter.
    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str) -> Item {
        Item {
            id,
            name: name.into(),
            quantity: 1,
            price: 1.0,
            category: "Misc".into(),
        }
    }

    #[test]
    fn replace_all_installs_snapshot_ordered_by_id() {
        let store = ItemStore::new();
        store.replace_all(vec![item(3, "c"), item(1, "a"), item(2, "b")]);

        let snap = store.snapshot();
        let ids: Vec<i64> = snap.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn replace_all_drops_absent_items() {
        let store = ItemStore::new();
        store.replace_all(vec![item(1, "a"), item(2, "b")]);
        store.replace_all(vec![item(2, "b")]);

        assert!(store.get(1).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn get_returns_current_item() {
        let store = ItemStore::new();
        store.replace_all(vec![item(1, "a")]);

        assert_eq!(store.get(1).unwrap().name, "a");
        assert!(store.get(99).is_none());
    }

    #[test]
    fn version_bumps_on_every_replacement() {
        let store = ItemStore::new();
        assert_eq!(store.version(), 0);

        store.replace_all(vec![item(1, "a")]);
        assert_eq!(store.version(), 1);

        // Identical content still counts as a replacement.
        store.replace_all(vec![item(1, "a")]);
        assert_eq!(store.version(), 2);
    }

    #[tokio::test]
    async fn subscribers_observe_replacement() {
        let store = ItemStore::new();
        let mut stream = store.subscribe();
        assert!(stream.current().is_empty());

        store.replace_all(vec![item(1, "a"), item(2, "b")]);

        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.len(), 2);
    }
}
