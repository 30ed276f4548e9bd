// ── Reactive item stream ──
//
// Subscription type for consuming snapshot changes from the ItemStore.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Item;

/// A subscription to the item collection.
///
/// Provides both point-in-time snapshot access and reactive change
/// notification via the `changed()` method or by converting to a `Stream`.
pub struct ItemStream {
    current: Arc<Vec<Arc<Item>>>,
    receiver: watch::Receiver<Arc<Vec<Arc<Item>>>>,
}

impl ItemStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<Vec<Arc<Item>>>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Get the snapshot captured at creation time.
    pub fn current(&self) -> &Arc<Vec<Arc<Item>>> {
        &self.current
    }

    /// Get the latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Arc<Vec<Arc<Item>>> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the sender (ItemStore) has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Vec<Arc<Item>>>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> ItemWatchStream {
        ItemWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
///
/// Yields a new snapshot each time the store is replaced.
pub struct ItemWatchStream {
    inner: WatchStream<Arc<Vec<Arc<Item>>>>,
}

impl Stream for ItemWatchStream {
    type Item = Arc<Vec<Arc<Item>>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
