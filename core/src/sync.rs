//! Local mirror of the server's todo collection.
//!
//! # Design
//! `ListSynchronizer` owns the collection and replaces it wholesale on every
//! successful refresh; it never merges or predicts. Descendants receive it
//! through the [`SyncedList`] trait rather than reaching for shared globals,
//! so a creator can be tested against any list implementation.
//!
//! The collection and the current notice live in `watch` channels: readers
//! take a snapshot without blocking, and views can `subscribe` to re-render
//! on change. Concurrent refreshes are not ordered; whichever resolves last
//! wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::SyncError;
use crate::transport::Transport;
use crate::types::Item;

/// A non-fatal, user-visible message describing the latest failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl From<&SyncError> for Notice {
    fn from(error: &SyncError) -> Self {
        Self {
            message: error.to_string(),
        }
    }
}

/// What a list hands to its descendants: a read-only snapshot, a way to
/// force resynchronization and a place to surface failures.
#[async_trait]
pub trait SyncedList: Send + Sync {
    fn items(&self) -> Vec<Item>;

    async fn refresh(&self) -> Result<(), SyncError>;

    fn report(&self, error: &SyncError);
}

#[derive(Clone)]
pub struct ListSynchronizer {
    inner: Arc<Inner>,
}

struct Inner {
    client: TodoClient,
    transport: Arc<dyn Transport>,
    items: watch::Sender<Vec<Item>>,
    notice: watch::Sender<Option<Notice>>,
    mounted: AtomicBool,
}

impl ListSynchronizer {
    pub fn new(client: TodoClient, transport: Arc<dyn Transport>) -> Self {
        let (items, _) = watch::channel(Vec::new());
        let (notice, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                client,
                transport,
                items,
                notice,
                mounted: AtomicBool::new(false),
            }),
        }
    }

    /// Initial load. Only the first call issues a refresh.
    pub async fn mount(&self) -> Result<(), SyncError> {
        if self.inner.mounted.swap(true, Ordering::SeqCst) {
            debug!("already mounted, skipping initial load");
            return Ok(());
        }
        self.refresh_collection().await
    }

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    /// Change feed for the collection. The receiver sees every replacement.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Item>> {
        self.inner.items.subscribe()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.inner.notice.borrow().clone()
    }

    pub fn dismiss_notice(&self) {
        self.inner.notice.send_replace(None);
    }

    async fn refresh_collection(&self) -> Result<(), SyncError> {
        let request = self.inner.client.build_list_items();
        let fetched = match self.inner.transport.execute(request).await {
            Ok(response) => self.inner.client.parse_list_items(response),
            Err(e) => Err(e),
        };

        match fetched {
            Ok(items) => {
                debug!(count = items.len(), "collection refreshed");
                self.inner.items.send_replace(items);
                self.inner.notice.send_replace(None);
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl SyncedList for ListSynchronizer {
    fn items(&self) -> Vec<Item> {
        self.inner.items.borrow().clone()
    }

    /// Replace the collection with the server's. On failure the previous
    /// collection is kept and a notice is recorded.
    async fn refresh(&self) -> Result<(), SyncError> {
        self.refresh_collection().await
    }

    fn report(&self, error: &SyncError) {
        warn!(%error, "todo sync failed");
        self.inner.notice.send_replace(Some(Notice::from(error)));
    }
}
