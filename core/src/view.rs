//! The todo component: a synchronized list with an optional creator.

use std::sync::Arc;

use crate::client::TodoClient;
use crate::creator::ItemCreator;
use crate::error::SyncError;
use crate::sync::{ListSynchronizer, Notice, SyncedList};
use crate::transport::Transport;
use crate::types::Item;

const EMPTY_LIST: &str = "(no todos yet)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub allow_create: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self { allow_create: true }
    }
}

/// One component for both variants. With `allow_create` off there is simply
/// no creator.
pub struct TodoView {
    list: ListSynchronizer,
    creator: Option<ItemCreator<ListSynchronizer>>,
}

impl TodoView {
    pub fn new(client: TodoClient, transport: Arc<dyn Transport>, options: ViewOptions) -> Self {
        let list = ListSynchronizer::new(client.clone(), Arc::clone(&transport));
        let creator = options
            .allow_create
            .then(|| ItemCreator::new(list.clone(), client, transport));
        Self { list, creator }
    }

    pub async fn mount(&self) -> Result<(), SyncError> {
        self.list.mount().await
    }

    pub fn list(&self) -> &ListSynchronizer {
        &self.list
    }

    pub fn creator(&mut self) -> Option<&mut ItemCreator<ListSynchronizer>> {
        self.creator.as_mut()
    }

    pub fn can_create(&self) -> bool {
        self.creator.is_some()
    }

    /// The text of every displayed entry, in server order.
    pub fn entries(&self) -> Vec<String> {
        self.list.items().into_iter().map(|todo| todo.item).collect()
    }

    pub fn render(&self) -> String {
        render(&self.list.items(), self.list.notice().as_ref())
    }

    /// The entries alone, for output that keeps notices on a separate stream.
    pub fn render_items(&self) -> String {
        render(&self.list.items(), None)
    }

    pub fn notice_line(&self) -> Option<String> {
        self.list.notice().map(|notice| format!("! {}", notice.message))
    }
}

/// Plain-text rendering: one line per item, then the notice if any.
pub fn render(items: &[Item], notice: Option<&Notice>) -> String {
    let mut out = String::new();
    if items.is_empty() {
        out.push_str(EMPTY_LIST);
        out.push('\n');
    }
    for todo in items {
        out.push_str(&todo.item);
        out.push('\n');
    }
    if let Some(notice) = notice {
        out.push_str("! ");
        out.push_str(&notice.message);
        out.push('\n');
    }
    out
}
