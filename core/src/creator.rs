//! Draft-and-submit write path.

use std::sync::Arc;

use tracing::info;

use crate::client::TodoClient;
use crate::error::SyncError;
use crate::sync::SyncedList;
use crate::transport::Transport;
use crate::types::NewItem;

/// Collects a draft, posts it as a new item and then resynchronizes the list
/// it was given.
///
/// The write always triggers a refresh, whether or not it succeeded. A failed
/// write keeps the draft so the user can resubmit it.
pub struct ItemCreator<L> {
    list: L,
    client: TodoClient,
    transport: Arc<dyn Transport>,
    draft: String,
}

impl<L: SyncedList> ItemCreator<L> {
    pub fn new(list: L, client: TodoClient, transport: Arc<dyn Transport>) -> Self {
        Self {
            list,
            client,
            transport,
            draft: String::new(),
        }
    }

    /// Replace the draft with the input field's current value.
    pub fn input(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub async fn submit(&mut self) -> Result<(), SyncError> {
        if self.draft.trim().is_empty() {
            let err = SyncError::EmptyDraft;
            self.list.report(&err);
            return Err(err);
        }

        let payload = NewItem {
            item: self.draft.clone(),
        };
        let written = self.write(&payload).await;
        let refreshed = self.list.refresh().await;

        match written {
            Ok(()) => {
                info!(item = %payload.item, "todo submitted");
                self.draft.clear();
                refreshed
            }
            Err(e) => {
                // Reported after the refresh so a successful reload does not
                // clear the notice.
                self.list.report(&e);
                Err(e)
            }
        }
    }

    async fn write(&self, payload: &NewItem) -> Result<(), SyncError> {
        let request = self.client.build_add_item(payload)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_add_item(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::http::HttpMethod;
    use crate::sync::ListSynchronizer;
    use crate::transport::fake::ScriptedTransport;
    use crate::types::Item;

    const TWO_ITEMS: &str = r#"{"data":[{"id":"1","item":"Read a book"},{"id":"2","item":"Code project AZ"}]}"#;
    const THREE_ITEMS: &str = r#"{"data":[{"id":"1","item":"Read a book"},{"id":"2","item":"Code project AZ"},{"id":"3","item":"Call dentist"}]}"#;

    fn creator(transport: &Arc<ScriptedTransport>) -> ItemCreator<ListSynchronizer> {
        let client = TodoClient::new("http://localhost:7777");
        let list = ListSynchronizer::new(client.clone(), transport.clone());
        ItemCreator::new(list, client, transport.clone())
    }

    /// Counts refreshes and collects reports without any network.
    #[derive(Default)]
    struct RecordingList {
        refreshes: Mutex<usize>,
        reports: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SyncedList for Arc<RecordingList> {
        fn items(&self) -> Vec<Item> {
            Vec::new()
        }

        async fn refresh(&self) -> Result<(), SyncError> {
            *self.refreshes.lock().unwrap() += 1;
            Ok(())
        }

        fn report(&self, error: &SyncError) {
            self.reports.lock().unwrap().push(error.to_string());
        }
    }

    #[test]
    fn input_echoes_into_draft() {
        let transport = ScriptedTransport::new();
        let mut creator = creator(&transport);
        assert_eq!(creator.draft(), "");
        creator.input("Buy milk");
        assert_eq!(creator.draft(), "Buy milk");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn submit_posts_then_refreshes() {
        let transport = ScriptedTransport::new();
        transport.reply(200, TWO_ITEMS);
        transport.reply(201, r#"{"message":"Todo added","data":{"id":"3","item":"Call dentist"}}"#);
        transport.reply(200, THREE_ITEMS);
        let mut creator = creator(&transport);
        creator.list().mount().await.unwrap();
        assert_eq!(creator.list().len(), 2);

        creator.input("Call dentist");
        creator.submit().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].method, HttpMethod::Post);
        let body: serde_json::Value =
            serde_json::from_str(requests[1].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "item": "Call dentist" }));
        assert_eq!(requests[2].method, HttpMethod::Get);

        let items = creator.list().items();
        assert_eq!(items.len(), 3);
        assert!(items.iter().any(|t| t.item == "Call dentist"));
        assert_eq!(creator.draft(), "");
    }

    #[tokio::test]
    async fn failed_write_still_refreshes_and_keeps_draft() {
        let transport = ScriptedTransport::new();
        transport.reply(
            409,
            r#"{"detail":"Item cannot be the same as an existing todo","error_code":"duplicate_item"}"#,
        );
        transport.reply(200, TWO_ITEMS);
        let mut creator = creator(&transport);

        creator.input("read a book");
        let err = creator.submit().await.unwrap_err();

        assert!(matches!(err, SyncError::Server { status: 409, .. }));
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(creator.list().len(), 2);
        assert_eq!(creator.draft(), "read a book");
        let notice = creator.list().notice().unwrap();
        assert!(notice.message.contains("existing todo"));
    }

    #[tokio::test]
    async fn written_item_with_failed_reload_clears_draft() {
        let transport = ScriptedTransport::new();
        transport.reply(200, TWO_ITEMS);
        transport.reply(201, r#"{"message":"Todo added","data":{"id":"3","item":"Call dentist"}}"#);
        transport.reply(503, "unavailable");
        let mut creator = creator(&transport);
        creator.list().mount().await.unwrap();

        creator.input("Call dentist");
        let err = creator.submit().await.unwrap_err();

        assert!(matches!(err, SyncError::Server { status: 503, .. }));
        assert_eq!(creator.draft(), "");
        assert_eq!(creator.list().len(), 2);
        let notice = creator.list().notice().unwrap();
        assert!(notice.message.contains("503"));
    }

    #[tokio::test]
    async fn network_failure_on_write_is_reported() {
        let transport = ScriptedTransport::new();
        transport.fail(SyncError::Network("connection refused".to_string()));
        transport.fail(SyncError::Network("connection refused".to_string()));
        let mut creator = creator(&transport);

        creator.input("Walk dog");
        let err = creator.submit().await.unwrap_err();

        assert!(matches!(err, SyncError::Network(_)));
        assert_eq!(creator.draft(), "Walk dog");
        assert!(creator.list().notice().is_some());
    }

    #[tokio::test]
    async fn blank_draft_sends_nothing() {
        let transport = ScriptedTransport::new();
        let mut creator = creator(&transport);

        creator.input("   ");
        let err = creator.submit().await.unwrap_err();

        assert!(matches!(err, SyncError::EmptyDraft));
        assert!(transport.requests().is_empty());
        assert!(creator.list().notice().is_some());
    }

    #[tokio::test]
    async fn works_against_any_synced_list() {
        let transport = ScriptedTransport::new();
        transport.reply(201, "");
        let list = Arc::new(RecordingList::default());
        let mut creator = ItemCreator::new(
            list.clone(),
            TodoClient::new("http://localhost:7777"),
            transport.clone(),
        );

        creator.input("Water plants");
        creator.submit().await.unwrap();

        assert_eq!(*list.refreshes.lock().unwrap(), 1);
        assert!(list.reports.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn refresh_follows_a_failed_write() {
        let transport = ScriptedTransport::new();
        transport.reply(500, "boom");
        let list = Arc::new(RecordingList::default());
        let mut creator = ItemCreator::new(
            list.clone(),
            TodoClient::new("http://localhost:7777"),
            transport.clone(),
        );

        creator.input("Water plants");
        assert!(creator.submit().await.is_err());

        assert_eq!(*list.refreshes.lock().unwrap(), 1);
        assert_eq!(
            *list.reports.lock().unwrap(),
            vec!["todo server returned HTTP 500: boom".to_string()]
        );
    }
}
