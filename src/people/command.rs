use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::app::AppMessage;
use crate::commands::Command;
use crate::people::message::PeopleMsg;
use crate::people::query::QueryState;
use crate::swapi::PeopleSource;

/// Fetch one page of people for a query snapshot.
///
/// Exactly one request per command, no retries. The outcome goes back to
/// the people view tagged with `request_id` so stale answers can be told
/// apart from the latest one.
pub struct FetchPeopleCmd {
    source: Arc<dyn PeopleSource>,
    query: QueryState,
    request_id: u64,
    tx: UnboundedSender<PeopleMsg>,
}

impl FetchPeopleCmd {
    pub fn new(
        source: Arc<dyn PeopleSource>,
        query: QueryState,
        request_id: u64,
        tx: UnboundedSender<PeopleMsg>,
    ) -> Self {
        Self {
            source,
            query,
            request_id,
            tx,
        }
    }
}

#[async_trait]
impl Command for FetchPeopleCmd {
    fn name(&self) -> String {
        format!(
            "Searching \"{}\" (page {})",
            self.query.search_text(),
            self.query.page_index() + 1
        )
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        let result = self
            .source
            .search_people(self.query.search_text(), self.query.page_index())
            .await;

        let msg = match result {
            Ok(page) => PeopleMsg::PageLoaded {
                request_id: self.request_id,
                page,
            },
            Err(e) => {
                warn!("Request {} failed: {}", self.request_id, e);
                PeopleMsg::PageFailed {
                    request_id: self.request_id,
                    error: e.to_string(),
                }
            }
        };
        // The view is gone when the app is shutting down.
        let _ = self.tx.send(msg);
        Ok(())
    }
}
