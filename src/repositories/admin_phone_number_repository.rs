use crate::client::AsyncAdminClient;
use crate::domain::{EntryId, NormalizedPhoneEntry};
use crate::error::AdminApiResult;
use crate::models::{Ack, BulkCounts, EntryPatch, NewPhoneNumber, PersistedEntry};
use crate::repositories::traits::PhoneNumberRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Phone number repository backed by the admin API client.
///
/// Converts normalized entries into wire payloads and delegates
/// to the AsyncAdminClient.
pub struct AdminPhoneNumberRepository {
    client: Arc<dyn AsyncAdminClient>,
}

impl AdminPhoneNumberRepository {
    pub fn new(client: Arc<dyn AsyncAdminClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PhoneNumberRepository for AdminPhoneNumberRepository {
    async fn submit_single(&self, entry: &NormalizedPhoneEntry) -> AdminApiResult<Ack> {
        self.client
            .add_phone_number(&NewPhoneNumber::from(entry))
            .await
    }

    async fn submit_bulk(&self, entries: &[NormalizedPhoneEntry]) -> AdminApiResult<BulkCounts> {
        let payload: Vec<NewPhoneNumber> = entries.iter().map(NewPhoneNumber::from).collect();
        self.client.add_phone_numbers_bulk(&payload).await
    }

    async fn list_entries(&self) -> AdminApiResult<Vec<PersistedEntry>> {
        self.client.list_phone_numbers().await
    }

    async fn update_entry(&self, id: &EntryId, patch: &EntryPatch) -> AdminApiResult<Ack> {
        self.client.update_phone_number(id, patch).await
    }

    async fn delete_entry(&self, id: &EntryId) -> AdminApiResult<Ack> {
        self.client.delete_phone_number(id).await
    }
}
