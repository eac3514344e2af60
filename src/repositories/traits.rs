use crate::domain::{EntryId, NormalizedPhoneEntry};
use crate::error::AdminApiResult;
use crate::models::{Ack, BulkCounts, EntryPatch, PersistedEntry, StatsSnapshot};
use async_trait::async_trait;

/// Transport for the phone number list.
///
/// Abstracts the backend so the submission and list logic can run against
/// the HTTP client, a mock, or anything else.
#[async_trait]
pub trait PhoneNumberRepository: Send + Sync {
    /// Add one number.
    async fn submit_single(&self, entry: &NormalizedPhoneEntry) -> AdminApiResult<Ack>;

    /// Add several numbers in one request; the backend reconciles duplicates.
    async fn submit_bulk(&self, entries: &[NormalizedPhoneEntry]) -> AdminApiResult<BulkCounts>;

    /// Every stored number.
    async fn list_entries(&self) -> AdminApiResult<Vec<PersistedEntry>>;

    /// Apply a partial update.
    async fn update_entry(&self, id: &EntryId, patch: &EntryPatch) -> AdminApiResult<Ack>;

    async fn delete_entry(&self, id: &EntryId) -> AdminApiResult<Ack>;
}

/// Transport for the dashboard statistics.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    async fn get_stats(&self) -> AdminApiResult<StatsSnapshot>;
}
