//! Phone number list service.
//!
//! Listing, inline editing, enabling/disabling and deleting stored numbers.

use crate::domain::{format_stored_number, to_digits, EntryId, ValidationError, MAX_LABEL_LEN};
use crate::error::{AdminApiError, AdminApiResult};
use crate::models::{EntryPatch, PersistedEntry};
use crate::repositories::PhoneNumberRepository;
use crate::submission::StatusMessage;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

const UPDATE_FAILED: &str = "Failed to update";
const TOGGLE_FAILED: &str = "Failed to toggle status";
const DELETE_FAILED: &str = "Failed to delete";

/// A stored number ready for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListedEntry {
    pub id: String,
    pub display_number: String,
    pub label: String,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<PersistedEntry> for ListedEntry {
    fn from(entry: PersistedEntry) -> Self {
        Self {
            display_number: entry.display_number(),
            label: entry.label.unwrap_or_default(),
            id: entry.id,
            active: entry.active,
            created_at: entry.created_at,
        }
    }
}

/// The whole list with its active/inactive badges.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct PhoneNumberListing {
    pub entries: Vec<ListedEntry>,
    pub active_count: usize,
    pub inactive_count: usize,
}

impl PhoneNumberListing {
    pub fn from_entries(entries: Vec<PersistedEntry>) -> Self {
        let entries: Vec<ListedEntry> = entries.into_iter().map(ListedEntry::from).collect();
        let active_count = entries.iter().filter(|e| e.active).count();
        Self {
            inactive_count: entries.len() - active_count,
            active_count,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Values shown in the inline editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub phone_number: String,
    pub label: String,
}

impl EditDraft {
    /// Seed the editor from a stored entry.
    pub fn from_entry(entry: &PersistedEntry) -> Self {
        Self {
            phone_number: format_stored_number(&entry.phone_number),
            label: entry.label_or_empty().to_string(),
        }
    }
}

/// Open the inline editor on `entry`.
pub fn begin_edit(entry: &PersistedEntry) -> EditDraft {
    EditDraft::from_entry(entry)
}

/// Confirmation prompt for a delete.
pub fn delete_prompt(entry: &PersistedEntry) -> String {
    format!("Delete {}?", format_stored_number(&entry.phone_number))
}

/// Business operations on the stored list.
///
/// Only `AdminApiError::Unauthorized` escapes as an error; other failures are
/// turned into statuses, or an empty listing for reads.
#[async_trait]
pub trait PhoneNumberListService: Send + Sync {
    async fn load(&self) -> AdminApiResult<PhoneNumberListing>;

    /// Look up one stored entry; `None` when absent or the list failed to load.
    async fn find(&self, id: &EntryId) -> AdminApiResult<Option<PersistedEntry>>;

    async fn save_edit(&self, id: &EntryId, draft: &EditDraft) -> AdminApiResult<StatusMessage>;

    async fn toggle_active(&self, id: &EntryId, currently_active: bool)
        -> AdminApiResult<StatusMessage>;

    async fn delete(&self, id: &EntryId) -> AdminApiResult<StatusMessage>;
}

pub struct PhoneNumberListServiceImpl {
    repository: Arc<dyn PhoneNumberRepository>,
}

impl PhoneNumberListServiceImpl {
    pub fn new(repository: Arc<dyn PhoneNumberRepository>) -> Self {
        Self { repository }
    }

    /// Turn a write result into a status, letting auth failures through.
    fn to_status<T>(
        result: AdminApiResult<T>,
        success: &str,
        failure: impl FnOnce(&AdminApiError) -> String,
    ) -> AdminApiResult<StatusMessage> {
        match result {
            Ok(_) => Ok(StatusMessage::success(success)),
            Err(e) if e.is_auth_error() => Err(e),
            Err(e) => {
                tracing::error!("Phone number update failed: {}", e);
                Ok(StatusMessage::error(failure(&e)))
            }
        }
    }
}

#[async_trait]
impl PhoneNumberListService for PhoneNumberListServiceImpl {
    async fn load(&self) -> AdminApiResult<PhoneNumberListing> {
        match self.repository.list_entries().await {
            Ok(entries) => Ok(PhoneNumberListing::from_entries(entries)),
            Err(e) if e.is_auth_error() => Err(e),
            Err(e) => {
                tracing::error!("Failed to load phone numbers: {}", e);
                Ok(PhoneNumberListing::default())
            }
        }
    }

    async fn find(&self, id: &EntryId) -> AdminApiResult<Option<PersistedEntry>> {
        match self.repository.list_entries().await {
            Ok(entries) => Ok(entries.into_iter().find(|e| e.id == id.as_str())),
            Err(e) if e.is_auth_error() => Err(e),
            Err(e) => {
                tracing::error!("Failed to load phone numbers: {}", e);
                Ok(None)
            }
        }
    }

    async fn save_edit(&self, id: &EntryId, draft: &EditDraft) -> AdminApiResult<StatusMessage> {
        let label_len = draft.label.chars().count();
        if label_len > MAX_LABEL_LEN {
            return Ok(StatusMessage::error(
                ValidationError::LabelTooLong(label_len).to_string(),
            ));
        }

        let patch = EntryPatch::details(to_digits(&draft.phone_number), draft.label.clone());
        let result = self.repository.update_entry(id, &patch).await;
        Self::to_status(result, "Phone number updated", |e| {
            e.user_message(UPDATE_FAILED)
        })
    }

    async fn toggle_active(
        &self,
        id: &EntryId,
        currently_active: bool,
    ) -> AdminApiResult<StatusMessage> {
        let patch = EntryPatch::active(!currently_active);
        let result = self.repository.update_entry(id, &patch).await;
        let success = if currently_active {
            "Phone number disabled"
        } else {
            "Phone number enabled"
        };
        Self::to_status(result, success, |_| TOGGLE_FAILED.to_string())
    }

    async fn delete(&self, id: &EntryId) -> AdminApiResult<StatusMessage> {
        let result = self.repository.delete_entry(id).await;
        Self::to_status(result, "Phone number deleted", |_| DELETE_FAILED.to_string())
    }
}
