use async_trait::async_trait;
use sms_admin_mcp::domain::{EntryId, NormalizedPhoneEntry};
use sms_admin_mcp::error::{AdminApiError, AdminApiResult};
use sms_admin_mcp::models::{Ack, BulkCounts, EntryPatch, PersistedEntry};
use sms_admin_mcp::repositories::PhoneNumberRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock phone number repository for testing.
///
/// Answers with canned responses and records every call, including the
/// payloads that were sent, for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockPhoneNumberRepository {
    entries: Arc<Mutex<Vec<PersistedEntry>>>,
    bulk_counts: Arc<Mutex<BulkCounts>>,
    failures: Arc<Mutex<HashMap<String, AdminApiError>>>,
    single_calls: Arc<Mutex<Vec<NormalizedPhoneEntry>>>,
    bulk_calls: Arc<Mutex<Vec<Vec<NormalizedPhoneEntry>>>>,
    patches: Arc<Mutex<Vec<(String, EntryPatch)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockPhoneNumberRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            bulk_counts: Arc::new(Mutex::new(BulkCounts::default())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            single_calls: Arc::new(Mutex::new(Vec::new())),
            bulk_calls: Arc::new(Mutex::new(Vec::new())),
            patches: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a stored entry returned by `list_entries`.
    pub fn add_entry(&self, id: &str, phone_number: &str, label: Option<&str>, active: bool) {
        self.entries.lock().unwrap().push(PersistedEntry {
            id: id.to_string(),
            phone_number: phone_number.to_string(),
            label: label.map(str::to_string),
            active,
            ..Default::default()
        });
    }

    /// Counts returned by the next bulk submission.
    pub fn set_bulk_counts(&self, added: u32, duplicates: u32, failed: u32) {
        *self.bulk_counts.lock().unwrap() = BulkCounts {
            added_count: added,
            duplicate_count: duplicates,
            failed_count: failed,
        };
    }

    /// Make `method` fail with `error` from now on.
    pub fn fail_with(&self, method: &str, error: AdminApiError) {
        self.failures
            .lock()
            .unwrap()
            .insert(method.to_string(), error);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn single_calls(&self) -> Vec<NormalizedPhoneEntry> {
        self.single_calls.lock().unwrap().clone()
    }

    pub fn bulk_calls(&self) -> Vec<Vec<NormalizedPhoneEntry>> {
        self.bulk_calls.lock().unwrap().clone()
    }

    pub fn patches(&self) -> Vec<(String, EntryPatch)> {
        self.patches.lock().unwrap().clone()
    }

    fn track_call(&self, method: &str) -> AdminApiResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match self.failures.lock().unwrap().get(method) {
            Some(error) => Err(clone_error(error)),
            None => Ok(()),
        }
    }
}

impl Default for MockPhoneNumberRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// AdminApiError holds a serde_json::Error and so is not Clone.
fn clone_error(error: &AdminApiError) -> AdminApiError {
    match error {
        AdminApiError::Unauthorized => AdminApiError::Unauthorized,
        AdminApiError::Timeout => AdminApiError::Timeout,
        AdminApiError::ApiError { status, message } => AdminApiError::ApiError {
            status: *status,
            message: message.clone(),
        },
        AdminApiError::NotFound(message) => AdminApiError::NotFound(message.clone()),
        AdminApiError::InvalidRequest(message) => AdminApiError::InvalidRequest(message.clone()),
        other => AdminApiError::HttpError(other.to_string()),
    }
}

#[async_trait]
impl PhoneNumberRepository for MockPhoneNumberRepository {
    async fn submit_single(&self, entry: &NormalizedPhoneEntry) -> AdminApiResult<Ack> {
        self.single_calls.lock().unwrap().push(entry.clone());
        self.track_call("submit_single")?;
        Ok(Ack::default())
    }

    async fn submit_bulk(&self, entries: &[NormalizedPhoneEntry]) -> AdminApiResult<BulkCounts> {
        self.bulk_calls.lock().unwrap().push(entries.to_vec());
        self.track_call("submit_bulk")?;
        Ok(*self.bulk_counts.lock().unwrap())
    }

    async fn list_entries(&self) -> AdminApiResult<Vec<PersistedEntry>> {
        self.track_call("list_entries")?;
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn update_entry(&self, id: &EntryId, patch: &EntryPatch) -> AdminApiResult<Ack> {
        self.patches
            .lock()
            .unwrap()
            .push((id.as_str().to_string(), patch.clone()));
        self.track_call("update_entry")?;
        Ok(Ack::default())
    }

    async fn delete_entry(&self, id: &EntryId) -> AdminApiResult<Ack> {
        self.track_call("delete_entry")?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != id.as_str());
        if entries.len() == before {
            return Err(AdminApiError::NotFound(format!(
                r#"{{"error":"Phone number {} not found"}}"#,
                id
            )));
        }
        Ok(Ack::default())
    }
}
