//! Phone number records and request payloads.

use crate::domain::{format_stored_number, NormalizedPhoneEntry};
use serde::{Deserialize, Serialize};

/// A phone number as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedEntry {
    /// Backend identifier (API field: _id)
    #[serde(rename = "_id")]
    pub id: String,

    /// Stored number, normally digits only
    pub phone_number: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Whether the number currently receives notifications
    pub active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PersistedEntry {
    /// The number rendered for display.
    pub fn display_number(&self) -> String {
        format_stored_number(&self.phone_number)
    }

    pub fn label_or_empty(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

/// Response of `GET /phone-numbers`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumbersResponse {
    #[serde(default)]
    pub phone_numbers: Option<Vec<PersistedEntry>>,
}

/// Payload for a single add, and each element of a bulk add.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPhoneNumber {
    /// Digits only
    pub phone_number: String,
    pub label: String,
}

impl From<&NormalizedPhoneEntry> for NewPhoneNumber {
    fn from(entry: &NormalizedPhoneEntry) -> Self {
        Self {
            phone_number: entry.digits.clone(),
            label: entry.label.clone(),
        }
    }
}

/// Body of `POST /phone-numbers/bulk`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAddRequest {
    pub phone_numbers: Vec<NewPhoneNumber>,
}

/// Reconciliation counts reported by a bulk add.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BulkCounts {
    pub added_count: u32,
    pub duplicate_count: u32,
    pub failed_count: u32,
}

/// Response of `POST /phone-numbers/bulk`.
///
/// `results` is required; a reply without it is a malformed response, not a
/// report of zero added.
#[derive(Debug, Deserialize, Default)]
pub struct BulkAddResponse {
    pub results: BulkCounts,
}

/// Partial update for `PUT /phone-numbers/{id}`; unset fields are left alone.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl EntryPatch {
    pub fn details(phone_number: String, label: String) -> Self {
        Self {
            phone_number: Some(phone_number),
            label: Some(label),
            active: None,
        }
    }

    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Default::default()
        }
    }
}

/// Acknowledgement of a write; the backend's body is kept for logging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ack {
    pub body: serde_json::Value,
}
