use super::outcome::{
    StatusMessage, SubmissionOutcome, SubmissionPath, ADD_FAILED_FALLBACK,
};
use crate::domain::{is_submittable, NormalizedPhoneEntry, PhoneEntry, ValidationError};
use crate::error::{AdminApiError, AdminApiResult};
use crate::metrics::Metrics;
use crate::models::BulkCounts;
use crate::repositories::PhoneNumberRepository;
use std::sync::Arc;

const SINGLE_ADDED: &str = "Phone number added successfully!";
const NONE_ADDED: &str = "No numbers were added. Check for duplicates or invalid formats.";

/// Normalize the entries and keep the submittable ones, in order.
///
/// Entries that are too short are dropped here and never reported as
/// failed. Duplicates are left for the backend to reconcile.
pub fn prepare(entries: &[PhoneEntry]) -> Vec<NormalizedPhoneEntry> {
    entries
        .iter()
        .filter(|entry| is_submittable(entry))
        .map(NormalizedPhoneEntry::from)
        .collect()
}

pub fn choose_path(valid: &[NormalizedPhoneEntry]) -> SubmissionPath {
    match valid.len() {
        0 => SubmissionPath::Empty,
        1 => SubmissionPath::Single,
        _ => SubmissionPath::Bulk,
    }
}

/// Build the status line for a submission.
///
/// `result` is `None` when nothing was sent.
pub fn summarize(
    path: SubmissionPath,
    result: Option<&AdminApiResult<SubmissionOutcome>>,
) -> StatusMessage {
    let result = match (path, result) {
        (SubmissionPath::Empty, _) | (_, None) => {
            return StatusMessage::error(ValidationError::NoSubmittableEntries.to_string())
        }
        (_, Some(result)) => result,
    };

    match result {
        Ok(SubmissionOutcome::Single(_)) => StatusMessage::success(SINGLE_ADDED),
        Ok(SubmissionOutcome::Bulk(counts)) => summarize_bulk(counts),
        Err(e) => StatusMessage::error(e.user_message(ADD_FAILED_FALLBACK)),
    }
}

fn summarize_bulk(counts: &BulkCounts) -> StatusMessage {
    if counts.added_count == 0 {
        return StatusMessage::error(NONE_ADDED);
    }

    let mut message = format!("✓ Added {} number(s)", counts.added_count);
    if counts.duplicate_count > 0 {
        message.push_str(&format!(", {} duplicate(s) skipped", counts.duplicate_count));
    }
    if counts.failed_count > 0 {
        message.push_str(&format!(", {} failed", counts.failed_count));
    }
    StatusMessage::success(message)
}

/// Result of one pass through the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReport {
    pub path: SubmissionPath,

    /// Entries actually sent
    pub submitted: usize,

    pub status: StatusMessage,
}

/// Sends the form's entries through an injected repository.
///
/// Holds no busy state of its own; the caller keeps one submission in flight
/// at a time.
pub struct BulkSubmissionCoordinator {
    repository: Arc<dyn PhoneNumberRepository>,
    metrics: Metrics,
}

impl BulkSubmissionCoordinator {
    pub fn new(repository: Arc<dyn PhoneNumberRepository>) -> Self {
        Self::with_metrics(repository, Metrics::new())
    }

    /// Count every pass by path into `metrics`.
    pub fn with_metrics(repository: Arc<dyn PhoneNumberRepository>, metrics: Metrics) -> Self {
        Self {
            repository,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Prepare, send and summarize.
    ///
    /// # Errors
    ///
    /// Only `AdminApiError::Unauthorized` is returned as an error; by then the
    /// credential has been cleared and the operator has to log in again. Every
    /// other failure becomes an error status in the report.
    pub async fn submit(&self, entries: &[PhoneEntry]) -> AdminApiResult<SubmissionReport> {
        let valid = prepare(entries);
        let path = choose_path(&valid);

        tracing::info!(
            "Submitting {} of {} entries ({:?})",
            valid.len(),
            entries.len(),
            path
        );

        let result = match path {
            SubmissionPath::Empty => None,
            SubmissionPath::Single => Some(
                self.repository
                    .submit_single(&valid[0])
                    .await
                    .map(SubmissionOutcome::Single),
            ),
            SubmissionPath::Bulk => Some(
                self.repository
                    .submit_bulk(&valid)
                    .await
                    .map(SubmissionOutcome::Bulk),
            ),
        };

        let submitted = if result.is_some() { valid.len() } else { 0 };
        self.metrics.record_submission(path, submitted);

        if let Some(Err(e)) = &result {
            if e.is_auth_error() {
                return Err(AdminApiError::Unauthorized);
            }
            tracing::error!("Failed to add phone number(s): {}", e);
        }

        let status = summarize(path, result.as_ref());
        Ok(SubmissionReport {
            path,
            submitted,
            status,
        })
    }
}
