//! State of the add-numbers form.
//!
//! The form owns the entry rows, the busy flag that keeps a single
//! submission in flight, and the status line with its auto-clear deadline.
//! Submission is split in two halves so the caller can release its lock on
//! the form while the request is outstanding.

use crate::domain::PhoneEntry;
use crate::error::{AdminApiError, AdminApiResult, FormError};
use crate::submission::{
    BulkSubmissionCoordinator, StatusMessage, SubmissionPath, SubmissionReport,
    ADD_FAILED_FALLBACK,
};
use std::time::Instant;

#[derive(Debug, Clone)]
struct ShownStatus {
    status: StatusMessage,
    clear_at: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct PhoneNumberForm {
    entries: Vec<PhoneEntry>,
    busy: bool,
    status: Option<ShownStatus>,
}

impl Default for PhoneNumberForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneNumberForm {
    /// A form with one blank row.
    pub fn new() -> Self {
        Self {
            entries: vec![PhoneEntry::blank()],
            busy: false,
            status: None,
        }
    }

    pub fn entries(&self) -> &[PhoneEntry] {
        &self.entries
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn add_entry(&mut self) {
        self.entries.push(PhoneEntry::blank());
    }

    /// Remove a row; the last remaining row is kept.
    pub fn remove_entry(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.entries.len() {
            return Err(FormError::NoSuchEntry(index));
        }
        if self.entries.len() > 1 {
            self.entries.remove(index);
        }
        Ok(())
    }

    pub fn update_phone(&mut self, index: usize, keystrokes: &str) -> Result<(), FormError> {
        self.entries
            .get_mut(index)
            .ok_or(FormError::NoSuchEntry(index))?
            .set_raw_input(keystrokes);
        Ok(())
    }

    pub fn update_label(&mut self, index: usize, label: &str) -> Result<(), FormError> {
        self.entries
            .get_mut(index)
            .ok_or(FormError::NoSuchEntry(index))?
            .set_label(label);
        Ok(())
    }

    /// Replace every row at once.
    ///
    /// Numbers are kept as given, country code and all. Only the label is
    /// capped; the keystroke limits belong to `update_phone`.
    pub fn replace_entries(&mut self, rows: &[(String, String)]) {
        self.entries = rows
            .iter()
            .map(|(phone, label)| {
                let mut entry = PhoneEntry::new(phone.as_str(), "");
                entry.set_label(label);
                entry
            })
            .collect();
        if self.entries.is_empty() {
            self.entries.push(PhoneEntry::blank());
        }
    }

    /// Caption of the submit button.
    pub fn submit_label(&self) -> String {
        if self.busy {
            return "Saving...".to_string();
        }
        let n = self.entries.len();
        format!("Save {} Number{}", n, if n > 1 { "s" } else { "" })
    }

    /// The current status line, unless its deadline has passed.
    pub fn visible_status(&self, now: Instant) -> Option<&StatusMessage> {
        let shown = self.status.as_ref()?;
        match shown.clear_at {
            Some(deadline) if now >= deadline => None,
            _ => Some(&shown.status),
        }
    }

    /// Mark the form busy and hand back the rows to send.
    pub fn begin_submit(&mut self) -> Result<Vec<PhoneEntry>, FormError> {
        if self.busy {
            return Err(FormError::Busy);
        }
        self.busy = true;
        self.status = None;
        Ok(self.entries.clone())
    }

    /// Apply the coordinator's result and release the busy flag.
    pub fn finish_submit(
        &mut self,
        result: AdminApiResult<SubmissionReport>,
        now: Instant,
    ) -> Result<StatusMessage, FormError> {
        self.busy = false;

        let report = match result {
            Ok(report) => report,
            Err(e @ AdminApiError::Unauthorized) => return Err(FormError::Auth(e)),
            Err(e) => SubmissionReport {
                path: SubmissionPath::Empty,
                submitted: 0,
                status: StatusMessage::error(e.user_message(ADD_FAILED_FALLBACK)),
            },
        };

        let effect = report.status.form_effect();
        if effect.reset_entries {
            self.entries = vec![PhoneEntry::blank()];
        }
        self.status = Some(ShownStatus {
            status: report.status.clone(),
            clear_at: effect.auto_clear_after.map(|ttl| now + ttl),
        });

        Ok(report.status)
    }

    /// Submit through `coordinator` while holding the form exclusively.
    pub async fn submit(
        &mut self,
        coordinator: &BulkSubmissionCoordinator,
        now: Instant,
    ) -> Result<StatusMessage, FormError> {
        let entries = self.begin_submit()?;
        let result = coordinator.submit(&entries).await;
        self.finish_submit(result, now)
    }
}
