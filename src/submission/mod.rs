//! Bulk submission reconciliation.
//!
//! Decides how the form's entries reach the backend (nothing, a single add,
//! or a bulk add) and turns the backend's answer into the one status line the
//! operator sees.

mod coordinator;
mod outcome;

pub use coordinator::{choose_path, prepare, summarize, BulkSubmissionCoordinator, SubmissionReport};
pub use outcome::{
    FormEffect, StatusKind, StatusMessage, SubmissionOutcome, SubmissionPath,
    ADD_FAILED_FALLBACK, SUCCESS_MESSAGE_TTL,
};
