//! Wire models for the SMS admin backend.
//!
//! These mirror the JSON the backend speaks: stored phone numbers, the
//! single and bulk add payloads, update patches, the stats snapshot and the
//! login exchange.

pub mod auth;
pub mod phone_number;
pub mod stats;

pub use auth::{LoginRequest, LoginResponse};
pub use phone_number::{
    Ack, BulkAddRequest, BulkAddResponse, BulkCounts, EntryPatch, NewPhoneNumber,
    PersistedEntry, PhoneNumbersResponse,
};
pub use stats::{PhoneNumberStats, StatsSnapshot, StatsSummary};
