//! Domain value objects and types.
//!
//! This module contains the phone entry types the admin form works with,
//! the pure normalization functions that turn keystrokes into submittable
//! digits, and the type-safe entry ID wrapper used by list operations.

pub mod entry_id;
pub mod errors;
pub mod phone;

pub use entry_id::EntryId;
pub use errors::ValidationError;
pub use phone::{
    format_phone_input, format_stored_number, is_submittable, to_digits, NormalizedPhoneEntry,
    PhoneEntry, MAX_DISPLAY_LEN, MAX_LABEL_LEN, MIN_SUBMITTABLE_DIGITS,
};
