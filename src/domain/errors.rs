//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The label is longer than the backend accepts.
    LabelTooLong(usize),

    /// None of the entries had enough digits to submit.
    NoSubmittableEntries,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::LabelTooLong(len) => write!(
                f,
                "Label is {} characters, the maximum is {}",
                len,
                super::phone::MAX_LABEL_LEN
            ),
            Self::NoSubmittableEntries => {
                write!(f, "Please enter at least one valid phone number")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
