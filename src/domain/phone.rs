//! Phone entry normalization.
//!
//! Turns whatever the operator typed into the progressive `(XXX) XXX-XXXX`
//! display form, and recovers the digits-only form that is sent to the backend.
//! Only ASCII `0-9` count as digits.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum digit count for an entry to be submitted.
pub const MIN_SUBMITTABLE_DIGITS: usize = 10;

/// Longest value the phone input accepts, which is the length of `(555) 123-4567`.
pub const MAX_DISPLAY_LEN: usize = 14;

/// Longest label the backend accepts.
pub const MAX_LABEL_LEN: usize = 50;

/// Digits beyond this many are ignored by the display formatter.
const MAX_FORMATTED_DIGITS: usize = 10;

static STORED_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{3})(\d{3})(\d{4})$").expect("Failed to compile stored number regex")
});

/// Strip every non-digit character, preserving order.
pub fn to_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format raw keystrokes as a progressively filled `(XXX) XXX-XXXX`.
///
/// ```
/// use sms_admin_mcp::domain::format_phone_input;
///
/// assert_eq!(format_phone_input("5"), "5");
/// assert_eq!(format_phone_input("5551234"), "(555) 123-4");
/// assert_eq!(format_phone_input("5551234567"), "(555) 123-4567");
/// assert_eq!(format_phone_input("55a5b"), "555");
/// ```
pub fn format_phone_input(value: &str) -> String {
    let digits = to_digits(value);
    let digits = &digits[..digits.len().min(MAX_FORMATTED_DIGITS)];

    let (area, rest) = digits.split_at(digits.len().min(3));
    let (prefix, line) = rest.split_at(rest.len().min(3));

    if prefix.is_empty() {
        return area.to_string();
    }

    let mut out = format!("({}) {}", area, prefix);
    if !line.is_empty() {
        out.push('-');
        out.push_str(line);
    }
    out
}

/// Format a number the backend returned.
///
/// Exactly ten digits are rendered as `(XXX) XXX-XXXX`; anything else comes
/// back untouched.
pub fn format_stored_number(value: &str) -> String {
    let digits = to_digits(value);
    match STORED_NUMBER_REGEX.captures(&digits) {
        Some(caps) => format!("({}) {}-{}", &caps[1], &caps[2], &caps[3]),
        None => value.to_string(),
    }
}

/// True iff the entry carries enough digits to be sent.
pub fn is_submittable(entry: &PhoneEntry) -> bool {
    to_digits(&entry.raw_input).len() >= MIN_SUBMITTABLE_DIGITS
}

/// One row of the add-numbers form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneEntry {
    /// What the operator typed, possibly containing formatting characters
    pub raw_input: String,

    /// Optional free-text label
    #[serde(default)]
    pub label: String,
}

impl PhoneEntry {
    /// Build an entry from already-entered values, without reformatting.
    pub fn new(raw_input: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            label: label.into(),
        }
    }

    /// A blank form row.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Apply a keystroke event: cap at the input length, then reformat.
    pub fn set_raw_input(&mut self, keystrokes: &str) {
        let capped: String = keystrokes.chars().take(MAX_DISPLAY_LEN).collect();
        self.raw_input = format_phone_input(&capped);
    }

    pub fn set_label(&mut self, label: &str) {
        self.label = label.chars().take(MAX_LABEL_LEN).collect();
    }

    pub fn is_blank(&self) -> bool {
        self.raw_input.is_empty() && self.label.is_empty()
    }

    pub fn normalize(&self) -> NormalizedPhoneEntry {
        NormalizedPhoneEntry::from(self)
    }
}

/// The derived, submission-ready view of a [`PhoneEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedPhoneEntry {
    pub display_form: String,
    pub digits: String,
    pub label: String,
}

impl From<&PhoneEntry> for NormalizedPhoneEntry {
    fn from(entry: &PhoneEntry) -> Self {
        Self {
            display_form: format_phone_input(&entry.raw_input),
            digits: to_digits(&entry.raw_input),
            label: entry.label.clone(),
        }
    }
}
