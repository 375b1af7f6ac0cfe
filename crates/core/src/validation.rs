//! Field-level format checks.
//!
//! Pure predicates, cheap enough to run on every keystroke. An empty
//! (or whitespace-only) value is always accepted here; whether a field
//! is *required* is decided per step by the sequencer, not by format
//! validation.

use std::sync::LazyLock;

use regex::Regex;

/// Fixed hint shown next to the contact field on format mismatch.
pub const CONTACT_FORMAT_HINT: &str =
    "Format Nomor Kontak tidak valid. Harus diawali 08 dan memiliki 10-13 digit.";

/// Fixed hint shown next to the email field on format mismatch.
pub const EMAIL_FORMAT_HINT: &str = "Format email tidak valid.";

// Leading literal "08" followed by 8-11 digits: 10-13 digits total.
static CONTACT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^08[0-9]{8,11}$").unwrap());

// local@domain.tld: no whitespace, one @, at least one dot after it.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Check a contact number. Returns `None` when the value is valid (or
/// empty) and the fixed hint otherwise.
pub fn validate_contact(value: &str) -> Option<&'static str> {
    let v = value.trim();
    if v.is_empty() || CONTACT_RE.is_match(v) {
        None
    } else {
        Some(CONTACT_FORMAT_HINT)
    }
}

/// Check an email address. Same contract as [`validate_contact`].
pub fn validate_email(value: &str) -> Option<&'static str> {
    let v = value.trim();
    if v.is_empty() || EMAIL_RE.is_match(v) {
        None
    } else {
        Some(EMAIL_FORMAT_HINT)
    }
}
