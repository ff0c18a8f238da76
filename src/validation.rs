//! Field validation rules for the registration form

use regex::Regex;
use std::sync::OnceLock;

/// Message shown under the email field when the address is malformed
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";

// U+FEFF counts as whitespace for browser `\s` but not for Unicode White_Space
const EMAIL_PATTERN: &str = r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Check that `value` looks like `local@domain.tld`.
///
/// Every segment must be non-empty and free of whitespace and `@`.
pub fn validate_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Inline error text for an email value, empty when valid
pub fn email_error_for(value: &str) -> String {
    if validate_email(value) {
        String::new()
    } else {
        INVALID_EMAIL.to_string()
    }
}
