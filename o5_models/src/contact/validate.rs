//! Field level rules for contact form submissions.
//!
//! These predicates are shared by the client submission controller and the
//! server, so both sides accept and reject exactly the same values. Every
//! function operates on the trimmed input and is free of side effects.

use std::sync::LazyLock;

use regex::Regex;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 60;
pub const SUBJECT_MIN_LEN: usize = 3;
pub const SUBJECT_MAX_LEN: usize = 120;
pub const MESSAGE_MIN_LEN: usize = 10;
pub const MESSAGE_MAX_LEN: usize = 2000;

/// Number of digits in a national phone number as entered on the contact form.
pub const PHONE_NATIONAL_DIGITS: usize = 10;
/// Digit count bounds for a complete phone number (E.164 allows at most 15).
pub const PHONE_MIN_DIGITS: usize = 7;
pub const PHONE_MAX_DIGITS: usize = 15;

pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());

pub static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z\s.'-]{1,59}$").unwrap());

/// Returns `true` if the value is missing or blank.
pub fn is_empty(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// A name starts with a letter, contains only letters, whitespace, `.`, `'`
/// and `-` and is 2 to 60 characters long.
pub fn is_valid_name(value: &str) -> bool {
    NAME_REGEX.is_match(value.trim())
}

pub fn is_valid_subject(value: &str) -> bool {
    (SUBJECT_MIN_LEN..=SUBJECT_MAX_LEN).contains(&value.trim().chars().count())
}

pub fn is_valid_message(value: &str) -> bool {
    (MESSAGE_MIN_LEN..=MESSAGE_MAX_LEN).contains(&value.trim().chars().count())
}

/// Extract all ascii digits of a phone number.
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// National number rule of the contact form: exactly ten digits, ignoring any
/// separators.
pub fn is_valid_phone_digits(value: &str) -> bool {
    phone_digits(value).len() == PHONE_NATIONAL_DIGITS
}

/// Lenient rule for complete phone numbers, with or without a dial code.
///
/// Only digits and the usual separators are allowed, a `+` may only appear as
/// the first character and the number must have between 7 and 15 digits.
pub fn is_plausible_phone(value: &str) -> bool {
    let value = value.trim();
    let body = value.strip_prefix('+').unwrap_or(value);
    let charset_ok = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')'));
    let digits = phone_digits(body).len();

    charset_ok && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

/// Compose the phone number sent to the server.
///
/// With a dial code and a ten digit national number the result is
/// `+<dial code> <digits>`, otherwise the trimmed input is returned unchanged.
pub fn normalize_phone(raw: &str, dial_code: Option<&str>) -> String {
    let digits = phone_digits(raw);
    let dial_code = dial_code
        .map(|d| d.trim().trim_start_matches('+'))
        .filter(|d| !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()));

    match dial_code {
        Some(dial_code) if digits.len() == PHONE_NATIONAL_DIGITS => {
            format!("+{dial_code} {digits}")
        }
        _ => raw.trim().to_owned(),
    }
}
