//! Input normalization helpers
//!
//! Payload shape is checked with `validator` derives on the shared DTOs;
//! the helpers here cover what derives can't express.

use std::sync::LazyLock;

use regex::Regex;
use validator::Validate;

use crate::utils::AppError;

/// Indonesian phone numbers: `62…`, `08…` or landline `021…`
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(62|08|021)[0-9]{7,20}$").expect("phone regex is valid"));

/// Run the `validator` derive and convert failures into a 400 [`AppError`]
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

/// Normalize a phone number, mobile numbers are stored with the `08` prefix
///
/// Blank input becomes `None`. Separators (space, dash, dot, parentheses)
/// and a leading `+` are dropped before checking.
pub fn normalize_phone(phone: Option<&str>) -> Result<Option<String>, AppError> {
    let Some(raw) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')' | '+'))
        .collect();

    if !PHONE_RE.is_match(&digits) {
        return Err(AppError::validation("Invalid phone number").with_detail("phone", raw));
    }

    match digits.strip_prefix("62") {
        Some(rest) => Ok(Some(format!("0{rest}"))),
        None => Ok(Some(digits)),
    }
}

/// Trim optional free text, blank becomes `None`
pub fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
