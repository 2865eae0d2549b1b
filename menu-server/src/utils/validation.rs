//! Input validation helpers
//!
//! Text length constants and the checks shared by the admin forms. All of
//! these run before any backend call.

use std::str::FromStr;

use rust_decimal::Decimal;
use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Category and menu item names
pub const MAX_NAME_LEN: usize = 200;

/// Menu item descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    let chars = value.chars().count();
    if chars > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({chars} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: Option<&str>, field: &str, max_len: usize) -> Result<(), AppError> {
    if let Some(chars) = value.map(|v| v.chars().count())
        && chars > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({chars} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Parse a price as typed into the form; `None` unless it is a decimal > 0
pub fn parse_positive_price(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim())
        .ok()
        .filter(|price| *price > Decimal::ZERO)
}

/// Empty or whitespace-only text becomes `None`
pub fn none_if_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
