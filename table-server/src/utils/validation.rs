//! Input validation helpers
//!
//! Centralized text length limits plus the canonical phone normalization
//! rule. Every session and order lookup keys on the normalized phone, so
//! the rule lives here and nowhere else.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Diner display names
pub const MAX_NAME_LEN: usize = 200;

/// Special instructions on a cart line
pub const MAX_NOTE_LEN: usize = 500;

/// Restaurant / location / table identifiers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Subscriber number without country prefix
const MIN_PHONE_DIGITS: usize = 10;

/// Country prefix prepended to bare subscriber numbers
const COUNTRY_PREFIX: &str = "91";

// ── Phone normalization ─────────────────────────────────────────────

/// Normalize a diner-supplied phone number to its canonical identity form.
///
/// Strips all non-digit characters; if the digit string already starts
/// with the `91` country prefix it is used as-is, otherwise the prefix is
/// prepended. Callers may submit numbers with or without prefix or
/// punctuation and resolve to the same identity.
pub fn normalize_phone(raw: &str) -> Result<String, AppError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < MIN_PHONE_DIGITS {
        return Err(AppError::validation(
            "Please provide a valid phone number",
        ));
    }

    if digits.starts_with(COUNTRY_PREFIX) {
        Ok(digits)
    } else {
        Ok(format!("{COUNTRY_PREFIX}{digits}"))
    }
}

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(
            normalize_phone("+91 98765-43210").unwrap(),
            "919876543210"
        );
    }

    #[test]
    fn normalize_prepends_country_prefix() {
        assert_eq!(normalize_phone("9876543210").unwrap(), "919876543210");
    }

    #[test]
    fn normalize_keeps_existing_prefix() {
        assert_eq!(normalize_phone("919876543210").unwrap(), "919876543210");
    }

    #[test]
    fn prefixed_and_bare_forms_resolve_to_same_identity() {
        let a = normalize_phone("98765 43210").unwrap();
        let b = normalize_phone("+91-9876543210").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn short_number_is_rejected() {
        assert!(normalize_phone("12345").is_err());
        assert!(normalize_phone("").is_err());
        assert!(normalize_phone("abc-def").is_err());
    }

    #[test]
    fn required_text_rejects_blank() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Asha", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn required_text_rejects_overlong() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }
}
