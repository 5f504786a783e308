//! Phone and email validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Local mobile numbers (leading zero) or international E.164 format
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+[1-9]\d{7,14}|0\d{8,9})$").unwrap());

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (local or E.164 format)
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Check if an email address has a plausible format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Mask a phone number for logs and error payloads (e.g. 0912****78)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        let prefix = &normalized[..4];
        let suffix = &normalized[normalized.len() - 2..];
        format!("{}****{}", prefix, suffix)
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_phone("0912345678"));
        assert!(is_valid_phone("+886987002093"));
        assert!(is_valid_phone("+61412345678"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("not-a-phone"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn test_normalization() {
        assert!(is_valid_phone("+886 987-002-093"));
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("student@example.edu"));
        assert!(is_valid_email("a.b+tag@uni.ac.uk"));
        assert!(!is_valid_email("missing-at.example.com"));
        assert!(!is_valid_email("trailing@dot."));
    }

    #[test]
    fn test_mask_phone() {
        let masked = mask_phone_number("0912345678");
        assert!(masked.starts_with("0912"));
        assert!(masked.ends_with("78"));
        assert!(masked.contains("****"));
        assert_eq!(mask_phone_number("123"), "****");
    }
}
