//! Field validators for the auth and record forms.
//!
//! These mirror the checks the forms run on submit; the pricing layer never
//! validates, so anything numeric is vetted here before a record is sent to
//! the API.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// Loose email shape check: something@something.tld, no whitespace.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Passwords must be at least 6 characters.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 6
}

/// Non-blank after trimming.
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Parseable, non-negative number.
pub fn validate_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| n >= 0.0)
        .unwrap_or(false)
}

/// Parseable percentage within 0-100.
pub fn validate_percentage(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|n| (0.0..=100.0).contains(&n))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_plain_addresses() {
        assert!(validate_email("admin@example.com"));
        assert!(validate_email("a.b+c@mail.co.uk"));
    }

    #[test]
    fn test_validate_email_rejects_malformed() {
        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign.com"));
        assert!(!validate_email("user@nodot"));
        assert!(!validate_email("user name@example.com"));
        assert!(!validate_email("user@exa mple.com"));
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("secret"));
        assert!(validate_password("longer password"));
        assert!(!validate_password("12345"));
        assert!(!validate_password(""));
    }

    #[test]
    fn test_validate_required_trims_whitespace() {
        assert!(validate_required("x"));
        assert!(validate_required("  x  "));
        assert!(!validate_required(""));
        assert!(!validate_required("   "));
    }

    #[test]
    fn test_validate_number_bounds() {
        assert!(validate_number("0"));
        assert!(validate_number("12.5"));
        assert!(validate_number(" 300 "));
        assert!(!validate_number("-1"));
        assert!(!validate_number("abc"));
        assert!(!validate_number(""));
    }

    #[test]
    fn test_validate_percentage_bounds() {
        assert!(validate_percentage("0"));
        assert!(validate_percentage("20"));
        assert!(validate_percentage("100"));
        assert!(!validate_percentage("100.1"));
        assert!(!validate_percentage("-5"));
        assert!(!validate_percentage("ten"));
    }
}
