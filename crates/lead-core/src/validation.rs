//! Field Validation
//!
//! Pure predicates used by the field renderer and the controller.
//! Acceptance checks and the alternate call-to-action threshold are kept
//! apart: both read the same stored value, neither changes UI state.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$").expect("email pattern compiles")
});

// Unanchored: any URL-shaped run inside the input is enough.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[(http(s)?)://(www.)?a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)")
        .expect("url pattern compiles")
});

/// Validator attached to a field descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValidator {
    Email,
    Url,
    FollowerCount,
}

impl FieldValidator {
    /// Run the validator against a stored scalar value
    pub fn check(self, value: &str) -> bool {
        match self {
            FieldValidator::Email => is_valid_email(value),
            FieldValidator::Url => is_valid_url(value),
            FieldValidator::FollowerCount => validate_follower_count(value),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldValidator::Email => "email",
            FieldValidator::Url => "url",
            FieldValidator::FollowerCount => "follower_count",
        }
    }
}

/// Permissive email shape: `local@domain.tld`
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(input)
}

/// Permissive URL shape: a host-like run followed by a 2-6 letter TLD
pub fn is_valid_url(input: &str) -> bool {
    URL_RE.is_match(input)
}

/// Result of cleaning raw integer-field input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedInteger {
    /// Digits kept from the first space-separated token
    pub cleaned: String,

    /// True when no character of the raw input was dropped and at least one
    /// digit remains
    pub valid: bool,
}

/// Clean raw text typed into an integer field.
///
/// Only the first space-separated token is considered; every non-digit in it
/// is dropped. `"1a2b3"` cleans to `"123"` and `"abc"` to `""`, both flagged
/// as not valid since characters were discarded.
pub fn parse_integer_field(raw: &str) -> ParsedInteger {
    let token = raw.split(' ').next().unwrap_or_default();
    let cleaned: String = token.chars().filter(char::is_ascii_digit).collect();
    let valid = !cleaned.is_empty() && cleaned.len() == raw.len();

    ParsedInteger { cleaned, valid }
}

/// Stored follower count is a whole number
pub fn validate_follower_count(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Follower count below the threshold switches the form to the sign-up CTA.
///
/// Empty or unparseable values never switch modes.
pub fn should_show_alternate_cta(value: &str, threshold: u64) -> bool {
    value
        .parse::<u64>()
        .map(|count| count < threshold)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("emily.jones@mail.example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("not an email"));
        assert!(!is_valid_email(""));

        // word characters are ASCII only
        assert!(!is_valid_email("josé@b.co"));
        assert!(!is_valid_email("a@b.éé"));
    }

    #[test]
    fn test_url_shapes() {
        assert!(is_valid_url("website.com"));
        assert!(is_valid_url("https://www.example.org/path?x=1"));
        assert!(!is_valid_url("website"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_parse_integer_field() {
        assert_eq!(
            parse_integer_field("1a2b3"),
            ParsedInteger { cleaned: "123".into(), valid: false }
        );
        assert_eq!(
            parse_integer_field("abc"),
            ParsedInteger { cleaned: String::new(), valid: false }
        );
        assert_eq!(
            parse_integer_field("100000"),
            ParsedInteger { cleaned: "100000".into(), valid: true }
        );
        // only the first token survives
        assert_eq!(
            parse_integer_field("12 34"),
            ParsedInteger { cleaned: "12".into(), valid: false }
        );
        assert_eq!(parse_integer_field("100,000+").cleaned, "100000");
    }

    #[test]
    fn test_follower_threshold() {
        assert!(should_show_alternate_cta("99999", 100_000));
        assert!(!should_show_alternate_cta("100000", 100_000));
        assert!(!should_show_alternate_cta("", 100_000));

        assert!(validate_follower_count("99999"));
        assert!(validate_follower_count("100000"));
        assert!(!validate_follower_count(""));
        assert!(!validate_follower_count("100k"));
    }

    #[test]
    fn test_validator_dispatch() {
        assert!(FieldValidator::Email.check("a@b.co"));
        assert!(!FieldValidator::Url.check("nope"));
        assert!(FieldValidator::FollowerCount.check("42"));
        assert_eq!(FieldValidator::FollowerCount.as_str(), "follower_count");
    }
}
