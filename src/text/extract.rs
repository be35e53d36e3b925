//! Pattern-based extraction and masking.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::{KitError, Result};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex")
});

static EMAIL_EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

static EMAIL_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z0-9._%+-]+)@([a-zA-Z0-9.-]+\.[a-zA-Z]{2,})").expect("email regex")
});

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]]+"#).expect("url regex"));

static PHONE_US: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\+]?[(]?[0-9]{3}[)]?[-\s\.]?[0-9]{3}[-\s\.]?[0-9]{4}").expect("phone regex")
});

static PHONE_UK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\+]?[0-9]{2}[-\s]?[0-9]{4}[-\s]?[0-9]{6}").expect("phone regex")
});

static PHONE_MASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]{3})[-.]?([0-9]{3})[-.]?([0-9]{4})\b").expect("phone regex")
});

static HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").expect("hashtag regex"));

static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(\w+)").expect("mention regex"));

/// Phone number layout to look for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneRegion {
    /// `(555) 123-4567`, `555.123.4567`, `+5551234567`
    #[default]
    Us,
    /// `44 1234 567890`
    Uk,
}

impl std::str::FromStr for PhoneRegion {
    type Err = KitError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "us" => Ok(Self::Us),
            "uk" | "gb" => Ok(Self::Uk),
            _ => Err(KitError::invalid(format!(
                "invalid phone region {value} (expected us|uk)"
            ))),
        }
    }
}

/// Extract all email addresses from text, in order of appearance.
///
/// ```
/// use scriptkit::text::extract_emails;
///
/// let found = extract_emails("Contact hello@example.com or support@test.org");
/// assert_eq!(found, vec!["hello@example.com", "support@test.org"]);
/// ```
#[must_use]
pub fn extract_emails(text: &str) -> Vec<String> {
    all_matches(&EMAIL, text)
}

/// Extract `http://` and `https://` URLs from text.
#[must_use]
pub fn extract_urls(text: &str) -> Vec<String> {
    all_matches(&URL, text)
}

/// Extract phone numbers for the given region layout.
#[must_use]
pub fn extract_phone_numbers(text: &str, region: PhoneRegion) -> Vec<String> {
    let pattern = match region {
        PhoneRegion::Us => &*PHONE_US,
        PhoneRegion::Uk => &*PHONE_UK,
    };
    all_matches(pattern, text)
}

/// Extract hashtags without the leading `#`.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    first_groups(&HASHTAG, text)
}

/// Extract `@mentions` without the leading `@`.
#[must_use]
pub fn extract_mentions(text: &str) -> Vec<String> {
    first_groups(&MENTION, text)
}

/// Whether the whole string looks like an email address.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    EMAIL_EXACT.is_match(email)
}

/// Mask email local parts and North American style phone numbers.
///
/// `jane@example.com` becomes `****@example.com` and `555-123-4567`
/// becomes `***-***-4567` (with `*` as the mask character).
#[must_use]
pub fn mask_sensitive_data(text: &str, mask_char: char) -> String {
    let masked = EMAIL_PARTS.replace_all(text, |caps: &Captures| {
        let local_len = caps[1].chars().count();
        format!(
            "{}@{}",
            mask_char.to_string().repeat(local_len),
            &caps[2]
        )
    });

    let triple = mask_char.to_string().repeat(3);
    PHONE_MASK
        .replace_all(&masked, |caps: &Captures| {
            format!("{triple}-{triple}-{}", &caps[3])
        })
        .into_owned()
}

fn all_matches(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn first_groups(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
