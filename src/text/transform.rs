//! String transformations.

use unicode_normalization::UnicodeNormalization;

use crate::error::{KitError, Result};

/// Convert text into a URL-friendly slug.
///
/// Accented characters are decomposed and reduced to ASCII, everything is
/// lowercased and each run of non-alphanumeric characters becomes a single
/// `separator`. With `max_length`, the slug is cut to that many characters
/// and any dangling separator is trimmed.
///
/// ```
/// use scriptkit::text::slugify;
///
/// assert_eq!(slugify("Hello World! How are you?", "-", None), "hello-world-how-are-you");
/// assert_eq!(slugify("Crème Brûlée", "_", None), "creme_brulee");
/// ```
#[must_use]
pub fn slugify(text: &str, separator: &str, max_length: Option<usize>) -> String {
    let ascii: String = text.nfkd().filter(char::is_ascii).collect();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for ch in ascii.chars().map(|c| c.to_ascii_lowercase()) {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push_str(separator);
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }

    match max_length {
        Some(limit) => {
            let cut: String = slug.chars().take(limit).collect();
            trim_separator_end(&cut, separator).to_string()
        }
        None => slug,
    }
}

fn trim_separator_end<'a>(text: &'a str, separator: &str) -> &'a str {
    if separator.is_empty() {
        return text;
    }
    text.trim_end_matches(|c| separator.contains(c))
}

/// Truncate text to at most `max_length` characters, ending with `suffix`
/// when anything was cut.
///
/// Works on characters, so multi-byte text is never split mid code point.
///
/// # Errors
///
/// `InvalidArgument` when `max_length` can't even hold the suffix.
pub fn truncate_text(text: &str, max_length: usize, suffix: &str) -> Result<String> {
    if text.chars().count() <= max_length {
        return Ok(text.to_string());
    }
    let suffix_len = suffix.chars().count();
    if max_length < suffix_len {
        return Err(KitError::invalid(format!(
            "max_length {max_length} is shorter than suffix {suffix:?}"
        )));
    }
    let kept: String = text.chars().take(max_length - suffix_len).collect();
    Ok(format!("{kept}{suffix}"))
}

/// Collapse every run of whitespace into one space and trim both ends.
#[must_use]
pub fn remove_extra_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
