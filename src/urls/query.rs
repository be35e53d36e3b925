//! `application/x-www-form-urlencoded` query strings.

use std::collections::BTreeMap;
use std::fmt::Display;

use crate::error::{KitError, Result};

/// Encode key/value pairs as a query string, spaces as `+`.
///
/// ```
/// use scriptkit::urls::url_encode;
///
/// assert_eq!(url_encode(&[("name", "John Doe"), ("age", "30")]), "name=John+Doe&age=30");
/// ```
#[must_use]
pub fn url_encode<K: AsRef<str>, V: Display>(pairs: &[(K, V)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_component(key.as_ref()),
                encode_component(&value.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    urlencoding::encode(raw).replace("%20", "+")
}

/// Decode a query string into a sorted map.
///
/// Pairs with an empty value are dropped and a repeated key keeps its last
/// value. A leading `?` is ignored.
///
/// # Errors
///
/// `InvalidArgument` when a percent-decoded component is not valid UTF-8.
pub fn url_decode(query: &str) -> Result<BTreeMap<String, String>> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = BTreeMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        params.insert(decode_component(key)?, decode_component(value)?);
    }
    Ok(params)
}

fn decode_component(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| KitError::invalid(format!("query component {raw:?}: {err}")))
}

/// Join `base` and `path` with exactly one slash and append encoded
/// `params` as the query string.
#[must_use]
pub fn build_url<K: AsRef<str>, V: Display>(base: &str, path: &str, params: &[(K, V)]) -> String {
    let mut url = if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    };
    if !params.is_empty() {
        url.push('?');
        url.push_str(&url_encode(params));
    }
    url
}
