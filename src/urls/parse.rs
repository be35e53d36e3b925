//! Splitting URLs into parts and checking their shape.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{KitError, Result};
use crate::urls::url_decode;

// RFC 3986, appendix B
static URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("uri regex")
});

static WEB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^https?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+[A-Z]{2,6}\.?",
        r"|localhost",
        r"|\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})",
        r"(?::\d+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("web url regex")
});

/// Components of a URL. Missing parts are empty strings or `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlParts {
    pub scheme: String,
    /// Lower-cased, without IPv6 brackets.
    pub host: Option<String>,
    pub port: Option<u16>,
    pub path: String,
    pub query: String,
    pub query_params: BTreeMap<String, String>,
    pub fragment: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Split a URL into its parts.
///
/// ```
/// use scriptkit::urls::parse_url;
///
/// let parts = parse_url("https://example.com:8080/path?q=test").unwrap();
/// assert_eq!(parts.host.as_deref(), Some("example.com"));
/// assert_eq!(parts.port, Some(8080));
/// assert_eq!(parts.query_params["q"], "test");
/// ```
///
/// # Errors
///
/// `InvalidArgument` for a non-numeric or out-of-range port, or an
/// undecodable query string.
pub fn parse_url(url: &str) -> Result<UrlParts> {
    let caps = URI
        .captures(url)
        .ok_or_else(|| KitError::invalid(format!("unparseable url {url:?}")))?;
    let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

    let query = group(4).to_string();
    let mut parts = UrlParts {
        scheme: group(1).to_lowercase(),
        path: group(3).to_string(),
        query_params: url_decode(&query)?,
        query,
        fragment: group(5).to_string(),
        ..UrlParts::default()
    };

    if let Some(authority) = caps.get(2).map(|m| m.as_str()) {
        parse_authority(authority, &mut parts)?;
    }
    Ok(parts)
}

struct Authority<'a> {
    username: Option<&'a str>,
    password: Option<&'a str>,
    host: &'a str,
    port: Option<&'a str>,
}

/// Split `user:pass@host:port` without validating the port.
fn split_authority(authority: &str) -> Result<Authority<'_>> {
    let (userinfo, host_port) = match authority.rsplit_once('@') {
        Some((userinfo, rest)) => (Some(userinfo), rest),
        None => (None, authority),
    };
    let (username, password) = match userinfo {
        Some(info) => match info.split_once(':') {
            Some((user, pass)) => (Some(user), Some(pass)),
            None => (Some(info), None),
        },
        None => (None, None),
    };

    let (host, port) = if let Some(bracketed) = host_port.strip_prefix('[') {
        let (host, rest) = bracketed
            .split_once(']')
            .ok_or_else(|| KitError::invalid(format!("unclosed IPv6 host in {authority:?}")))?;
        (host, rest.strip_prefix(':'))
    } else {
        match host_port.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        }
    };

    Ok(Authority {
        username,
        password,
        host,
        port,
    })
}

fn parse_authority(authority: &str, parts: &mut UrlParts) -> Result<()> {
    let split = split_authority(authority)?;
    parts.username = split.username.map(str::to_string);
    parts.password = split.password.map(str::to_string);
    if !split.host.is_empty() {
        parts.host = Some(split.host.to_lowercase());
    }
    parts.port = match split.port {
        Some(raw) if !raw.is_empty() => Some(
            raw.parse::<u16>()
                .map_err(|err| KitError::invalid(format!("port {raw:?}: {err}")))?,
        ),
        _ => None,
    };
    Ok(())
}

/// Host of `url` without a leading `www.`; `None` when there is no host.
///
/// Only the authority is looked at, so a bad port or an undecodable query
/// does not hide the host.
#[must_use]
pub fn extract_domain(url: &str) -> Option<String> {
    let authority = URI.captures(url)?.get(2)?.as_str();
    let host = split_authority(authority).ok()?.host.to_lowercase();
    if host.is_empty() {
        return None;
    }
    Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}

/// Whether `url` looks like an `http(s)` URL with a domain, `localhost`
/// or IPv4 host.
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    WEB_URL.is_match(url)
}
