//! URL validation and scheme normalization.
//!
//! Accepts bare hosts (`example.com/path`) by assuming `https://`, and rejects
//! anything that is not an http(s) URL with a plausible host.

use super::{Field, Reason, ValidationError};
use regex::Regex;
use std::sync::LazyLock;
use url::{Host, Url};

/// Maximum accepted length of the raw URL, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Dotted domain name ending in an alphabetic (or punycode) TLD.
static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z0-9_]([a-z0-9_-]*[a-z0-9_])?\.)+([a-z]{2,}|xn--[a-z0-9-]+)\.?$").unwrap()
});

fn url_error(reason: Reason) -> ValidationError {
    ValidationError::new(Field::Url, reason)
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.get(..8).unwrap_or(input).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn is_acceptable_host(host: &Host<&str>) -> bool {
    match *host {
        Host::Domain(domain) => domain == "localhost" || DOMAIN_REGEX.is_match(domain),
        Host::Ipv4(_) | Host::Ipv6(_) => true,
    }
}

/// Validates a raw URL and returns its normalized form.
///
/// # Rules
///
/// 1. Surrounding whitespace is ignored
/// 2. Must not be empty or longer than [`MAX_URL_LENGTH`] characters
/// 3. A missing scheme is replaced with `https://`; any scheme other than
///    `http`/`https` is rejected
/// 4. Must parse as a URL without credentials and with a host that is an IP
///    literal, `localhost`, or a dotted domain name
///
/// The returned value is the serialized parsed URL: lowercase scheme and
/// host, punycode for international domains, percent-encoded path and query.
///
/// # Errors
///
/// Returns a [`ValidationError`] on [`Field::Url`] with reason `Empty`,
/// `TooLong`, or `InvalidFormat`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_url("example.com/foo").unwrap(), "https://example.com/foo");
/// assert_eq!(validate_url("http://example.com").unwrap(), "http://example.com/");
/// assert!(validate_url("ftp://example.com").is_err());
/// ```
pub fn validate_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(url_error(Reason::Empty));
    }

    if trimmed.chars().count() > MAX_URL_LENGTH {
        return Err(url_error(Reason::TooLong));
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return Err(url_error(Reason::InvalidFormat));
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&candidate).map_err(|_| url_error(Reason::InvalidFormat))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(url_error(Reason::InvalidFormat));
    }

    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(url_error(Reason::InvalidFormat));
    }

    match parsed.host() {
        Some(ref host) if is_acceptable_host(host) => Ok(parsed.to_string()),
        _ => Err(url_error(Reason::InvalidFormat)),
    }
}
