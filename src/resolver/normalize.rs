/// Input normalisation and property matching rules
use crate::properties::SiteEntry;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Prefix Search Console uses for domain-scoped properties
pub const DOMAIN_PROPERTY_PREFIX: &str = "sc-domain:";

/// Trim and lowercase a raw `url` parameter.
///
/// Trailing slashes are kept: URL-prefix properties always end in `/`.
/// Returns `None` when nothing is left after trimming.
pub fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Characters URI components may carry unescaped, as in `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use as a single URI component
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Host portion of a normalised URL with scheme and `www.` removed.
///
/// `https://www.example.com/page` becomes `example.com`.
pub fn bare_domain(normalized: &str) -> &str {
    let without_scheme = normalized
        .strip_prefix("https://")
        .or_else(|| normalized.strip_prefix("http://"))
        .unwrap_or(normalized);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);

    without_www.split('/').next().unwrap_or(without_www)
}

/// `sc-domain:` identifier covering the input's domain
pub fn domain_property(normalized: &str) -> String {
    format!("{}{}", DOMAIN_PROPERTY_PREFIX, bare_domain(normalized))
}

/// First entry whose `siteUrl` equals the input, ignoring case
pub fn find_exact<'a>(entries: &'a [SiteEntry], normalized: &str) -> Option<&'a SiteEntry> {
    entries
        .iter()
        .find(|entry| entry.site_url.to_lowercase() == normalized)
}

/// First entry that is exactly the input's domain property
pub fn find_domain_property<'a>(
    entries: &'a [SiteEntry],
    normalized: &str,
) -> Option<&'a SiteEntry> {
    let candidate = domain_property(normalized);
    entries.iter().find(|entry| entry.site_url == candidate)
}
