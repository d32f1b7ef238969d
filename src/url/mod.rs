//! URL handling for adlens
//!
//! Base-URL resolution for seed targets (scheme defaulting), host extraction,
//! and the `www.` normalization used by media-group classification.

use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a raw seed target into a base URL
///
/// Seed rows often carry bare hostnames (`repubblica.it`); a missing scheme
/// defaults to `https://`.
///
/// # Arguments
///
/// * `raw` - The raw target string as stored in the target source
///
/// # Returns
///
/// * `Ok(Url)` - The resolved base URL
/// * `Err(UrlError)` - The target is not a usable absolute URL
pub fn resolve_base_url(raw: &str) -> UrlResult<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty target URL".to_string()));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(raw.to_string()));
    }

    Ok(url)
}

/// Extracts the lowercase hostname from a URL
pub fn extract_host(url: &Url) -> UrlResult<String> {
    url.host_str()
        .map(|h| h.to_lowercase())
        .ok_or_else(|| UrlError::MissingHost(url.to_string()))
}

/// Strips a leading `www.` label from a hostname
///
/// Media-group domain fragments are configured without the `www.` prefix, so
/// both sides of the substring comparison are normalized this way.
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
