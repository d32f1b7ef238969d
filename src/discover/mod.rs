//! Article link discovery
//!
//! Loads a site's homepage and extracts a small, bounded set of same-host
//! article candidates. This is a one-hop sample, not a site walk: broad
//! sites are sampled (at most `max_candidates` articles), never exhausted.

use crate::browser::PageDriver;
use crate::config::CrawlerConfig;
use crate::url::extract_host;
use crate::Result;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Discovers article candidates on a site's homepage
///
/// Navigates to `base` waiting for initial DOM construction, then extracts
/// and filters anchor targets. A navigation failure or timeout propagates
/// and skips the whole site.
///
/// # Arguments
///
/// * `page` - The browser page to drive
/// * `base` - The site's base URL (robots-allowed)
/// * `config` - Crawler settings (homepage timeout, candidate cap)
pub async fn discover_candidates<P: PageDriver>(
    page: &P,
    base: &Url,
    config: &CrawlerConfig,
) -> Result<Vec<String>> {
    page.goto_dom_ready(
        base.as_str(),
        Duration::from_secs(config.homepage_timeout_secs),
    )
    .await?;

    let html = page.content().await?;
    let anchors = extract_anchor_urls(&html, base);
    let candidates = filter_candidates(&anchors, base, config.max_candidates);

    tracing::debug!(
        "Discovered {} candidates on {} ({} anchors total)",
        candidates.len(),
        base,
        anchors.len()
    );

    Ok(candidates)
}

/// Extracts all anchor targets from HTML as absolute URLs
///
/// Relative hrefs are resolved against `base`; unresolvable or non-HTTP(S)
/// targets are dropped.
pub fn extract_anchor_urls(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(url) = resolve_anchor(href, base) {
                    links.push(url);
                }
            }
        }
    }

    links
}

/// Resolves an anchor href to an absolute HTTP(S) URL
fn resolve_anchor(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with("mailto:") || href.starts_with("tel:") {
        return None;
    }

    match base.join(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url),
        _ => None,
    }
}

/// Filters anchors down to article candidates
///
/// Keeps links whose host equals the homepage host (no cross-domain follow)
/// and whose path contains `"article"` or `"news"` or ends with `.html`.
/// Deduplicates preserving first-seen order and truncates to `cap`.
pub fn filter_candidates(anchors: &[Url], base: &Url, cap: usize) -> Vec<String> {
    if cap == 0 {
        return Vec::new();
    }

    let base_host = match extract_host(base) {
        Ok(h) => h,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for url in anchors {
        let host = match extract_host(url) {
            Ok(h) => h,
            Err(_) => continue,
        };
        if host != base_host {
            continue;
        }

        if !looks_like_article(url.path()) {
            continue;
        }

        let as_string = url.to_string();
        if seen.insert(as_string.clone()) {
            candidates.push(as_string);
            if candidates.len() == cap {
                break;
            }
        }
    }

    candidates
}

/// Article heuristic over a URL path
fn looks_like_article(path: &str) -> bool {
    path.contains("article") || path.contains("news") || path.ends_with(".html")
}
