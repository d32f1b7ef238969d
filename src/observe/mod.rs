//! Article page observation
//!
//! Loads one article page and gathers every piece of evidence classification
//! needs: outgoing request URLs issued during the load, DOM element sources,
//! and resource-timing entry names. All evidence is scoped to exactly one
//! navigation; the request buffer is created immediately before the
//! navigation and drained immediately after processing.

mod dom;

pub use dom::{extract_dom_sources, DomSources};

use crate::browser::PageDriver;
use crate::config::{CrawlerConfig, DelayWindow};
use crate::Result;
use rand::Rng;
use std::time::Duration;
use url::Url;

/// Everything observed during a single article page load
#[derive(Debug, Clone, Default)]
pub struct PageEvidence {
    /// Outgoing request URLs in arrival order
    pub request_urls: Vec<String>,
    /// `<script src>` values from the rendered DOM
    pub script_sources: Vec<String>,
    /// `<iframe src>` values from the rendered DOM
    pub iframe_sources: Vec<String>,
    /// `<video><source src>` values from the rendered DOM
    pub video_sources: Vec<String>,
    /// `<video><source type>` values from the rendered DOM
    pub video_mime_types: Vec<String>,
    /// Resource-timing entry names
    pub resource_entries: Vec<String>,
}

impl PageEvidence {
    /// The union of all observed URLs, used for pattern matching
    pub fn observed_urls(&self) -> Vec<&str> {
        self.request_urls
            .iter()
            .chain(&self.script_sources)
            .chain(&self.iframe_sources)
            .chain(&self.video_sources)
            .map(String::as_str)
            .collect()
    }
}

/// Observes one article page load
///
/// Applies a randomized politeness delay before and after processing,
/// captures outgoing requests for the duration of the navigation, performs
/// the advisory player-script probe, and queries the rendered DOM plus
/// resource timing.
///
/// A navigation failure or timeout propagates; the caller treats it as a
/// recoverable per-article failure.
pub async fn observe_article<P: PageDriver>(
    page: &P,
    article_url: &Url,
    probe_patterns: &[String],
    config: &CrawlerConfig,
) -> Result<PageEvidence> {
    politeness_pause(&config.pre_delay).await;

    // Buffer must be attached before navigation so early requests are seen
    let capture = page.begin_request_capture().await?;

    let navigation = page
        .goto_idle(
            article_url.as_str(),
            Duration::from_secs(config.article_timeout_secs),
        )
        .await;
    if let Err(e) = navigation {
        // Drain (and detach) before propagating so the buffer never leaks
        // into the next navigation
        let _ = capture.drain();
        return Err(e);
    }

    let probe_hit = page
        .wait_for_script_source(
            probe_patterns,
            Duration::from_secs(config.player_probe_timeout_secs),
        )
        .await?;
    if !probe_hit {
        tracing::debug!("No known player script surfaced on {}", article_url);
    }

    let html = page.content().await?;
    let dom = extract_dom_sources(&html, article_url);
    let resource_entries = page.resource_timing_names().await?;
    let request_urls = capture.drain();

    politeness_pause(&config.post_delay).await;

    Ok(PageEvidence {
        request_urls,
        script_sources: dom.script_sources,
        iframe_sources: dom.iframe_sources,
        video_sources: dom.video_sources,
        video_mime_types: dom.video_mime_types,
        resource_entries,
    })
}

/// Sleeps for a duration drawn uniformly from the window
///
/// The jitter keeps request spacing irregular enough to avoid bursty,
/// bot-like patterns against the target server.
async fn politeness_pause(window: &DelayWindow) {
    let ms = rand::rng().random_range(window.min_ms..=window.max_ms);
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
