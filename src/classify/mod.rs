//! Classification engine
//!
//! Pure decision logic over the evidence one page load produced: media-group
//! resolution from the hostname, video-player detection from observed URLs,
//! and ad-format detection from resource timing. The lookup tables are
//! injected by the caller; nothing here reads global state.

mod ad_formats;
mod media_group;
mod players;

pub use ad_formats::{detect_ad_formats, AdFormats};
pub use media_group::{resolve_media_group, UNKNOWN_GROUP};
pub use players::{detect_players, CUSTOM_PLAYER};

use crate::config::{GroupEntry, PlayerEntry};
use crate::observe::PageEvidence;
use crate::url::extract_host;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use url::Url;

/// The analysis record produced for one article page
///
/// Serialized camelCase to match the result sink's column names; the
/// timestamp renders as ISO-8601.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub url: String,
    pub media_group: String,
    pub video_players: Vec<String>,
    pub ad_formats: AdFormats,
    pub timestamp: DateTime<Utc>,
}

/// Classifies one observed article page
///
/// # Arguments
///
/// * `article_url` - The analyzed page's URL
/// * `evidence` - Everything observed during its load
/// * `groups` - Primary media-group table, in configured order
/// * `fallback` - Fallback media-group table
/// * `players` - Video-player pattern table
pub fn classify_article(
    article_url: &Url,
    evidence: &PageEvidence,
    groups: &[GroupEntry],
    fallback: &[GroupEntry],
    players: &[PlayerEntry],
) -> Result<Detection> {
    let host = extract_host(article_url)?;
    let media_group = resolve_media_group(&host, groups, fallback);

    let observed = evidence.observed_urls();
    let video_players = detect_players(&observed, players, &evidence.video_mime_types);

    let ad_formats = detect_ad_formats(&evidence.resource_entries);

    Ok(Detection {
        url: article_url.to_string(),
        media_group,
        video_players,
        ad_formats,
        timestamp: Utc::now(),
    })
}
