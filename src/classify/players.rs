//! Video-player detection
//!
//! Matches configured player URL fragments against everything observed
//! during a page load, with a generic-HTML5 fallback driven by `<source>`
//! MIME types.

use crate::config::PlayerEntry;

/// Synthetic label emitted when only generic HTML5 video evidence exists
pub const CUSTOM_PLAYER: &str = "Custom";

/// Detects which configured players a page loads
///
/// A player is detected when any of its patterns is a substring of any
/// observed URL; the result is the union of all matching players, in table
/// order, without duplicates. If pattern matching finds nothing but some
/// `<source>` element carries a `video/*` MIME type, the single synthetic
/// label `"Custom"` is emitted instead — pattern matches always take
/// precedence over the fallback.
///
/// # Arguments
///
/// * `observed_urls` - Union of captured request URLs and DOM element sources
/// * `players` - The configured player pattern table
/// * `video_mime_types` - `<video><source type>` values from the page
pub fn detect_players(
    observed_urls: &[&str],
    players: &[PlayerEntry],
    video_mime_types: &[String],
) -> Vec<String> {
    let mut detected = Vec::new();

    for entry in players {
        let matched = entry
            .patterns
            .iter()
            .any(|pattern| observed_urls.iter().any(|url| url.contains(pattern)));
        if matched {
            detected.push(entry.name.clone());
        }
    }

    if detected.is_empty() && has_generic_html5_video(video_mime_types) {
        detected.push(CUSTOM_PLAYER.to_string());
    }

    detected
}

/// True when any `<source>` MIME type marks generic HTML5 video presence
fn has_generic_html5_video(video_mime_types: &[String]) -> bool {
    video_mime_types.iter().any(|t| t.starts_with("video/"))
}
