//! Ad-format detection
//!
//! Scans resource-timing entry names for markers of in-stream (VAST) and
//! out-stream (third-party vendor) video advertising.

use serde::Serialize;

/// Marker for a VAST manifest fetch, signaling an in-stream video ad
const VAST_MARKER: &str = "vast.xml";

/// Vendor markers whose presence signals out-stream video advertising
const OUTSTREAM_MARKERS: [&str; 2] = ["teads.tv", "outbrain.com/lp-video"];

/// Ad-delivery formats observed on a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdFormats {
    pub instream: bool,
    pub outstream: bool,
}

/// Detects ad formats from resource-timing entry names
pub fn detect_ad_formats(resource_entries: &[String]) -> AdFormats {
    AdFormats {
        instream: resource_entries.iter().any(|name| name.contains(VAST_MARKER)),
        outstream: resource_entries
            .iter()
            .any(|name| OUTSTREAM_MARKERS.iter().any(|m| name.contains(m))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_entries_no_formats() {
        let formats = detect_ad_formats(&[]);
        assert_eq!(formats, AdFormats::default());
    }

    #[test]
    fn test_vast_marker_means_instream() {
        let formats = detect_ad_formats(&entries(&[
            "https://ads.example.com/serve/vast.xml?cid=42",
            "https://static.example.com/app.js",
        ]));
        assert!(formats.instream);
        assert!(!formats.outstream);
    }

    #[test]
    fn test_teads_marker_means_outstream() {
        let formats = detect_ad_formats(&entries(&["https://a.teads.tv/page/slot.js"]));
        assert!(!formats.instream);
        assert!(formats.outstream);
    }

    #[test]
    fn test_outbrain_video_marker_means_outstream() {
        let formats =
            detect_ad_formats(&entries(&["https://widgets.outbrain.com/lp-video/player.js"]));
        assert!(formats.outstream);
    }

    #[test]
    fn test_both_formats_together() {
        let formats = detect_ad_formats(&entries(&[
            "https://ads.example.com/vast.xml",
            "https://a.teads.tv/slot.js",
        ]));
        assert!(formats.instream);
        assert!(formats.outstream);
    }

    #[test]
    fn test_unrelated_outbrain_path_is_not_outstream() {
        let formats = detect_ad_formats(&entries(&["https://widgets.outbrain.com/widget.js"]));
        assert!(!formats.outstream);
    }
}
