//! Media-group resolution
//!
//! Maps an article hostname to the publishing conglomerate that owns it,
//! via substring matching against configured domain fragments.

use crate::config::GroupEntry;
use crate::url::strip_www;

/// Label returned when no group fragment matches
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Resolves the media group owning a hostname
///
/// The hostname and every configured fragment are normalized by stripping a
/// leading `www.` before the substring test. The primary table is consulted
/// first, in its configured order, first match wins; the fallback table is
/// consulted only if the primary yields nothing. Iteration order is part of
/// the contract: overlapping fragments resolve to whichever group is listed
/// first, so tables must not be re-sorted.
///
/// # Arguments
///
/// * `hostname` - The article page's hostname
/// * `groups` - The primary group table, in configured order
/// * `fallback` - The reserved fallback table, same shape
pub fn resolve_media_group(hostname: &str, groups: &[GroupEntry], fallback: &[GroupEntry]) -> String {
    let host = strip_www(&hostname.to_lowercase()).to_string();

    for table in [groups, fallback] {
        for entry in table {
            let matched = entry
                .domains
                .iter()
                .any(|fragment| host.contains(strip_www(&fragment.to_lowercase())));
            if matched {
                return entry.name.clone();
            }
        }
    }

    UNKNOWN_GROUP.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, domains: &[&str]) -> GroupEntry {
        GroupEntry {
            name: name.to_string(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_resolves_known_group() {
        let groups = vec![entry("GEDI", &["repubblica.it"])];
        assert_eq!(
            resolve_media_group("www.repubblica.it", &groups, &[]),
            "GEDI"
        );
    }

    #[test]
    fn test_www_stripped_from_both_sides() {
        let groups = vec![entry("GEDI", &["www.repubblica.it"])];
        assert_eq!(resolve_media_group("repubblica.it", &groups, &[]), "GEDI");
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        let groups = vec![entry("GEDI", &["repubblica.it"])];
        assert_eq!(
            resolve_media_group("www.corriere.it", &groups, &[]),
            UNKNOWN_GROUP
        );
    }

    #[test]
    fn test_unknown_with_empty_tables() {
        assert_eq!(resolve_media_group("example.com", &[], &[]), UNKNOWN_GROUP);
    }

    #[test]
    fn test_fallback_consulted_after_primary() {
        let groups = vec![entry("GEDI", &["repubblica.it"])];
        let fallback = vec![entry("Citynews", &["today.it"])];
        assert_eq!(
            resolve_media_group("www.milanotoday.it", &groups, &fallback),
            "Citynews"
        );
    }

    #[test]
    fn test_primary_wins_over_fallback() {
        let groups = vec![entry("GEDI", &["repubblica.it"])];
        let fallback = vec![entry("Shadow", &["repubblica.it"])];
        assert_eq!(
            resolve_media_group("repubblica.it", &groups, &fallback),
            "GEDI"
        );
    }

    #[test]
    fn test_first_match_wins_in_configured_order() {
        // Overlapping fragments: "sport.example.it" contains both. The
        // configured order decides, not specificity or alphabet.
        let groups = vec![
            entry("ZetaMedia", &["example.it"]),
            entry("AlphaSport", &["sport.example.it"]),
        ];
        assert_eq!(
            resolve_media_group("sport.example.it", &groups, &[]),
            "ZetaMedia"
        );

        let reordered = vec![
            entry("AlphaSport", &["sport.example.it"]),
            entry("ZetaMedia", &["example.it"]),
        ];
        assert_eq!(
            resolve_media_group("sport.example.it", &reordered, &[]),
            "AlphaSport"
        );
    }

    #[test]
    fn test_hostname_case_insensitive() {
        let groups = vec![entry("GEDI", &["repubblica.it"])];
        assert_eq!(
            resolve_media_group("WWW.REPUBBLICA.IT", &groups, &[]),
            "GEDI"
        );
    }
}
