use crate::config::types::{
    Config, CrawlerConfig, DelayWindow, GroupEntry, PlayerEntry, UserAgentConfig,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_store_config(config)?;
    validate_group_entries(&config.media_groups, "media-groups")?;
    validate_group_entries(&config.media_group_fallback, "media-group-fallback")?;
    validate_player_entries(&config.video_players)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.robots_agent.is_empty() {
        return Err(ConfigError::Validation(
            "robots_agent cannot be empty".to_string(),
        ));
    }

    if config.homepage_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "homepage_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.article_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "article_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.max_candidates < 1 {
        return Err(ConfigError::Validation(format!(
            "max_candidates must be >= 1, got {}",
            config.max_candidates
        )));
    }

    validate_delay_window(&config.pre_delay, "pre-delay")?;
    validate_delay_window(&config.post_delay, "post-delay")?;

    Ok(())
}

/// Validates a politeness delay window
fn validate_delay_window(window: &DelayWindow, name: &str) -> Result<(), ConfigError> {
    if window.min_ms > window.max_ms {
        return Err(ConfigError::Validation(format!(
            "{}: min-ms ({}) must be <= max-ms ({})",
            name, window.min_ms, window.max_ms
        )));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates store table names
fn validate_store_config(config: &Config) -> Result<(), ConfigError> {
    if config.store.targets_table.is_empty() {
        return Err(ConfigError::Validation(
            "targets_table cannot be empty".to_string(),
        ));
    }

    if config.store.results_table.is_empty() {
        return Err(ConfigError::Validation(
            "results_table cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates media group entries
///
/// Group names must be unique within a table; a duplicate would make the
/// first-match-wins iteration ambiguous to reason about.
fn validate_group_entries(entries: &[GroupEntry], table: &str) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in entries {
        if entry.name.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{}: group name cannot be empty",
                table
            )));
        }

        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "{}: duplicate group name '{}'",
                table, entry.name
            )));
        }

        if entry.domains.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{}: group '{}' must have at least one domain fragment",
                table, entry.name
            )));
        }

        for domain in &entry.domains {
            if domain.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{}: group '{}' has an empty domain fragment",
                    table, entry.name
                )));
            }
        }
    }

    Ok(())
}

/// Validates video player entries
fn validate_player_entries(entries: &[PlayerEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for entry in entries {
        if entry.name.is_empty() {
            return Err(ConfigError::Validation(
                "video-players: player name cannot be empty".to_string(),
            ));
        }

        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "video-players: duplicate player name '{}'",
                entry.name
            )));
        }

        if entry.patterns.is_empty() {
            return Err(ConfigError::Validation(format!(
                "video-players: player '{}' must have at least one pattern",
                entry.name
            )));
        }

        for pattern in &entry.patterns {
            if pattern.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "video-players: player '{}' has an empty pattern",
                    entry.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_window_valid() {
        let window = DelayWindow {
            min_ms: 100,
            max_ms: 200,
        };
        assert!(validate_delay_window(&window, "pre-delay").is_ok());
    }

    #[test]
    fn test_delay_window_degenerate_is_ok() {
        let window = DelayWindow {
            min_ms: 0,
            max_ms: 0,
        };
        assert!(validate_delay_window(&window, "pre-delay").is_ok());
    }

    #[test]
    fn test_delay_window_inverted() {
        let window = DelayWindow {
            min_ms: 500,
            max_ms: 100,
        };
        assert!(validate_delay_window(&window, "pre-delay").is_err());
    }

    #[test]
    fn test_duplicate_group_names_rejected() {
        let entries = vec![
            GroupEntry {
                name: "GEDI".to_string(),
                domains: vec!["repubblica.it".to_string()],
            },
            GroupEntry {
                name: "GEDI".to_string(),
                domains: vec!["lastampa.it".to_string()],
            },
        ];
        assert!(validate_group_entries(&entries, "media-groups").is_err());
    }

    #[test]
    fn test_group_without_domains_rejected() {
        let entries = vec![GroupEntry {
            name: "GEDI".to_string(),
            domains: vec![],
        }];
        assert!(validate_group_entries(&entries, "media-groups").is_err());
    }

    #[test]
    fn test_player_without_patterns_rejected() {
        let entries = vec![PlayerEntry {
            name: "JWPlayer".to_string(),
            patterns: vec![],
        }];
        assert!(validate_player_entries(&entries).is_err());
    }

    #[test]
    fn test_valid_entries_accepted() {
        let groups = vec![GroupEntry {
            name: "GEDI".to_string(),
            domains: vec!["repubblica.it".to_string()],
        }];
        let players = vec![PlayerEntry {
            name: "JWPlayer".to_string(),
            patterns: vec!["jwplayer.com".to_string()],
        }];
        assert!(validate_group_entries(&groups, "media-groups").is_ok());
        assert!(validate_player_entries(&players).is_ok());
    }
}
