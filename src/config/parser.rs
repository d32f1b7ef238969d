use crate::config::types::{Config, StoreCredentials};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Recorded at startup so differing results across runs can be traced back
/// to a changed lookup table.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Reads remote store credentials from the environment
///
/// Expects `SUPABASE_URL` and `SUPABASE_KEY`. These never live in the config
/// file; `.env` loading (dotenvy) is the binary's responsibility.
pub fn load_store_credentials() -> Result<StoreCredentials, ConfigError> {
    let url = std::env::var("SUPABASE_URL")
        .map_err(|_| ConfigError::MissingEnv("SUPABASE_URL".to_string()))?;
    let key = std::env::var("SUPABASE_KEY")
        .map_err(|_| ConfigError::MissingEnv("SUPABASE_KEY".to_string()))?;

    if url.trim().is_empty() {
        return Err(ConfigError::MissingEnv("SUPABASE_URL".to_string()));
    }
    if key.trim().is_empty() {
        return Err(ConfigError::MissingEnv("SUPABASE_KEY".to_string()));
    }

    Ok(StoreCredentials { url, key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const VALID_CONFIG: &str = r#"
[crawler]
robots-agent = "*"
homepage-timeout-secs = 60
article-timeout-secs = 60
player-probe-timeout-secs = 8
max-candidates = 6
pre-delay = { min-ms = 2000, max-ms = 4000 }
post-delay = { min-ms = 3000, max-ms = 6000 }

[user-agent]
crawler-name = "adlens"
crawler-version = "1.0"
contact-url = "https://example.com/about"

[server]
port = 3000

[store]
targets-table = "crawl_targets"
results-table = "crawled_data"

[[media-groups]]
name = "GEDI"
domains = ["repubblica.it", "lastampa.it"]

[[media-group-fallback]]
name = "Citynews"
domains = ["today.it"]

[[video-players]]
name = "JWPlayer"
patterns = ["jwplayer.com"]
"#;

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_candidates, 6);
        assert_eq!(config.crawler.pre_delay.min_ms, 2000);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.store.targets_table, "crawl_targets");
        assert_eq!(config.media_groups.len(), 1);
        assert_eq!(config.media_groups[0].name, "GEDI");
        assert_eq!(config.media_group_fallback.len(), 1);
        assert_eq!(config.player_probe_patterns(), vec!["jwplayer.com"]);
    }

    #[test]
    fn test_crawler_defaults_apply() {
        let config_content = r#"
[crawler]

[user-agent]
crawler-name = "adlens"
crawler-version = "1.0"
contact-url = "https://example.com/about"

[store]
targets-table = "crawl_targets"
results-table = "crawled_data"

[[video-players]]
name = "JWPlayer"
patterns = ["jwplayer.com"]
"#;
        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.robots_agent, "*");
        assert_eq!(config.crawler.homepage_timeout_secs, 60);
        assert_eq!(config.crawler.player_probe_timeout_secs, 8);
        assert_eq!(config.crawler.max_candidates, 6);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        // max-candidates of zero never yields any records
        let config_content = VALID_CONFIG.replace("max-candidates = 6", "max-candidates = 0");
        let file = create_temp_config(&config_content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
