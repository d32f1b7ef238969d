use serde::Deserialize;

/// Main configuration structure for adlens
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub store: StoreConfig,
    #[serde(rename = "media-groups", default)]
    pub media_groups: Vec<GroupEntry>,
    #[serde(rename = "media-group-fallback", default)]
    pub media_group_fallback: Vec<GroupEntry>,
    #[serde(rename = "video-players", default)]
    pub video_players: Vec<PlayerEntry>,
}

impl Config {
    /// Flattens every configured player pattern into one list
    ///
    /// Used by the page observer's player-script probe, which only needs to
    /// know whether any known pattern has appeared in the DOM.
    pub fn player_probe_patterns(&self) -> Vec<String> {
        self.video_players
            .iter()
            .flat_map(|entry| entry.patterns.iter().cloned())
            .collect()
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// User agent token robots.txt policies are queried for
    #[serde(rename = "robots-agent", default = "default_robots_agent")]
    pub robots_agent: String,

    /// Homepage load timeout in seconds (initial DOM construction)
    #[serde(rename = "homepage-timeout-secs", default = "default_page_timeout")]
    pub homepage_timeout_secs: u64,

    /// Article load timeout in seconds (network idle)
    #[serde(rename = "article-timeout-secs", default = "default_page_timeout")]
    pub article_timeout_secs: u64,

    /// Upper bound on the advisory wait for a known player script
    #[serde(rename = "player-probe-timeout-secs", default = "default_probe_timeout")]
    pub player_probe_timeout_secs: u64,

    /// Maximum article candidates analyzed per site
    #[serde(rename = "max-candidates", default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Politeness delay applied before processing an article
    #[serde(rename = "pre-delay", default = "default_pre_delay")]
    pub pre_delay: DelayWindow,

    /// Politeness delay applied after processing an article
    #[serde(rename = "post-delay", default = "default_post_delay")]
    pub post_delay: DelayWindow,
}

/// A uniform random delay window in milliseconds
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DelayWindow {
    #[serde(rename = "min-ms")]
    pub min_ms: u64,
    #[serde(rename = "max-ms")]
    pub max_ms: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Trigger endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Remote store table names
///
/// Credentials are deliberately not part of the file config; they are read
/// from the environment at startup (see `load_store_credentials`).
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Table holding seed targets (`{ url }` rows)
    #[serde(rename = "targets-table")]
    pub targets_table: String,

    /// Table detection results are appended to
    #[serde(rename = "results-table")]
    pub results_table: String,
}

/// Remote store credentials, loaded from the environment
#[derive(Debug, Clone)]
pub struct StoreCredentials {
    pub url: String,
    pub key: String,
}

/// A media group with the domain fragments that identify it
///
/// Entry order matters: classification is first-match-wins over the table in
/// its configured order.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    pub domains: Vec<String>,
}

/// A video player with the URL fragments that identify it
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub patterns: Vec<String>,
}

fn default_robots_agent() -> String {
    "*".to_string()
}

fn default_page_timeout() -> u64 {
    60
}

fn default_probe_timeout() -> u64 {
    8
}

fn default_max_candidates() -> usize {
    6
}

fn default_pre_delay() -> DelayWindow {
    DelayWindow {
        min_ms: 2000,
        max_ms: 4000,
    }
}

fn default_post_delay() -> DelayWindow {
    DelayWindow {
        min_ms: 3000,
        max_ms: 6000,
    }
}

fn default_port() -> u16 {
    3000
}
