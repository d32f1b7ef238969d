//! Configuration module for adlens
//!
//! Handles loading, parsing, and validating TOML configuration files, plus
//! store credentials from the environment. The media-group and video-player
//! lookup tables live here too: they are loaded once at startup and injected
//! into the classification engine as plain parameters.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DelayWindow, GroupEntry, PlayerEntry, ServerConfig, StoreConfig,
    StoreCredentials, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, load_store_credentials};
