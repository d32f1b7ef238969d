//! Adlens: a news-site video player and ad-tech profiler
//!
//! This crate crawls a configured list of news sites, samples a handful of
//! article pages per site, and records which publishing group owns each site
//! and which video-player and ad-delivery technologies its pages load.

pub mod browser;
pub mod classify;
pub mod config;
pub mod crawler;
pub mod discover;
pub mod observe;
pub mod robots;
pub mod server;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for adlens operations
#[derive(Debug, Error)]
pub enum AdlensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation timeout for {url}")]
    Timeout { url: String },

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for adlens operations
pub type Result<T> = std::result::Result<T, AdlensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use classify::{AdFormats, Detection};
pub use config::Config;
pub use crate::url::{extract_host, resolve_base_url, strip_www};
