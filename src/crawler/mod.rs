//! Crawl execution
//!
//! Wires the production collaborators together for one crawl run: the shared
//! HTTP client, the CDP browser session, and the Supabase store behind the
//! coordinator's trait seams.

mod coordinator;

pub use coordinator::{Coordinator, RunSummary, SiteOutcome};

use crate::browser::CdpBrowser;
use crate::config::{Config, StoreCredentials, UserAgentConfig};
use crate::store::SupabaseStore;
use crate::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Builds the crawler's HTTP client
///
/// The client is used for robots.txt fetches and store traffic; page loads go
/// through the browser. The user agent identifies the crawler and points at a
/// contact URL so site operators can reach us.
pub fn build_http_client(ua: &UserAgentConfig) -> Result<Client> {
    let user_agent = format!(
        "{}/{} (+{})",
        ua.crawler_name, ua.crawler_version, ua.contact_url
    );

    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .redirect(reqwest::redirect::Policy::limited(5))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Executes one complete crawl run with production collaborators
pub async fn run_crawl_once(
    config: Arc<Config>,
    credentials: &StoreCredentials,
) -> Result<RunSummary> {
    let http_client = build_http_client(&config.user_agent)?;
    let store = SupabaseStore::new(http_client.clone(), credentials, &config.store)?;
    let browser = CdpBrowser::launch().await?;

    let coordinator = Coordinator::new(config, http_client, browser, store.clone(), store);
    let summary = coordinator.run().await?;
    tracing::info!("Crawl run complete: {}", summary.describe());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client_accepts_valid_config() {
        let ua = UserAgentConfig {
            crawler_name: "adlens".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        };
        assert!(build_http_client(&ua).is_ok());
    }
}
