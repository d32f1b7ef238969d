//! Robots.txt handling module
//!
//! Fetches and evaluates a site's robots exclusion policy. Every failure
//! mode here is non-fatal: an unreachable or unparsable robots.txt yields an
//! unrestricted policy (fail-open) and a warning in the log.

mod policy;

pub use policy::SitePolicy;

use reqwest::Client;
use url::Url;

/// Fetches the robots policy for a site
///
/// Issues a GET for `<origin>/robots.txt`. Any fetch failure, timeout, or
/// non-success status results in an unrestricted policy rather than an
/// error; the caller only ever sees a usable `SitePolicy`.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `base` - The site's base URL
pub async fn fetch_policy(client: &Client, base: &Url) -> SitePolicy {
    let robots_url = match base.join("/robots.txt") {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!("Cannot build robots.txt URL for {}: {}", base, e);
            return SitePolicy::unrestricted();
        }
    };

    match client.get(robots_url.clone()).send().await {
        Ok(response) if response.status().is_success() => match response.text().await {
            Ok(content) => SitePolicy::from_content(&content),
            Err(e) => {
                tracing::warn!("Failed reading robots.txt from {}: {}", robots_url, e);
                SitePolicy::unrestricted()
            }
        },
        Ok(response) => {
            tracing::warn!(
                "No robots.txt at {} (status {})",
                robots_url,
                response.status()
            );
            SitePolicy::unrestricted()
        }
        Err(e) => {
            tracing::warn!("Failed fetching robots.txt from {}: {}", robots_url, e);
            SitePolicy::unrestricted()
        }
    }
}
