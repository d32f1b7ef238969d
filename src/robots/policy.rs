//! Robots.txt policy wrapper
//!
//! Thin wrapper around the robotstxt crate. An unrestricted policy stands in
//! whenever robots.txt could not be fetched or parsed (fail-open).

use robotstxt::DefaultMatcher;

/// A site's robots exclusion policy
#[derive(Debug, Clone)]
pub struct SitePolicy {
    /// Raw robots.txt content (empty means allow all)
    content: String,
    /// True when no rules are enforced (fetch failed or absent robots.txt)
    unrestricted: bool,
}

impl SitePolicy {
    /// Creates a policy from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            unrestricted: false,
        }
    }

    /// Creates a permissive policy that allows everything
    ///
    /// Used as the fail-open default when robots.txt cannot be fetched.
    pub fn unrestricted() -> Self {
        Self {
            content: String::new(),
            unrestricted: true,
        }
    }

    /// Returns true when no robots rules are enforced for this site
    pub fn is_unrestricted(&self) -> bool {
        self.unrestricted
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to check
    /// * `user_agent` - The user agent token (the crawler queries `"*"`)
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.unrestricted || self.content.is_empty() {
            return true;
        }

        // Parse and check on-demand; one check per site keeps this cheap
        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }
}
