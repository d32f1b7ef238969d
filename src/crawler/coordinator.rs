//! Crawl run coordination
//!
//! Drives one full pass over every configured target site. Each site is
//! processed independently: a failure is recorded in the run summary and the
//! run moves on. Only target-list retrieval is fatal to a run. The browser
//! session is closed on every exit path.

use crate::browser::BrowserSession;
use crate::classify::classify_article;
use crate::config::Config;
use crate::discover::discover_candidates;
use crate::observe::observe_article;
use crate::robots;
use crate::store::{ResultSink, TargetSource};
use crate::url::resolve_base_url;
use crate::{AdlensError, Result};
use reqwest::Client;
use std::sync::Arc;
use url::Url;

/// What happened to one target site during a run
#[derive(Debug)]
pub enum SiteOutcome {
    /// The site was crawled; `recorded` of `candidates` articles produced rows
    Analyzed { candidates: usize, recorded: usize },
    /// robots.txt disallowed the homepage for our agent
    RobotsDenied,
    /// The site failed before any article could be analyzed
    Failed { error: AdlensError },
}

/// Aggregate results of one crawl run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub sites_total: usize,
    pub sites_denied: usize,
    pub sites_failed: usize,
    pub articles_recorded: usize,
}

impl RunSummary {
    fn absorb(&mut self, outcome: SiteOutcome) {
        self.sites_total += 1;
        match outcome {
            SiteOutcome::Analyzed { recorded, .. } => self.articles_recorded += recorded,
            SiteOutcome::RobotsDenied => self.sites_denied += 1,
            SiteOutcome::Failed { .. } => self.sites_failed += 1,
        }
    }

    /// One-line human summary for the end-of-run log
    pub fn describe(&self) -> String {
        format!(
            "{} sites visited, {} denied by robots, {} failed, {} articles recorded",
            self.sites_total, self.sites_denied, self.sites_failed, self.articles_recorded
        )
    }
}

/// Orchestrates one crawl run over injected collaborators
pub struct Coordinator<B, S, K>
where
    B: BrowserSession,
    S: TargetSource,
    K: ResultSink,
{
    config: Arc<Config>,
    http_client: Client,
    browser: B,
    targets: S,
    sink: K,
}

impl<B, S, K> Coordinator<B, S, K>
where
    B: BrowserSession,
    S: TargetSource,
    K: ResultSink,
{
    pub fn new(config: Arc<Config>, http_client: Client, browser: B, targets: S, sink: K) -> Self {
        Self {
            config,
            http_client,
            browser,
            targets,
            sink,
        }
    }

    /// Runs one full crawl pass
    ///
    /// The browser session is closed whether the pass succeeds or fails.
    pub async fn run(mut self) -> Result<RunSummary> {
        let result = self.run_inner().await;
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser session: {}", e);
        }
        result
    }

    async fn run_inner(&self) -> Result<RunSummary> {
        let targets = self.targets.fetch_targets().await?;
        if targets.is_empty() {
            tracing::info!("No targets found");
            return Ok(RunSummary::default());
        }
        tracing::info!("Starting crawl run over {} targets", targets.len());

        let page = self.browser.open_page().await?;

        let mut summary = RunSummary::default();
        for target in &targets {
            let outcome = self.process_site(&page, &target.url).await;
            match &outcome {
                SiteOutcome::Analyzed {
                    candidates,
                    recorded,
                } => tracing::info!(
                    "{}: recorded {} of {} candidate articles",
                    target.url,
                    recorded,
                    candidates
                ),
                SiteOutcome::RobotsDenied => {
                    tracing::info!("{}: disallowed by robots.txt, skipping", target.url)
                }
                SiteOutcome::Failed { error } => {
                    tracing::warn!("{}: site failed: {}", target.url, error)
                }
            }
            summary.absorb(outcome);
        }

        Ok(summary)
    }

    /// Processes one target site, never propagating its errors
    async fn process_site(&self, page: &B::Page, raw_url: &str) -> SiteOutcome {
        let base = match resolve_base_url(raw_url) {
            Ok(base) => base,
            Err(e) => return SiteOutcome::Failed { error: e.into() },
        };

        let policy = robots::fetch_policy(&self.http_client, &base).await;
        if !policy.is_allowed(base.as_str(), &self.config.crawler.robots_agent) {
            return SiteOutcome::RobotsDenied;
        }

        let candidates = match discover_candidates(page, &base, &self.config.crawler).await {
            Ok(candidates) => candidates,
            Err(e) => return SiteOutcome::Failed { error: e },
        };

        let probe_patterns = self.config.player_probe_patterns();
        let mut recorded = 0;
        for candidate in &candidates {
            match self.process_article(page, candidate, &probe_patterns).await {
                Ok(()) => recorded += 1,
                Err(e) => tracing::warn!("{}: article failed: {}", candidate, e),
            }
        }

        SiteOutcome::Analyzed {
            candidates: candidates.len(),
            recorded,
        }
    }

    /// Observes, classifies, and records one article
    async fn process_article(
        &self,
        page: &B::Page,
        candidate: &str,
        probe_patterns: &[String],
    ) -> Result<()> {
        let article_url = Url::parse(candidate)?;

        let evidence =
            observe_article(page, &article_url, probe_patterns, &self.config.crawler).await?;

        let detection = classify_article(
            &article_url,
            &evidence,
            &self.config.media_groups,
            &self.config.media_group_fallback,
            &self.config.video_players,
        )?;

        self.sink.insert_detection(&detection).await?;
        tracing::info!("Saved: {}", candidate);
        Ok(())
    }
}
