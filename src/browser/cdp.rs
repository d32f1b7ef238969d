//! Chromium-backed implementation of the browser capability
//!
//! Drives a headless Chromium over the Chrome DevTools Protocol using
//! chromiumoxide. Request capture subscribes to `Network.requestWillBeSent`
//! events for the duration of one navigation.

use crate::browser::{BrowserSession, PageDriver, RequestCapture};
use crate::{AdlensError, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::EventRequestWillBeSent;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// How often the player-script probe re-evaluates the DOM
const PROBE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Settle time after the load event before a navigation counts as idle
const NETWORK_SETTLE: Duration = Duration::from_millis(500);

/// A headless Chromium session
pub struct CdpBrowser {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl CdpBrowser {
    /// Launches a headless Chromium and starts its CDP event loop
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(AdlensError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| AdlensError::Browser(format!("failed to launch browser: {}", e)))?;

        // The handler stream must be polled for the whole session lifetime
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(Self {
            browser,
            handler_task,
        })
    }
}

#[async_trait]
impl BrowserSession for CdpBrowser {
    type Page = CdpPage;

    async fn open_page(&self) -> Result<CdpPage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| AdlensError::Browser(format!("failed to open page: {}", e)))?;
        Ok(CdpPage { inner: page })
    }

    async fn close(&mut self) -> Result<()> {
        let result = self
            .browser
            .close()
            .await
            .map_err(|e| AdlensError::Browser(format!("failed to close browser: {}", e)));
        self.handler_task.abort();
        result.map(|_| ())
    }
}

/// A single Chromium page driven over CDP
pub struct CdpPage {
    inner: chromiumoxide::Page,
}

impl CdpPage {
    /// Evaluates a JS expression and deserializes its value
    async fn eval<T: serde::de::DeserializeOwned>(&self, expression: &str) -> Result<T> {
        let result = self
            .inner
            .evaluate(expression.to_string())
            .await
            .map_err(|e| AdlensError::Browser(format!("evaluation failed: {}", e)))?;
        result
            .into_value::<T>()
            .map_err(|e| AdlensError::Browser(format!("evaluation result mismatch: {}", e)))
    }
}

#[async_trait]
impl PageDriver for CdpPage {
    async fn goto_dom_ready(&self, url: &str, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.inner.goto(url.to_string())).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(AdlensError::Browser(format!(
                "navigation to {} failed: {}",
                url, e
            ))),
            Err(_) => Err(AdlensError::Timeout {
                url: url.to_string(),
            }),
        }
    }

    async fn goto_idle(&self, url: &str, timeout: Duration) -> Result<()> {
        let navigation = async {
            self.inner.goto(url.to_string()).await?;
            self.inner.wait_for_navigation().await?;
            Ok::<(), chromiumoxide::error::CdpError>(())
        };

        match tokio::time::timeout(timeout, navigation).await {
            Ok(Ok(())) => {
                tokio::time::sleep(NETWORK_SETTLE).await;
                Ok(())
            }
            Ok(Err(e)) => Err(AdlensError::Browser(format!(
                "navigation to {} failed: {}",
                url, e
            ))),
            Err(_) => Err(AdlensError::Timeout {
                url: url.to_string(),
            }),
        }
    }

    async fn content(&self) -> Result<String> {
        self.inner
            .content()
            .await
            .map_err(|e| AdlensError::Browser(format!("failed to read page content: {}", e)))
    }

    async fn begin_request_capture(&self) -> Result<RequestCapture> {
        let mut events = self
            .inner
            .event_listener::<EventRequestWillBeSent>()
            .await
            .map_err(|e| AdlensError::Browser(format!("failed to observe requests: {}", e)))?;

        let capture = RequestCapture::new();
        let buffer = capture.buffer();
        let task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Ok(mut urls) = buffer.lock() {
                    urls.push(event.request.url.clone());
                }
            }
        });

        Ok(capture.with_task(task))
    }

    async fn wait_for_script_source(&self, patterns: &[String], timeout: Duration) -> Result<bool> {
        if patterns.is_empty() {
            return Ok(false);
        }

        let patterns_json = serde_json::to_string(patterns)
            .map_err(|e| AdlensError::Browser(format!("invalid probe patterns: {}", e)))?;
        let expression = format!(
            "(() => {{ const patterns = {}; \
             return Array.from(document.querySelectorAll('script[src]'))\
             .some(s => patterns.some(p => s.src.includes(p))); }})()",
            patterns_json
        );

        let deadline = Instant::now() + timeout;
        loop {
            // An evaluation hiccup counts as "not seen"; the probe is advisory
            if self.eval::<bool>(&expression).await.unwrap_or(false) {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(PROBE_POLL_INTERVAL).await;
        }
    }

    async fn resource_timing_names(&self) -> Result<Vec<String>> {
        self.eval::<Vec<String>>(
            "Array.from(performance.getEntriesByType('resource')).map(r => r.name)",
        )
        .await
    }
}
