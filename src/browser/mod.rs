//! Browser capability seam
//!
//! The crawl pipeline consumes browser automation as a narrow capability:
//! navigate, read the rendered document, observe outgoing requests, and read
//! resource timing. The production implementation drives a headless Chromium
//! over CDP (`cdp` module); tests substitute an in-memory fake.

mod cdp;

pub use cdp::{CdpBrowser, CdpPage};

use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// A browser automation session, held for the duration of one crawl run
#[async_trait]
pub trait BrowserSession: Send {
    type Page: PageDriver;

    /// Opens a page (tab) within this session
    async fn open_page(&self) -> Result<Self::Page>;

    /// Releases the session and all resources it holds
    async fn close(&mut self) -> Result<()>;
}

/// A single browser page the pipeline can drive
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigates, waiting for initial DOM construction
    async fn goto_dom_ready(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Navigates, waiting for the network to settle
    async fn goto_idle(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Returns the rendered document HTML
    async fn content(&self) -> Result<String>;

    /// Starts capturing outgoing request URLs
    ///
    /// Must be called immediately before a navigation; the returned capture
    /// is scoped to that navigation and must be drained right after it.
    async fn begin_request_capture(&self) -> Result<RequestCapture>;

    /// Waits up to `timeout` for a script matching any of `patterns` to
    /// appear in the DOM
    ///
    /// Advisory only: returns `Ok(false)` on timeout instead of an error.
    async fn wait_for_script_source(&self, patterns: &[String], timeout: Duration) -> Result<bool>;

    /// Returns the names of all resource-timing entries recorded so far
    async fn resource_timing_names(&self) -> Result<Vec<String>>;
}

/// Buffer of outgoing request URLs observed during a single navigation
///
/// Created fresh per article, drained exactly once. The listener task (if
/// any) is aborted on drain and on drop, so a capture can never outlive its
/// navigation or leak into the next one.
pub struct RequestCapture {
    urls: Arc<Mutex<Vec<String>>>,
    task: Option<JoinHandle<()>>,
}

impl RequestCapture {
    /// Creates an empty capture with no listener attached
    pub fn new() -> Self {
        Self {
            urls: Arc::new(Mutex::new(Vec::new())),
            task: None,
        }
    }

    /// Returns the shared buffer request URLs are pushed into
    pub fn buffer(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.urls)
    }

    /// Attaches the background task feeding the buffer
    pub fn with_task(mut self, task: JoinHandle<()>) -> Self {
        self.task = Some(task);
        self
    }

    /// Stops capturing and returns everything observed, in arrival order
    pub fn drain(mut self) -> Vec<String> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        match self.urls.lock() {
            Ok(mut urls) => std::mem::take(&mut *urls),
            Err(_) => Vec::new(),
        }
    }
}

impl Default for RequestCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RequestCapture {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
