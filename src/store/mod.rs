//! Result storage
//!
//! Targets come from one table, detections go to another. The coordinator
//! depends only on the [`TargetSource`] and [`ResultSink`] traits; the
//! production implementation speaks PostgREST to a Supabase project.

mod supabase;

pub use supabase::SupabaseStore;

use crate::classify::Detection;
use async_trait::async_trait;
use serde::Deserialize;

/// Errors raised by the storage layer
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// One row of the crawl-target table
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlTarget {
    pub url: String,
}

/// Supplies the list of site URLs a crawl run should visit
#[async_trait]
pub trait TargetSource: Send + Sync {
    async fn fetch_targets(&self) -> StoreResult<Vec<CrawlTarget>>;
}

/// Accepts one detection record per analyzed article
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn insert_detection(&self, detection: &Detection) -> StoreResult<()>;
}
