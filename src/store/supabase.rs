//! Supabase PostgREST client
//!
//! Thin REST wrapper: targets are read with a `select=url` query, detections
//! are inserted as single-element JSON arrays. Both table names come from
//! configuration, credentials from the environment.

use super::{CrawlTarget, ResultSink, StoreError, StoreResult, TargetSource};
use crate::classify::Detection;
use crate::config::{StoreConfig, StoreCredentials};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// PostgREST-backed target source and result sink
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    rest_base: Url,
    api_key: String,
    targets_table: String,
    results_table: String,
}

impl SupabaseStore {
    /// Creates a store against a Supabase project
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `credentials` - Project URL and service key
    /// * `config` - Table names for targets and results
    pub fn new(
        client: Client,
        credentials: &StoreCredentials,
        config: &StoreConfig,
    ) -> StoreResult<Self> {
        let base = Url::parse(&credentials.url)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", credentials.url, e)))?;
        let rest_base = base
            .join("rest/v1/")
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", credentials.url, e)))?;

        Ok(Self {
            client,
            rest_base,
            api_key: credentials.key.clone(),
            targets_table: config.targets_table.clone(),
            results_table: config.results_table.clone(),
        })
    }

    fn table_url(&self, table: &str) -> StoreResult<Url> {
        self.rest_base
            .join(table)
            .map_err(|e| StoreError::InvalidUrl(format!("{}: {}", table, e)))
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check_status(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TargetSource for SupabaseStore {
    async fn fetch_targets(&self) -> StoreResult<Vec<CrawlTarget>> {
        let mut url = self.table_url(&self.targets_table)?;
        url.set_query(Some("select=url"));

        let response = self.authed(self.client.get(url)).send().await?;
        let response = Self::check_status(response).await?;
        let targets = response.json::<Vec<CrawlTarget>>().await?;
        Ok(targets)
    }
}

#[async_trait]
impl ResultSink for SupabaseStore {
    async fn insert_detection(&self, detection: &Detection) -> StoreResult<()> {
        let url = self.table_url(&self.results_table)?;

        // PostgREST inserts take an array of rows
        let response = self
            .authed(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(&[detection])
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::AdFormats;
    use chrono::Utc;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> SupabaseStore {
        let credentials = StoreCredentials {
            url: server.uri(),
            key: "test-key".to_string(),
        };
        let config = StoreConfig {
            targets_table: "crawl_targets".to_string(),
            results_table: "crawled_data".to_string(),
        };
        SupabaseStore::new(Client::new(), &credentials, &config).unwrap()
    }

    fn sample_detection() -> Detection {
        Detection {
            url: "https://www.example.com/news/a.html".to_string(),
            media_group: "GEDI".to_string(),
            video_players: vec!["JWPlayer".to_string()],
            ad_formats: AdFormats {
                instream: true,
                outstream: false,
            },
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_fetch_targets_queries_url_column() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/crawl_targets"))
            .and(query_param("select", "url"))
            .and(header("apikey", "test-key"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "url": "https://www.repubblica.it" },
                { "url": "https://www.corriere.it" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let targets = store_for(&server).fetch_targets().await.unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].url, "https://www.repubblica.it");
    }

    #[tokio::test]
    async fn test_fetch_targets_surfaces_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/crawl_targets"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = store_for(&server).fetch_targets().await.unwrap_err();
        match err {
            StoreError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_insert_detection_posts_camel_case_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/crawled_data"))
            .and(header("apikey", "test-key"))
            .and(header("Prefer", "return=minimal"))
            .and(body_partial_json(serde_json::json!([{
                "url": "https://www.example.com/news/a.html",
                "mediaGroup": "GEDI",
                "videoPlayers": ["JWPlayer"],
                "adFormats": { "instream": true, "outstream": false }
            }])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server)
            .insert_detection(&sample_detection())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_insert_detection_surfaces_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/crawled_data"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .insert_detection(&sample_detection())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 500, .. }));
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let credentials = StoreCredentials {
            url: "not a url".to_string(),
            key: "k".to_string(),
        };
        let config = StoreConfig {
            targets_table: "t".to_string(),
            results_table: "r".to_string(),
        };
        let err = SupabaseStore::new(Client::new(), &credentials, &config).unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl(_)));
    }
}
