//! # Search Client Module
//!
//! HTTP client for the LeakOSINT search API and the [`SearchService`] seam the
//! session controller talks to.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::search_types::{SearchRequest, SearchResponse, SearchResult};

/// A service answering search queries
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError>;
}

/// JSON body of a search request
#[derive(Debug, Serialize)]
pub struct SearchPayload<'a> {
    pub token: &'a str,
    pub request: &'a str,
    pub limit: u32,
    pub lang: &'a str,
}

/// LeakOSINT API client
pub struct LeakOsintClient {
    http: reqwest::Client,
    config: SearchConfig,
}

impl LeakOsintClient {
    /// Build a client whose requests are bounded by `config.timeout`
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    /// Request body for `request`, carrying the configured credential
    pub fn payload<'a>(&'a self, request: &'a SearchRequest) -> SearchPayload<'a> {
        SearchPayload {
            token: &self.config.api_token,
            request: &request.query,
            limit: request.limit,
            lang: request.language.code(),
        }
    }
}

#[async_trait]
impl SearchService for LeakOsintClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        debug!(
            query_length = request.query.len(),
            lang = %request.language,
            limit = request.limit,
            "Sending search request"
        );

        let response = self
            .http
            .post(&self.config.api_url)
            .json(&self.payload(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Search service returned an error status");
            return Err(SearchError::Http(status.as_u16()));
        }

        let body: Value = response.json().await?;
        let result = SearchResponse::from_json(body)?.into_result()?;

        info!(databases = result.entries.len(), "Search completed");
        Ok(result)
    }
}
