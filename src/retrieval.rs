//! Similarity retrieval against the external FAQ search service

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::FaqRouterError;
use crate::errors::Result;

/// Candidate answer returned by the similarity search
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalResult {
    /// Pre-authored FAQ document text (empty when retrieval failed)
    pub doc: String,
    /// Relevance score from the search service, typically cosine-like
    pub score: f64,
}

/// Raw similarity search backend
///
/// The call is a single attempt over the network and may fail; recovery is
/// the [`Retriever`]'s job, not the backend's.
#[async_trait]
pub trait SimilaritySearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<RetrievalResult>;
}

/// HTTP client for the similarity search service
pub struct SearchClient {
    endpoint: String,
    client: Client,
}

impl SearchClient {
    /// Create a new search client from configuration
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.search.timeout_secs))
            .build()
            .map_err(|e| FaqRouterError::Http(e.to_string()))?;

        Ok(Self {
            endpoint: config.search.endpoint.clone(),
            client,
        })
    }
}

#[async_trait]
impl SimilaritySearch for SearchClient {
    async fn search(&self, query: &str) -> Result<RetrievalResult> {
        #[derive(Serialize)]
        struct SearchRequest<'a> {
            query: &'a str,
        }

        #[derive(Deserialize)]
        struct SearchResponse {
            response: SearchHit,
        }

        #[derive(Deserialize)]
        struct SearchHit {
            doc: String,
            score: f64,
        }

        debug!("Calling similarity search API: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SearchRequest { query })
            .send()
            .await
            .map_err(|e| FaqRouterError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FaqRouterError::Search(format!(
                "Search API error ({status}): {error_text}"
            )));
        }

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| FaqRouterError::Search(format!("Failed to parse response: {e}")))?;

        Ok(RetrievalResult {
            doc: result.response.doc,
            score: result.response.score,
        })
    }
}

/// Retriever that absorbs search failures
///
/// Wraps the raw backend and substitutes a sentinel low-score result when
/// the search errors, so a failed retrieval routes to the generative
/// fallback instead of surfacing to the caller.
pub struct Retriever {
    search: Arc<dyn SimilaritySearch>,
    error_score: f64,
}

impl Retriever {
    pub fn new(search: Arc<dyn SimilaritySearch>, error_score: f64) -> Self {
        Self {
            search,
            error_score,
        }
    }

    /// Retrieve the best candidate for a query; never fails
    pub async fn retrieve(&self, query: &str) -> RetrievalResult {
        match self.search.search(query).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Similarity search failed, falling back to generation: {e}");
                RetrievalResult {
                    doc: String::new(),
                    score: self.error_score,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSearch;

    #[async_trait]
    impl SimilaritySearch for FailingSearch {
        async fn search(&self, _query: &str) -> Result<RetrievalResult> {
            Err(FaqRouterError::Http("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_retriever_absorbs_search_errors() {
        let retriever = Retriever::new(Arc::new(FailingSearch), -1.0);
        let result = retriever.retrieve("how do i logout?").await;
        assert_eq!(result.doc, "");
        assert!((result.score - -1.0).abs() < f64::EPSILON);
    }
}
