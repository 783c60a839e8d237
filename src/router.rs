//! Routing controller: Retrieve -> threshold gate -> Judge -> Generate

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::fallback::Generator;
use crate::judge::Judge;
use crate::judge::Verdict;
use crate::llm::ChatCompletion;
use crate::llm::LlmClient;
use crate::retrieval::Retriever;
use crate::retrieval::SearchClient;
use crate::retrieval::SimilaritySearch;

/// Score thresholds driving the three-way routing split
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    /// Above this, the retrieved document is returned without judging
    pub high: f64,
    /// At or above this (up to `high`), the judge decides
    pub low: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { high: 0.6, low: 0.3 }
    }
}

/// Which branch produced the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePath {
    /// High-confidence retrieval returned directly, judge skipped
    Direct,
    /// Gray-zone retrieval confirmed by the judge
    JudgedDirect,
    /// Gray-zone retrieval rejected by the judge, answer generated
    JudgedFallback,
    /// Low-confidence retrieval discarded, answer generated
    Fallback,
}

/// Answer together with routing diagnostics
#[derive(Debug, Clone)]
pub struct RoutedResponse {
    pub answer: String,
    pub path: RoutePath,
    pub score: f64,
}

/// FAQ answering service
///
/// Per query: retrieve a candidate with its similarity score, then either
/// trust it (high score), ask the judge (gray zone), or regenerate (low
/// score). Exactly one answer comes out; each query is handled statelessly.
pub struct FaqService {
    retriever: Retriever,
    judge: Judge,
    generator: Generator,
    thresholds: Thresholds,
}

impl FaqService {
    /// Create a new service wired to the real search and LLM backends
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(config: &AppConfig) -> Result<Self> {
        let search: Arc<dyn SimilaritySearch> = Arc::new(SearchClient::new(config)?);
        let completion: Arc<dyn ChatCompletion> = Arc::new(LlmClient::new(config)?);
        let thresholds = Thresholds {
            high: config.routing.high_threshold,
            low: config.routing.low_threshold,
        };

        Ok(Self {
            retriever: Retriever::new(search, config.routing.error_score),
            judge: Judge::new(Arc::clone(&completion)),
            generator: Generator::new(completion),
            thresholds,
        })
    }

    /// Create from existing backends (dependency injection for hosts and tests)
    #[must_use]
    pub fn from_services(
        search: Arc<dyn SimilaritySearch>,
        completion: Arc<dyn ChatCompletion>,
        thresholds: Thresholds,
        error_score: f64,
    ) -> Self {
        Self {
            retriever: Retriever::new(search, error_score),
            judge: Judge::new(Arc::clone(&completion)),
            generator: Generator::new(completion),
            thresholds,
        }
    }

    /// Answer a query, reporting which branch produced the answer
    ///
    /// # Errors
    /// - LLM transport or API failures from the judge or the generator
    ///   (retrieval failures are absorbed upstream and route here as a
    ///   low-score result)
    pub async fn respond(&self, query: &str) -> Result<RoutedResponse> {
        info!("Processing FAQ query: {query}");

        let start = Instant::now();
        let retrieved = self.retriever.retrieve(query).await;
        debug!(
            "Vector search took {:?}, score {}",
            start.elapsed(),
            retrieved.score
        );

        // High confidence: trust retrieval without spending a judge call
        if retrieved.score > self.thresholds.high {
            return Ok(RoutedResponse {
                answer: retrieved.doc,
                path: RoutePath::Direct,
                score: retrieved.score,
            });
        }

        // Gray zone (inclusive lower bound): one judge call decides
        if retrieved.score >= self.thresholds.low {
            let verdict = self
                .judge
                .judge(query, &retrieved.doc, retrieved.score)
                .await?;
            if verdict == Verdict::True {
                return Ok(RoutedResponse {
                    answer: retrieved.doc,
                    path: RoutePath::JudgedDirect,
                    score: retrieved.score,
                });
            }
            debug!("Judge rejected candidate, generating answer");
            let answer = self.generator.generate(query).await?;
            return Ok(RoutedResponse {
                answer,
                path: RoutePath::JudgedFallback,
                score: retrieved.score,
            });
        }

        // Low confidence: not worth judging
        debug!("Score below low threshold, generating answer");
        let answer = self.generator.generate(query).await?;
        Ok(RoutedResponse {
            answer,
            path: RoutePath::Fallback,
            score: retrieved.score,
        })
    }

    /// Answer a query
    ///
    /// The sole operation external callers need; see [`Self::respond`] for
    /// the variant with routing diagnostics.
    pub async fn get_response(&self, query: &str) -> Result<String> {
        Ok(self.respond(query).await?.answer)
    }
}
