//! LLM relevance judge for gray-zone retrievals

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::llm::ChatCompletion;
use crate::llm::CompletionParams;
use crate::prompts;

/// Binary relevance classification of a retrieved candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    True,
    False,
}

/// Normalize raw model output into a verdict
///
/// Trims and uppercases, then checks for containment of the TRUE token
/// rather than strict equality, since the model may wrap the verdict in
/// extra tokens. Output containing neither token is False: better to
/// generate a fresh answer than to surface a stale document.
pub fn parse_verdict(raw: &str) -> Verdict {
    if raw.trim().to_ascii_uppercase().contains("TRUE") {
        Verdict::True
    } else {
        Verdict::False
    }
}

/// Judge that asks the LLM whether a retrieved candidate answers the query
pub struct Judge {
    completion: Arc<dyn ChatCompletion>,
    params: CompletionParams,
}

impl Judge {
    pub fn new(completion: Arc<dyn ChatCompletion>) -> Self {
        Self {
            completion,
            params: CompletionParams::verdict(),
        }
    }

    /// Classify a (query, candidate, score) triple
    ///
    /// # Errors
    /// - LLM transport or API failures (not absorbed; the caller decides)
    pub async fn judge(&self, query: &str, candidate: &str, score: f64) -> Result<Verdict> {
        let messages = prompts::judge_messages(query, candidate, score);
        let raw = self.completion.complete(&messages, &self.params).await?;
        let verdict = parse_verdict(&raw);
        debug!("Judge raw output {raw:?} parsed as {verdict:?}");
        Ok(verdict)
    }
}
