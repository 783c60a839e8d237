//! Generative fallback constrained to the app knowledge context

use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::llm::ChatCompletion;
use crate::llm::CompletionParams;
use crate::prompts;

/// Generator producing a fresh answer when retrieval is not trusted
///
/// The system prompt instructs the model to answer from [`prompts::APP_CONTEXT`]
/// only and to emit the fixed refusal sentence for out-of-scope questions;
/// the output is returned verbatim with no post-validation.
pub struct Generator {
    completion: Arc<dyn ChatCompletion>,
    params: CompletionParams,
}

impl Generator {
    pub fn new(completion: Arc<dyn ChatCompletion>) -> Self {
        Self {
            completion,
            params: CompletionParams::generative(),
        }
    }

    /// Generate an answer for a query
    ///
    /// # Errors
    /// - LLM transport or API failures (not absorbed; the caller decides)
    pub async fn generate(&self, query: &str) -> Result<String> {
        debug!("Generating fallback answer");
        let messages = prompts::fallback_messages(query);
        self.completion.complete(&messages, &self.params).await
    }
}
