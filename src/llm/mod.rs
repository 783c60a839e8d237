//! Language-model completion layer
//!
//! Defines the chat message model, the `ChatCompletion` trait the judge and
//! fallback generator talk to, and the OpenAI-compatible HTTP client.

pub mod client;

pub use client::LlmClient;

use async_trait::async_trait;

use crate::errors::Result;

/// Role of a single chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    Human,
    Ai,
}

/// One (role, text) turn in a prompt
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            text: text.into(),
        }
    }

    pub fn human(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Human,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Ai,
            text: text.into(),
        }
    }
}

/// Sampling parameters for a completion call
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionParams {
    /// Near-deterministic, one-word output budget (verdict calls)
    #[must_use]
    pub const fn verdict() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 10,
        }
    }

    /// Creative but bounded output budget (answer generation)
    #[must_use]
    pub const fn generative() -> Self {
        Self {
            temperature: 1.0,
            max_tokens: 500,
        }
    }
}

/// Chat completion backend
///
/// Implemented by [`LlmClient`] for production and by in-crate mocks in
/// tests. Errors propagate to the caller; there is no retry at this layer.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage], params: &CompletionParams)
        -> Result<String>;
}
