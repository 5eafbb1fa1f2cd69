//! Completion service providers.

mod http;
pub mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatMessage, FinishReason};

/// A single chat-completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
}

/// One of possibly several alternative completions for a request.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: Option<FinishReason>,
}

/// A successful completion response.
#[derive(Debug, Clone)]
pub struct Completion {
    pub candidates: Vec<Candidate>,
}

impl Completion {
    /// The candidate the conversation will use as its reply (the first).
    pub fn reply(&self) -> Option<&Candidate> {
        self.candidates.first()
    }
}

/// Remote chat-completion service.
///
/// Implementations must classify failures into
/// [`ConfabError::Authentication`](crate::error::ConfabError::Authentication)
/// versus everything else, so callers can branch on credential problems.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion>;
}
