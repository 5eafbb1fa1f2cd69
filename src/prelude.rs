//! Convenience re-exports for common use.

pub use crate::config::ConfabConfig;
pub use crate::conversation::{Conversation, TRUNCATION_THRESHOLD};
pub use crate::error::{ConfabError, Result};
pub use crate::models::ChatModel;
pub use crate::provider::{
    Candidate, Completion, CompletionProvider, CompletionRequest, OpenAiProvider,
};
pub use crate::tokenizer::TokenEstimator;
pub use crate::types::{ChatMessage, FinishReason, Role};
