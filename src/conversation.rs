//! Conversation state and token-budget management.

use std::collections::VecDeque;

use tracing::warn;

use crate::error::{ConfabError, Result};
use crate::models::ChatModel;
use crate::provider::{CompletionProvider, CompletionRequest};
use crate::tokenizer::TokenEstimator;
use crate::types::{ChatMessage, Role};

/// Fraction of the model's context limit at which history eviction starts.
pub const TRUNCATION_THRESHOLD: f64 = 0.9;

const DEFAULT_TEMPERATURE: f64 = 0.5;

/// A single chat conversation with a remote completion service.
///
/// Owns the ordered message history, oldest first; [`send`](Self::send) is
/// the only mutation path. Calls must be serialized per instance, which
/// `&mut self` enforces.
pub struct Conversation {
    provider: Box<dyn CompletionProvider>,
    model: ChatModel,
    temperature: f64,
    history: VecDeque<ChatMessage>,
    estimator: TokenEstimator,
    preserve_system_prompt: bool,
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("history", &self.history)
            .field("preserve_system_prompt", &self.preserve_system_prompt)
            .finish_non_exhaustive()
    }
}

impl Conversation {
    /// Create a conversation seeded with a system prompt.
    ///
    /// Defaults: gpt-4, temperature 0.5, system prompt preserved during
    /// truncation.
    pub fn new(
        provider: Box<dyn CompletionProvider>,
        system_prompt: impl Into<String>,
    ) -> Result<Self> {
        let model = ChatModel::default();
        let estimator = TokenEstimator::for_model(&model)?;
        let mut history = VecDeque::new();
        history.push_back(ChatMessage::system(system_prompt));
        Ok(Self {
            provider,
            model,
            temperature: DEFAULT_TEMPERATURE,
            history,
            estimator,
            preserve_system_prompt: true,
        })
    }

    /// Switch models, rebuilding the token estimator to match.
    pub fn with_model(mut self, model: ChatModel) -> Result<Self> {
        self.estimator = TokenEstimator::for_model(&model)?;
        self.model = model;
        Ok(self)
    }

    /// Set the sampling temperature (finite, conventionally in [0, 1]).
    pub fn with_temperature(mut self, temperature: f64) -> Result<Self> {
        if !temperature.is_finite() {
            return Err(ConfabError::InvalidArgument(format!(
                "temperature must be finite, got {temperature}"
            )));
        }
        self.temperature = temperature;
        Ok(self)
    }

    /// Allow truncation to evict the system prompt like any other message.
    pub fn evict_system_prompt(mut self) -> Self {
        self.preserve_system_prompt = false;
        self
    }

    /// The ordered message history, oldest first.
    pub fn history(&self) -> &VecDeque<ChatMessage> {
        &self.history
    }

    pub fn model(&self) -> &ChatModel {
        &self.model
    }

    /// Current token estimate for the full history.
    pub fn token_count(&self) -> usize {
        self.estimator.estimate(&self.history)
    }

    /// Send a user message and return the assistant's reply.
    ///
    /// Appends the user message, calls the completion service with the
    /// full history, appends the first candidate's reply, then truncates
    /// the history if it crossed the token threshold.
    ///
    /// There is no rollback: if the service call fails, the user message
    /// stays in history, so a retry resends the same context. Callers
    /// needing rollback must snapshot the history externally.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<String> {
        self.history.push_back(ChatMessage::user(text));

        let request = CompletionRequest {
            model: self.model.as_str().to_string(),
            messages: self.history.iter().cloned().collect(),
            temperature: self.temperature,
        };
        let completion = self.provider.complete(&request).await?;

        for candidate in &completion.candidates {
            let natural = candidate
                .finish_reason
                .as_ref()
                .is_some_and(|r| r.is_natural_stop());
            if !natural {
                let reason = candidate
                    .finish_reason
                    .as_ref()
                    .map_or_else(|| "unknown".to_string(), ToString::to_string);
                warn!(
                    candidate = candidate.index,
                    %reason,
                    "candidate finished before the end token was reached"
                );
            }
        }

        let reply = completion
            .reply()
            .ok_or_else(|| ConfabError::Api {
                status: 200,
                message: "completion contained no candidates".to_string(),
            })?
            .message
            .content
            .clone();

        self.history.push_back(ChatMessage::assistant(reply.clone()));
        self.truncate_if_needed();

        Ok(reply)
    }

    /// Evict the oldest messages until the token estimate is back under
    /// the threshold.
    ///
    /// A no-op for histories already under the limit. Stops once a single
    /// message remains, which cannot shrink further. With the default
    /// policy the system prompt is skipped and the next-oldest message is
    /// evicted instead; see [`evict_system_prompt`](Self::evict_system_prompt).
    pub fn truncate_if_needed(&mut self) {
        let limit = f64::from(self.model.max_tokens()) * TRUNCATION_THRESHOLD;
        let mut tokens = self.estimator.estimate(&self.history);
        if tokens as f64 <= limit {
            return;
        }

        warn!(
            tokens,
            limit,
            model = %self.model,
            "history is close to the model's context limit, truncating"
        );

        while tokens as f64 > limit && self.history.len() > 1 {
            let evict_at =
                if self.preserve_system_prompt && self.history[0].role == Role::System {
                    1
                } else {
                    0
                };
            self.history.remove(evict_at);
            tokens = self.estimator.estimate(&self.history);
        }
    }
}
