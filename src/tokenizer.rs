//! Token estimation over message histories.
//!
//! Counts follow the ChatML framing rules: every message costs a fixed
//! 4-token envelope plus its BPE-encoded content, a named participant
//! drops the role token, and every request pays 2 priming tokens for the
//! upcoming assistant turn.

use tiktoken_rs::{cl100k_base, get_bpe_from_model, CoreBPE};

use crate::error::{ConfabError, Result};
use crate::models::ChatModel;
use crate::types::ChatMessage;

/// Framing cost per message: `<|im_start|>{role}\n{content}<|im_end|>\n`.
const PER_MESSAGE_OVERHEAD: i64 = 4;
/// Every reply is primed with `<|im_start|>assistant`.
const REPLY_PRIMING_OVERHEAD: i64 = 2;

/// Deterministic token counter for a specific model's encoding.
pub struct TokenEstimator {
    bpe: CoreBPE,
}

impl TokenEstimator {
    /// Build an estimator for a model.
    ///
    /// Custom models fall back to the cl100k_base encoding.
    pub fn for_model(model: &ChatModel) -> Result<Self> {
        let bpe = match model {
            ChatModel::Custom { .. } => cl100k_base(),
            known => get_bpe_from_model(known.as_str()),
        }
        .map_err(|e| ConfabError::Tokenization(e.to_string()))?;
        Ok(Self { bpe })
    }

    /// Count tokens in a single text.
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Approximate number of tokens a message history will occupy.
    ///
    /// Pure: identical inputs always give identical results, which the
    /// truncation loop relies on to converge.
    pub fn estimate<'a, I>(&self, messages: I) -> usize
    where
        I: IntoIterator<Item = &'a ChatMessage>,
    {
        let mut total = REPLY_PRIMING_OVERHEAD;
        for message in messages {
            total += PER_MESSAGE_OVERHEAD;
            total += self.count(&message.content) as i64;
            if let Some(ref name) = message.name {
                // role token is omitted when a name is present
                total += self.count(name) as i64 - 1;
            }
        }
        total.max(0) as usize
    }
}
