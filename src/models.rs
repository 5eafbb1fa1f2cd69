//! Chat model registry: identifiers and context budgets.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfabError;

/// A chat model and its context-length budget.
///
/// The built-in tiers are fixed for the process lifetime; `Custom` carries
/// an explicit limit for models outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChatModel {
    Gpt4,
    Gpt4_32k,
    /// Model outside the built-in registry, with an explicit context limit.
    Custom { id: String, max_tokens: u32 },
}

impl ChatModel {
    /// Get the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt4 => "gpt-4",
            Self::Gpt4_32k => "gpt-4-32k",
            Self::Custom { id, .. } => id,
        }
    }

    /// Maximum context length in tokens.
    pub fn max_tokens(&self) -> u32 {
        match self {
            Self::Gpt4 => 8192,
            Self::Gpt4_32k => 32768,
            Self::Custom { max_tokens, .. } => *max_tokens,
        }
    }
}

impl Default for ChatModel {
    fn default() -> Self {
        Self::Gpt4
    }
}

impl fmt::Display for ChatModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatModel {
    type Err = ConfabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt-4" => Ok(Self::Gpt4),
            "gpt-4-32k" => Ok(Self::Gpt4_32k),
            other => Err(ConfabError::Configuration(format!(
                "Unknown model: {other} (expected gpt-4 or gpt-4-32k)"
            ))),
        }
    }
}
