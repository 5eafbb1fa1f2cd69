//! Confab — token-budgeted terminal chat client.
//!
//! Maintains a single conversation with an OpenAI-style chat-completion
//! service, estimating the token cost of the growing message history and
//! evicting the oldest entries once the model's context budget runs low.
//!
//! # Quick Start
//!
//! ```no_run
//! use confab::prelude::*;
//!
//! # async fn example() -> confab::error::Result<()> {
//! let config = ConfabConfig::from_env();
//! let provider = OpenAiProvider::new(&config)?;
//! let mut conversation =
//!     Conversation::new(Box::new(provider), "You are a helpful technical assistant")?;
//! let reply = conversation.send("Hello!").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod tokenizer;
pub mod types;
