//! OpenAI Chat Completions API provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::ConfabConfig;
use crate::error::{ConfabError, Result};
use crate::types::{ChatMessage, FinishReason, Role};

use super::http::{bearer_headers, shared_client, status_to_error};
use super::{Candidate, Completion, CompletionProvider, CompletionRequest};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completion provider backed by the OpenAI API.
#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    /// Build a provider from explicit configuration.
    ///
    /// Fails when no API key is configured; credentials are never read
    /// from ambient process state past this point.
    pub fn new(config: &ConfabConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ConfabError::Configuration("OPENAI_API_KEY is not set".to_string()))?;
        Ok(Self {
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        serde_json::json!({
            "model": request.model,
            "messages": request.messages,
            "temperature": request.temperature,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "OpenAI chat completion"
        );

        let resp = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: OpenAiChatResponse = resp.json().await?;
        if data.choices.is_empty() {
            return Err(ConfabError::Api {
                status: 200,
                message: "No choices in OpenAI response".to_string(),
            });
        }

        let candidates = data
            .choices
            .into_iter()
            .enumerate()
            .map(|(i, choice)| Candidate {
                index: choice.index.unwrap_or(i as u32),
                message: ChatMessage {
                    role: choice.message.role.unwrap_or(Role::Assistant),
                    content: choice.message.content.unwrap_or_default(),
                    name: None,
                },
                finish_reason: choice.finish_reason.as_deref().map(parse_finish_reason),
            })
            .collect();

        Ok(Completion { candidates })
    }
}

fn parse_finish_reason(s: &str) -> FinishReason {
    // the catch-all variant makes parsing infallible
    s.parse()
        .unwrap_or_else(|_| FinishReason::Other(s.to_string()))
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    index: Option<u32>,
    message: OpenAiMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    role: Option<Role>,
    content: Option<String>,
}
