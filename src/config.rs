//! Process configuration, resolved once at startup and passed in
//! explicitly. The core never reads ambient process state.

/// Configuration for the completion-service transport.
#[derive(Debug, Clone, Default)]
pub struct ConfabConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl ConfabConfig {
    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_credentials() {
        let config = ConfabConfig::default();
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn builder_sets_key_and_url() {
        let config = ConfabConfig::default()
            .with_api_key("sk-test")
            .with_base_url("https://example.test/v1");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.base_url.as_deref(), Some("https://example.test/v1"));
    }
}
