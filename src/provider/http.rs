//! Shared HTTP client and auth utilities.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::ConfabError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-200 status to the matching error class.
pub fn status_to_error(status: u16, body: &str) -> ConfabError {
    match status {
        401 | 403 => ConfabError::Authentication(body.to_string()),
        429 => ConfabError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => ConfabError::Api {
            status,
            message: body.to_string(),
        },
    }
}

fn extract_retry_after(body: &str) -> Option<u64> {
    // Try to parse retry-after from JSON error body
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_statuses_classify_as_authentication() {
        assert!(status_to_error(401, "bad key").is_authentication());
        assert!(status_to_error(403, "forbidden").is_authentication());
        assert!(!status_to_error(500, "boom").is_authentication());
    }

    #[test]
    fn rate_limit_extracts_retry_after() {
        let err = status_to_error(429, r#"{"error": {"retry_after": 1.5}}"#);
        match err {
            ConfabError::RateLimited { retry_after_ms } => {
                assert_eq!(retry_after_ms, Some(1500));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }
}
