use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;

use crate::error::{JuchaError, Result};

/// Per-provider client configuration.
///
/// Keys are resolved by the caller (config file or environment) and passed
/// in explicitly; clients never read ambient state. An empty `base_url`
/// selects the provider's production endpoint, tests point it at a mock
/// server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key
    pub api_key: String,
    /// Base URL override (empty = provider default)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            timeout: 10,
            user_agent: format!("jucha-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Resolved base URL, falling back to the provider default
    pub fn base_url_or<'a>(&'a self, default: &'a str) -> &'a str {
        if self.base_url.is_empty() {
            default
        } else {
            &self.base_url
        }
    }
}

/// Build the blocking-free HTTP client every provider client owns.
///
/// No connection pool is shared across provider instances and no retries
/// are attempted; each tool invocation performs one bounded request chain.
pub fn build_http_client(config: &ClientConfig) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.clone())
        .use_rustls_tls()
        .build()
        .map_err(JuchaError::Network)
}

/// Map a non-success HTTP status to the crate error taxonomy
pub fn status_error(provider: &'static str, status: StatusCode) -> JuchaError {
    match status.as_u16() {
        401 | 403 => JuchaError::AuthRejected {
            provider,
            status: status.as_u16(),
        },
        429 => JuchaError::RateLimit,
        code if status.is_server_error() => JuchaError::ServerError {
            provider,
            status: code,
        },
        code => JuchaError::bad_response(provider, format!("unexpected status {code}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_ten_second_timeout() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, 10);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn base_url_override_wins() {
        let mut config = ClientConfig::default();
        assert_eq!(config.base_url_or("https://dapi.kakao.com"), "https://dapi.kakao.com");
        config.base_url = "http://127.0.0.1:9999".to_string();
        assert_eq!(config.base_url_or("https://dapi.kakao.com"), "http://127.0.0.1:9999");
    }

    #[test]
    fn status_mapping_follows_taxonomy() {
        assert!(matches!(
            status_error("kakao", StatusCode::UNAUTHORIZED),
            JuchaError::AuthRejected { status: 401, .. }
        ));
        assert!(matches!(
            status_error("kakao", StatusCode::TOO_MANY_REQUESTS),
            JuchaError::RateLimit
        ));
        assert!(matches!(
            status_error("seoul", StatusCode::BAD_GATEWAY),
            JuchaError::ServerError { status: 502, .. }
        ));
        assert!(matches!(
            status_error("seoul", StatusCode::NOT_FOUND),
            JuchaError::BadResponse { .. }
        ));
    }
}
