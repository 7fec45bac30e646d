use thiserror::Error;

#[derive(Debug, Error)]
pub enum JuchaError {
    #[error("API key not configured for {provider}. Run 'jucha config set {provider}.key YOUR_KEY' to configure.")]
    NotConfigured { provider: &'static str },

    #[error("{provider} rejected the configured API key (HTTP {status})")]
    AuthRejected { provider: &'static str, status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{provider} returned server error {status}")]
    ServerError { provider: &'static str, status: u16 },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimit,

    #[error("Malformed response from {provider}: {message}")]
    BadResponse {
        provider: &'static str,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl JuchaError {
    /// Create a malformed-response error for a provider
    pub fn bad_response(provider: &'static str, message: impl Into<String>) -> Self {
        Self::BadResponse {
            provider,
            message: message.into(),
        }
    }

    /// User-facing message for the tool boundary.
    ///
    /// Credential and infrastructure detail is never surfaced to callers;
    /// those cases collapse into the two generalized service messages.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured { .. } | Self::AuthRejected { .. } => {
                "주차장 정보 제공 서비스가 준비 중입니다.".to_string()
            }
            Self::InvalidInput(msg) | Self::NotFound(msg) => msg.clone(),
            _ => "주차장 정보를 불러오는 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요."
                .to_string(),
        }
    }

    /// Whether the error stems from a missing or rejected credential
    pub fn is_credential_error(&self) -> bool {
        matches!(self, Self::NotConfigured { .. } | Self::AuthRejected { .. })
    }
}

pub type Result<T> = std::result::Result<T, JuchaError>;
