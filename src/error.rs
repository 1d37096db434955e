//! Common error types for the studio core

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("A cota de uso da API foi excedida. Por favor, tente novamente mais tarde.")]
    QuotaExceeded,

    #[error("A chave de API configurada é inválida ou expirou. Contate o administrador do aplicativo.")]
    InvalidApiKey,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("{0}")]
    Generation(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Classify a raw error message from the external generative service.
///
/// The upstream client surfaces failures as text, not structured codes, so
/// quota exhaustion and credential problems are recognized by
/// case-insensitive substring matching. Best-effort: anything unrecognized
/// stays a generic backend error.
pub fn classify_api_error(message: &str) -> AppError {
    let lower = message.to_lowercase();

    if lower.contains("quota") || lower.contains("429") || lower.contains("resource_exhausted") {
        return AppError::QuotaExceeded;
    }

    if lower.contains("api key not valid")
        || lower.contains("api_key_invalid")
        || lower.contains("permission_denied")
        || lower.contains("401")
        || lower.contains("403")
    {
        return AppError::InvalidApiKey;
    }

    AppError::Backend(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_quota_signals() {
        assert!(matches!(
            classify_api_error("RESOURCE_EXHAUSTED: rate limit"),
            AppError::QuotaExceeded
        ));
        assert!(matches!(
            classify_api_error("HTTP 429 Too Many Requests"),
            AppError::QuotaExceeded
        ));
        assert!(matches!(
            classify_api_error("Quota exceeded for project"),
            AppError::QuotaExceeded
        ));
    }

    #[test]
    fn test_classify_credential_signals() {
        assert!(matches!(
            classify_api_error("API key not valid. Please pass a valid key."),
            AppError::InvalidApiKey
        ));
        assert!(matches!(
            classify_api_error("status 403: PERMISSION_DENIED"),
            AppError::InvalidApiKey
        ));
        assert!(matches!(classify_api_error("API_KEY_INVALID"), AppError::InvalidApiKey));
    }

    #[test]
    fn test_classify_generic_passthrough() {
        let err = classify_api_error("connection reset by peer");
        match err {
            AppError::Backend(msg) => assert_eq!(msg, "connection reset by peer"),
            other => panic!("expected generic backend error, got {other:?}"),
        }
    }

    #[test]
    fn test_quota_takes_precedence_over_auth() {
        // "429" and "403" can both appear in a proxy error body; quota wins.
        assert!(matches!(
            classify_api_error("429 after retry, upstream said 403"),
            AppError::QuotaExceeded
        ));
    }
}
