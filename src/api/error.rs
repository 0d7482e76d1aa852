//! News API-specific error types.

/// Errors that can occur during news portal API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Operation needs a logged-in session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Generic API error
    #[error("News API error: {0}")]
    Other(String),
}

impl ApiError {
    /// Message suitable for showing next to a form: the backend's own message
    /// for rejected requests, the full description otherwise.
    ///
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ApiError::Other("Test error".to_string());
        assert!(error.to_string().contains("News API error"));
        assert!(error.to_string().contains("Test error"));

        let error = ApiError::NotAuthenticated;
        assert_eq!(error.to_string(), "Not authenticated");
    }

    #[test]
    fn test_api_error_status() {
        let error = ApiError::Api {
            status: 409,
            message: "duplicate title".to_string(),
        };
        let error_str = error.to_string();
        assert!(error_str.contains("409"));
        assert!(error_str.contains("duplicate title"));
    }

    #[test]
    fn test_user_message() {
        let error = ApiError::Api {
            status: 409,
            message: "duplicate title".to_string(),
        };
        assert_eq!(error.user_message(), "duplicate title");
        assert_eq!(ApiError::NotAuthenticated.user_message(), "Not authenticated");
    }
}
