use thiserror::Error;

/// Uniform failure shape for every outbound call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Timeout or transport failure before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response; message comes from the server's `msg` body when
    /// present.
    #[error("http {status}: {message}")]
    Http { status: u16, message: String },

    /// Client-side rejection before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// A 2xx response whose body could not be decoded into the expected
    /// shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http { status: 404, .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        let not_found = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_unauthorized());

        let unauthorized = ApiError::Http {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
    }
}
