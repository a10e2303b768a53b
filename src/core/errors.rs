use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    ApiError { code: i32, message: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Authentication required: API key and secret must both be set")]
    AuthenticationRequired,

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponseFormat(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Failure classes a caller can branch on. Only `Domain` carries an
/// exchange error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Rejected locally before any request was built or sent.
    Precondition,
    /// The exchange could not be reached or its reply could not be read.
    Transport,
    /// The exchange answered with a nonzero envelope error code.
    Domain,
}

impl ExchangeError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::AuthenticationRequired
            | Self::AuthError(_)
            | Self::InvalidParameters(_)
            | Self::SerializationError(_)
            | Self::ConfigError(_)
            | Self::ConfigurationError(_) => ErrorClass::Precondition,
            Self::ApiError { .. } => ErrorClass::Domain,
            Self::HttpError(_)
            | Self::HttpStatus { .. }
            | Self::DeserializationError(_)
            | Self::InvalidResponseFormat(_) => ErrorClass::Transport,
        }
    }

    /// Envelope error code, for domain failures only.
    pub fn api_code(&self) -> Option<i32> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}
