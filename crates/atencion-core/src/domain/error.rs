//! API Errors
//!
//! Failure taxonomy shared by the auth and parameter clients.

use serde::{Deserialize, Serialize};

/// Common result type for remote operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Remote call errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ApiError {
    /// No token could be obtained
    Auth(String),
    /// Transport failure or non-2xx status
    Network(String),
    /// Server answered with `codigo != 1`
    Application(String),
    /// Body could not be decoded
    InvalidResponse(String),
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Application(msg) => write!(f, "Application error: {}", msg),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
