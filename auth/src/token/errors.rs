use thiserror::Error;

use super::claims::TokenType;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Expected {expected} token, got {actual}")]
    TypeMismatch {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
