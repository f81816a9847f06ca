use auth::PasswordError;
use auth::TokenError;
use auth::TokenType;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all authentication operations.
///
/// A closed set of failure kinds callers pattern-match on; both transport
/// adapters project these into their own status codes.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    /// Unknown email, wrong password, or inactive account. The three causes
    /// are deliberately indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token type: expected {expected}, got {actual}")]
    InvalidTokenType {
        expected: TokenType,
        actual: TokenType,
    },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::TypeMismatch { expected, actual } => {
                AuthError::InvalidTokenType { expected, actual }
            }
            TokenError::Invalid(reason) => AuthError::InvalidToken(reason),
            TokenError::EncodingFailed(reason) => AuthError::Unknown(reason),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_mapping() {
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::TokenExpired
        ));
        assert!(matches!(
            AuthError::from(TokenError::Invalid("bad signature".to_string())),
            AuthError::InvalidToken(_)
        ));
        assert!(matches!(
            AuthError::from(TokenError::TypeMismatch {
                expected: TokenType::Refresh,
                actual: TokenType::Access,
            }),
            AuthError::InvalidTokenType {
                expected: TokenType::Refresh,
                actual: TokenType::Access,
            }
        ));
    }
}
