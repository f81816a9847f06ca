use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Token purpose discriminator.
///
/// Stamped into the signed payload by the token service; a refresh token can
/// never be presented where an access token is expected (and vice versa)
/// without forging the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => write!(f, "access"),
            TokenType::Refresh => write!(f, "refresh"),
        }
    }
}

/// Caller-supplied claims for a token.
///
/// Carries the subject identity only; `exp`/`iat`/`jti`/`type` are injected
/// by [`TokenService::mint`](super::service::TokenService::mint) and never
/// accepted from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    /// Subject (stable user identifier)
    pub sub: String,
    /// Email of the subject
    pub email: String,
}

impl TokenPayload {
    pub fn new(sub: impl ToString, email: impl ToString) -> Self {
        Self {
            sub: sub.to_string(),
            email: email.to_string(),
        }
    }
}

/// Full claim set carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (stable user identifier)
    pub sub: String,

    /// Email of the subject
    pub email: String,

    /// Expiration time (Unix timestamp, UTC)
    pub exp: i64,

    /// Issued at (Unix timestamp, UTC)
    pub iat: i64,

    /// Unique token identifier, fresh per mint
    pub jti: String,

    /// Token purpose
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    /// Check whether the token was expired at `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
