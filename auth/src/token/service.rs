use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::Claims;
use super::claims::TokenPayload;
use super::claims::TokenType;
use super::errors::TokenError;

/// An access/refresh token pair minted together on successful authentication.
///
/// No relationship between the two is kept after issuance; each proves its
/// own validity through signature and expiry alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Stateless service for minting and validating typed JWT tokens.
///
/// Configuration (secret, algorithm, lifetimes) is fixed at construction and
/// shared read-only across requests; minting and decoding are pure
/// computation.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Signing secret (at least 32 bytes for the HS family)
    /// * `algorithm` - HMAC signing algorithm
    /// * `access_token_ttl` - Lifetime of minted access tokens
    /// * `refresh_token_ttl` - Lifetime of minted refresh tokens
    pub fn new(
        secret: &[u8],
        algorithm: Algorithm,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    /// Mint a signed token of the given type.
    ///
    /// Copies the caller payload and stamps `exp` (now + override or the
    /// type's configured lifetime), `iat`, a fresh random `jti`, and the
    /// `type` claim. The `jti` comes from a v4 UUID, so tokens minted in the
    /// same instant never collide.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing or serialization failed
    pub fn mint(
        &self,
        payload: &TokenPayload,
        token_type: TokenType,
        ttl_override: Option<Duration>,
    ) -> Result<String, TokenError> {
        let ttl = ttl_override.unwrap_or(match token_type {
            TokenType::Access => self.access_token_ttl,
            TokenType::Refresh => self.refresh_token_ttl,
        });

        let now = Utc::now();
        let claims = Claims {
            sub: payload.sub.clone(),
            email: payload.email.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        };

        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Mint an access and a refresh token from the same payload.
    ///
    /// Each token uses its own configured lifetime; the two differ in `type`
    /// and `jti` even when minted in the same instant.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing or serialization failed
    pub fn mint_pair(&self, payload: &TokenPayload) -> Result<TokenPair, TokenError> {
        let access_token = self.mint(payload, TokenType::Access, None)?;
        let refresh_token = self.mint(payload, TokenType::Refresh, None)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Decode and validate a token.
    ///
    /// Verifies signature and algorithm, checks `exp` against the current
    /// time (no leeway), and - when `expected_type` is supplied - checks the
    /// `type` claim.
    ///
    /// # Errors
    /// * `Expired` - Structurally valid token past its `exp`
    /// * `TypeMismatch` - Unexpired token of the wrong type
    /// * `Invalid` - Malformed, unsigned, or forged token
    pub fn decode(
        &self,
        token: &str,
        expected_type: Option<TokenType>,
    ) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        if let Some(expected) = expected_type {
            if token_data.claims.token_type != expected {
                return Err(TokenError::TypeMismatch {
                    expected,
                    actual: token_data.claims.token_type,
                });
            }
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> TokenService {
        TokenService::new(
            b"test_secret_key_at_least_32_bytes!",
            Algorithm::HS256,
            Duration::minutes(30),
            Duration::days(7),
        )
    }

    fn test_payload() -> TokenPayload {
        TokenPayload::new("user123", "alice@example.com")
    }

    #[test]
    fn test_mint_and_decode_round_trip() {
        let service = test_service();
        let payload = test_payload();

        let token = service
            .mint(&payload, TokenType::Access, None)
            .expect("Failed to mint token");

        let claims = service
            .decode(&token, Some(TokenType::Access))
            .expect("Failed to decode token");

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert!(!claims.jti.is_empty());
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let service = test_service();

        let refresh = service
            .mint(&test_payload(), TokenType::Refresh, None)
            .expect("Failed to mint token");

        let result = service.decode(&refresh, Some(TokenType::Access));
        assert_eq!(
            result,
            Err(TokenError::TypeMismatch {
                expected: TokenType::Access,
                actual: TokenType::Refresh,
            })
        );

        // Accepted when the expectation matches or is absent
        assert!(service.decode(&refresh, Some(TokenType::Refresh)).is_ok());
        assert!(service.decode(&refresh, None).is_ok());
    }

    #[test]
    fn test_decode_expired_token() {
        let service = test_service();

        let token = service
            .mint(&test_payload(), TokenType::Access, Some(Duration::hours(-1)))
            .expect("Failed to mint token");

        // Expiry is checked before the type claim, and repeated decodes of
        // the same token keep failing the same way
        assert_eq!(
            service.decode(&token, Some(TokenType::Access)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            service.decode(&token, Some(TokenType::Refresh)),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_ttl_override() {
        let service = test_service();

        let token = service
            .mint(&test_payload(), TokenType::Access, Some(Duration::hours(2)))
            .expect("Failed to mint token");

        let claims = service
            .decode(&token, Some(TokenType::Access))
            .expect("Failed to decode token");
        assert_eq!(claims.exp - claims.iat, 2 * 60 * 60);
    }

    #[test]
    fn test_minted_tokens_are_distinct() {
        let service = test_service();
        let payload = test_payload();

        // Same payload, same type, same instant: jti must differ
        let first = service.mint(&payload, TokenType::Access, None).unwrap();
        let second = service.mint(&payload, TokenType::Access, None).unwrap();
        assert_ne!(first, second);

        let first_claims = service.decode(&first, None).unwrap();
        let second_claims = service.decode(&second, None).unwrap();
        assert_ne!(first_claims.jti, second_claims.jti);
    }

    #[test]
    fn test_pair_tokens_are_distinct() {
        let service = test_service();

        let pair = service.mint_pair(&test_payload()).unwrap();
        assert_ne!(pair.access_token, pair.refresh_token);

        let access = service.decode(&pair.access_token, None).unwrap();
        let refresh = service.decode(&pair.refresh_token, None).unwrap();
        assert_eq!(access.token_type, TokenType::Access);
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert_ne!(access.jti, refresh.jti);
    }

    #[test]
    fn test_decode_invalid_token() {
        let service = test_service();

        let result = service.decode("invalid.token.here", Some(TokenType::Access));
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_decode_tampered_token() {
        let service = test_service();

        let token = service
            .mint(&test_payload(), TokenType::Access, None)
            .unwrap();
        let tampered = format!("{}x", token);

        let result = service.decode(&tampered, Some(TokenType::Access));
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let service = test_service();
        let other = TokenService::new(
            b"another_secret_key_of_32_bytes_ok!",
            Algorithm::HS256,
            Duration::minutes(30),
            Duration::days(7),
        );

        let token = service
            .mint(&test_payload(), TokenType::Access, None)
            .unwrap();

        let result = other.decode(&token, Some(TokenType::Access));
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }
}
