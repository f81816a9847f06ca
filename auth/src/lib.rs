//! Authentication utilities library
//!
//! Provides the credential-handling building blocks for the identity service:
//! - Password hashing (Argon2id)
//! - Typed JWT minting and validation (access/refresh token service)
//!
//! The service crate composes these into its own orchestration; nothing in
//! here touches storage or transports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenPayload, TokenService, TokenType};
//! use chrono::Duration;
//! use jsonwebtoken::Algorithm;
//!
//! let service = TokenService::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Algorithm::HS256,
//!     Duration::minutes(30),
//!     Duration::days(7),
//! );
//!
//! let payload = TokenPayload::new("user123", "alice@example.com");
//! let pair = service.mint_pair(&payload).unwrap();
//! let claims = service.decode(&pair.access_token, Some(TokenType::Access)).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenPair;
pub use token::TokenPayload;
pub use token::TokenService;
pub use token::TokenType;
