use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::models::Username;

/// Port for the authentication orchestration operations.
///
/// Both transport adapters (HTTP and gRPC) call through this port; it is the
/// only place the account-active and token-type invariants are enforced.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with a freshly hashed password.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email or username is already taken
    /// * `DatabaseError` - Directory operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Verify credentials and mint an access/refresh token pair.
    ///
    /// Unknown email, wrong password, and inactive account all fail the same
    /// way so callers cannot probe which one it was.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Credentials did not verify
    /// * `DatabaseError` - Directory operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a fresh access token.
    ///
    /// The account is re-checked against the directory; the refresh token
    /// itself is never rotated.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed/forged token or missing subject
    /// * `TokenExpired` - Refresh token past its expiry
    /// * `InvalidTokenType` - A non-refresh token was presented
    /// * `InvalidCredentials` - Account is unknown or inactive
    /// * `DatabaseError` - Directory operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Resolve an access token to the user that owns it.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed/forged token or missing subject
    /// * `TokenExpired` - Access token past its expiry
    /// * `InvalidTokenType` - A non-access token was presented
    /// * `InvalidCredentials` - Account is unknown or inactive
    /// * `DatabaseError` - Directory operation failed
    async fn resolve(&self, access_token: &str) -> Result<User, AuthError>;
}

/// Persistence operations consumed from the user directory.
///
/// Absence is a distinguishable `None`, not an error; uniqueness of email
/// and username is the directory's responsibility (racing registrations are
/// serialized by its constraints, last writer loses).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Email or username is already taken
    /// * `DatabaseError` - Directory operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve a user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Retrieve a user by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Directory operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;
}
