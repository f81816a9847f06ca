use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenPair;
use auth::TokenPayload;
use auth::TokenService;
use auth::TokenType;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;

/// Authentication orchestrator.
///
/// Composes the token service, password hasher, and user directory into the
/// register/login/refresh/resolve operations. Holds no mutable state; safe
/// to share across request tasks without locking.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User directory implementation
    /// * `token_service` - Configured token minting/validation service
    pub fn new(repository: Arc<UR>, token_service: Arc<TokenService>) -> Self {
        Self {
            repository,
            token_service,
            password_hasher: PasswordHasher::new(),
        }
    }

    fn token_payload(user: &User) -> TokenPayload {
        TokenPayload::new(user.id, user.email.as_str())
    }

    /// Decode a token of the required type and resolve its subject against
    /// the directory, re-checking that the account is still active.
    async fn resolve_subject(
        &self,
        token: &str,
        expected_type: TokenType,
    ) -> Result<User, AuthError> {
        let claims = self.token_service.decode(token, Some(expected_type))?;

        let user_id = UserId::from_string(&claims.sub).map_err(|_| {
            tracing::warn!(token_type = %expected_type, "Token subject claim missing or malformed");
            AuthError::InvalidToken("missing or malformed subject claim".to_string())
        })?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(subject = %user_id, "Token subject not present in directory");
                AuthError::InvalidCredentials
            })?;

        if !user.is_active {
            tracing::warn!(
                subject = %user.id,
                email = %user.email,
                "Inactive account presented a valid token"
            );
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            tracing::warn!(
                email = %command.email,
                "Attempt to register with existing email"
            );
            return Err(AuthError::UserAlreadyExists(command.email.to_string()));
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::warn!(
                username = %command.username,
                "Attempt to register with existing username"
            );
            return Err(AuthError::UserAlreadyExists(command.username.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            is_active: true,
            is_superuser: false,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(email = %created_user.email, "Registered new user");
        Ok(created_user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        // Unknown email, wrong password, and inactive account collapse into
        // the same error; the audit log keeps them apart
        let user = match self.repository.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(email = %email, "Failed authentication attempt: unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.password_hasher.verify(password, &user.password_hash)? {
            tracing::warn!(email = %email, "Failed authentication attempt: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::warn!(email = %email, "Failed authentication attempt: inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        let pair = self.token_service.mint_pair(&Self::token_payload(&user))?;

        tracing::info!(email = %email, subject = %user.id, "User authenticated");
        Ok(pair)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let user = self
            .resolve_subject(refresh_token, TokenType::Refresh)
            .await?;

        // A fresh access token only; the refresh token is never rotated
        let access_token =
            self.token_service
                .mint(&Self::token_payload(&user), TokenType::Access, None)?;

        tracing::info!(subject = %user.id, email = %user.email, "Access token refreshed");
        Ok(access_token)
    }

    async fn resolve(&self, access_token: &str) -> Result<User, AuthError> {
        self.resolve_subject(access_token, TokenType::Access).await
    }
}
