use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenService;
use chrono::Duration;
use identity_service::domain::auth::errors::AuthError;
use identity_service::domain::auth::models::User;
use identity_service::domain::auth::models::UserId;
use identity_service::domain::auth::models::Username;
use identity_service::domain::auth::ports::UserRepository;
use identity_service::domain::auth::service::AuthService;
use identity_service::inbound::grpc::AuthGrpcService;
use identity_service::inbound::http::router::create_router;
use identity_service::proto::auth_service_server::AuthServiceServer;
use jsonwebtoken::Algorithm;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory user directory standing in for Postgres.
///
/// Enforces the same email/username uniqueness the database constraints do,
/// so racing registrations lose the same way.
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Flip is_active off for the user with the given email.
    pub fn deactivate(&self, email: &str) {
        let mut users = self.users.lock().unwrap();
        for user in users.values_mut() {
            if user.email.as_str() == email {
                user.is_active = false;
            }
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();

        if users
            .values()
            .any(|existing| existing.email.as_str() == user.email.as_str())
        {
            return Err(AuthError::UserAlreadyExists(user.email.to_string()));
        }
        if users
            .values()
            .any(|existing| existing.username.as_str() == user.username.as_str())
        {
            return Err(AuthError::UserAlreadyExists(user.username.to_string()));
        }

        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .values()
            .find(|user| user.username == *username)
            .cloned())
    }
}

/// Test application that spawns a real HTTP server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryUserRepository>,
    pub token_service: Arc<TokenService>,
}

pub fn test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(
        TEST_SECRET,
        Algorithm::HS256,
        Duration::minutes(30),
        Duration::days(7),
    ))
}

impl TestApp {
    /// Spawn the HTTP application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let token_service = test_token_service();

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&token_service),
        ));

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            repository,
            token_service,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }
}

/// Test fixture that spawns a real gRPC server
pub struct TestGrpcApp {
    pub address: SocketAddr,
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub token_service: Arc<TokenService>,
}

impl TestGrpcApp {
    /// Spawn the gRPC server in a background task and return the fixture
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let token_service = test_token_service();

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&token_service),
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = listener.local_addr().unwrap();

        let grpc_service = AuthGrpcService::new(Arc::clone(&auth_service));
        tokio::spawn(async move {
            Server::builder()
                .add_service(AuthServiceServer::new(grpc_service))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
                .expect("Server error");
        });

        Self {
            address,
            auth_service,
            token_service,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}", self.address)
    }
}
