use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::validate_token;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::service::AuthService;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::ValidateTokenRequest;
use crate::proto::ValidateTokenResponse;

pub struct AuthGrpcService<UR: UserRepository> {
    service: Arc<AuthService<UR>>,
}

impl<UR: UserRepository> AuthGrpcService<UR> {
    pub fn new(service: Arc<AuthService<UR>>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<UR: UserRepository> AuthServiceProto for AuthGrpcService<UR> {
    async fn validate_token(
        &self,
        request: Request<ValidateTokenRequest>,
    ) -> Result<Response<ValidateTokenResponse>, Status> {
        let response =
            validate_token::validate_token(Arc::clone(&self.service), request.into_inner())
                .await?;
        Ok(Response::new(response))
    }
}
