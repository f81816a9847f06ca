use std::sync::Arc;

use tonic::Status;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::service::AuthService;
use crate::proto::validate_token_response::Result as ValidateResult;
use crate::proto::User as ProtoUser;
use crate::proto::ValidateTokenRequest;
use crate::proto::ValidateTokenResponse;

/// Resolve a bearer token to its owner.
///
/// Shares the same `resolve` path as the HTTP middleware; rejected tokens
/// come back inside the response oneof, infrastructure failures as a
/// transport status.
pub async fn validate_token<UR: UserRepository>(
    service: Arc<AuthService<UR>>,
    request: ValidateTokenRequest,
) -> Result<ValidateTokenResponse, Status> {
    match service.resolve(&request.token).await {
        Ok(user) => {
            let proto_user: ProtoUser = user.into();
            Ok(ValidateTokenResponse {
                result: Some(ValidateResult::User(proto_user)),
            })
        }
        Err(AuthError::DatabaseError(reason)) => Err(Status::internal(reason)),
        Err(AuthError::Unknown(reason)) => Err(Status::internal(reason)),
        Err(AuthError::Password(e)) => Err(Status::internal(e.to_string())),
        Err(e) => Ok(ValidateTokenResponse {
            result: Some(ValidateResult::Error(e.to_string())),
        }),
    }
}
