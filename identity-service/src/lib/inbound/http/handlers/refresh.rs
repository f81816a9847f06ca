use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserRepository;
use crate::inbound::http::router::AppState;

pub async fn refresh<UR: UserRepository>(
    State(state): State<AppState<UR>>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let access_token = state
        .auth_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)?;

    // Only the access token rotates; the presented refresh token stays valid
    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData::new(access_token, None),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}
