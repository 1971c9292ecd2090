use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use super::AUTHENTICATION_REQUIRED;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Profile of the identity the token was issued for.
pub async fn current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user.user_id).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        ApiError::Unauthorized(AUTHENTICATION_REQUIRED.to_string())
    })?;

    state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}
