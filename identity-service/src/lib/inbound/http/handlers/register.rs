use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthResponseData;
use crate::domain::authentication::models::RegisterCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;

    let session = state.auth_service.register(body.into_command()).await?;

    Ok(ApiSuccess::with_message(
        StatusCode::CREATED,
        AuthResponseData {
            user: (&session.user).into(),
            token: session.token,
        },
        "User registered successfully",
    ))
}

/// HTTP request body for registration.
///
/// Fields are optional here so that a missing field is reported as a
/// validation error rather than a deserialization failure.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl RegisterRequest {
    fn into_command(self) -> RegisterCommand {
        RegisterCommand::new(
            self.email.unwrap_or_default(),
            self.password.unwrap_or_default(),
            self.name.unwrap_or_default(),
        )
    }
}
