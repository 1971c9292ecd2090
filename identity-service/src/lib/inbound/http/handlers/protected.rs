use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Example endpoint behind the gate: echoes the caller's identity.
pub async fn get_protected(
    user: AuthenticatedUser,
) -> Result<ApiSuccess<ProtectedResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: "This is a protected route".to_string(),
            user: user.into(),
            received_data: None,
            timestamp: Utc::now(),
        },
    ))
}

/// Example endpoint behind the gate: echoes the caller's identity and body.
pub async fn post_protected(
    user: AuthenticatedUser,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<ApiSuccess<ProtectedResponseData>, ApiError> {
    let Json(body) = body?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: "Data received successfully".to_string(),
            user: user.into(),
            received_data: Some(body),
            timestamp: Utc::now(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtectedResponseData {
    pub message: String,
    pub user: IdentityData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<AuthenticatedUser> for IdentityData {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.user_id,
            email: user.email,
            name: user.name,
        }
    }
}
