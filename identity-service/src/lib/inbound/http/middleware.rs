use async_trait::async_trait;
use auth::AuthDecision;
use auth::TokenSubject;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::AUTHENTICATION_REQUIRED;
use crate::inbound::http::router::AppState;

pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");
pub const USER_EMAIL_HEADER: HeaderName = HeaderName::from_static("x-user-email");
pub const USER_NAME_HEADER: HeaderName = HeaderName::from_static("x-user-name");

/// Identity verified by the gate, read back from the forwarded identity
/// headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

impl From<TokenSubject> for AuthenticatedUser {
    fn from(subject: TokenSubject) -> Self {
        Self {
            user_id: subject.id,
            email: subject.email,
            name: subject.name,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &HeaderName| {
            parts
                .headers
                .get(name)
                .and_then(|value| String::from_utf8(value.as_bytes().to_vec()).ok())
                .ok_or_else(|| ApiError::Unauthorized(AUTHENTICATION_REQUIRED.to_string()))
        };

        Ok(Self {
            user_id: header(&USER_ID_HEADER)?,
            email: header(&USER_EMAIL_HEADER)?,
            name: header(&USER_NAME_HEADER)?,
        })
    }
}

/// Middleware applying the access gate to every request.
///
/// Client-supplied identity headers are always dropped; they are only ever
/// set from a verified token, so handlers can trust them.
pub async fn gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    for header in [USER_ID_HEADER, USER_EMAIL_HEADER, USER_NAME_HEADER] {
        req.headers_mut().remove(header);
    }

    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let decision = state.gate.decide(req.uri().path(), authorization);

    match decision {
        AuthDecision::Allow {
            identity: Some(identity),
        } => {
            if let Err(response) = attach_identity(&mut req, identity.into()) {
                return response;
            }
            next.run(req).await
        }
        AuthDecision::Allow { identity: None } => next.run(req).await,
        AuthDecision::Deny => {
            tracing::debug!(path = %req.uri().path(), "Unauthenticated request denied");
            ApiError::Unauthorized(AUTHENTICATION_REQUIRED.to_string()).into_response()
        }
        AuthDecision::RedirectToLogin { location } | AuthDecision::RedirectHome { location } => {
            Redirect::temporary(&location).into_response()
        }
    }
}

fn attach_identity(req: &mut Request, user: AuthenticatedUser) -> Result<(), Response> {
    let headers = [
        (USER_ID_HEADER, &user.user_id),
        (USER_EMAIL_HEADER, &user.email),
        (USER_NAME_HEADER, &user.name),
    ]
    .map(|(name, value)| {
        HeaderValue::from_bytes(value.as_bytes())
            .map(|value| (name, value))
            .map_err(|e| {
                ApiError::InternalServerError(format!("Identity header not encodable: {}", e))
                    .into_response()
            })
    });

    for header in headers {
        let (name, value) = header?;
        req.headers_mut().insert(name, value);
    }

    Ok(())
}
