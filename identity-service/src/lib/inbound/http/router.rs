use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use auth::AccessGate;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::protected::get_protected;
use super::handlers::protected::post_protected;
use super::handlers::register::register;
use super::handlers::ApiError;
use super::middleware::gate;
use crate::domain::authentication::service::AuthService;
use crate::domain::user::service::UserService;
use crate::outbound::repositories::InMemoryUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub user_service: Arc<UserService<InMemoryUserRepository>>,
    pub gate: Arc<AccessGate>,
}

pub fn create_router(
    auth_service: Arc<AuthService<InMemoryUserRepository>>,
    user_service: Arc<UserService<InMemoryUserRepository>>,
    gate_policy: Arc<AccessGate>,
) -> Router {
    let state = AppState {
        auth_service,
        user_service,
        gate: gate_policy,
    };

    let auth_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/protected", get(get_protected).post(post_protected))
        .route("/api/users", get(list_users))
        .route("/api/users/me", get(current_user));

    with_layers(auth_routes.merge(protected_routes), state)
}

/// Wrap routes in the gate, the panic boundary, tracing and CORS.
///
/// The gate wraps every route and the fallback, so unknown page paths are
/// still classified and redirected.
pub(crate) fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    routes
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), gate))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::InternalServerError(format!("Request handler panicked: {}", detail)).into_response()
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
