use std::sync::Arc;

use auth::AccessGate;
use auth::TokenService;
use identity_service::config::Config;
use identity_service::domain::authentication::service::AuthService;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        protected_prefixes = ?config.routes.protected_prefixes,
        auth_page_prefixes = ?config.routes.auth_page_prefixes,
        "Configuration loaded"
    );

    let tokens = Arc::new(TokenService::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::hours(config.jwt.expiration_hours),
    )?);

    let user_repository = Arc::new(InMemoryUserRepository::new());
    tracing::info!(store = "in-memory", "User store ready");

    let auth_service = Arc::new(
        AuthService::new(Arc::clone(&user_repository), Arc::clone(&tokens))
            .with_password_policy(config.password_policy.to_policy()),
    );
    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let gate = Arc::new(AccessGate::new(Arc::clone(&tokens), config.routes.clone()));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, user_service, gate);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
