use std::sync::Arc;

use argon2::Params;
use auth::AccessGate;
use auth::PasswordHasher;
use auth::RouteTable;
use auth::TokenService;
use identity_service::domain::authentication::service::AuthService;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserRepository;
use serde_json::json;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub tokens: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application with the default route table
    pub async fn spawn() -> Self {
        Self::spawn_with_routes(RouteTable::default()).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_routes(routes: RouteTable) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let tokens = Arc::new(
            TokenService::new(TEST_SECRET, chrono::Duration::hours(24))
                .expect("Failed to create token service"),
        );
        let user_repository = Arc::new(InMemoryUserRepository::new());

        // Minimum Argon2 cost keeps the concurrent tests fast
        let password_hasher = PasswordHasher::with_params(
            Params::new(Params::MIN_M_COST, 1, 1, None).expect("Invalid Argon2 params"),
        );

        let auth_service = Arc::new(
            AuthService::new(Arc::clone(&user_repository), Arc::clone(&tokens))
                .with_password_hasher(password_hasher),
        );
        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let gate = Arc::new(AccessGate::new(Arc::clone(&tokens), routes));

        let router = create_router(auth_service, user_service, gate);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            tokens,
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

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user and return the response body
    pub async fn register(&self, email: &str, password: &str, name: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&json!({
                "email": email,
                "password": password,
                "name": name
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user and return the issued token
    pub async fn register_token(&self, email: &str, password: &str, name: &str) -> String {
        let body: serde_json::Value = self
            .register(email, password, name)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["token"]
            .as_str()
            .expect("Registration did not return a token")
            .to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
