//! Test helpers for web API integration tests.

use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use serde_json::{json, Value};

use gatepost::verification::Mailer;
use gatepost::web::handlers::AppState;
use gatepost::web::middleware::JwtState;
use gatepost::web::router::{create_health_router, create_router};
use gatepost::Database;

/// Password satisfying the registration policy.
pub const TEST_PASSWORD: &str = "Passw0rd!";

/// Mailer that records every dispatched verification code.
pub struct TestMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl TestMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Last code sent to the given address.
    pub fn code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Mailer for TestMailer {
    fn send_verification_code(&self, to: &str, code: &str) -> gatepost::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

/// Create a test server with an in-memory database and recording mailer.
pub async fn create_test_server() -> (TestServer, Arc<Database>, Arc<TestMailer>) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );
    let mailer = Arc::new(TestMailer::new());

    let jwt_secret = "test-secret-key-for-testing-only";
    let app_state = Arc::new(AppState::new(
        db.clone(),
        mailer.clone(),
        jwt_secret,
        900,
        7,
    ));
    let jwt_state = Arc::new(JwtState::new(jwt_secret));

    let router = create_router(app_state, jwt_state, &[]).merge(create_health_router());
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db, mailer)
}

/// Run the full verified signup flow for an email.
pub async fn register_member(
    server: &TestServer,
    mailer: &TestMailer,
    email: &str,
    name: &str,
) -> Value {
    server
        .post("/api/signup/send-email-verification-code")
        .json(&json!({ "email": email }))
        .await
        .assert_status_ok();

    let code = mailer.code_for(email).expect("no code dispatched");

    server
        .post("/api/signup/check-verification-code")
        .json(&json!({ "email": email, "code": code }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/signup")
        .json(&json!({
            "email": email,
            "password": TEST_PASSWORD,
            "name": name
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()
}

/// Login and return the response body (tokens under data).
pub async fn login_member(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()
}

/// Register, login, and return the access token.
pub async fn register_and_login(
    server: &TestServer,
    mailer: &TestMailer,
    email: &str,
    name: &str,
) -> String {
    register_member(server, mailer, email, name).await;
    let body = login_member(server, email, TEST_PASSWORD).await;
    body["data"]["access_token"]
        .as_str()
        .expect("no access token")
        .to_string()
}
