//! Router configuration for the Gatepost web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    change_password, check_code, check_email, check_name, create_post, delete_post, get_post,
    list_my_posts, list_posts, login, logout, me, refresh, register, resend_code, send_code,
    unregister, update_post, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, JwtState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh));

    let signup_routes = Router::new()
        .route("/", post(register))
        .route("/send-email-verification-code", post(send_code))
        .route("/check-verification-code", post(check_code))
        .route("/resend-verification-code", post(resend_code))
        .route("/check-email", post(check_email))
        .route("/check-name", post(check_name));

    let member_routes = Router::new()
        .route("/me", get(me).delete(unregister))
        .route("/password", post(change_password));

    let post_routes = Router::new()
        .route("/", post(create_post).get(list_posts))
        .route("/my", get(list_my_posts))
        .route(
            "/:code",
            get(get_post).put(update_post).delete(delete_post),
        );

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/signup", signup_routes)
        .nest("/members", member_routes)
        .nest("/posts", post_routes);

    let jwt_state_for_middleware = jwt_state.clone();

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state_for_middleware.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
