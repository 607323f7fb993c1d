//! Authentication handlers and shared application state.

use axum::{extract::State, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use crate::auth::verify_password;
use crate::db::{format_datetime, NewRefreshToken, RefreshTokenRepository};
use crate::member::MemberRepository;
use crate::verification::Mailer;
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, LogoutRequest, MemberInfo, RefreshRequest,
    RefreshResponse,
};
use crate::web::error::ApiError;
use crate::web::middleware::JwtClaims;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// Outbound mail dispatch.
    pub mailer: Arc<dyn Mailer>,
    /// JWT encoding key.
    pub encoding_key: EncodingKey,
    /// Access token expiry in seconds.
    pub access_token_expiry: u64,
    /// Refresh token expiry in days.
    pub refresh_token_expiry_days: u64,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: Arc<Database>,
        mailer: Arc<dyn Mailer>,
        jwt_secret: &str,
        access_expiry: u64,
        refresh_expiry_days: u64,
    ) -> Self {
        Self {
            db,
            mailer,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            access_token_expiry: access_expiry,
            refresh_token_expiry_days: refresh_expiry_days,
        }
    }

    /// Generate an access token for a member.
    pub fn generate_access_token(&self, email: &str, name: &str) -> Result<String, ApiError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = JwtClaims {
            sub: email.to_string(),
            name: name.to_string(),
            iat: now,
            exp: now + self.access_token_expiry,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode JWT: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }

    /// Generate a refresh token value.
    pub fn generate_refresh_token(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Store a refresh token for the member.
    pub async fn store_refresh_token(&self, email: &str, token: &str) -> Result<(), ApiError> {
        let expires_at = chrono::Utc::now()
            + chrono::Duration::days(self.refresh_token_expiry_days as i64);
        let new_token = NewRefreshToken {
            member_email: email.to_string(),
            token: token.to_string(),
            expires_at: format_datetime(expires_at),
        };

        RefreshTokenRepository::new(self.db.pool())
            .create(&new_token)
            .await
            .map_err(|e| {
                tracing::error!("Failed to store refresh token: {}", e);
                ApiError::internal("Failed to create session")
            })?;

        Ok(())
    }
}

/// POST /api/auth/login - Member login.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let member = MemberRepository::new(state.db.pool())
        .get_by_email(&req.email)
        .await
        .map_err(|e| {
            tracing::error!("Member lookup failed: {}", e);
            ApiError::internal("Database error")
        })?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    verify_password(&req.password, &member.password)
        .map_err(|_| ApiError::unauthorized("Invalid email or password"))?;

    let access_token = state.generate_access_token(&member.email, &member.name)?;
    let refresh_token = state.generate_refresh_token();
    state
        .store_refresh_token(&member.email, &refresh_token)
        .await?;

    let response = LoginResponse {
        access_token,
        refresh_token,
        expires_in: state.access_token_expiry,
        member: MemberInfo::from(&member),
    };

    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/auth/logout - Member logout.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LogoutRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    // Revoking an unknown token is a no-op, but a storage failure is not
    RefreshTokenRepository::new(state.db.pool())
        .revoke(&req.refresh_token)
        .await
        .map_err(|e| {
            tracing::error!("Failed to revoke refresh token: {}", e);
            ApiError::internal("Failed to end session")
        })?;

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/auth/refresh - Rotate the refresh token and issue a new
/// access token.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, ApiError> {
    let repo = RefreshTokenRepository::new(state.db.pool());

    let stored = repo
        .get_valid_token(&req.refresh_token)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired refresh token"))?;

    let member = MemberRepository::new(state.db.pool())
        .get_by_email(&stored.member_email)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::unauthorized("Member not found"))?;

    repo.revoke(&req.refresh_token)
        .await
        .map_err(|_| ApiError::internal("Database error"))?;

    let access_token = state.generate_access_token(&member.email, &member.name)?;
    let new_refresh_token = state.generate_refresh_token();
    state
        .store_refresh_token(&member.email, &new_refresh_token)
        .await?;

    let response = RefreshResponse {
        access_token,
        refresh_token: new_refresh_token,
        expires_in: state.access_token_expiry,
    };

    Ok(Json(ApiResponse::new(response)))
}
