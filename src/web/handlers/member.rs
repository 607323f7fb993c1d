//! Account management handlers for authenticated members.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::RefreshTokenRepository;
use crate::member::{Member, MemberRepository, MemberService};
use crate::web::dto::{
    ApiResponse, ChangePasswordRequest, MeResponse, MessageResponse, UnregisterRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::auth::AppState;

/// Resolve the claims subject to a stored member.
async fn current_member(state: &AppState, email: &str) -> Result<Member, ApiError> {
    MemberRepository::new(state.db.pool())
        .get_by_email(email)
        .await
        .map_err(|_| ApiError::internal("Database error"))?
        .ok_or_else(|| ApiError::unauthorized("Member not found"))
}

/// GET /api/members/me - Current member info.
pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<MeResponse>>, ApiError> {
    let member = current_member(&state, &claims.sub).await?;

    Ok(Json(ApiResponse::new(MeResponse {
        email: member.email,
        name: member.name,
        picture: member.picture,
        created_at: member.created_at,
    })))
}

/// POST /api/members/password - Change password.
///
/// All sessions are terminated on success; clients must log in again.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let member = current_member(&state, &claims.sub).await?;

    MemberService::new(state.db.pool())
        .change_password(
            &member,
            &req.current_password,
            &req.new_password,
            &req.confirm_password,
        )
        .await?;

    // The change only counts once every session is dead
    RefreshTokenRepository::new(state.db.pool())
        .revoke_all_for_member(&member.email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to revoke sessions for {}: {}", member.email, e);
            ApiError::internal("Failed to end sessions")
        })?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Password changed",
    ))))
}

/// DELETE /api/members/me - Unregister.
///
/// Owned posts go with the account; sessions are terminated.
pub async fn unregister(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<UnregisterRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let member = current_member(&state, &claims.sub).await?;

    // Deleting the member row cascades to posts and refresh tokens
    MemberService::new(state.db.pool())
        .unregister(&member, &req.password)
        .await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Account deleted",
    ))))
}
