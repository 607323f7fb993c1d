//! Signup and email verification handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::member::MemberService;
use crate::verification::VerificationService;
use crate::web::dto::{
    ApiResponse, CheckCodeRequest, CheckEmailRequest, CheckNameRequest, ExistsResponse,
    MemberInfo, MessageResponse, RegisterRequest, SendCodeRequest, VerificationCheckResponse,
};
use crate::web::error::ApiError;

use super::auth::AppState;

/// POST /api/signup - Register a new member.
///
/// Requires a verified email; login is a separate step.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MemberInfo>>), ApiError> {
    let member = MemberService::new(state.db.pool())
        .register(&req.email, &req.password, &req.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(MemberInfo::from(&member))),
    ))
}

/// POST /api/signup/send-email-verification-code
pub async fn send_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendCodeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    VerificationService::new(state.db.pool(), state.mailer.as_ref())
        .request_code(&req.email)
        .await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Verification code sent",
    ))))
}

/// POST /api/signup/resend-verification-code
pub async fn resend_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendCodeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    VerificationService::new(state.db.pool(), state.mailer.as_ref())
        .resend_code(&req.email)
        .await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "Verification code resent",
    ))))
}

/// POST /api/signup/check-verification-code
///
/// 200 with verified=true on a match, 401 with verified=false on a
/// mismatch. Absent or expired records are 400.
pub async fn check_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckCodeRequest>,
) -> Result<(StatusCode, Json<VerificationCheckResponse>), ApiError> {
    let verified = VerificationService::new(state.db.pool(), state.mailer.as_ref())
        .check_code(&req.email, &req.code)
        .await?;

    let (status, message) = if verified {
        (StatusCode::OK, "Email verified")
    } else {
        (StatusCode::UNAUTHORIZED, "Verification code does not match")
    };

    Ok((
        status,
        Json(VerificationCheckResponse {
            verified,
            message: message.to_string(),
        }),
    ))
}

/// POST /api/signup/check-email - Availability check, no side effects.
pub async fn check_email(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckEmailRequest>,
) -> Result<Json<ApiResponse<ExistsResponse>>, ApiError> {
    let exists = MemberService::new(state.db.pool())
        .email_exists(&req.email)
        .await?;

    Ok(Json(ApiResponse::new(ExistsResponse { exists })))
}

/// POST /api/signup/check-name - Availability check, no side effects.
pub async fn check_name(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckNameRequest>,
) -> Result<Json<ApiResponse<ExistsResponse>>, ApiError> {
    let exists = MemberService::new(state.db.pool())
        .name_exists(&req.name)
        .await?;

    Ok(Json(ApiResponse::new(ExistsResponse { exists })))
}
