//! API error handling for the Gatepost web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::member::{AccountError, RegistrationError};
use crate::post::PostError;
use crate::verification::VerificationError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Forbidden (403).
    Forbidden,
    /// Not found (404).
    NotFound,
    /// Conflict (409).
    Conflict,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Create an unprocessable entity error.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnprocessableEntity, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<crate::GatepostError> for ApiError {
    fn from(err: crate::GatepostError) -> Self {
        match &err {
            crate::GatepostError::Auth(msg) => ApiError::unauthorized(msg.clone()),
            crate::GatepostError::NotFound(msg) => ApiError::not_found(format!("{msg} not found")),
            crate::GatepostError::Validation(msg) => ApiError::unprocessable(msg.clone()),
            crate::GatepostError::Permission(msg) => ApiError::forbidden(msg.clone()),
            crate::GatepostError::Conflict(msg) => ApiError::conflict(msg.clone()),
            _ => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<VerificationError> for ApiError {
    fn from(err: VerificationError) -> Self {
        match &err {
            VerificationError::AlreadyRegistered => ApiError::conflict(err.to_string()),
            VerificationError::InvalidEmailFormat => ApiError::bad_request(err.to_string()),
            VerificationError::NoPendingVerification | VerificationError::CodeExpired => {
                ApiError::bad_request(err.to_string())
            }
            VerificationError::Mail(_) | VerificationError::Database(_) => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match &err {
            RegistrationError::AlreadyRegistered | RegistrationError::NameTaken => {
                ApiError::conflict(err.to_string())
            }
            RegistrationError::InvalidEmailFormat | RegistrationError::MissingInput => {
                ApiError::bad_request(err.to_string())
            }
            RegistrationError::InvalidPassword(_) | RegistrationError::EmailNotVerified => {
                ApiError::unprocessable(err.to_string())
            }
            RegistrationError::Database(_) => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match &err {
            AccountError::MissingInput => ApiError::bad_request(err.to_string()),
            AccountError::WrongCurrentPassword | AccountError::WrongPassword => {
                ApiError::unauthorized(err.to_string())
            }
            AccountError::PasswordMismatch | AccountError::InvalidPassword(_) => {
                ApiError::unprocessable(err.to_string())
            }
            AccountError::MemberNotFound => ApiError::not_found(err.to_string()),
            AccountError::Database(_) => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        match &err {
            PostError::NotFound => ApiError::not_found(err.to_string()),
            PostError::Forbidden => ApiError::forbidden(err.to_string()),
            PostError::InvalidTitle => ApiError::unprocessable(err.to_string()),
            PostError::Database(_) => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::UnprocessableEntity.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_constructors() {
        assert_eq!(ApiError::bad_request("bad").code, ErrorCode::BadRequest);
        assert_eq!(
            ApiError::unauthorized("unauth").code,
            ErrorCode::Unauthorized
        );
        assert_eq!(ApiError::forbidden("forbid").code, ErrorCode::Forbidden);
        assert_eq!(ApiError::not_found("missing").code, ErrorCode::NotFound);
        assert_eq!(ApiError::conflict("dup").code, ErrorCode::Conflict);
        assert_eq!(
            ApiError::unprocessable("invalid").code,
            ErrorCode::UnprocessableEntity
        );
        assert_eq!(ApiError::internal("error").code, ErrorCode::InternalError);
    }

    #[test]
    fn test_service_error_mappings() {
        let err: ApiError = VerificationError::AlreadyRegistered.into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = RegistrationError::NameTaken.into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = RegistrationError::EmailNotVerified.into();
        assert_eq!(err.code, ErrorCode::UnprocessableEntity);

        let err: ApiError = AccountError::WrongCurrentPassword.into();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err: ApiError = PostError::Forbidden.into();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err: ApiError = PostError::NotFound.into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
