//! Response DTOs for the Gatepost web API.

use serde::Serialize;

use crate::member::Member;
use crate::post::Post;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Create a new paginated response.
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            data,
            meta: PaginationMeta {
                page,
                per_page,
                total,
            },
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a new message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Member information in responses. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct MemberInfo {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Profile picture path.
    pub picture: String,
}

impl From<&Member> for MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            email: member.email.clone(),
            name: member.name.clone(),
            picture: member.picture.clone(),
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// Member information.
    pub member: MemberInfo,
}

/// Token refresh response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token.
    pub access_token: String,
    /// New refresh token.
    pub refresh_token: String,
    /// Expiry in seconds.
    pub expires_in: u64,
}

/// Current member response (for /api/members/me).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Profile picture path.
    pub picture: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Availability check response.
#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    /// Whether the value is already taken.
    pub exists: bool,
}

/// Verification code check response.
#[derive(Debug, Serialize)]
pub struct VerificationCheckResponse {
    /// Whether the code matched.
    pub verified: bool,
    /// Human-readable message.
    pub message: String,
}

/// Post in responses. The internal id never leaves the server.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// External code used in URLs.
    pub code: String,
    /// Owner email.
    pub owner_email: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// View counter.
    pub view_count: i64,
    /// 0 = public listing, 1 = code-only.
    pub read_permission: i64,
    /// 0 = members only, 1 = anonymous allowed.
    pub write_permission: i64,
    /// Creation timestamp.
    pub start_date: String,
    /// End of the posting window, if bounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            code: post.code.clone(),
            owner_email: post.owner_email.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            view_count: post.view_count,
            read_permission: post.read_permission,
            write_permission: post.write_permission,
            start_date: post.start_date.clone(),
            end_date: post.end_date.clone(),
        }
    }
}
