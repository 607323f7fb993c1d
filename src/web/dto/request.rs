//! Request DTOs for the Gatepost web API.

use serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "null".
///
/// Absent deserializes to `None`, an explicit `null` to `Some(None)`,
/// a value to `Some(Some(value))`. Use with `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Member email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Logout request.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to invalidate.
    pub refresh_token: String,
}

/// Token refresh request.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Signup request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Display name.
    pub name: String,
}

/// Verification code request (send and resend).
#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    /// Email address.
    pub email: String,
}

/// Verification code check request.
#[derive(Debug, Deserialize)]
pub struct CheckCodeRequest {
    /// Email address.
    pub email: String,
    /// Submitted 6-digit code.
    pub code: String,
}

/// Email availability check request.
#[derive(Debug, Deserialize)]
pub struct CheckEmailRequest {
    /// Email address.
    pub email: String,
}

/// Name availability check request.
#[derive(Debug, Deserialize)]
pub struct CheckNameRequest {
    /// Display name.
    pub name: String,
}

/// Password change request.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password.
    pub current_password: String,
    /// New password.
    pub new_password: String,
    /// New password, repeated.
    pub confirm_password: String,
}

/// Unregister request.
#[derive(Debug, Deserialize)]
pub struct UnregisterRequest {
    /// Current password.
    pub password: String,
}

/// Post creation request.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    /// Title, 1 to 255 characters.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// 0 = public listing, 1 = code-only.
    #[serde(default)]
    pub read_permission: i64,
    /// 0 = members only, 1 = anonymous allowed.
    #[serde(default)]
    pub write_permission: i64,
    /// Optional end of the posting window.
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Partial post update request.
///
/// Fields left out of the JSON body are not touched. For `end_date` an
/// explicit `null` clears the value.
#[derive(Debug, Deserialize, Default)]
pub struct UpdatePostRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New body text.
    #[serde(default)]
    pub content: Option<String>,
    /// New read permission flag.
    #[serde(default)]
    pub read_permission: Option<i64>,
    /// New write permission flag.
    #[serde(default)]
    pub write_permission: Option<i64>,
    /// New end date; `null` makes the post unbounded.
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<String>>,
}

/// Default page number.
fn default_page() -> u32 {
    1
}

/// Default page size.
fn default_per_page() -> u32 {
    20
}

/// Maximum page size.
const MAX_PER_PAGE: u32 = 100;

/// Translate 1-based page parameters to an SQL offset and limit.
///
/// The multiply is done in i64; a u32 page number times a capped
/// per_page cannot overflow there.
pub fn to_offset_limit(page: u32, per_page: u32) -> (i64, i64) {
    let page = i64::from(page.max(1));
    let per_page = i64::from(per_page.clamp(1, MAX_PER_PAGE));
    ((page - 1) * per_page, per_page)
}

/// Public post listing query.
///
/// Pagination fields are inlined; serde(flatten) does not survive the
/// query-string deserializer for numeric fields.
#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    /// Sort keyword: latest, oldest, views.
    #[serde(default)]
    pub sort: Option<String>,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page, capped at 100.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Own-post listing query.
#[derive(Debug, Deserialize)]
pub struct MyPostListQuery {
    /// Drop posts whose window has ended.
    #[serde(default)]
    pub exclude_ended: bool,
    /// Sort keyword: latest, oldest, views.
    #[serde(default)]
    pub sort: Option<String>,
    /// 1-based page number.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page, capped at 100.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}
