//! Email verification model for Gatepost.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::db::DATETIME_FORMAT;

/// Number of digits in a verification code.
pub const CODE_LENGTH: usize = 6;

/// Verification code time-to-live in seconds (3 minutes).
pub const CODE_TTL_SECS: i64 = 180;

/// Email verification record. One row per email; a resend overwrites the
/// code and expiry in place.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmailVerification {
    /// Email address (primary key).
    pub email: String,
    /// 6-digit numeric code, leading zeros allowed.
    pub code: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiry timestamp (created_at + 3 minutes).
    pub expires_at: String,
    /// Whether the code was matched before expiry.
    pub verified: bool,
}

impl EmailVerification {
    /// Check whether the code is expired at the given instant.
    ///
    /// Expiry is strict: a check exactly at `expires_at` is still valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match NaiveDateTime::parse_from_str(&self.expires_at, DATETIME_FORMAT) {
            Ok(expires) => now.naive_utc() > expires,
            // Unparseable expiry is treated as expired
            Err(_) => true,
        }
    }
}
