//! Email verification engine for Gatepost.
//!
//! Generates, stores, expires, and validates one-time signup codes. Expiry
//! is evaluated by wall-clock comparison at check time; there is no sweep.

use chrono::{Duration, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::db::{format_datetime, DbPool};
use crate::member::repository::MemberRepository;
use crate::verification::mailer::Mailer;
use crate::verification::repository::EmailVerificationRepository;
use crate::verification::types::{EmailVerification, CODE_LENGTH, CODE_TTL_SECS};
use crate::GatepostError;

/// Verification engine errors.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// Email already belongs to a member.
    #[error("email is already registered")]
    AlreadyRegistered,

    /// Email lacks an `@`.
    #[error("invalid email format")]
    InvalidEmailFormat,

    /// No verification record exists for the email.
    #[error("no pending verification for this email")]
    NoPendingVerification,

    /// The stored code is past its expiry.
    #[error("verification code has expired")]
    CodeExpired,

    /// Outbound mail dispatch failed.
    #[error("failed to send verification mail: {0}")]
    Mail(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

fn db_err(e: GatepostError) -> VerificationError {
    VerificationError::Database(e.to_string())
}

/// Generate a uniform-random numeric code. Leading zeros are allowed.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Service for the email verification lifecycle.
pub struct VerificationService<'a> {
    pool: &'a DbPool,
    mailer: &'a dyn Mailer,
}

impl<'a> VerificationService<'a> {
    /// Create a new VerificationService.
    pub fn new(pool: &'a DbPool, mailer: &'a dyn Mailer) -> Self {
        Self { pool, mailer }
    }

    /// Build a fresh record for the email: new code, expiry 3 minutes out,
    /// unverified.
    fn fresh_record(email: &str) -> EmailVerification {
        let now = Utc::now();
        EmailVerification {
            email: email.to_string(),
            code: generate_code(),
            created_at: format_datetime(now),
            expires_at: format_datetime(now + Duration::seconds(CODE_TTL_SECS)),
            verified: false,
        }
    }

    /// Request a verification code for a new signup.
    ///
    /// Fails if the email is already registered or malformed; otherwise
    /// upserts a fresh record and dispatches the code.
    pub async fn request_code(&self, email: &str) -> Result<(), VerificationError> {
        let members = MemberRepository::new(self.pool);
        if members.email_exists(email).await.map_err(db_err)? {
            return Err(VerificationError::AlreadyRegistered);
        }

        if !email.contains('@') {
            return Err(VerificationError::InvalidEmailFormat);
        }

        let record = Self::fresh_record(email);
        EmailVerificationRepository::new(self.pool)
            .upsert(&record)
            .await
            .map_err(db_err)?;

        self.mailer
            .send_verification_code(email, &record.code)
            .map_err(|e| VerificationError::Mail(e.to_string()))?;

        info!("Verification code issued for {}", email);
        Ok(())
    }

    /// Regenerate and resend the code for an email with a pending record.
    ///
    /// The record is overwritten in place, including the verified flag: a
    /// previously verified address must check the new code again.
    pub async fn resend_code(&self, email: &str) -> Result<(), VerificationError> {
        let repo = EmailVerificationRepository::new(self.pool);
        if repo.get_by_email(email).await.map_err(db_err)?.is_none() {
            return Err(VerificationError::NoPendingVerification);
        }

        let record = Self::fresh_record(email);
        repo.upsert(&record).await.map_err(db_err)?;

        self.mailer
            .send_verification_code(email, &record.code)
            .map_err(|e| VerificationError::Mail(e.to_string()))?;

        info!("Verification code resent for {}", email);
        Ok(())
    }

    /// Check a submitted code against the stored record.
    ///
    /// Returns whether the code matched. On a match the record transitions
    /// to verified; re-checking a matching, unexpired code is idempotent.
    pub async fn check_code(&self, email: &str, code: &str) -> Result<bool, VerificationError> {
        let repo = EmailVerificationRepository::new(self.pool);
        let record = repo
            .get_by_email(email)
            .await
            .map_err(db_err)?
            .ok_or(VerificationError::NoPendingVerification)?;

        if record.is_expired_at(Utc::now()) {
            return Err(VerificationError::CodeExpired);
        }

        let matched = record.code == code;
        if matched {
            repo.set_verified(email).await.map_err(db_err)?;
            info!("Email verified: {}", email);
        }

        Ok(matched)
    }
}
