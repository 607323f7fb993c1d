//! Member lifecycle service for Gatepost.
//!
//! Registration, password change, unregistration, and existence predicates.
//! Every operation takes the caller's identity explicitly; nothing is
//! resolved from ambient request state.

use thiserror::Error;
use tracing::info;

use crate::auth::{hash_password, validate_password, verify_password, PasswordError};
use crate::db::DbPool;
use crate::member::repository::MemberRepository;
use crate::member::types::{Member, NewMember};
use crate::verification::repository::EmailVerificationRepository;
use crate::GatepostError;

/// Registration-specific errors.
///
/// Checks run in a fixed order and fail fast, so a request with several
/// problems reports the first one.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Email already belongs to a member.
    #[error("email is already registered")]
    AlreadyRegistered,

    /// Email lacks an `@`.
    #[error("invalid email format")]
    InvalidEmailFormat,

    /// Display name already taken.
    #[error("name is already taken")]
    NameTaken,

    /// Password fails the signup policy.
    #[error("invalid password: {0}")]
    InvalidPassword(#[from] PasswordError),

    /// A required input is missing.
    #[error("missing required input")]
    MissingInput,

    /// No verified email verification record exists for the email.
    #[error("email is not verified")]
    EmailNotVerified,

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Errors for password change and unregistration.
#[derive(Error, Debug)]
pub enum AccountError {
    /// A required input is missing.
    #[error("missing required input")]
    MissingInput,

    /// Current password does not match the stored hash.
    #[error("current password is incorrect")]
    WrongCurrentPassword,

    /// New password and confirmation differ.
    #[error("new passwords do not match")]
    PasswordMismatch,

    /// New password fails the signup policy.
    #[error("invalid password: {0}")]
    InvalidPassword(PasswordError),

    /// Password does not match on unregistration.
    #[error("password is incorrect")]
    WrongPassword,

    /// Member record no longer exists.
    #[error("member not found")]
    MemberNotFound,

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

fn db_err(e: GatepostError) -> RegistrationError {
    RegistrationError::Database(e.to_string())
}

/// Service for member lifecycle operations.
pub struct MemberService<'a> {
    pool: &'a DbPool,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Register a new member.
    ///
    /// Validates, in order: email not registered, email format, name not
    /// taken, password policy, inputs present, and a verified
    /// EmailVerification record for the email. On success the password is
    /// hashed and the member persisted.
    ///
    /// A registration racing another for the same email or name loses at
    /// the store's uniqueness constraint and surfaces as the corresponding
    /// error.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Member, RegistrationError> {
        let members = MemberRepository::new(self.pool);

        if members.email_exists(email).await.map_err(db_err)? {
            return Err(RegistrationError::AlreadyRegistered);
        }

        if !email.contains('@') {
            return Err(RegistrationError::InvalidEmailFormat);
        }

        if members.name_exists(name).await.map_err(db_err)? {
            return Err(RegistrationError::NameTaken);
        }

        validate_password(password)?;

        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(RegistrationError::MissingInput);
        }

        let verifications = EmailVerificationRepository::new(self.pool);
        let verification = verifications
            .get_by_email(email)
            .await
            .map_err(db_err)?
            .ok_or(RegistrationError::EmailNotVerified)?;
        if !verification.verified {
            return Err(RegistrationError::EmailNotVerified);
        }

        let password_hash = hash_password(password)?;

        let member = members
            .create(&NewMember::new(email, password_hash, name))
            .await
            .map_err(|e| match e {
                // Concurrent registration lost the race on a unique column
                GatepostError::Conflict(msg) if msg.contains("name") => {
                    RegistrationError::NameTaken
                }
                GatepostError::Conflict(_) => RegistrationError::AlreadyRegistered,
                other => RegistrationError::Database(other.to_string()),
            })?;

        info!("Registered new member: {}", member.email);
        Ok(member)
    }

    /// Change a member's password.
    ///
    /// On success the caller's sessions must be terminated; the boundary
    /// layer acts on that by revoking the member's refresh tokens.
    pub async fn change_password(
        &self,
        member: &Member,
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AccountError> {
        if old_password.is_empty() || new_password.is_empty() || confirm_password.is_empty() {
            return Err(AccountError::MissingInput);
        }

        verify_password(old_password, &member.password)
            .map_err(|_| AccountError::WrongCurrentPassword)?;

        if new_password != confirm_password {
            return Err(AccountError::PasswordMismatch);
        }

        validate_password(new_password).map_err(AccountError::InvalidPassword)?;

        let password_hash = hash_password(new_password)
            .map_err(|e| AccountError::Database(e.to_string()))?;

        let updated = MemberRepository::new(self.pool)
            .update_password(&member.email, &password_hash)
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        if !updated {
            return Err(AccountError::MemberNotFound);
        }

        info!("Password changed for member: {}", member.email);
        Ok(())
    }

    /// Delete a member account.
    ///
    /// Owned posts are removed by cascade. As with password change, the
    /// boundary layer terminates the caller's sessions afterwards.
    pub async fn unregister(&self, member: &Member, password: &str) -> Result<(), AccountError> {
        if password.is_empty() {
            return Err(AccountError::MissingInput);
        }

        verify_password(password, &member.password).map_err(|_| AccountError::WrongPassword)?;

        let deleted = MemberRepository::new(self.pool)
            .delete(&member.email)
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        if !deleted {
            return Err(AccountError::MemberNotFound);
        }

        info!("Member unregistered: {}", member.email);
        Ok(())
    }

    /// Check if an email is already registered. No side effects.
    pub async fn email_exists(&self, email: &str) -> crate::Result<bool> {
        MemberRepository::new(self.pool).email_exists(email).await
    }

    /// Check if a display name is already taken. No side effects.
    pub async fn name_exists(&self, name: &str) -> crate::Result<bool> {
        MemberRepository::new(self.pool).name_exists(name).await
    }
}
