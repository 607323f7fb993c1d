//! Member repository for Gatepost.
//!
//! CRUD operations for members. Uniqueness of email and name is enforced by
//! the store; UNIQUE violations surface as [`GatepostError::Conflict`] so
//! concurrent registrations resolve in favor of the first writer.

use super::types::{Member, NewMember, DEFAULT_PICTURE};
use crate::db::DbPool;
use crate::{GatepostError, Result};

/// Map a sqlx error, turning UNIQUE violations into conflicts.
fn map_db_error(e: sqlx::Error) -> GatepostError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") {
        GatepostError::Conflict(msg)
    } else {
        GatepostError::Database(msg)
    }
}

/// Repository for member CRUD operations.
pub struct MemberRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new MemberRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new member in the database.
    ///
    /// Returns the created member. A duplicate email or name yields
    /// [`GatepostError::Conflict`].
    pub async fn create(&self, new_member: &NewMember) -> Result<Member> {
        let picture = new_member.picture.as_deref().unwrap_or(DEFAULT_PICTURE);

        sqlx::query("INSERT INTO members (email, password, name, picture) VALUES (?, ?, ?, ?)")
            .bind(&new_member.email)
            .bind(&new_member.password)
            .bind(&new_member.name)
            .bind(picture)
            .execute(self.pool)
            .await
            .map_err(map_db_error)?;

        self.get_by_email(&new_member.email)
            .await?
            .ok_or_else(|| GatepostError::NotFound("member".to_string()))
    }

    /// Get a member by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Member>> {
        let result = sqlx::query_as::<_, Member>(
            "SELECT email, password, name, picture, created_at FROM members WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Check if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE email = ?)")
                .bind(email)
                .fetch_one(self.pool)
                .await
                .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(exists)
    }

    /// Check if a display name is already taken.
    pub async fn name_exists(&self, name: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE name = ?)")
                .bind(name)
                .fetch_one(self.pool)
                .await
                .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(exists)
    }

    /// Replace a member's password hash.
    pub async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE members SET password = ? WHERE email = ?")
            .bind(password_hash)
            .bind(email)
            .execute(self.pool)
            .await
            .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a member by email.
    ///
    /// Owned posts and refresh tokens are removed by cascade.
    pub async fn delete(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM members WHERE email = ?")
            .bind(email)
            .execute(self.pool)
            .await
            .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
