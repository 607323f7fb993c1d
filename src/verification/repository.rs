//! Email verification repository for Gatepost.

use super::types::EmailVerification;
use crate::db::DbPool;
use crate::{GatepostError, Result};

/// Repository for email verification records.
pub struct EmailVerificationRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> EmailVerificationRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert or overwrite the verification record for an email.
    ///
    /// There is no history; a resend replaces code, expiry, and verified
    /// flag in place. Concurrent writers are last-write-wins.
    pub async fn upsert(&self, record: &EmailVerification) -> Result<()> {
        sqlx::query(
            "INSERT INTO email_verifications (email, code, created_at, expires_at, verified)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(email) DO UPDATE SET
                 code = excluded.code,
                 created_at = excluded.created_at,
                 expires_at = excluded.expires_at,
                 verified = excluded.verified",
        )
        .bind(&record.email)
        .bind(&record.code)
        .bind(&record.created_at)
        .bind(&record.expires_at)
        .bind(record.verified)
        .execute(self.pool)
        .await
        .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(())
    }

    /// Get the verification record for an email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<EmailVerification>> {
        let result = sqlx::query_as::<_, EmailVerification>(
            "SELECT email, code, created_at, expires_at, verified
             FROM email_verifications WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Mark a record as verified.
    pub async fn set_verified(&self, email: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE email_verifications SET verified = 1 WHERE email = ?")
            .bind(email)
            .execute(self.pool)
            .await
            .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn record(email: &str, code: &str) -> EmailVerification {
        EmailVerification {
            email: email.to_string(),
            code: code.to_string(),
            created_at: "2026-01-01 00:00:00".to_string(),
            expires_at: "2026-01-01 00:03:00".to_string(),
            verified: false,
        }
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_overwrites() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = EmailVerificationRepository::new(db.pool());

        repo.upsert(&record("a@x.com", "111111")).await.unwrap();
        let stored = repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.code, "111111");

        repo.upsert(&record("a@x.com", "222222")).await.unwrap();
        let stored = repo.get_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.code, "222222");

        // Still a single row
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM email_verifications")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_upsert_resets_verified() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = EmailVerificationRepository::new(db.pool());

        repo.upsert(&record("a@x.com", "111111")).await.unwrap();
        repo.set_verified("a@x.com").await.unwrap();
        assert!(repo.get_by_email("a@x.com").await.unwrap().unwrap().verified);

        repo.upsert(&record("a@x.com", "222222")).await.unwrap();
        assert!(!repo.get_by_email("a@x.com").await.unwrap().unwrap().verified);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = EmailVerificationRepository::new(db.pool());

        assert!(repo.get_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_verified() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = EmailVerificationRepository::new(db.pool());

        assert!(!repo.set_verified("nobody@x.com").await.unwrap());

        repo.upsert(&record("a@x.com", "111111")).await.unwrap();
        assert!(repo.set_verified("a@x.com").await.unwrap());
        assert!(repo.get_by_email("a@x.com").await.unwrap().unwrap().verified);
    }
}
