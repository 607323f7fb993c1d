//! Post repository for Gatepost.

use sqlx::QueryBuilder;
use uuid::Uuid;

use super::types::{NewPost, Post, PostPatch, PostSort};
use crate::db::{now_string, DbPool};
use crate::{GatepostError, Result};

const POST_COLUMNS: &str = "id, code, owner_email, title, content, view_count, \
     read_permission, write_permission, start_date, end_date";

/// Repository for post CRUD and listing queries.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Generates the external code and stamps start_date. Returns the
    /// stored row.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let code = Uuid::new_v4().to_string();
        let start_date = now_string();

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (code, owner_email, title, content,
                                read_permission, write_permission,
                                start_date, end_date)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&code)
        .bind(&new_post.owner_email)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(new_post.read_permission.as_i64())
        .bind(new_post.write_permission.as_i64())
        .bind(&start_date)
        .bind(&new_post.end_date)
        .fetch_one(self.pool)
        .await
        .map_err(|e| GatepostError::Database(e.to_string()))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| GatepostError::NotFound("post".to_string()))
    }

    /// Get a post by internal id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let result = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a post by external code.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Post>> {
        let result = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE code = ?"
        ))
        .bind(code)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Bump the view counter for a post.
    pub async fn increment_view_count(&self, code: &str) -> Result<bool> {
        let result =
            sqlx::query("UPDATE posts SET view_count = view_count + 1 WHERE code = ?")
                .bind(code)
                .execute(self.pool)
                .await
                .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Apply a partial update to a post by code.
    ///
    /// Only fields set in the patch are written. Returns the updated
    /// post, or None if the code does not exist.
    pub async fn update(&self, code: &str, patch: &PostPatch) -> Result<Option<Post>> {
        if patch.is_empty() {
            return self.get_by_code(code).await;
        }

        let mut builder = QueryBuilder::new("UPDATE posts SET ");
        let mut fields = builder.separated(", ");

        if let Some(ref title) = patch.title {
            fields.push("title = ").push_bind_unseparated(title);
        }
        if let Some(ref content) = patch.content {
            fields.push("content = ").push_bind_unseparated(content);
        }
        if let Some(perm) = patch.read_permission {
            fields
                .push("read_permission = ")
                .push_bind_unseparated(perm.as_i64());
        }
        if let Some(perm) = patch.write_permission {
            fields
                .push("write_permission = ")
                .push_bind_unseparated(perm.as_i64());
        }
        if let Some(ref end_date) = patch.end_date {
            fields
                .push("end_date = ")
                .push_bind_unseparated(end_date.clone());
        }

        builder.push(" WHERE code = ").push_bind(code);

        let result = builder
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| GatepostError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_code(code).await
    }

    /// Delete a post by code. Returns whether a row was removed.
    pub async fn delete_by_code(&self, code: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE code = ?")
            .bind(code)
            .execute(self.pool)
            .await
            .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Page of publicly readable, not-yet-ended posts.
    pub async fn list_public(
        &self,
        sort: PostSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE read_permission = 0
               AND (end_date IS NULL OR end_date > ?)
             ORDER BY {}
             LIMIT ? OFFSET ?",
            sort.order_by()
        );

        let posts = sqlx::query_as::<_, Post>(&sql)
            .bind(now_string())
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await
            .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(posts)
    }

    /// Count of publicly readable, not-yet-ended posts.
    pub async fn count_public(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts
             WHERE read_permission = 0
               AND (end_date IS NULL OR end_date > ?)",
        )
        .bind(now_string())
        .fetch_one(self.pool)
        .await
        .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(count)
    }

    /// Page of posts owned by the given member.
    pub async fn list_by_owner(
        &self,
        owner_email: &str,
        exclude_ended: bool,
        sort: PostSort,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Post>> {
        let ended_filter = if exclude_ended {
            " AND (end_date IS NULL OR end_date > ?)"
        } else {
            ""
        };
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts
             WHERE owner_email = ?{ended_filter}
             ORDER BY {}
             LIMIT ? OFFSET ?",
            sort.order_by()
        );

        let mut query = sqlx::query_as::<_, Post>(&sql).bind(owner_email);
        if exclude_ended {
            query = query.bind(now_string());
        }

        let posts = query
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await
            .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(posts)
    }

    /// Count of posts owned by the given member.
    pub async fn count_by_owner(&self, owner_email: &str, exclude_ended: bool) -> Result<i64> {
        let ended_filter = if exclude_ended {
            " AND (end_date IS NULL OR end_date > ?)"
        } else {
            ""
        };
        let sql =
            format!("SELECT COUNT(*) FROM posts WHERE owner_email = ?{ended_filter}");

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(owner_email);
        if exclude_ended {
            query = query.bind(now_string());
        }

        let count = query
            .fetch_one(self.pool)
            .await
            .map_err(|e| GatepostError::Database(e.to_string()))?;

        Ok(count)
    }
}
