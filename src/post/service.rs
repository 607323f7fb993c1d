//! Post service for Gatepost.
//!
//! High-level post operations with ownership checks and pagination.

use thiserror::Error;
use tracing::info;

use super::repository::PostRepository;
use super::types::{NewPost, Post, PostPatch, PostSort, ReadPermission, WritePermission};
use crate::db::DbPool;
use crate::GatepostError;

/// Maximum length for post titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 255;

/// Post operation errors.
#[derive(Error, Debug)]
pub enum PostError {
    /// No post with the given code.
    #[error("post not found")]
    NotFound,

    /// Requester is not the owner.
    #[error("only the owner may modify this post")]
    Forbidden,

    /// Title missing or too long.
    #[error("title must be 1 to {MAX_TITLE_LENGTH} characters")]
    InvalidTitle,

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

fn db_err(e: GatepostError) -> PostError {
    PostError::Database(e.to_string())
}

/// Validate a title string.
fn validate_title(title: &str) -> Result<(), PostError> {
    let char_count = title.chars().count();
    if title.trim().is_empty() || char_count > MAX_TITLE_LENGTH {
        return Err(PostError::InvalidTitle);
    }
    Ok(())
}

/// Pagination parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination {
    /// Number of items to skip.
    pub offset: i64,
    /// Maximum number of items to return.
    pub limit: i64,
}

impl Pagination {
    /// Create new pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }
}

/// Result of a paginated query.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items (across all pages).
    pub total: i64,
    /// Current offset.
    pub offset: i64,
    /// Limit used for this query.
    pub limit: i64,
}

impl<T> PaginatedResult<T> {
    /// Check if there are more items after this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }
}

/// Service for the post lifecycle.
pub struct PostService<'a> {
    pool: &'a DbPool,
}

impl<'a> PostService<'a> {
    /// Create a new PostService.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a post owned by the given member.
    ///
    /// Titles may repeat; only the generated code is unique.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_post(
        &self,
        owner_email: &str,
        title: &str,
        content: &str,
        read_permission: ReadPermission,
        write_permission: WritePermission,
        end_date: Option<String>,
    ) -> Result<Post, PostError> {
        validate_title(title)?;

        let post = PostRepository::new(self.pool)
            .create(&NewPost {
                owner_email: owner_email.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                read_permission,
                write_permission,
                end_date,
            })
            .await
            .map_err(db_err)?;

        info!("Post created: {} by {}", post.code, owner_email);
        Ok(post)
    }

    /// Look up a post and verify the requester owns it.
    async fn get_owned(&self, code: &str, requester_email: &str) -> Result<Post, PostError> {
        let post = PostRepository::new(self.pool)
            .get_by_code(code)
            .await
            .map_err(db_err)?
            .ok_or(PostError::NotFound)?;

        if post.owner_email != requester_email {
            return Err(PostError::Forbidden);
        }

        Ok(post)
    }

    /// Apply a partial update to an owned post.
    pub async fn update_post(
        &self,
        code: &str,
        patch: &PostPatch,
        requester_email: &str,
    ) -> Result<Post, PostError> {
        self.get_owned(code, requester_email).await?;

        if let Some(ref title) = patch.title {
            validate_title(title)?;
        }

        let updated = PostRepository::new(self.pool)
            .update(code, patch)
            .await
            .map_err(db_err)?
            .ok_or(PostError::NotFound)?;

        info!("Post updated: {}", code);
        Ok(updated)
    }

    /// Delete an owned post.
    pub async fn delete_post(&self, code: &str, requester_email: &str) -> Result<(), PostError> {
        self.get_owned(code, requester_email).await?;

        let deleted = PostRepository::new(self.pool)
            .delete_by_code(code)
            .await
            .map_err(db_err)?;
        if !deleted {
            return Err(PostError::NotFound);
        }

        info!("Post deleted: {}", code);
        Ok(())
    }

    /// Publicly readable posts, ended ones excluded.
    pub async fn get_posts(
        &self,
        sort: PostSort,
        page: Pagination,
    ) -> Result<PaginatedResult<Post>, PostError> {
        let repo = PostRepository::new(self.pool);
        let items = repo
            .list_public(sort, page.offset, page.limit)
            .await
            .map_err(db_err)?;
        let total = repo.count_public().await.map_err(db_err)?;

        Ok(PaginatedResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }

    /// Posts owned by the given member, regardless of read permission.
    pub async fn get_my_posts(
        &self,
        owner_email: &str,
        exclude_ended: bool,
        sort: PostSort,
        page: Pagination,
    ) -> Result<PaginatedResult<Post>, PostError> {
        let repo = PostRepository::new(self.pool);
        let items = repo
            .list_by_owner(owner_email, exclude_ended, sort, page.offset, page.limit)
            .await
            .map_err(db_err)?;
        let total = repo
            .count_by_owner(owner_email, exclude_ended)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        })
    }

    /// Fetch a post by code for the detail view.
    ///
    /// Each fetch counts as one view; the returned post carries the
    /// bumped counter.
    pub async fn get_post(&self, code: &str) -> Result<Post, PostError> {
        let repo = PostRepository::new(self.pool);
        let bumped = repo.increment_view_count(code).await.map_err(db_err)?;
        if !bumped {
            return Err(PostError::NotFound);
        }

        repo.get_by_code(code)
            .await
            .map_err(db_err)?
            .ok_or(PostError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn insert_member(db: &Database, email: &str, name: &str) {
        sqlx::query("INSERT INTO members (email, password, name) VALUES (?, ?, ?)")
            .bind(email)
            .bind("hash")
            .bind(name)
            .execute(db.pool())
            .await
            .unwrap();
    }

    async fn create(service: &PostService<'_>, owner: &str, title: &str) -> Post {
        service
            .create_post(
                owner,
                title,
                "body",
                ReadPermission::Public,
                WritePermission::MembersOnly,
                None,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_validates_title() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        let service = PostService::new(db.pool());

        let result = service
            .create_post(
                "a@x.com",
                "",
                "body",
                ReadPermission::Public,
                WritePermission::MembersOnly,
                None,
            )
            .await;
        assert!(matches!(result, Err(PostError::InvalidTitle)));

        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        let result = service
            .create_post(
                "a@x.com",
                &long,
                "body",
                ReadPermission::Public,
                WritePermission::MembersOnly,
                None,
            )
            .await;
        assert!(matches!(result, Err(PostError::InvalidTitle)));

        let max = "x".repeat(MAX_TITLE_LENGTH);
        assert!(create(&service, "a@x.com", &max).await.title.len() == MAX_TITLE_LENGTH);
    }

    #[tokio::test]
    async fn test_duplicate_titles_allowed() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        let service = PostService::new(db.pool());

        let p1 = create(&service, "a@x.com", "Same").await;
        let p2 = create(&service, "a@x.com", "Same").await;
        assert_ne!(p1.code, p2.code);
    }

    #[tokio::test]
    async fn test_update_checks_ownership() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        insert_member(&db, "b@x.com", "Bob").await;
        let service = PostService::new(db.pool());

        let post = create(&service, "a@x.com", "Mine").await;

        let patch = PostPatch::new().with_title("Stolen");
        let result = service.update_post(&post.code, &patch, "b@x.com").await;
        assert!(matches!(result, Err(PostError::Forbidden)));

        let updated = service
            .update_post(&post.code, &PostPatch::new().with_title("Renamed"), "a@x.com")
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn test_update_validates_patched_title() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        let service = PostService::new(db.pool());

        let post = create(&service, "a@x.com", "Mine").await;
        let result = service
            .update_post(&post.code, &PostPatch::new().with_title("   "), "a@x.com")
            .await;
        assert!(matches!(result, Err(PostError::InvalidTitle)));
    }

    #[tokio::test]
    async fn test_update_missing_post() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        let service = PostService::new(db.pool());

        let result = service
            .update_post("no-such", &PostPatch::new().with_title("X"), "a@x.com")
            .await;
        assert!(matches!(result, Err(PostError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_checks_ownership() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        insert_member(&db, "b@x.com", "Bob").await;
        let service = PostService::new(db.pool());

        let post = create(&service, "a@x.com", "Mine").await;

        let result = service.delete_post(&post.code, "b@x.com").await;
        assert!(matches!(result, Err(PostError::Forbidden)));

        service.delete_post(&post.code, "a@x.com").await.unwrap();
        let result = service.delete_post(&post.code, "a@x.com").await;
        assert!(matches!(result, Err(PostError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_post_counts_views() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        let service = PostService::new(db.pool());

        let post = create(&service, "a@x.com", "Mine").await;

        let first = service.get_post(&post.code).await.unwrap();
        assert_eq!(first.view_count, 1);
        let second = service.get_post(&post.code).await.unwrap();
        assert_eq!(second.view_count, 2);

        let result = service.get_post("no-such").await;
        assert!(matches!(result, Err(PostError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_posts_pagination_metadata() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        let service = PostService::new(db.pool());

        for i in 0..3 {
            create(&service, "a@x.com", &format!("Post {i}")).await;
        }

        let page = service
            .get_posts(PostSort::Oldest, Pagination::new(0, 2))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 3);
        assert!(page.has_more());

        let page = service
            .get_posts(PostSort::Oldest, Pagination::new(2, 2))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_get_my_posts_includes_hidden() {
        let db = Database::open_in_memory().await.unwrap();
        insert_member(&db, "a@x.com", "Alice").await;
        let service = PostService::new(db.pool());

        service
            .create_post(
                "a@x.com",
                "Hidden",
                "body",
                ReadPermission::CodeOnly,
                WritePermission::MembersOnly,
                None,
            )
            .await
            .unwrap();

        let public = service
            .get_posts(PostSort::Latest, Pagination::new(0, 20))
            .await
            .unwrap();
        assert_eq!(public.total, 0);

        let mine = service
            .get_my_posts("a@x.com", false, PostSort::Latest, Pagination::new(0, 20))
            .await
            .unwrap();
        assert_eq!(mine.total, 1);
    }
}
