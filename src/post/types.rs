//! Post model for Gatepost.

use serde::{Deserialize, Serialize};

/// Who may read a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadPermission {
    /// Visible in the public listing.
    Public,
    /// Reachable only by direct code.
    CodeOnly,
}

impl ReadPermission {
    /// Storage representation.
    pub fn as_i64(self) -> i64 {
        match self {
            ReadPermission::Public => 0,
            ReadPermission::CodeOnly => 1,
        }
    }

    /// Parse the storage representation. Unknown values default to
    /// the restrictive variant.
    pub fn from_i64(value: i64) -> Self {
        match value {
            0 => ReadPermission::Public,
            _ => ReadPermission::CodeOnly,
        }
    }
}

/// Who may write follow-ups to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WritePermission {
    /// Members only.
    MembersOnly,
    /// Anonymous contributions allowed.
    AnonymousAllowed,
}

impl WritePermission {
    /// Storage representation.
    pub fn as_i64(self) -> i64 {
        match self {
            WritePermission::MembersOnly => 0,
            WritePermission::AnonymousAllowed => 1,
        }
    }

    /// Parse the storage representation. Unknown values default to
    /// the restrictive variant.
    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => WritePermission::AnonymousAllowed,
            _ => WritePermission::MembersOnly,
        }
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    /// Newest first (start_date descending).
    #[default]
    Latest,
    /// Oldest first (start_date ascending).
    Oldest,
    /// Most viewed first.
    Views,
}

impl PostSort {
    /// Parse a sort keyword. Unknown keywords fall back to `Latest`.
    pub fn parse(s: &str) -> Self {
        match s {
            "oldest" => PostSort::Oldest,
            "views" => PostSort::Views,
            _ => PostSort::Latest,
        }
    }

    /// ORDER BY clause body for this sort. `id` breaks ties so pages
    /// are stable.
    pub fn order_by(self) -> &'static str {
        match self {
            PostSort::Latest => "start_date DESC, id DESC",
            PostSort::Oldest => "start_date ASC, id ASC",
            PostSort::Views => "view_count DESC, id DESC",
        }
    }
}

/// A post as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Internal sequential id.
    pub id: i64,
    /// External random code used in URLs.
    pub code: String,
    /// Owning member's email.
    pub owner_email: String,
    /// Title, 1 to 255 characters.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Number of detail fetches.
    pub view_count: i64,
    /// Read visibility flag, stored as 0 or 1.
    pub read_permission: i64,
    /// Write visibility flag, stored as 0 or 1.
    pub write_permission: i64,
    /// Creation timestamp, immutable.
    pub start_date: String,
    /// Optional end of the posting window. NULL means unbounded.
    pub end_date: Option<String>,
}

impl Post {
    /// Typed read permission.
    pub fn read_permission(&self) -> ReadPermission {
        ReadPermission::from_i64(self.read_permission)
    }

    /// Typed write permission.
    pub fn write_permission(&self) -> WritePermission {
        WritePermission::from_i64(self.write_permission)
    }
}

/// Data required to create a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner_email: String,
    pub title: String,
    pub content: String,
    pub read_permission: ReadPermission,
    pub write_permission: WritePermission,
    pub end_date: Option<String>,
}

/// Partial update for a post.
///
/// `None` leaves a field untouched. For `end_date` the outer Option is
/// presence and the inner Option carries the new value, so
/// `Some(None)` clears the end date while `None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub read_permission: Option<ReadPermission>,
    pub write_permission: Option<WritePermission>,
    pub end_date: Option<Option<String>>,
}

impl PostPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.read_permission.is_none()
            && self.write_permission.is_none()
            && self.end_date.is_none()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the read permission.
    pub fn with_read_permission(mut self, perm: ReadPermission) -> Self {
        self.read_permission = Some(perm);
        self
    }

    /// Set the write permission.
    pub fn with_write_permission(mut self, perm: WritePermission) -> Self {
        self.write_permission = Some(perm);
        self
    }

    /// Set or clear the end date.
    pub fn with_end_date(mut self, end_date: Option<String>) -> Self {
        self.end_date = Some(end_date);
        self
    }
}
