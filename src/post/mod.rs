//! Post module for Gatepost.
//!
//! Time-boxed, code-addressed posts with per-post read/write visibility.

pub mod repository;
pub mod service;
pub mod types;

pub use repository::PostRepository;
pub use service::{PaginatedResult, Pagination, PostError, PostService, MAX_TITLE_LENGTH};
pub use types::{NewPost, Post, PostPatch, PostSort, ReadPermission, WritePermission};
