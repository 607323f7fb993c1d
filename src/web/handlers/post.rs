//! Post handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::post::{
    PostPatch, PostService, PostSort, Pagination, ReadPermission, WritePermission,
};
use crate::web::dto::{
    to_offset_limit, ApiResponse, CreatePostRequest, MessageResponse, MyPostListQuery,
    PaginatedResponse, PostListQuery, PostResponse, UpdatePostRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::auth::AppState;

fn parse_sort(sort: &Option<String>) -> PostSort {
    sort.as_deref().map(PostSort::parse).unwrap_or_default()
}

/// POST /api/posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), ApiError> {
    let post = PostService::new(state.db.pool())
        .create_post(
            &claims.sub,
            &req.title,
            &req.content,
            ReadPermission::from_i64(req.read_permission),
            WritePermission::from_i64(req.write_permission),
            req.end_date,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(PostResponse::from(&post))),
    ))
}

/// GET /api/posts - Public listing.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PostListQuery>,
) -> Result<Json<PaginatedResponse<PostResponse>>, ApiError> {
    let (offset, limit) = to_offset_limit(query.page, query.per_page);
    let page = PostService::new(state.db.pool())
        .get_posts(parse_sort(&query.sort), Pagination::new(offset, limit))
        .await?;

    let data = page.items.iter().map(PostResponse::from).collect();
    Ok(Json(PaginatedResponse::new(
        data,
        query.page.max(1),
        limit as u32,
        page.total as u64,
    )))
}

/// GET /api/posts/my - Posts owned by the caller.
pub async fn list_my_posts(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Query(query): Query<MyPostListQuery>,
) -> Result<Json<PaginatedResponse<PostResponse>>, ApiError> {
    let (offset, limit) = to_offset_limit(query.page, query.per_page);
    let page = PostService::new(state.db.pool())
        .get_my_posts(
            &claims.sub,
            query.exclude_ended,
            parse_sort(&query.sort),
            Pagination::new(offset, limit),
        )
        .await?;

    let data = page.items.iter().map(PostResponse::from).collect();
    Ok(Json(PaginatedResponse::new(
        data,
        query.page.max(1),
        limit as u32,
        page.total as u64,
    )))
}

/// GET /api/posts/{code} - Detail view. Counts a view per fetch.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let post = PostService::new(state.db.pool()).get_post(&code).await?;

    Ok(Json(ApiResponse::new(PostResponse::from(&post))))
}

/// PUT /api/posts/{code} - Partial update, owner only.
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(code): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let patch = PostPatch {
        title: req.title,
        content: req.content,
        read_permission: req.read_permission.map(ReadPermission::from_i64),
        write_permission: req.write_permission.map(WritePermission::from_i64),
        end_date: req.end_date,
    };

    let post = PostService::new(state.db.pool())
        .update_post(&code, &patch, &claims.sub)
        .await?;

    Ok(Json(ApiResponse::new(PostResponse::from(&post))))
}

/// DELETE /api/posts/{code} - Hard delete, owner only.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    PostService::new(state.db.pool())
        .delete_post(&code, &claims.sub)
        .await?;

    Ok(Json(ApiResponse::new(MessageResponse::new("Post deleted"))))
}
