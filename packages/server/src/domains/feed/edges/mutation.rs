//! GraphQL mutation resolvers for the feed

use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::FeedPostId;
use crate::domains::audit::models::AuditLog;
use crate::domains::feed::data::FeedPostData;
use crate::domains::feed::models::FeedPost;
use crate::server::graphql::context::GraphQLContext;

/// Publish a post to the company feed
pub async fn publish_post(ctx: &GraphQLContext, body: String) -> FieldResult<FeedPostData> {
    info!("publish_post mutation called");
    let employee_id = ctx.state().require_auth()?;

    if body.trim().is_empty() {
        return Err(FieldError::new(
            "Post body cannot be empty",
            juniper::Value::null(),
        ));
    }

    let post = FeedPost::create(employee_id, &body, &ctx.db_pool).await?;

    AuditLog::record(
        Some(employee_id),
        "feed.post_published",
        "feed_post",
        Some(post.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    Ok(FeedPostData::from(post))
}

/// Edit a post (author only)
pub async fn edit_post(ctx: &GraphQLContext, id: String, body: String) -> FieldResult<FeedPostData> {
    let employee_id = ctx.state().require_auth()?;

    let post_id = FeedPostId::parse(&id)?;
    let post = FeedPost::find_by_id(post_id, &ctx.db_pool).await?;
    if post.author_id != employee_id {
        return Err(FieldError::new(
            "Unauthorized: not your post",
            juniper::Value::null(),
        ));
    }
    if post.deleted_at.is_some() {
        return Err(FieldError::new(
            "Cannot edit a deleted post",
            juniper::Value::null(),
        ));
    }

    let post = FeedPost::update_body(post_id, &body, &ctx.db_pool).await?;
    Ok(FeedPostData::from(post))
}

/// Delete a post (author or admin; soft delete)
pub async fn delete_post(ctx: &GraphQLContext, id: String) -> FieldResult<FeedPostData> {
    info!("delete_post mutation called: {}", id);
    let employee_id = ctx.state().require_auth()?;

    let post_id = FeedPostId::parse(&id)?;
    let post = FeedPost::find_by_id(post_id, &ctx.db_pool).await?;
    if post.author_id != employee_id && !ctx.state().is_admin {
        return Err(FieldError::new(
            "Unauthorized: not your post",
            juniper::Value::null(),
        ));
    }

    let post = FeedPost::soft_delete(post_id, &ctx.db_pool).await?;

    AuditLog::record(
        Some(employee_id),
        "feed.post_deleted",
        "feed_post",
        Some(post.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    Ok(FeedPostData::from(post))
}

/// Pin a post to the top of the feed (admin only)
pub async fn pin_post(ctx: &GraphQLContext, id: String) -> FieldResult<FeedPostData> {
    set_pinned(ctx, id, true).await
}

/// Unpin a post (admin only)
pub async fn unpin_post(ctx: &GraphQLContext, id: String) -> FieldResult<FeedPostData> {
    set_pinned(ctx, id, false).await
}

async fn set_pinned(ctx: &GraphQLContext, id: String, pinned: bool) -> FieldResult<FeedPostData> {
    ctx.state().require_admin()?;

    let post_id = FeedPostId::parse(&id)?;
    let post = FeedPost::set_pinned(post_id, pinned, &ctx.db_pool).await?;
    Ok(FeedPostData::from(post))
}
