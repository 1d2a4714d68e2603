//! GraphQL query resolvers for the feed

use juniper::{FieldError, FieldResult};

use crate::common::{build_page_info, trim_results, PaginationArgs};
use crate::domains::feed::data::{FeedConnection, FeedPostData};
use crate::domains::feed::models::FeedPost;
use crate::server::graphql::context::GraphQLContext;

/// The company feed, pinned posts first, cursor-paginated
pub async fn feed(
    ctx: &GraphQLContext,
    first: Option<i32>,
    after: Option<String>,
) -> FieldResult<FeedConnection> {
    ctx.state().require_auth()?;

    let args = PaginationArgs {
        first,
        after,
        last: None,
        before: None,
    };
    let validated = args
        .validate()
        .map_err(|e| FieldError::new(e, juniper::Value::null()))?;

    let rows = FeedPost::find_paginated(&validated, &ctx.db_pool).await?;
    let (rows, has_more) = trim_results(rows, validated.limit);

    // Pinned posts only accompany the first page.
    let pinned = if validated.cursor.is_none() {
        FeedPost::find_pinned(&ctx.db_pool)
            .await?
            .into_iter()
            .map(FeedPostData::from)
            .collect()
    } else {
        Vec::new()
    };

    let nodes: Vec<FeedPostData> = rows.into_iter().map(FeedPostData::from).collect();
    let page_info = build_page_info(
        has_more,
        &validated,
        nodes.first().map(|n| n.cursor.clone()),
        nodes.last().map(|n| n.cursor.clone()),
    );

    Ok(FeedConnection {
        pinned,
        nodes,
        page_info,
    })
}
