//! GraphQL data types for the feed

use chrono::{DateTime, Utc};
use juniper::GraphQLObject;
use uuid::Uuid;

use crate::common::{Cursor, PageInfo};
use crate::domains::feed::models::FeedPost;

/// GraphQL type for a feed post
#[derive(Debug, Clone, GraphQLObject)]
pub struct FeedPostData {
    pub id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cursor: String,
}

impl From<FeedPost> for FeedPostData {
    fn from(post: FeedPost) -> Self {
        Self {
            cursor: Cursor::encode_uuid(post.id.into_uuid()),
            id: post.id.into_uuid(),
            author_id: post.author_id.into_uuid(),
            body: post.body,
            pinned: post.pinned,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Paginated feed connection. Pinned posts ride along on the first page
/// and render above the stream.
#[derive(Debug, Clone, GraphQLObject)]
pub struct FeedConnection {
    pub pinned: Vec<FeedPostData>,
    pub nodes: Vec<FeedPostData>,
    pub page_info: PageInfo,
}
