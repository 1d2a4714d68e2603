//! Social feed posts.
//!
//! Posts are soft-deleted: `deleted_at` keeps the row for the audit trail
//! while hiding it from every feed query.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{EmployeeId, FeedPostId, ValidatedPaginationArgs};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeedPost {
    pub id: FeedPostId,
    pub author_id: EmployeeId,
    pub body: String,
    pub pinned: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeedPost {
    /// IDs are generated app-side as V7 so the primary key doubles as the
    /// pagination cursor.
    pub async fn create(author_id: EmployeeId, body: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO feed_posts (id, author_id, body) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(FeedPostId::new())
        .bind(author_id)
        .bind(body)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: FeedPostId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM feed_posts WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Feed page, newest first. V7 IDs are the cursor, so `id <` is the
    /// whole cursor predicate. Pinned posts come from `find_pinned` and sit
    /// above the paginated stream in the UI.
    pub async fn find_paginated(
        args: &ValidatedPaginationArgs,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let rows = if let Some(cursor) = args.cursor {
            sqlx::query_as::<_, Self>(
                r#"
                SELECT * FROM feed_posts
                WHERE deleted_at IS NULL AND id < $1
                ORDER BY id DESC
                LIMIT $2
                "#,
            )
            .bind(cursor)
            .bind(args.fetch_limit())
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as::<_, Self>(
                r#"
                SELECT * FROM feed_posts
                WHERE deleted_at IS NULL
                ORDER BY id DESC
                LIMIT $1
                "#,
            )
            .bind(args.fetch_limit())
            .fetch_all(pool)
            .await?
        };
        Ok(rows)
    }

    /// Pinned, non-deleted posts, newest first.
    pub async fn find_pinned(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM feed_posts
            WHERE deleted_at IS NULL AND pinned
            ORDER BY id DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_body(id: FeedPostId, body: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE feed_posts SET body = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(body)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn soft_delete(id: FeedPostId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE feed_posts SET deleted_at = now(), updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn set_pinned(id: FeedPostId, pinned: bool, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE feed_posts SET pinned = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(pinned)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
