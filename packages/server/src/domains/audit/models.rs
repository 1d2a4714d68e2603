//! Append-only audit log.
//!
//! Every state-changing mutation records an entry. Inserts are awaited at the
//! call site and a failure fails the mutation: the log must not silently
//! diverge from the data it describes.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{AuditEntryId, EmployeeId, ValidatedPaginationArgs};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditLog {
    pub id: AuditEntryId,
    pub actor_id: Option<EmployeeId>,
    /// Dotted action name, e.g. `commission.approved`.
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    pub detail: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// Record an audit entry. `actor_id` is None for system actions.
    pub async fn record(
        actor_id: Option<EmployeeId>,
        action: &str,
        entity_type: &str,
        entity_id: Option<Uuid>,
        detail: serde_json::Value,
        pool: &PgPool,
    ) -> Result<Self> {
        // V7 IDs, generated app-side: the primary key doubles as the
        // pagination cursor.
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO audit_log (id, actor_id, action, entity_type, entity_id, detail)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(AuditEntryId::new())
        .bind(actor_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(detail)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Recent entries, newest first, cursor-paginated (forward only in the UI).
    pub async fn find_paginated(
        args: &ValidatedPaginationArgs,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let rows = if let Some(cursor) = args.cursor {
            sqlx::query_as::<_, Self>(
                "SELECT * FROM audit_log WHERE id < $1 ORDER BY id DESC LIMIT $2",
            )
            .bind(cursor)
            .bind(args.fetch_limit())
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as::<_, Self>("SELECT * FROM audit_log ORDER BY id DESC LIMIT $1")
                .bind(args.fetch_limit())
                .fetch_all(pool)
                .await?
        };
        Ok(rows)
    }

    /// Full trail for one entity, oldest first.
    pub async fn find_for_entity(
        entity_type: &str,
        entity_id: Uuid,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM audit_log
            WHERE entity_type = $1 AND entity_id = $2
            ORDER BY created_at
            "#,
        )
        .bind(entity_type)
        .bind(entity_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Entries by one actor, newest first.
    pub async fn find_by_actor(
        actor_id: EmployeeId,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM audit_log WHERE actor_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(actor_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete entries older than the retention window. Returns rows removed.
    pub async fn prune_older_than_days(days: i64, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM audit_log WHERE created_at < now() - ($1 * interval '1 day')",
        )
        .bind(days)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
