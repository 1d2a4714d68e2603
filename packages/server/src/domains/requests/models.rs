//! Generic employee requests (IT, HR, facilities).
//!
//! Unlike commissions there is no draft state: a request is live the moment
//! it is submitted. `updated_at` moves on every status change and is the SLA
//! restart date once a request bounces back to its submitter.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{EmployeeId, RequestId};

/// Request status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    NeedsInfo,
    Approved,
    Rejected,
    Closed,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::NeedsInfo => write!(f, "needs_info"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
            RequestStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(RequestStatus::Pending),
            "needs_info" => Ok(RequestStatus::NeedsInfo),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            "closed" => Ok(RequestStatus::Closed),
            _ => Err(anyhow::anyhow!("Invalid request status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeRequest {
    pub id: RequestId,
    pub category: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub info_requested_note: Option<String>,
    pub rejection_reason: Option<String>,
    pub submitted_by: EmployeeId,
    pub reviewed_by: Option<EmployeeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeRequest {
    pub async fn create(
        category: &str,
        title: &str,
        description: &str,
        submitted_by: EmployeeId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO requests (category, title, description, status, submitted_by)
            VALUES ($1, $2, $3, 'pending', $4)
            RETURNING *
            "#,
        )
        .bind(category)
        .bind(title)
        .bind(description)
        .bind(submitted_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: RequestId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id_optional(id: RequestId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM requests WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Caller's own requests, newest first.
    pub async fn find_by_submitter(submitted_by: EmployeeId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM requests WHERE submitted_by = $1 ORDER BY created_at DESC",
        )
        .bind(submitted_by)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Review queue: oldest pending requests first.
    pub async fn find_pending(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM requests WHERE status = 'pending' ORDER BY created_at LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Caller's requests waiting on them (needs_info or rejected), oldest
    /// `updated_at` first.
    pub async fn find_awaiting_submitter(
        submitted_by: EmployeeId,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM requests
            WHERE submitted_by = $1 AND status IN ('needs_info', 'rejected')
            ORDER BY updated_at
            LIMIT $2
            "#,
        )
        .bind(submitted_by)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_status(
        id: RequestId,
        status: RequestStatus,
        reviewed_by: Option<EmployeeId>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE requests
            SET status = $2, reviewed_by = COALESCE($3, reviewed_by), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .bind(reviewed_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_needs_info(
        id: RequestId,
        reviewed_by: EmployeeId,
        note: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE requests
            SET status = 'needs_info', reviewed_by = $2, info_requested_note = $3,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reviewed_by)
        .bind(note)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_rejected(
        id: RequestId,
        reviewed_by: EmployeeId,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE requests
            SET status = 'rejected', reviewed_by = $2, rejection_reason = $3,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reviewed_by)
        .bind(reason)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Submitter answers an info request: appends to the description and
    /// returns the request to the review queue. Restarts the SLA clock.
    pub async fn provide_info(id: RequestId, info: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE requests
            SET status = 'pending',
                description = description || E'\n\n' || $2,
                info_requested_note = NULL,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(info)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_roundtrip() {
        for s in [
            RequestStatus::Pending,
            RequestStatus::NeedsInfo,
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Closed,
        ] {
            assert_eq!(RequestStatus::from_str(&s.to_string()).unwrap(), s);
        }
    }
}
