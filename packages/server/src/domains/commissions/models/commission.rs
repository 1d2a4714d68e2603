//! Commission submission model.
//!
//! `submitted_at` is the original submission timestamp and never moves;
//! `updated_at` moves on every status change and doubles as the SLA restart
//! date for revision-required items.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CommissionId, EmployeeId};
use crate::domains::commissions::machines::CommissionStatus;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Commission {
    pub id: CommissionId,
    pub job_name: String,
    pub customer_name: String,
    pub contract_total: Decimal,
    pub commission_amount: Decimal,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub submitted_by: EmployeeId,
    pub reviewed_by: Option<EmployeeId>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Commission {
    pub async fn create(
        job_name: &str,
        customer_name: &str,
        contract_total: Decimal,
        commission_amount: Decimal,
        status: CommissionStatus,
        submitted_by: EmployeeId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO commissions
                (job_name, customer_name, contract_total, commission_amount, status,
                 submitted_by, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6,
                    CASE WHEN $5 = 'pending_review' THEN now() ELSE NULL END)
            RETURNING *
            "#,
        )
        .bind(job_name)
        .bind(customer_name)
        .bind(contract_total)
        .bind(commission_amount)
        .bind(status.to_string())
        .bind(submitted_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: CommissionId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM commissions WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id_optional(id: CommissionId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM commissions WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Caller's own submissions, newest first.
    pub async fn find_by_submitter(submitted_by: EmployeeId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM commissions WHERE submitted_by = $1 ORDER BY created_at DESC",
        )
        .bind(submitted_by)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Review queue: oldest pending submissions first.
    pub async fn find_pending_review(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM commissions
            WHERE status = 'pending_review'
            ORDER BY created_at
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Caller's submissions bounced back for revision, oldest first.
    pub async fn find_revision_required_for(
        submitted_by: EmployeeId,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM commissions
            WHERE submitted_by = $1 AND status = 'revision_required'
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

    /// Submit a draft for review: stamps `submitted_at`.
    pub async fn mark_submitted(id: CommissionId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE commissions
            SET status = 'pending_review', submitted_at = now(), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Send a revised submission back to the review queue. `updated_at`
    /// restarts the SLA clock; `submitted_at` keeps the original date.
    pub async fn mark_resubmitted(id: CommissionId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE commissions
            SET status = 'pending_review', rejection_reason = NULL, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_approved(
        id: CommissionId,
        reviewed_by: EmployeeId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE commissions
            SET status = 'approved', reviewed_by = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reviewed_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_revision_required(
        id: CommissionId,
        reviewed_by: EmployeeId,
        reason: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE commissions
            SET status = 'revision_required', reviewed_by = $2, rejection_reason = $3,
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

    pub async fn mark_paid(id: CommissionId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE commissions SET status = 'paid', updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
