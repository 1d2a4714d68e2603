//! Draw requests: advances taken against an approved commission.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CommissionId, DrawRequestId, EmployeeId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DrawRequest {
    pub id: DrawRequestId,
    pub commission_id: CommissionId,
    pub amount: Decimal,
    pub status: String,
    pub notes: Option<String>,
    pub requested_by: EmployeeId,
    pub decided_by: Option<EmployeeId>,
    pub decided_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DrawRequest {
    pub async fn create(
        commission_id: CommissionId,
        amount: Decimal,
        notes: Option<&str>,
        requested_by: EmployeeId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO draw_requests (commission_id, amount, notes, requested_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(commission_id)
        .bind(amount)
        .bind(notes)
        .bind(requested_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: DrawRequestId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM draw_requests WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_commission(
        commission_id: CommissionId,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM draw_requests WHERE commission_id = $1 ORDER BY created_at",
        )
        .bind(commission_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Open requests awaiting a decision, oldest first.
    pub async fn find_requested(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM draw_requests WHERE status = 'requested' ORDER BY created_at LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Record an approve/deny decision.
    pub async fn mark_decided(
        id: DrawRequestId,
        status: &str,
        decided_by: EmployeeId,
        notes: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE draw_requests
            SET status = $2, decided_by = $3, decided_at = now(),
                notes = COALESCE($4, notes), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(decided_by)
        .bind(notes)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_paid(id: DrawRequestId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE draw_requests
            SET status = 'paid', paid_at = now(), updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Total of live draws (requested, approved, or paid) on a commission.
    /// Denied draws do not count against the cap.
    pub async fn total_outstanding(commission_id: CommissionId, pool: &PgPool) -> Result<Decimal> {
        let (total,): (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM draw_requests
            WHERE commission_id = $1 AND status != 'denied'
            "#,
        )
        .bind(commission_id)
        .fetch_one(pool)
        .await?;
        Ok(total)
    }
}
