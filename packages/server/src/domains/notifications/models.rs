//! Per-employee notification settings.
//!
//! One row per employee, created lazily; an employee with no row gets the
//! all-on defaults.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::EmployeeId;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotificationSettings {
    pub employee_id: EmployeeId,
    pub review_emails: bool,
    pub warranty_emails: bool,
    pub feed_emails: bool,
    pub updated_at: DateTime<Utc>,
}

impl NotificationSettings {
    /// Settings for an employee, falling back to the all-on defaults.
    pub async fn get_or_default(employee_id: EmployeeId, pool: &PgPool) -> Result<Self> {
        let row = sqlx::query_as::<_, Self>(
            "SELECT * FROM notification_settings WHERE employee_id = $1",
        )
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.unwrap_or(Self {
            employee_id,
            review_emails: true,
            warranty_emails: true,
            feed_emails: true,
            updated_at: Utc::now(),
        }))
    }

    pub async fn upsert(
        employee_id: EmployeeId,
        review_emails: bool,
        warranty_emails: bool,
        feed_emails: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO notification_settings
                (employee_id, review_emails, warranty_emails, feed_emails)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (employee_id) DO UPDATE
            SET review_emails = EXCLUDED.review_emails,
                warranty_emails = EXCLUDED.warranty_emails,
                feed_emails = EXCLUDED.feed_emails,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(review_emails)
        .bind(warranty_emails)
        .bind(feed_emails)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
