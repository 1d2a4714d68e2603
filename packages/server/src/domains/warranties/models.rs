//! Warranty request management.
//!
//! A warranty request is "open" while field work can still happen; the open
//! state set drives both the ops dashboard and the pending-review worklist.
//! `date_submitted` is nullable: rows imported from the legacy tracker have
//! no submission date and fall back to `created_at` downstream.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{EmployeeId, WarrantyId};

/// Statuses in which a warranty request still needs attention.
pub const OPEN_STATUSES: [&str; 7] = [
    "new",
    "assigned",
    "in_review",
    "scheduled",
    "in_progress",
    "waiting_on_materials",
    "waiting_on_manufacturer",
];

/// Warranty status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarrantyStatus {
    New,
    Assigned,
    InReview,
    Scheduled,
    InProgress,
    WaitingOnMaterials,
    WaitingOnManufacturer,
    Resolved,
    Closed,
    Cancelled,
}

impl WarrantyStatus {
    pub fn is_open(&self) -> bool {
        !matches!(
            self,
            WarrantyStatus::Resolved | WarrantyStatus::Closed | WarrantyStatus::Cancelled
        )
    }
}

impl std::fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WarrantyStatus::New => "new",
            WarrantyStatus::Assigned => "assigned",
            WarrantyStatus::InReview => "in_review",
            WarrantyStatus::Scheduled => "scheduled",
            WarrantyStatus::InProgress => "in_progress",
            WarrantyStatus::WaitingOnMaterials => "waiting_on_materials",
            WarrantyStatus::WaitingOnManufacturer => "waiting_on_manufacturer",
            WarrantyStatus::Resolved => "resolved",
            WarrantyStatus::Closed => "closed",
            WarrantyStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for WarrantyStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(WarrantyStatus::New),
            "assigned" => Ok(WarrantyStatus::Assigned),
            "in_review" => Ok(WarrantyStatus::InReview),
            "scheduled" => Ok(WarrantyStatus::Scheduled),
            "in_progress" => Ok(WarrantyStatus::InProgress),
            "waiting_on_materials" => Ok(WarrantyStatus::WaitingOnMaterials),
            "waiting_on_manufacturer" => Ok(WarrantyStatus::WaitingOnManufacturer),
            "resolved" => Ok(WarrantyStatus::Resolved),
            "closed" => Ok(WarrantyStatus::Closed),
            "cancelled" => Ok(WarrantyStatus::Cancelled),
            _ => Err(anyhow::anyhow!("Invalid warranty status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WarrantyRequest {
    pub id: WarrantyId,
    pub customer_name: String,
    pub property_address: String,
    pub issue: String,
    /// Raw priority from intake: low, medium, high, urgent, emergency.
    pub priority_level: String,
    pub status: String,
    pub date_submitted: Option<DateTime<Utc>>,
    pub assigned_to: Option<EmployeeId>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
    pub created_by: EmployeeId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WarrantyRequest {
    pub async fn create(
        customer_name: &str,
        property_address: &str,
        issue: &str,
        priority_level: &str,
        created_by: EmployeeId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO warranty_requests
                (customer_name, property_address, issue, priority_level, status,
                 date_submitted, created_by)
            VALUES ($1, $2, $3, $4, 'new', now(), $5)
            RETURNING *
            "#,
        )
        .bind(customer_name)
        .bind(property_address)
        .bind(issue)
        .bind(priority_level)
        .bind(created_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: WarrantyId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM warranty_requests WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id_optional(id: WarrantyId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM warranty_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Open warranty requests, oldest submission first. The worklist source.
    pub async fn find_open(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM warranty_requests
            WHERE status = ANY($1)
            ORDER BY COALESCE(date_submitted, created_at)
            LIMIT $2
            "#,
        )
        .bind(&OPEN_STATUSES[..])
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Open requests assigned to one employee.
    pub async fn find_assigned_to(assignee: EmployeeId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM warranty_requests
            WHERE assigned_to = $1 AND status = ANY($2)
            ORDER BY COALESCE(date_submitted, created_at)
            "#,
        )
        .bind(assignee)
        .bind(&OPEN_STATUSES[..])
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn assign(id: WarrantyId, assignee: EmployeeId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE warranty_requests
            SET assigned_to = $2, status = 'assigned', updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(assignee)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn schedule(
        id: WarrantyId,
        scheduled_for: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE warranty_requests
            SET scheduled_for = $2, status = 'scheduled', updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(scheduled_for)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_status(id: WarrantyId, status: WarrantyStatus, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE warranty_requests SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.to_string())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn resolve(id: WarrantyId, resolution: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE warranty_requests
            SET status = 'resolved', resolution = $2, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(resolution)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
