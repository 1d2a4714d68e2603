//! IT app governance: the app catalog and per-employee assignments.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{AppAssignmentId, AppId, EmployeeId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct App {
    pub id: AppId,
    pub name: String,
    pub url: String,
    pub category: String,
    pub owner_id: Option<EmployeeId>,
    /// active, pilot, or deprecated.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AppAssignment {
    pub id: AppAssignmentId,
    pub app_id: AppId,
    pub employee_id: EmployeeId,
    pub granted_by: EmployeeId,
    pub granted_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl App {
    pub async fn create(
        name: &str,
        url: &str,
        category: &str,
        owner_id: Option<EmployeeId>,
        status: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO apps (name, url, category, owner_id, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(url)
        .bind(category)
        .bind(owner_id)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: AppId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM apps WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// The full catalog, deprecated apps last.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM apps
            ORDER BY CASE status WHEN 'deprecated' THEN 1 ELSE 0 END, name
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Apps actively assigned to an employee.
    pub async fn find_for_employee(employee_id: EmployeeId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT a.*
            FROM apps a
            INNER JOIN app_assignments aa ON aa.app_id = a.id
            WHERE aa.employee_id = $1 AND aa.revoked_at IS NULL
            ORDER BY a.name
            "#,
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        id: AppId,
        name: &str,
        url: &str,
        category: &str,
        owner_id: Option<EmployeeId>,
        status: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE apps
            SET name = $2, url = $3, category = $4, owner_id = $5, status = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(url)
        .bind(category)
        .bind(owner_id)
        .bind(status)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

impl AppAssignment {
    /// Grant access. Re-granting while an active assignment exists is a
    /// no-op on the existing row (ON CONFLICT keeps the original grant).
    pub async fn grant(
        app_id: AppId,
        employee_id: EmployeeId,
        granted_by: EmployeeId,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO app_assignments (app_id, employee_id, granted_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (app_id, employee_id) WHERE revoked_at IS NULL DO UPDATE
            SET app_id = EXCLUDED.app_id
            RETURNING *
            "#,
        )
        .bind(app_id)
        .bind(employee_id)
        .bind(granted_by)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn revoke(app_id: AppId, employee_id: EmployeeId, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE app_assignments
            SET revoked_at = now()
            WHERE app_id = $1 AND employee_id = $2 AND revoked_at IS NULL
            "#,
        )
        .bind(app_id)
        .bind(employee_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Active assignments for one app.
    pub async fn find_for_app(app_id: AppId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM app_assignments
            WHERE app_id = $1 AND revoked_at IS NULL
            ORDER BY granted_at
            "#,
        )
        .bind(app_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
