//! Onboarding checklists: task templates plus per-employee completion rows.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{EmployeeId, OnboardingTaskId};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OnboardingTask {
    pub id: OnboardingTaskId,
    pub title: String,
    pub description: String,
    /// Which employees the task applies to: all, field, or office.
    pub audience: String,
    pub sort_order: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task joined with one employee's completion state.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChecklistItem {
    pub id: OnboardingTaskId,
    pub title: String,
    pub description: String,
    pub audience: String,
    pub sort_order: i32,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<EmployeeId>,
}

impl OnboardingTask {
    pub async fn create(
        title: &str,
        description: &str,
        audience: &str,
        sort_order: i32,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO onboarding_tasks (title, description, audience, sort_order)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(audience)
        .bind(sort_order)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: OnboardingTaskId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM onboarding_tasks WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn update(
        id: OnboardingTaskId,
        title: &str,
        description: &str,
        audience: &str,
        sort_order: i32,
        active: bool,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE onboarding_tasks
            SET title = $2, description = $3, audience = $4, sort_order = $5,
                active = $6, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(audience)
        .bind(sort_order)
        .bind(active)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// One employee's checklist: active tasks LEFT JOINed with their
    /// completion rows, checklist order.
    pub async fn checklist_for(employee_id: EmployeeId, pool: &PgPool) -> Result<Vec<ChecklistItem>> {
        sqlx::query_as::<_, ChecklistItem>(
            r#"
            SELECT t.id, t.title, t.description, t.audience, t.sort_order,
                   c.completed_at, c.completed_by
            FROM onboarding_tasks t
            LEFT JOIN onboarding_completions c
                   ON c.task_id = t.id AND c.employee_id = $1
            WHERE t.active = true
            ORDER BY t.sort_order, t.created_at
            "#,
        )
        .bind(employee_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark a task complete for an employee. Idempotent: completing twice
    /// keeps the original completion.
    pub async fn complete_for(
        task_id: OnboardingTaskId,
        employee_id: EmployeeId,
        completed_by: EmployeeId,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO onboarding_completions (task_id, employee_id, completed_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (task_id, employee_id) DO NOTHING
            "#,
        )
        .bind(task_id)
        .bind(employee_id)
        .bind(completed_by)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Reopen a completed task for an employee.
    pub async fn reopen_for(
        task_id: OnboardingTaskId,
        employee_id: EmployeeId,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM onboarding_completions WHERE task_id = $1 AND employee_id = $2",
        )
        .bind(task_id)
        .bind(employee_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
