//! Employee directory.
//!
//! Roles mirror the portal's three-tier model: admins run the company,
//! managers review submissions, everyone else is a standard user.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::EmployeeId;

/// Employee role enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Admin,
    Manager,
    Standard,
}

impl std::fmt::Display for EmployeeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeRole::Admin => write!(f, "admin"),
            EmployeeRole::Manager => write!(f, "manager"),
            EmployeeRole::Standard => write!(f, "standard"),
        }
    }
}

impl std::str::FromStr for EmployeeRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "admin" => Ok(EmployeeRole::Admin),
            "manager" => Ok(EmployeeRole::Manager),
            "standard" => Ok(EmployeeRole::Standard),
            _ => Err(anyhow::anyhow!("Invalid employee role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub hired_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub async fn create(
        full_name: &str,
        email: &str,
        phone: Option<&str>,
        role: EmployeeRole,
        hired_at: Option<NaiveDate>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO employees (full_name, email, phone, role, hired_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(phone)
        .bind(role.to_string())
        .bind(hired_at)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: EmployeeId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id_optional(id: EmployeeId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM employees WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Active employees, directory order.
    pub async fn find_active(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM employees WHERE is_active = true ORDER BY full_name",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Active reviewers (admins and managers), used for notification fan-out.
    pub async fn find_reviewers(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM employees
            WHERE is_active = true AND role IN ('admin', 'manager')
            ORDER BY full_name
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update(
        id: EmployeeId,
        full_name: &str,
        phone: Option<&str>,
        role: EmployeeRole,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE employees
            SET full_name = $2, phone = $3, role = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(phone)
        .bind(role.to_string())
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Deactivated employees keep their rows (history) but fail auth.
    pub async fn set_active(id: EmployeeId, is_active: bool, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE employees SET is_active = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_active)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub fn is_reviewer(&self) -> bool {
        matches!(self.role.as_str(), "admin" | "manager")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_roundtrip() {
        for role in [
            EmployeeRole::Admin,
            EmployeeRole::Manager,
            EmployeeRole::Standard,
        ] {
            assert_eq!(EmployeeRole::from_str(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(EmployeeRole::from_str("superuser").is_err());
    }
}
