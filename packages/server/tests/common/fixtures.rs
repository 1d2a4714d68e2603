//! Test fixtures for creating test data.
//!
//! Fixtures go through the model methods; the backdating helpers poke
//! timestamps directly so SLA scenarios can be pinned to known dates.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use server_core::common::{CommissionId, EmployeeId, RequestId, WarrantyId};
use server_core::domains::commissions::machines::CommissionStatus;
use server_core::domains::commissions::models::Commission;
use server_core::domains::employees::models::{Employee, EmployeeRole};
use server_core::domains::requests::models::EmployeeRequest;
use server_core::domains::warranties::models::WarrantyRequest;
use sqlx::PgPool;

/// Create an active employee with the given role.
pub async fn create_employee(pool: &PgPool, name: &str, role: EmployeeRole) -> Result<EmployeeId> {
    let employee = Employee::create(
        name,
        &format!("{}@test.example", name.to_lowercase().replace(' ', ".")),
        None,
        role,
        None,
        pool,
    )
    .await?;
    Ok(employee.id)
}

/// Create a commission in pending_review.
pub async fn create_pending_commission(
    pool: &PgPool,
    submitted_by: EmployeeId,
    job_name: &str,
) -> Result<CommissionId> {
    let commission = Commission::create(
        job_name,
        "Test Customer",
        Decimal::new(18_000_00, 2),
        Decimal::new(1_800_00, 2),
        CommissionStatus::PendingReview,
        submitted_by,
        pool,
    )
    .await?;
    Ok(commission.id)
}

/// Create a pending generic request.
pub async fn create_pending_request(
    pool: &PgPool,
    submitted_by: EmployeeId,
    title: &str,
) -> Result<RequestId> {
    let request =
        EmployeeRequest::create("it", title, "Test description", submitted_by, pool).await?;
    Ok(request.id)
}

/// Create a warranty request with the given priority.
pub async fn create_warranty(
    pool: &PgPool,
    created_by: EmployeeId,
    customer: &str,
    priority_level: &str,
) -> Result<WarrantyId> {
    let warranty = WarrantyRequest::create(
        customer,
        "123 Test St",
        "Leak at ridge vent",
        priority_level,
        created_by,
        pool,
    )
    .await?;
    Ok(warranty.id)
}

/// Backdate a commission's timeline (created, submitted, updated).
pub async fn backdate_commission(
    pool: &PgPool,
    id: CommissionId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE commissions
        SET created_at = $2, submitted_at = $2, updated_at = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(created_at)
    .bind(updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Backdate a request's timeline.
pub async fn backdate_request(
    pool: &PgPool,
    id: RequestId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query("UPDATE requests SET created_at = $2, updated_at = $3 WHERE id = $1")
        .bind(id)
        .bind(created_at)
        .bind(updated_at)
        .execute(pool)
        .await?;
    Ok(())
}

/// Set (or clear) a warranty's date_submitted.
pub async fn set_warranty_date_submitted(
    pool: &PgPool,
    id: WarrantyId,
    date_submitted: Option<DateTime<Utc>>,
) -> Result<()> {
    sqlx::query("UPDATE warranty_requests SET date_submitted = $2 WHERE id = $1")
        .bind(id)
        .bind(date_submitted)
        .execute(pool)
        .await?;
    Ok(())
}
