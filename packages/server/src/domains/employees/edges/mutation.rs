//! GraphQL mutation resolvers for the employee directory

use chrono::NaiveDate;
use juniper::FieldResult;
use tracing::info;

use crate::common::EmployeeId;
use crate::domains::audit::models::AuditLog;
use crate::domains::employees::data::{CreateEmployeeInput, EmployeeData, UpdateEmployeeInput};
use crate::domains::employees::models::{Employee, EmployeeRole};
use crate::server::graphql::context::GraphQLContext;

fn role_from_input(role: crate::domains::employees::data::EmployeeRoleData) -> EmployeeRole {
    use crate::domains::employees::data::EmployeeRoleData;
    match role {
        EmployeeRoleData::Admin => EmployeeRole::Admin,
        EmployeeRoleData::Manager => EmployeeRole::Manager,
        EmployeeRoleData::Standard => EmployeeRole::Standard,
    }
}

/// Create an employee record (admin only)
pub async fn create_employee(
    ctx: &GraphQLContext,
    input: CreateEmployeeInput,
) -> FieldResult<EmployeeData> {
    info!("create_employee mutation called: {}", input.email);
    let actor = ctx.state().require_admin()?;

    let hired_at = input
        .hired_at
        .as_deref()
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()?;

    let employee = Employee::create(
        &input.full_name,
        &input.email,
        input.phone.as_deref(),
        role_from_input(input.role),
        hired_at,
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(actor),
        "employee.created",
        "employee",
        Some(employee.id.into_uuid()),
        serde_json::json!({ "email": employee.email, "role": employee.role }),
        &ctx.db_pool,
    )
    .await?;

    Ok(EmployeeData::from(employee))
}

/// Update an employee record (admin only)
pub async fn update_employee(
    ctx: &GraphQLContext,
    id: String,
    input: UpdateEmployeeInput,
) -> FieldResult<EmployeeData> {
    info!("update_employee mutation called: {}", id);
    let actor = ctx.state().require_admin()?;

    let employee_id = EmployeeId::parse(&id)?;
    let employee = Employee::update(
        employee_id,
        &input.full_name,
        input.phone.as_deref(),
        role_from_input(input.role),
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(actor),
        "employee.updated",
        "employee",
        Some(employee.id.into_uuid()),
        serde_json::json!({ "role": employee.role }),
        &ctx.db_pool,
    )
    .await?;

    Ok(EmployeeData::from(employee))
}

/// Deactivate an employee (admin only). The row is kept for history.
pub async fn deactivate_employee(ctx: &GraphQLContext, id: String) -> FieldResult<EmployeeData> {
    info!("deactivate_employee mutation called: {}", id);
    let actor = ctx.state().require_admin()?;

    let employee_id = EmployeeId::parse(&id)?;
    let employee = Employee::set_active(employee_id, false, &ctx.db_pool).await?;

    AuditLog::record(
        Some(actor),
        "employee.deactivated",
        "employee",
        Some(employee.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    Ok(EmployeeData::from(employee))
}

/// Reactivate an employee (admin only)
pub async fn reactivate_employee(ctx: &GraphQLContext, id: String) -> FieldResult<EmployeeData> {
    info!("reactivate_employee mutation called: {}", id);
    let actor = ctx.state().require_admin()?;

    let employee_id = EmployeeId::parse(&id)?;
    let employee = Employee::set_active(employee_id, true, &ctx.db_pool).await?;

    AuditLog::record(
        Some(actor),
        "employee.reactivated",
        "employee",
        Some(employee.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    Ok(EmployeeData::from(employee))
}
