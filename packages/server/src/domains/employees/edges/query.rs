//! GraphQL query resolvers for the employee directory

use juniper::FieldResult;
use tracing::info;

use crate::common::EmployeeId;
use crate::domains::employees::data::EmployeeData;
use crate::domains::employees::models::Employee;
use crate::server::graphql::context::GraphQLContext;

/// The authenticated caller's own directory entry
pub async fn me(ctx: &GraphQLContext) -> FieldResult<Option<EmployeeData>> {
    let Some(employee_id) = ctx.state().employee_id else {
        return Ok(None);
    };

    let employee = Employee::find_by_id_optional(employee_id, &ctx.db_pool).await?;
    Ok(employee.map(EmployeeData::from))
}

/// Full active directory (reviewer only)
pub async fn employees(ctx: &GraphQLContext) -> FieldResult<Vec<EmployeeData>> {
    info!("employees query called");
    ctx.state().require_reviewer()?;

    let employees = Employee::find_active(&ctx.db_pool).await?;
    Ok(employees.into_iter().map(EmployeeData::from).collect())
}

/// Single employee by ID (reviewer only)
pub async fn employee(ctx: &GraphQLContext, id: String) -> FieldResult<Option<EmployeeData>> {
    ctx.state().require_reviewer()?;

    let employee_id = EmployeeId::parse(&id)?;
    let employee = Employee::find_by_id_optional(employee_id, &ctx.db_pool).await?;
    Ok(employee.map(EmployeeData::from))
}
