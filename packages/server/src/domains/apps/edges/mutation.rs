//! GraphQL mutation resolvers for app governance (admin only)

use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::{AppId, EmployeeId};
use crate::domains::apps::data::{AppAssignmentData, AppData, AppInput};
use crate::domains::apps::models::{App, AppAssignment};
use crate::domains::audit::models::AuditLog;
use crate::server::graphql::context::GraphQLContext;

fn parse_owner(owner_id: &Option<String>) -> FieldResult<Option<EmployeeId>> {
    owner_id
        .as_deref()
        .map(EmployeeId::parse)
        .transpose()
        .map_err(Into::into)
}

/// Add an app to the catalog (admin only)
pub async fn create_app(ctx: &GraphQLContext, input: AppInput) -> FieldResult<AppData> {
    info!("create_app mutation called: {}", input.name);
    let actor = ctx.state().require_admin()?;

    let app = App::create(
        &input.name,
        &input.url,
        &input.category,
        parse_owner(&input.owner_id)?,
        input.status.as_str(),
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(actor),
        "app.created",
        "app",
        Some(app.id.into_uuid()),
        serde_json::json!({ "name": app.name }),
        &ctx.db_pool,
    )
    .await?;

    Ok(AppData::from(app))
}

/// Update a catalog app (admin only)
pub async fn update_app(ctx: &GraphQLContext, id: String, input: AppInput) -> FieldResult<AppData> {
    info!("update_app mutation called: {}", id);
    let actor = ctx.state().require_admin()?;

    let app_id = AppId::parse(&id)?;
    let app = App::update(
        app_id,
        &input.name,
        &input.url,
        &input.category,
        parse_owner(&input.owner_id)?,
        input.status.as_str(),
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(actor),
        "app.updated",
        "app",
        Some(app.id.into_uuid()),
        serde_json::json!({ "name": app.name, "status": app.status }),
        &ctx.db_pool,
    )
    .await?;

    Ok(AppData::from(app))
}

/// Grant an employee access to an app (admin only)
pub async fn assign_app(
    ctx: &GraphQLContext,
    app_id: String,
    employee_id: String,
) -> FieldResult<AppAssignmentData> {
    info!("assign_app mutation called: {} -> {}", app_id, employee_id);
    let actor = ctx.state().require_admin()?;

    let app_id = AppId::parse(&app_id)?;
    let employee_id = EmployeeId::parse(&employee_id)?;

    let assignment = AppAssignment::grant(app_id, employee_id, actor, &ctx.db_pool).await?;

    AuditLog::record(
        Some(actor),
        "app.assigned",
        "app",
        Some(app_id.into_uuid()),
        serde_json::json!({ "employee_id": employee_id }),
        &ctx.db_pool,
    )
    .await?;

    Ok(AppAssignmentData::from(assignment))
}

/// Revoke an employee's access to an app (admin only)
pub async fn revoke_app(
    ctx: &GraphQLContext,
    app_id: String,
    employee_id: String,
) -> FieldResult<bool> {
    info!("revoke_app mutation called: {} -> {}", app_id, employee_id);
    let actor = ctx.state().require_admin()?;

    let app_id = AppId::parse(&app_id)?;
    let employee_id = EmployeeId::parse(&employee_id)?;

    let revoked = AppAssignment::revoke(app_id, employee_id, &ctx.db_pool).await?;
    if revoked == 0 {
        return Err(FieldError::new(
            "No active assignment to revoke",
            juniper::Value::null(),
        ));
    }

    AuditLog::record(
        Some(actor),
        "app.revoked",
        "app",
        Some(app_id.into_uuid()),
        serde_json::json!({ "employee_id": employee_id }),
        &ctx.db_pool,
    )
    .await?;

    Ok(true)
}
