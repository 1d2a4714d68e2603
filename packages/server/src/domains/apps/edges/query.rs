//! GraphQL query resolvers for app governance

use juniper::FieldResult;

use crate::common::AppId;
use crate::domains::apps::data::{AppAssignmentData, AppData};
use crate::domains::apps::models::{App, AppAssignment};
use crate::server::graphql::context::GraphQLContext;

/// The full app catalog
pub async fn app_catalog(ctx: &GraphQLContext) -> FieldResult<Vec<AppData>> {
    ctx.state().require_auth()?;

    let apps = App::find_all(&ctx.db_pool).await?;
    Ok(apps.into_iter().map(AppData::from).collect())
}

/// Apps currently assigned to the caller
pub async fn my_apps(ctx: &GraphQLContext) -> FieldResult<Vec<AppData>> {
    let employee_id = ctx.state().require_auth()?;

    let apps = App::find_for_employee(employee_id, &ctx.db_pool).await?;
    Ok(apps.into_iter().map(AppData::from).collect())
}

/// Active assignments for one app (admin only)
pub async fn app_assignments(
    ctx: &GraphQLContext,
    app_id: String,
) -> FieldResult<Vec<AppAssignmentData>> {
    ctx.state().require_admin()?;

    let app_id = AppId::parse(&app_id)?;
    let assignments = AppAssignment::find_for_app(app_id, &ctx.db_pool).await?;
    Ok(assignments.into_iter().map(AppAssignmentData::from).collect())
}
