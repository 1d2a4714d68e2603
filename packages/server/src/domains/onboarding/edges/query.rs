//! GraphQL query resolvers for onboarding checklists

use juniper::FieldResult;

use crate::common::EmployeeId;
use crate::domains::onboarding::data::ChecklistItemData;
use crate::domains::onboarding::models::OnboardingTask;
use crate::server::graphql::context::GraphQLContext;

/// The caller's own onboarding checklist
pub async fn my_onboarding_checklist(ctx: &GraphQLContext) -> FieldResult<Vec<ChecklistItemData>> {
    let employee_id = ctx.state().require_auth()?;

    let items = OnboardingTask::checklist_for(employee_id, &ctx.db_pool).await?;
    Ok(items.into_iter().map(ChecklistItemData::from).collect())
}

/// Another employee's checklist (reviewer only)
pub async fn onboarding_checklist(
    ctx: &GraphQLContext,
    employee_id: String,
) -> FieldResult<Vec<ChecklistItemData>> {
    ctx.state().require_reviewer()?;

    let employee_id = EmployeeId::parse(&employee_id)?;
    let items = OnboardingTask::checklist_for(employee_id, &ctx.db_pool).await?;
    Ok(items.into_iter().map(ChecklistItemData::from).collect())
}
