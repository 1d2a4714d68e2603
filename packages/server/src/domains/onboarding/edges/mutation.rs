//! GraphQL mutation resolvers for onboarding checklists

use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::{EmployeeId, OnboardingTaskId};
use crate::domains::audit::models::AuditLog;
use crate::domains::onboarding::data::{OnboardingTaskData, OnboardingTaskInput};
use crate::domains::onboarding::models::OnboardingTask;
use crate::server::graphql::context::GraphQLContext;

/// Create an onboarding task template (admin only)
pub async fn create_onboarding_task(
    ctx: &GraphQLContext,
    input: OnboardingTaskInput,
) -> FieldResult<OnboardingTaskData> {
    info!("create_onboarding_task mutation called: {}", input.title);
    let actor = ctx.state().require_admin()?;

    let task = OnboardingTask::create(
        &input.title,
        &input.description,
        &input.audience,
        input.sort_order,
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(actor),
        "onboarding.task_created",
        "onboarding_task",
        Some(task.id.into_uuid()),
        serde_json::json!({ "title": task.title }),
        &ctx.db_pool,
    )
    .await?;

    Ok(OnboardingTaskData::from(task))
}

/// Update an onboarding task template (admin only)
pub async fn update_onboarding_task(
    ctx: &GraphQLContext,
    id: String,
    input: OnboardingTaskInput,
) -> FieldResult<OnboardingTaskData> {
    info!("update_onboarding_task mutation called: {}", id);
    let actor = ctx.state().require_admin()?;

    let task_id = OnboardingTaskId::parse(&id)?;
    let task = OnboardingTask::update(
        task_id,
        &input.title,
        &input.description,
        &input.audience,
        input.sort_order,
        input.active.unwrap_or(true),
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(actor),
        "onboarding.task_updated",
        "onboarding_task",
        Some(task.id.into_uuid()),
        serde_json::json!({ "title": task.title, "active": task.active }),
        &ctx.db_pool,
    )
    .await?;

    Ok(OnboardingTaskData::from(task))
}

/// Check off an onboarding task. Employees complete their own items;
/// reviewers can complete on someone's behalf.
pub async fn complete_onboarding_task(
    ctx: &GraphQLContext,
    task_id: String,
    employee_id: Option<String>,
) -> FieldResult<bool> {
    let actor = ctx.state().require_auth()?;

    let task_id = OnboardingTaskId::parse(&task_id)?;
    let target = match employee_id {
        Some(id) => EmployeeId::parse(&id)?,
        None => actor,
    };
    if target != actor && !ctx.state().is_reviewer() {
        return Err(FieldError::new(
            "Unauthorized: cannot complete another employee's task",
            juniper::Value::null(),
        ));
    }

    OnboardingTask::complete_for(task_id, target, actor, &ctx.db_pool).await?;

    AuditLog::record(
        Some(actor),
        "onboarding.task_completed",
        "onboarding_task",
        Some(task_id.into_uuid()),
        serde_json::json!({ "employee_id": target }),
        &ctx.db_pool,
    )
    .await?;

    Ok(true)
}

/// Reopen a completed onboarding task (reviewer only)
pub async fn reopen_onboarding_task(
    ctx: &GraphQLContext,
    task_id: String,
    employee_id: String,
) -> FieldResult<bool> {
    let actor = ctx.state().require_reviewer()?;

    let task_id = OnboardingTaskId::parse(&task_id)?;
    let employee_id = EmployeeId::parse(&employee_id)?;

    let reopened = OnboardingTask::reopen_for(task_id, employee_id, &ctx.db_pool).await?;

    AuditLog::record(
        Some(actor),
        "onboarding.task_reopened",
        "onboarding_task",
        Some(task_id.into_uuid()),
        serde_json::json!({ "employee_id": employee_id }),
        &ctx.db_pool,
    )
    .await?;

    Ok(reopened > 0)
}
