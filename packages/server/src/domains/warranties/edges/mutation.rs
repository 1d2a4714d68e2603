//! GraphQL mutation resolvers for warranty requests

use std::str::FromStr;

use chrono::{DateTime, Utc};
use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::{EmployeeId, WarrantyId};
use crate::domains::audit::models::AuditLog;
use crate::domains::notifications::effects;
use crate::domains::warranties::data::{CreateWarrantyInput, WarrantyData, WarrantyStatusData};
use crate::domains::warranties::models::{WarrantyRequest, WarrantyStatus};
use crate::server::graphql::context::GraphQLContext;

/// File a new warranty request
pub async fn create_warranty(
    ctx: &GraphQLContext,
    input: CreateWarrantyInput,
) -> FieldResult<WarrantyData> {
    info!("create_warranty mutation called: {}", input.customer_name);
    let employee_id = ctx.state().require_auth()?;

    let warranty = WarrantyRequest::create(
        &input.customer_name,
        &input.property_address,
        &input.issue,
        input.priority_level.as_str(),
        employee_id,
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(employee_id),
        "warranty.created",
        "warranty",
        Some(warranty.id.into_uuid()),
        serde_json::json!({
            "customer_name": warranty.customer_name,
            "priority_level": warranty.priority_level,
        }),
        &ctx.db_pool,
    )
    .await?;

    ctx.deps().pending_review.refresh_now();

    Ok(WarrantyData::from(warranty))
}

/// Assign a warranty request to an employee (reviewer only)
pub async fn assign_warranty(
    ctx: &GraphQLContext,
    id: String,
    assignee_id: String,
) -> FieldResult<WarrantyData> {
    info!("assign_warranty mutation called: {}", id);
    let reviewer_id = ctx.state().require_reviewer()?;

    let warranty_id = WarrantyId::parse(&id)?;
    let assignee = EmployeeId::parse(&assignee_id)?;

    let warranty = WarrantyRequest::find_by_id(warranty_id, &ctx.db_pool).await?;
    require_open(&warranty, "assign")?;

    let warranty = WarrantyRequest::assign(warranty_id, assignee, &ctx.db_pool).await?;

    AuditLog::record(
        Some(reviewer_id),
        "warranty.assigned",
        "warranty",
        Some(warranty.id.into_uuid()),
        serde_json::json!({ "assigned_to": assignee }),
        &ctx.db_pool,
    )
    .await?;

    effects::notify_warranty_assigned(&warranty, ctx.deps()).await;
    ctx.deps().pending_review.refresh_now();

    Ok(WarrantyData::from(warranty))
}

/// Put a warranty visit on the calendar (reviewer only)
pub async fn schedule_warranty(
    ctx: &GraphQLContext,
    id: String,
    scheduled_for: DateTime<Utc>,
) -> FieldResult<WarrantyData> {
    info!("schedule_warranty mutation called: {}", id);
    let reviewer_id = ctx.state().require_reviewer()?;

    let warranty_id = WarrantyId::parse(&id)?;
    let warranty = WarrantyRequest::find_by_id(warranty_id, &ctx.db_pool).await?;
    require_open(&warranty, "schedule")?;

    let warranty = WarrantyRequest::schedule(warranty_id, scheduled_for, &ctx.db_pool).await?;

    AuditLog::record(
        Some(reviewer_id),
        "warranty.scheduled",
        "warranty",
        Some(warranty.id.into_uuid()),
        serde_json::json!({ "scheduled_for": scheduled_for }),
        &ctx.db_pool,
    )
    .await?;

    ctx.deps().pending_review.refresh_now();

    Ok(WarrantyData::from(warranty))
}

/// Move a warranty between open statuses (reviewer only)
pub async fn update_warranty_status(
    ctx: &GraphQLContext,
    id: String,
    status: WarrantyStatusData,
) -> FieldResult<WarrantyData> {
    info!("update_warranty_status mutation called: {} -> {:?}", id, status);
    let reviewer_id = ctx.state().require_reviewer()?;

    let next = WarrantyStatus::from_str(status.as_str())?;
    if !next.is_open() {
        return Err(FieldError::new(
            "Use resolve/close/cancel mutations for terminal statuses",
            juniper::Value::null(),
        ));
    }

    let warranty_id = WarrantyId::parse(&id)?;
    let warranty = WarrantyRequest::find_by_id(warranty_id, &ctx.db_pool).await?;
    require_open(&warranty, "update")?;

    let warranty = WarrantyRequest::update_status(warranty_id, next, &ctx.db_pool).await?;

    AuditLog::record(
        Some(reviewer_id),
        "warranty.status_changed",
        "warranty",
        Some(warranty.id.into_uuid()),
        serde_json::json!({ "status": warranty.status }),
        &ctx.db_pool,
    )
    .await?;

    ctx.deps().pending_review.refresh_now();

    Ok(WarrantyData::from(warranty))
}

/// Record the fix and resolve the warranty (reviewer only)
pub async fn resolve_warranty(
    ctx: &GraphQLContext,
    id: String,
    resolution: String,
) -> FieldResult<WarrantyData> {
    info!("resolve_warranty mutation called: {}", id);
    let reviewer_id = ctx.state().require_reviewer()?;

    if resolution.trim().is_empty() {
        return Err(FieldError::new(
            "A resolution description is required",
            juniper::Value::null(),
        ));
    }

    let warranty_id = WarrantyId::parse(&id)?;
    let warranty = WarrantyRequest::find_by_id(warranty_id, &ctx.db_pool).await?;
    require_open(&warranty, "resolve")?;

    let warranty = WarrantyRequest::resolve(warranty_id, &resolution, &ctx.db_pool).await?;

    AuditLog::record(
        Some(reviewer_id),
        "warranty.resolved",
        "warranty",
        Some(warranty.id.into_uuid()),
        serde_json::json!({ "resolution": resolution }),
        &ctx.db_pool,
    )
    .await?;

    ctx.deps().pending_review.refresh_now();

    Ok(WarrantyData::from(warranty))
}

/// Close a resolved warranty (reviewer only)
pub async fn close_warranty(ctx: &GraphQLContext, id: String) -> FieldResult<WarrantyData> {
    transition_terminal(ctx, id, WarrantyStatus::Closed, "warranty.closed").await
}

/// Cancel a warranty request (reviewer only)
pub async fn cancel_warranty(ctx: &GraphQLContext, id: String) -> FieldResult<WarrantyData> {
    transition_terminal(ctx, id, WarrantyStatus::Cancelled, "warranty.cancelled").await
}

async fn transition_terminal(
    ctx: &GraphQLContext,
    id: String,
    status: WarrantyStatus,
    audit_action: &str,
) -> FieldResult<WarrantyData> {
    let reviewer_id = ctx.state().require_reviewer()?;

    let warranty_id = WarrantyId::parse(&id)?;
    let warranty = WarrantyRequest::find_by_id(warranty_id, &ctx.db_pool).await?;

    let current = WarrantyStatus::from_str(&warranty.status)?;
    // Close only after resolution; cancel from any open state.
    let allowed = match status {
        WarrantyStatus::Closed => current == WarrantyStatus::Resolved,
        WarrantyStatus::Cancelled => current.is_open(),
        _ => false,
    };
    if !allowed {
        return Err(FieldError::new(
            format!("cannot move a warranty from {} to {}", current, status),
            juniper::Value::null(),
        ));
    }

    let warranty = WarrantyRequest::update_status(warranty_id, status, &ctx.db_pool).await?;

    AuditLog::record(
        Some(reviewer_id),
        audit_action,
        "warranty",
        Some(warranty.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    ctx.deps().pending_review.refresh_now();

    Ok(WarrantyData::from(warranty))
}

fn require_open(warranty: &WarrantyRequest, action: &str) -> FieldResult<()> {
    let status = WarrantyStatus::from_str(&warranty.status)?;
    if !status.is_open() {
        return Err(FieldError::new(
            format!("cannot {} a warranty in status {}", action, status),
            juniper::Value::null(),
        ));
    }
    Ok(())
}
