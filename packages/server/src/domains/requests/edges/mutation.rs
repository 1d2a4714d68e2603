//! GraphQL mutation resolvers for employee requests

use std::str::FromStr;

use juniper::{FieldError, FieldResult};
use tracing::info;

use crate::common::RequestId;
use crate::domains::audit::models::AuditLog;
use crate::domains::notifications::effects;
use crate::domains::requests::data::{RequestData, SubmitRequestInput};
use crate::domains::requests::models::{EmployeeRequest, RequestStatus};
use crate::server::graphql::context::GraphQLContext;

/// Submit a new request
pub async fn submit_request(
    ctx: &GraphQLContext,
    input: SubmitRequestInput,
) -> FieldResult<RequestData> {
    info!("submit_request mutation called: {}", input.title);
    let employee_id = ctx.state().require_auth()?;

    let request = EmployeeRequest::create(
        input.category.as_str(),
        &input.title,
        &input.description,
        employee_id,
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(employee_id),
        "request.submitted",
        "request",
        Some(request.id.into_uuid()),
        serde_json::json!({ "category": request.category, "title": request.title }),
        &ctx.db_pool,
    )
    .await?;

    ctx.deps().pending_review.refresh_now();

    Ok(RequestData::from(request))
}

/// Ask the submitter for more information (reviewer only)
pub async fn request_more_info(
    ctx: &GraphQLContext,
    id: String,
    note: String,
) -> FieldResult<RequestData> {
    info!("request_more_info mutation called: {}", id);
    let reviewer_id = ctx.state().require_reviewer()?;

    if note.trim().is_empty() {
        return Err(FieldError::new(
            "A note describing the missing information is required",
            juniper::Value::null(),
        ));
    }

    let request_id = RequestId::parse(&id)?;
    let request = EmployeeRequest::find_by_id(request_id, &ctx.db_pool).await?;
    require_status(&request, RequestStatus::Pending, "request more info on")?;

    let request = EmployeeRequest::mark_needs_info(request_id, reviewer_id, &note, &ctx.db_pool)
        .await?;

    AuditLog::record(
        Some(reviewer_id),
        "request.info_requested",
        "request",
        Some(request.id.into_uuid()),
        serde_json::json!({ "note": note }),
        &ctx.db_pool,
    )
    .await?;

    effects::notify_request_reviewed(&request, ctx.deps()).await;
    ctx.deps().pending_review.refresh_now();

    Ok(RequestData::from(request))
}

/// Answer an info request and return the request to the review queue
pub async fn provide_request_info(
    ctx: &GraphQLContext,
    id: String,
    info: String,
) -> FieldResult<RequestData> {
    info!("provide_request_info mutation called: {}", id);
    let employee_id = ctx.state().require_auth()?;

    let request_id = RequestId::parse(&id)?;
    let request = EmployeeRequest::find_by_id(request_id, &ctx.db_pool).await?;
    if request.submitted_by != employee_id {
        return Err(FieldError::new(
            "Unauthorized: not your request",
            juniper::Value::null(),
        ));
    }
    require_status(&request, RequestStatus::NeedsInfo, "provide info on")?;

    let request = EmployeeRequest::provide_info(request_id, &info, &ctx.db_pool).await?;

    AuditLog::record(
        Some(employee_id),
        "request.info_provided",
        "request",
        Some(request.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    ctx.deps().pending_review.refresh_now();

    Ok(RequestData::from(request))
}

/// Approve a pending request (reviewer only)
pub async fn approve_request(ctx: &GraphQLContext, id: String) -> FieldResult<RequestData> {
    info!("approve_request mutation called: {}", id);
    let reviewer_id = ctx.state().require_reviewer()?;

    let request_id = RequestId::parse(&id)?;
    let request = EmployeeRequest::find_by_id(request_id, &ctx.db_pool).await?;
    require_status(&request, RequestStatus::Pending, "approve")?;

    let request = EmployeeRequest::update_status(
        request_id,
        RequestStatus::Approved,
        Some(reviewer_id),
        &ctx.db_pool,
    )
    .await?;

    AuditLog::record(
        Some(reviewer_id),
        "request.approved",
        "request",
        Some(request.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    effects::notify_request_reviewed(&request, ctx.deps()).await;
    ctx.deps().pending_review.refresh_now();

    Ok(RequestData::from(request))
}

/// Reject a pending request with a reason (reviewer only)
pub async fn reject_request(
    ctx: &GraphQLContext,
    id: String,
    reason: String,
) -> FieldResult<RequestData> {
    info!("reject_request mutation called: {}", id);
    let reviewer_id = ctx.state().require_reviewer()?;

    if reason.trim().is_empty() {
        return Err(FieldError::new(
            "A rejection reason is required",
            juniper::Value::null(),
        ));
    }

    let request_id = RequestId::parse(&id)?;
    let request = EmployeeRequest::find_by_id(request_id, &ctx.db_pool).await?;
    require_status(&request, RequestStatus::Pending, "reject")?;

    let request =
        EmployeeRequest::mark_rejected(request_id, reviewer_id, &reason, &ctx.db_pool).await?;

    AuditLog::record(
        Some(reviewer_id),
        "request.rejected",
        "request",
        Some(request.id.into_uuid()),
        serde_json::json!({ "reason": reason }),
        &ctx.db_pool,
    )
    .await?;

    effects::notify_request_reviewed(&request, ctx.deps()).await;
    ctx.deps().pending_review.refresh_now();

    Ok(RequestData::from(request))
}

/// Close a resolved request (submitter or reviewer)
pub async fn close_request(ctx: &GraphQLContext, id: String) -> FieldResult<RequestData> {
    info!("close_request mutation called: {}", id);
    let employee_id = ctx.state().require_auth()?;

    let request_id = RequestId::parse(&id)?;
    let request = EmployeeRequest::find_by_id(request_id, &ctx.db_pool).await?;
    if request.submitted_by != employee_id && !ctx.state().is_reviewer() {
        return Err(FieldError::new(
            "Unauthorized: not your request",
            juniper::Value::null(),
        ));
    }

    let status = RequestStatus::from_str(&request.status)?;
    if matches!(status, RequestStatus::Pending | RequestStatus::Closed) {
        return Err(FieldError::new(
            format!("cannot close a request in status {}", status),
            juniper::Value::null(),
        ));
    }

    let request =
        EmployeeRequest::update_status(request_id, RequestStatus::Closed, None, &ctx.db_pool)
            .await?;

    AuditLog::record(
        Some(employee_id),
        "request.closed",
        "request",
        Some(request.id.into_uuid()),
        serde_json::Value::Null,
        &ctx.db_pool,
    )
    .await?;

    Ok(RequestData::from(request))
}

fn require_status(
    request: &EmployeeRequest,
    expected: RequestStatus,
    action: &str,
) -> FieldResult<()> {
    let status = RequestStatus::from_str(&request.status)?;
    if status != expected {
        return Err(FieldError::new(
            format!("cannot {} a request in status {}", action, status),
            juniper::Value::null(),
        ));
    }
    Ok(())
}
